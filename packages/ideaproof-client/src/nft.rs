//! Token-2022 minter.
//!
//! The NFT is a zero-decimal Token-2022 mint whose metadata lives in the mint
//! account itself (metadata pointer plus token metadata extensions). The JSON
//! document goes to a [`MetadataStore`] and the on-chain `uri` points at it.
//! One token is minted to the creator's associated token account and the
//! mint authority is then revoked, so the supply stays at one.

use solana_sdk::instruction::Instruction;
use solana_sdk::program_error::ProgramError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_associated_token_account::instruction::create_associated_token_account;
use spl_token_2022::extension::{metadata_pointer, ExtensionType};
use spl_token_2022::instruction::{initialize_mint2, mint_to, set_authority, AuthorityType};
use spl_token_2022::state::Mint;
use spl_token_metadata_interface::state::{Field, TokenMetadata};
use tracing::{debug, info, instrument};

use crate::ledger::{Delivery, Ledger};
use crate::mint::{MintError, MintReceipt, MintRequest, Minter};
use crate::storage::{image_kind, MetadataStore};

pub const SYMBOL: &str = "IDEA";

pub struct TokenMinter<S> {
    store: S,
}

impl<S: MetadataStore> TokenMinter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores the image, then the document referencing it. Returns the
    /// document URI.
    fn publish(&mut self, request: &MintRequest) -> Result<String, MintError> {
        let image_uri = match &request.image {
            Some(image) => {
                let (extension, content_type) = image_kind(image);
                let name = format!("{}.{extension}", request.fingerprint);
                Some(self.store.put(&name, content_type, image.clone())?)
            }
            None => None,
        };
        let document = request
            .metadata(image_uri)
            .to_json()
            .map_err(|error| MintError::Upload(error.to_string()))?;

        self.store.put(
            &format!("{}.json", request.fingerprint),
            "application/json",
            document.into_bytes(),
        )
    }
}

impl<S: MetadataStore> Minter for TokenMinter<S> {
    #[instrument(skip_all, fields(fingerprint = %request.fingerprint))]
    fn mint(
        &mut self,
        ledger: &mut dyn Ledger,
        signer: &Keypair,
        request: &MintRequest,
    ) -> Result<MintReceipt, MintError> {
        let uri = self.publish(request)?;
        debug!(%uri, "metadata published");

        let mint = Keypair::new();
        let creator = signer.pubkey();
        let metadata = token_metadata(mint.pubkey(), request, uri.clone());

        let space = ExtensionType::try_calculate_account_len::<Mint>(&[
            ExtensionType::MetadataPointer,
        ])
        .map_err(mint_error)?;
        let lamports = ledger
            .minimum_balance(space + metadata.tlv_size_of().map_err(mint_error)?)
            .map_err(|error| MintError::Mint(error.to_string()))?;

        let create = create_mint_instructions(&creator, &metadata, space, lamports)
            .map_err(mint_error)?;
        send(ledger, &create, &[signer, &mint])?;

        let (token_account, issue) = issue_instructions(&creator, &metadata.mint)
            .map_err(mint_error)?;
        let signature = send(ledger, &issue, &[signer])?;
        info!(mint = %metadata.mint, %signature, "nft issued");

        Ok(MintReceipt {
            mint_address: metadata.mint,
            token_account,
            metadata_uri: uri,
        })
    }
}

/// On-chain metadata: name, symbol and URI plus the fingerprint and the
/// form fields as additional entries.
pub fn token_metadata(mint: Pubkey, request: &MintRequest, uri: String) -> TokenMetadata {
    TokenMetadata {
        mint,
        name: request.name.clone(),
        symbol: SYMBOL.to_string(),
        uri,
        additional_metadata: vec![
            ("hash".to_string(), request.fingerprint.to_string()),
            ("category".to_string(), request.category.clone()),
            ("license".to_string(), request.license.clone()),
        ],
        ..Default::default()
    }
}

/// Creates the mint account with its metadata. `creator` pays and holds the
/// mint and update authorities; the mint keypair must co-sign.
pub fn create_mint_instructions(
    creator: &Pubkey,
    metadata: &TokenMetadata,
    space: usize,
    lamports: u64,
) -> Result<Vec<Instruction>, ProgramError> {
    let token_program = spl_token_2022::id();
    let mint = &metadata.mint;

    let mut instructions = vec![
        solana_system_interface::instruction::create_account(
            creator,
            mint,
            lamports,
            space as u64,
            &token_program,
        ),
        metadata_pointer::instruction::initialize(
            &token_program,
            mint,
            Some(*creator),
            Some(*mint),
        )?,
        initialize_mint2(&token_program, mint, creator, None, 0)?,
        spl_token_metadata_interface::instruction::initialize(
            &token_program,
            mint,
            creator,
            mint,
            creator,
            metadata.name.clone(),
            metadata.symbol.clone(),
            metadata.uri.clone(),
        ),
    ];
    instructions.extend(metadata.additional_metadata.iter().map(|(key, value)| {
        spl_token_metadata_interface::instruction::update_field(
            &token_program,
            mint,
            creator,
            Field::Key(key.clone()),
            value.clone(),
        )
    }));

    Ok(instructions)
}

/// Mints the single token to the creator's associated account and revokes
/// the mint authority.
pub fn issue_instructions(
    creator: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, Vec<Instruction>), ProgramError> {
    let token_program = spl_token_2022::id();
    let token_account = get_associated_token_address_with_program_id(creator, mint, &token_program);

    let instructions = vec![
        create_associated_token_account(creator, creator, mint, &token_program),
        mint_to(&token_program, mint, &token_account, creator, &[], 1)?,
        set_authority(
            &token_program,
            mint,
            None,
            AuthorityType::MintTokens,
            creator,
            &[],
        )?,
    ];

    Ok((token_account, instructions))
}

fn send(
    ledger: &mut dyn Ledger,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<Signature, MintError> {
    match ledger.deliver(instructions, signers) {
        Delivery::Confirmed(signature) => Ok(signature),
        Delivery::Rejected(error) => Err(MintError::Mint(error.to_string())),
        Delivery::Unreachable(error) => Err(MintError::Mint(error.to_string())),
    }
}

fn mint_error(error: ProgramError) -> MintError {
    MintError::Mint(error.to_string())
}
