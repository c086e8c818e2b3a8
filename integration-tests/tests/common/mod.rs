use std::cell::Cell;

use anchor_lang::error::ErrorCode;
use anchor_lang::AccountSerialize;
use derive_more::{Deref, DerefMut};
use ideaproof_client::{
    AccountFilter, Content, Delivery, Ledger, LedgerClient, MintError, MintReceipt, MintRequest,
    Minter, TransportError,
};
use ideaproof_std::error::IdeaProofError;
use ideaproof_std::instruction::RecordIdea;
use ideaproof_std::record::{IdeaRecord, IDEA_RECORD_SPACE};
use ideaproof_std::{HASH_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use litesvm::LiteSVM;
use rand::random;
use solana_sdk::account::Account;
use solana_sdk::clock::Clock;
use solana_sdk::instruction::{Instruction, InstructionError};
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::rent::Rent;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::system_instruction::SystemError;
use solana_sdk::transaction::{Transaction, TransactionError};

pub const START_TIMESTAMP: i64 = 1_700_000_000;

/// Ledger that runs `record_idea` against LiteSVM accounts the way the
/// deployed program does: create once at the derived address, stamp with the
/// cluster clock, reject bad lengths.
#[derive(Deref, DerefMut)]
pub struct SimulatedLedger {
    #[deref]
    #[deref_mut]
    svm: LiteSVM,
    records: Vec<Pubkey>,
    offline: bool,
    deliveries: usize,
    reads: Cell<usize>,
}

impl Default for SimulatedLedger {
    fn default() -> Self {
        let mut ledger = Self {
            svm: LiteSVM::new(),
            records: Vec::new(),
            offline: false,
            deliveries: 0,
            reads: Cell::new(0),
        };
        ledger.warp_to_timestamp(START_TIMESTAMP);

        ledger
    }
}

impl SimulatedLedger {
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Transactions handed to the ledger, accepted or not.
    pub fn deliveries(&self) -> usize {
        self.deliveries
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn now(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }

    pub fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp = unix_timestamp;

        self.svm.set_sysvar(&clock);
    }

    pub fn advance(&mut self, seconds: i64) {
        self.warp_to_timestamp(self.now() + seconds);
    }

    fn unreachable() -> TransportError {
        TransportError::new("connection refused")
    }

    fn record_idea(
        &mut self,
        instruction: &Instruction,
        signers: &[&Keypair],
    ) -> Result<(), InstructionError> {
        if instruction.program_id != ideaproof_std::ID {
            return Err(InstructionError::IncorrectProgramId);
        }
        let args = RecordIdea::try_from_data(&instruction.data)
            .map_err(|_| InstructionError::Custom(ErrorCode::InstructionDidNotDeserialize as u32))?;
        let [submitter, idea_record, ..] = instruction.accounts.as_slice() else {
            return Err(InstructionError::Custom(ErrorCode::AccountNotEnoughKeys as u32));
        };
        let signed = signers
            .iter()
            .any(|signer| signer.pubkey() == submitter.pubkey);
        if !submitter.is_signer || !signed {
            return Err(InstructionError::Custom(ErrorCode::AccountNotSigner as u32));
        }

        if args.idea_hash.len() != HASH_LEN {
            return Err(InstructionError::Custom(
                IdeaProofError::InvalidHashLength.into(),
            ));
        }
        let (address, bump) =
            IdeaRecord::pda(&args.idea_hash, &submitter.pubkey, &instruction.program_id);
        if idea_record.pubkey != address {
            return Err(InstructionError::Custom(ErrorCode::ConstraintSeeds as u32));
        }
        if self.svm.get_account(&address).is_some_and(|account| account.lamports > 0) {
            return Err(InstructionError::Custom(
                SystemError::AccountAlreadyInUse as u32,
            ));
        }
        if args.title.as_ref().is_some_and(|title| title.len() > MAX_TITLE_LEN) {
            return Err(InstructionError::Custom(IdeaProofError::TitleTooLong.into()));
        }
        if args
            .description
            .as_ref()
            .is_some_and(|description| description.len() > MAX_DESCRIPTION_LEN)
        {
            return Err(InstructionError::Custom(
                IdeaProofError::DescriptionTooLong.into(),
            ));
        }

        let rent = self.svm.get_sysvar::<Rent>().minimum_balance(IDEA_RECORD_SPACE);
        let mut payer = self.svm.get_account(&submitter.pubkey).unwrap_or_default();
        if payer.lamports < rent {
            return Err(InstructionError::Custom(
                SystemError::ResultWithNegativeLamports as u32,
            ));
        }
        payer.lamports -= rent;

        let record = IdeaRecord {
            idea_hash: args.idea_hash,
            submitter: submitter.pubkey,
            timestamp: self.now(),
            file_type: args.file_type,
            title: args.title,
            description: args.description,
            bump,
        };
        let mut data = Vec::with_capacity(IDEA_RECORD_SPACE);
        record.try_serialize(&mut data).unwrap();
        data.resize(IDEA_RECORD_SPACE, 0);

        self.svm.set_account(submitter.pubkey, payer).unwrap();
        self.svm
            .set_account(
                address,
                Account {
                    lamports: rent,
                    data,
                    owner: instruction.program_id,
                    executable: false,
                    rent_epoch: 0,
                },
            )
            .unwrap();
        self.records.push(address);

        Ok(())
    }
}

impl Ledger for SimulatedLedger {
    /// `record_idea` instructions run in the simulation; everything else
    /// (token programs) executes in LiteSVM.
    fn deliver(&mut self, instructions: &[Instruction], signers: &[&Keypair]) -> Delivery {
        self.deliveries += 1;
        if self.offline {
            return Delivery::Unreachable(Self::unreachable());
        }
        let Some(payer) = signers.first() else {
            return Delivery::Rejected(TransactionError::SignatureFailure);
        };

        let mut transaction =
            Transaction::new_unsigned(Message::new(instructions, Some(&payer.pubkey())));
        if transaction
            .try_sign(signers, self.svm.latest_blockhash())
            .is_err()
        {
            return Delivery::Rejected(TransactionError::SignatureFailure);
        }
        let signature: Signature = transaction.signatures[0];

        let result = if instructions
            .iter()
            .any(|instruction| instruction.program_id == ideaproof_std::ID)
        {
            instructions
                .iter()
                .enumerate()
                .try_for_each(|(index, instruction)| {
                    self.record_idea(instruction, signers)
                        .map_err(|error| TransactionError::InstructionError(index as u8, error))
                })
        } else {
            self.svm
                .send_transaction(transaction)
                .map(|_| ())
                .map_err(|failed| failed.err)
        };
        self.svm.expire_blockhash();

        match result {
            Ok(()) => Delivery::Confirmed(signature),
            Err(error) => Delivery::Rejected(error),
        }
    }

    fn minimum_balance(&self, data_len: usize) -> Result<u64, TransportError> {
        if self.offline {
            return Err(Self::unreachable());
        }

        Ok(self.svm.get_sysvar::<Rent>().minimum_balance(data_len))
    }

    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
        self.reads.set(self.reads.get() + 1);
        if self.offline {
            return Err(Self::unreachable());
        }

        Ok(self.svm.get_account(address))
    }

    fn scan_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, TransportError> {
        self.reads.set(self.reads.get() + 1);
        if self.offline {
            return Err(Self::unreachable());
        }

        Ok(self
            .records
            .iter()
            .filter_map(|address| Some((*address, self.svm.get_account(address)?)))
            .filter(|(_, account)| &account.owner == program_id)
            .filter(|(_, account)| filters.iter().all(|filter| filter.matches(&account.data)))
            .collect())
    }
}

#[derive(Deref, DerefMut)]
pub struct Context {
    #[deref]
    #[deref_mut]
    pub client: LedgerClient<SimulatedLedger>,
    pub submitter: Keypair,
    pub stranger: Keypair,
}

impl Default for Context {
    fn default() -> Self {
        let mut ledger = SimulatedLedger::default();
        let submitter = Keypair::new();
        let stranger = Keypair::new();

        ledger.airdrop(&submitter.pubkey(), sol_amount(10.0)).unwrap();
        ledger.airdrop(&stranger.pubkey(), sol_amount(10.0)).unwrap();

        Self {
            client: LedgerClient::new(ledger),
            submitter,
            stranger,
        }
    }
}

impl Context {
    pub fn advance(&mut self, seconds: i64) {
        self.ledger_mut().advance(seconds);
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.ledger_mut().set_offline(offline);
    }

    pub fn deliveries(&self) -> usize {
        self.ledger().deliveries()
    }

    pub fn reads(&self) -> usize {
        self.ledger().reads()
    }
}

pub fn sol_amount(amount: f64) -> u64 {
    (amount * 1_000_000_000.0) as u64
}

pub fn rand_content() -> Content {
    Content::Bytes(random::<[u8; 32]>().to_vec())
}

/// Minter whose service is down.
pub struct FailingMinter;

impl Minter for FailingMinter {
    fn mint(
        &mut self,
        _: &mut dyn Ledger,
        _: &Keypair,
        _: &MintRequest,
    ) -> Result<MintReceipt, MintError> {
        Err(MintError::Upload("storage node timed out".to_string()))
    }
}

/// Minter that accepts everything and remembers what it was asked for.
#[derive(Default)]
pub struct RecordingMinter {
    pub requests: Vec<MintRequest>,
}

impl Minter for RecordingMinter {
    fn mint(
        &mut self,
        _: &mut dyn Ledger,
        signer: &Keypair,
        request: &MintRequest,
    ) -> Result<MintReceipt, MintError> {
        assert_eq!(signer.pubkey(), request.creator);
        self.requests.push(request.clone());

        Ok(MintReceipt {
            mint_address: Pubkey::new_unique(),
            token_account: Pubkey::new_unique(),
            metadata_uri: format!("https://arweave.net/{}", request.fingerprint),
        })
    }
}
