use chrono::{DateTime, Utc};
use derive_new::new;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use tracing::{info, instrument, warn};

use crate::client::{LedgerClient, RecordMetadata, RecordReceipt};
use crate::error::{Error, InputError, Result};
use crate::fingerprint::{Content, Fingerprint};
use crate::ledger::Ledger;
use crate::mint::{MintError, MintReceipt, MintRequest, Minter, NAME_PREFIX};

/// Asks for an NFT to be minted once the record is on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct MintOptions {
    pub category: String,
    pub license: String,
    pub image: Option<Vec<u8>>,
}

impl MintOptions {
    fn validate(&self) -> Result<(), InputError> {
        if self.category.trim().is_empty() {
            return Err(InputError::MissingCategory);
        }
        if self.license.trim().is_empty() {
            return Err(InputError::MissingLicense);
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct SubmitRequest {
    pub content: Content,
    pub metadata: RecordMetadata,
    pub mint: Option<MintOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MintOutcome {
    NotRequested,
    Minted(MintReceipt),
    Failed(MintError),
}

impl MintOutcome {
    pub fn is_minted(&self) -> bool {
        matches!(self, MintOutcome::Minted(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MintOutcome::Failed(_))
    }
}

/// Result of a submission whose record reached the ledger. The mint outcome
/// is reported separately; a failed mint leaves the record valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReport {
    pub fingerprint: Fingerprint,
    pub receipt: RecordReceipt,
    pub submitted_at: DateTime<Utc>,
    pub mint: MintOutcome,
}

/// Records `request.content` for `identity`, then mints if asked to.
///
/// Every local check (identity, input, mint options, metadata limits, hash
/// format) runs before the first round trip.
#[instrument(skip_all)]
pub fn submit<L: Ledger>(
    client: &mut LedgerClient<L>,
    identity: Option<&Keypair>,
    minter: Option<&mut dyn Minter>,
    request: &SubmitRequest,
) -> Result<SubmissionReport> {
    let signer = identity.ok_or(Error::IdentityRequired)?;
    if let Some(options) = &request.mint {
        options.validate()?;
    }
    request.metadata.validate()?;

    let fingerprint = request.content.fingerprint()?;
    let receipt = client.submit(&fingerprint, signer, &request.metadata)?;
    let submitted_at = Utc::now();

    let mint = match &request.mint {
        None => MintOutcome::NotRequested,
        Some(options) => {
            let mint_request = MintRequest::new(
                signer.pubkey(),
                format!("{NAME_PREFIX}{}", submitted_at.timestamp_millis()),
                request.content.summary(),
                fingerprint.clone(),
                submitted_at,
                options.category.clone(),
                options.license.clone(),
                options.image.clone(),
            );
            let result = match minter {
                Some(minter) => minter.mint(client.ledger_mut(), signer, &mint_request),
                None => Err(MintError::Unavailable),
            };
            mint_outcome(result, &mint_request)
        }
    };

    Ok(SubmissionReport {
        fingerprint,
        receipt,
        submitted_at,
        mint,
    })
}

fn mint_outcome(result: Result<MintReceipt, MintError>, request: &MintRequest) -> MintOutcome {
    match result {
        Ok(receipt) => {
            info!(mint = %receipt.mint_address, uri = %receipt.metadata_uri, "nft minted");
            MintOutcome::Minted(receipt)
        }
        Err(error) => {
            warn!(%error, fingerprint = %request.fingerprint, "nft mint failed, record kept");
            MintOutcome::Failed(error)
        }
    }
}
