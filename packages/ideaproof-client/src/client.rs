use anchor_lang::Discriminator;
use chrono::{DateTime, Utc};
use derive_new::new;
use ideaproof_std::error::IdeaProofError;
use ideaproof_std::instruction::{self, RecordIdea};
use ideaproof_std::record::{IdeaRecord, HASH_LEN_OFFSET, IDEA_RECORD_SPACE, SUBMITTER_OFFSET};
use ideaproof_std::{FileType, HASH_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use solana_sdk::account::Account;
use solana_sdk::instruction::InstructionError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::system_instruction::SystemError;
use solana_sdk::transaction::TransactionError;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, QueryError, Result, SubmissionError, ValidationError};
use crate::fingerprint::Fingerprint;
use crate::ledger::{AccountFilter, Delivery, Ledger};
use crate::locator::{locate, Locator};

/// Optional description stored next to the fingerprint.
#[derive(Clone, Debug, Default, PartialEq, Eq, new)]
pub struct RecordMetadata {
    pub file_type: FileType,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl RecordMetadata {
    /// Checks the limits the program enforces, so a doomed transaction is
    /// never sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(len) = self.title.as_ref().map(String::len) {
            if len > MAX_TITLE_LEN {
                return Err(ValidationError::TitleTooLong {
                    len,
                    max: MAX_TITLE_LEN,
                });
            }
        }
        if let Some(len) = self.description.as_ref().map(String::len) {
            if len > MAX_DESCRIPTION_LEN {
                return Err(ValidationError::DescriptionTooLong {
                    len,
                    max: MAX_DESCRIPTION_LEN,
                });
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordReceipt {
    pub signature: Signature,
    pub locator: Locator,
}

/// Read-only copy of an on-ledger record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdeaSnapshot {
    pub address: Pubkey,
    pub fingerprint: String,
    pub owner: Pubkey,
    /// Seconds since the unix epoch, from the ledger clock.
    pub timestamp: i64,
    pub file_type: FileType,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl IdeaSnapshot {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

impl From<(Pubkey, IdeaRecord)> for IdeaSnapshot {
    fn from((address, record): (Pubkey, IdeaRecord)) -> Self {
        Self {
            address,
            fingerprint: record.idea_hash,
            owner: record.submitter,
            timestamp: record.timestamp,
            file_type: record.file_type,
            title: record.title,
            description: record.description,
        }
    }
}

/// Outcome of a lookup. `NotFound` means the ledger answered and holds no
/// matching record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    NotFound,
    Found(IdeaSnapshot),
}

impl Verification {
    pub fn is_found(&self) -> bool {
        matches!(self, Verification::Found(_))
    }

    pub fn record(&self) -> Option<&IdeaSnapshot> {
        match self {
            Verification::Found(snapshot) => Some(snapshot),
            Verification::NotFound => None,
        }
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.record().map(|snapshot| snapshot.timestamp)
    }

    pub fn owner(&self) -> Option<Pubkey> {
        self.record().map(|snapshot| snapshot.owner)
    }
}

/// Talks to the `ideaproof` program through a [`Ledger`].
pub struct LedgerClient<L> {
    ledger: L,
    program_id: Pubkey,
}

impl<L: Ledger> LedgerClient<L> {
    pub fn new(ledger: L) -> Self {
        Self::with_program_id(ledger, ideaproof_std::ID)
    }

    pub fn with_program_id(ledger: L, program_id: Pubkey) -> Self {
        Self { ledger, program_id }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn locate(&self, fingerprint: &Fingerprint, identity: &Pubkey) -> Locator {
        locate(fingerprint, identity, &self.program_id)
    }

    /// Records `fingerprint` for `signer`. Fails with
    /// [`SubmissionError::AlreadyRecorded`] if the pair is already on the
    /// ledger; the existing record is left untouched.
    #[instrument(skip_all, fields(fingerprint = %fingerprint, submitter = %signer.pubkey()))]
    pub fn submit(
        &mut self,
        fingerprint: &Fingerprint,
        signer: &Keypair,
        metadata: &RecordMetadata,
    ) -> Result<RecordReceipt> {
        metadata.validate()?;

        let submitter = signer.pubkey();
        let locator = self.locate(fingerprint, &submitter);
        let instruction = instruction::record_idea(
            &self.program_id,
            &submitter,
            RecordIdea::new(
                fingerprint.to_string(),
                metadata.file_type,
                metadata.title.clone(),
                metadata.description.clone(),
            ),
        );

        match self.ledger.deliver(&[instruction], &[signer]) {
            Delivery::Confirmed(signature) => {
                info!(%signature, %locator, "idea recorded");
                Ok(RecordReceipt { signature, locator })
            }
            Delivery::Rejected(error) => {
                warn!(%error, %locator, "record_idea rejected");
                Err(classify_rejection(error, &locator))
            }
            Delivery::Unreachable(error) => {
                warn!(%error, "ledger unreachable while recording");
                Err(error.into())
            }
        }
    }

    /// Looks `fingerprint` up. With an identity this reads the one address
    /// that identity would have recorded to; without one it searches every
    /// record and returns the earliest.
    #[instrument(skip_all, fields(fingerprint = %fingerprint))]
    pub fn lookup(
        &self,
        fingerprint: &Fingerprint,
        identity: Option<&Pubkey>,
    ) -> Result<Verification> {
        let verification = match identity {
            Some(identity) => {
                let locator = self.locate(fingerprint, identity);
                match self.ledger.fetch_account(&locator.address)? {
                    Some(account) => {
                        Verification::Found(self.snapshot(locator.address, &account)?)
                    }
                    None => Verification::NotFound,
                }
            }
            None => self
                .scan(vec![
                    AccountFilter::DataSize(IDEA_RECORD_SPACE as u64),
                    AccountFilter::Memcmp {
                        offset: HASH_LEN_OFFSET,
                        bytes: length_prefixed(fingerprint.as_bytes()),
                    },
                ])?
                .into_iter()
                .min_by_key(|snapshot| (snapshot.timestamp, snapshot.address))
                .map_or(Verification::NotFound, Verification::Found),
        };
        debug!(found = verification.is_found(), "lookup finished");

        Ok(verification)
    }

    /// Every record `owner` submitted, oldest first.
    #[instrument(skip_all, fields(owner = %owner))]
    pub fn records_by_owner(&self, owner: &Pubkey) -> Result<Vec<IdeaSnapshot>> {
        let mut snapshots = self.scan(vec![
            AccountFilter::Memcmp {
                offset: HASH_LEN_OFFSET,
                bytes: (HASH_LEN as u32).to_le_bytes().to_vec(),
            },
            AccountFilter::Memcmp {
                offset: SUBMITTER_OFFSET,
                bytes: owner.to_bytes().to_vec(),
            },
        ])?;
        snapshots.sort_by_key(|snapshot| (snapshot.timestamp, snapshot.address));

        Ok(snapshots)
    }

    fn scan(&self, filters: Vec<AccountFilter>) -> Result<Vec<IdeaSnapshot>> {
        let filters: Vec<_> = std::iter::once(AccountFilter::Memcmp {
            offset: 0,
            bytes: IdeaRecord::DISCRIMINATOR.to_vec(),
        })
        .chain(filters)
        .collect();

        self.ledger
            .scan_accounts(&self.program_id, &filters)?
            .into_iter()
            .map(|(address, account)| self.snapshot(address, &account).map_err(Into::into))
            .collect()
    }

    fn snapshot(&self, address: Pubkey, account: &Account) -> Result<IdeaSnapshot, QueryError> {
        if account.owner != self.program_id {
            return Err(QueryError::ForeignOwner {
                address,
                owner: account.owner,
            });
        }

        IdeaRecord::try_from_account_data(&account.data)
            .map(|record| (address, record).into())
            .map_err(|error| QueryError::Malformed {
                address,
                reason: error.to_string(),
            })
    }
}

fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    (bytes.len() as u32)
        .to_le_bytes()
        .into_iter()
        .chain(bytes.iter().copied())
        .collect()
}

fn classify_rejection(error: TransactionError, locator: &Locator) -> Error {
    let code = match &error {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => *code,
        _ => return SubmissionError::Rejected(error).into(),
    };

    if code == SystemError::AccountAlreadyInUse as u32 {
        return SubmissionError::AlreadyRecorded {
            locator: locator.address,
        }
        .into();
    }

    match IdeaProofError::from_code(code) {
        Some(IdeaProofError::IdeaHashAlreadyExists) => SubmissionError::AlreadyRecorded {
            locator: locator.address,
        }
        .into(),
        Some(
            rejection @ (IdeaProofError::InvalidHashLength
            | IdeaProofError::TitleTooLong
            | IdeaProofError::DescriptionTooLong),
        ) => ValidationError::Rejected(rejection).into(),
        Some(rejection) => SubmissionError::Program(rejection).into(),
        None => SubmissionError::Rejected(error).into(),
    }
}
