use std::io;
use std::path::PathBuf;

use ideaproof_std::error::IdeaProofError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::TransactionError;
use thiserror::Error;

use crate::ledger::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure a workflow can end in. Absence of a record is not an error,
/// see [`crate::Verification::NotFound`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("a connected signing identity is required")]
    IdentityRequired,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to read content: {0}")]
    Io(#[from] io::Error),
    #[error("ledger unreachable: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl Error {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no content was provided")]
    MissingContent,
    #[error("file {0} does not exist")]
    MissingFile(PathBuf),
    #[error("a category is required to mint")]
    MissingCategory,
    #[error("a license is required to mint")]
    MissingLicense,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("hash is {len} characters long, at most 64 are allowed")]
    HashTooLong { len: usize },
    #[error("hash must be 64 hexadecimal characters")]
    MalformedHash,
    #[error("title is {len} bytes long, at most {max} are allowed")]
    TitleTooLong { len: usize, max: usize },
    #[error("description is {len} bytes long, at most {max} are allowed")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("rejected by the program: {0}")]
    Rejected(IdeaProofError),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("idea is already recorded at {locator}")]
    AlreadyRecorded { locator: Pubkey },
    #[error("rejected by the program: {0}")]
    Program(IdeaProofError),
    #[error("transaction rejected: {0}")]
    Rejected(TransactionError),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("account {address} is owned by {owner}, not by the ideaproof program")]
    ForeignOwner { address: Pubkey, owner: Pubkey },
    #[error("account {address} is not an idea record: {reason}")]
    Malformed { address: Pubkey, reason: String },
}
