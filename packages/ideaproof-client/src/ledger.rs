use solana_sdk::account::Account;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::transaction::TransactionError;
use thiserror::Error;

/// The ledger could not be reached or did not answer. Says nothing about
/// whether a record exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// What happened to a transaction sent to the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Confirmed(Signature),
    /// The ledger executed the transaction and a program refused it.
    Rejected(TransactionError),
    Unreachable(TransportError),
}

/// Server side filter over account data, as in `getProgramAccounts`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountFilter {
    DataSize(u64),
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl AccountFilter {
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            AccountFilter::DataSize(size) => data.len() as u64 == *size,
            AccountFilter::Memcmp { offset, bytes } => offset
                .checked_add(bytes.len())
                .and_then(|end| data.get(*offset..end))
                .is_some_and(|window| window == bytes.as_slice()),
        }
    }
}

/// Round trips to the ledger. These are the only operations that leave the
/// process; everything else in the crate is local computation.
pub trait Ledger {
    /// Signs `instructions` with `signers` and sends them as one transaction.
    /// The first signer pays the fees. No retry.
    fn deliver(&mut self, instructions: &[Instruction], signers: &[&Keypair]) -> Delivery;

    /// Lamports an account of `data_len` bytes needs to be rent exempt.
    fn minimum_balance(&self, data_len: usize) -> Result<u64, TransportError>;

    /// `Ok(None)` when no account lives at `address`.
    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError>;

    fn scan_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, TransportError>;
}
