use anchor_lang::prelude::*;

use anchor_lang::solana_program::pubkey::MAX_SEED_LEN;

use crate::{FileType, HASH_LEN};

pub const IDEA_RECORD_SEED: &[u8] = b"idea_record";

/// Space the program allocates for every record, discriminator included.
pub const IDEA_RECORD_SPACE: usize = 8 + 4 + 64 + 32 + 8 + 1 + 4 + 100 + 4 + 500 + 1;

/// Offset of the borsh length prefix of `idea_hash`.
pub const HASH_LEN_OFFSET: usize = 8;
/// Offset of the `idea_hash` bytes.
pub const HASH_OFFSET: usize = HASH_LEN_OFFSET + 4;
/// Offset of `submitter`, valid for records holding a full length hash.
pub const SUBMITTER_OFFSET: usize = HASH_OFFSET + HASH_LEN;

#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct IdeaRecord {
    pub idea_hash: String,
    pub submitter: Pubkey,
    pub timestamp: i64,
    pub file_type: FileType,
    pub title: Option<String>,
    pub description: Option<String>,
    pub bump: u8,
}

impl IdeaRecord {
    /// A seed holds at most 32 bytes, so the hash spans two of them.
    pub fn seeds<'a>(idea_hash: &'a str, submitter: &'a Pubkey) -> [&'a [u8]; 4] {
        let (head, tail) = idea_hash
            .as_bytes()
            .split_at(idea_hash.len().min(MAX_SEED_LEN));

        [IDEA_RECORD_SEED, head, tail, submitter.as_ref()]
    }

    /// Panics if `idea_hash` is longer than [`HASH_LEN`] bytes.
    pub fn pda(idea_hash: &str, submitter: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&Self::seeds(idea_hash, submitter), program_id)
    }

    /// Deserializes an account's data, checking the discriminator.
    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        Self::try_deserialize(&mut &data[..])
    }
}
