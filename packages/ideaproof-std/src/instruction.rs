use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, Discriminator, InstructionData, ToAccountMetas};
use derive_new::new;

use crate::record::IdeaRecord;
use crate::FileType;

pub const RECORD_IDEA_DISCRIMINATOR: [u8; 8] = [231, 238, 151, 77, 88, 88, 12, 157];

/// Arguments of `record_idea`, in the order the program declares them.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, new)]
pub struct RecordIdea {
    pub idea_hash: String,
    pub file_type: FileType,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Discriminator for RecordIdea {
    const DISCRIMINATOR: &'static [u8] = &RECORD_IDEA_DISCRIMINATOR;
}

impl InstructionData for RecordIdea {}

impl RecordIdea {
    /// Decodes instruction data produced by [`InstructionData::data`].
    pub fn try_from_data(data: &[u8]) -> Result<Self> {
        match data.split_at_checked(RECORD_IDEA_DISCRIMINATOR.len()) {
            Some((discriminator, mut args)) if discriminator == Self::DISCRIMINATOR => {
                Self::deserialize(&mut args)
                    .map_err(|_| ErrorCode::InstructionDidNotDeserialize.into())
            }
            _ => Err(ErrorCode::InstructionDidNotDeserialize.into()),
        }
    }
}

/// Accounts of `record_idea`, in the order the program declares them.
#[derive(Clone, Copy, Debug, new)]
pub struct RecordIdeaAccounts {
    pub submitter: Pubkey,
    pub idea_record: Pubkey,
    #[new(value = "system_program::ID")]
    pub system_program: Pubkey,
}

impl ToAccountMetas for RecordIdeaAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.submitter, true),
            AccountMeta::new(self.idea_record, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// Builds the `record_idea` instruction for `submitter`, deriving the record
/// address from the hash and the submitter. Hashes longer than
/// [`crate::HASH_LEN`] must be rejected before getting here, see
/// [`IdeaRecord::pda`].
pub fn record_idea(program_id: &Pubkey, submitter: &Pubkey, args: RecordIdea) -> Instruction {
    let (idea_record, _) = IdeaRecord::pda(&args.idea_hash, submitter, program_id);

    Instruction {
        program_id: *program_id,
        accounts: RecordIdeaAccounts::new(*submitter, idea_record).to_account_metas(None),
        data: args.data(),
    }
}
