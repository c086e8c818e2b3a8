use anchor_lang::prelude::*;

/// Errors declared by the `ideaproof` program. Codes start at
/// `ERROR_CODE_OFFSET` in declaration order, so the order here must not change.
#[error_code]
pub enum IdeaProofError {
    #[msg("Hash must be a 64 character hex string")]
    InvalidHashLength,
    #[msg("Idea hash already exists")]
    IdeaHashAlreadyExists,
    #[msg("Title exceeds the length limit")]
    TitleTooLong,
    #[msg("Description exceeds the length limit")]
    DescriptionTooLong,
    #[msg("Idea record not found")]
    IdeaRecordNotFound,
    #[msg("Not authorized to access this record")]
    Unauthorized,
}

impl IdeaProofError {
    pub const ALL: [IdeaProofError; 6] = [
        IdeaProofError::InvalidHashLength,
        IdeaProofError::IdeaHashAlreadyExists,
        IdeaProofError::TitleTooLong,
        IdeaProofError::DescriptionTooLong,
        IdeaProofError::IdeaRecordNotFound,
        IdeaProofError::Unauthorized,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|error| u32::from(*error) == code)
    }
}
