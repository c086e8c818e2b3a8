//! Interface of the `ideaproof` program.
//!
//! The program itself is deployed and maintained elsewhere. This package only
//! mirrors what a client needs to talk to it: the program id, the layout of
//! the `IdeaRecord` account, the seeds used to address records, the
//! `record_idea` instruction and the error codes the program declares.

use anchor_lang::prelude::*;
use derive_more::Display;

pub mod error;
pub mod instruction;
pub mod record;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Exact length of the hex encoded SHA-256 hash the program accepts.
pub const HASH_LEN: usize = 64;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Category of the recorded content, stored as a one byte borsh tag.
#[derive(
    AnchorSerialize, AnchorDeserialize, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Hash,
)]
pub enum FileType {
    #[default]
    #[display("text")]
    Text,
    #[display("image")]
    Image,
    #[display("video")]
    Video,
    #[display("audio")]
    Audio,
    #[display("code")]
    Code,
    #[display("other")]
    Other,
}

impl FileType {
    pub const ALL: [FileType; 6] = [
        FileType::Text,
        FileType::Image,
        FileType::Video,
        FileType::Audio,
        FileType::Code,
        FileType::Other,
    ];
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|file_type| file_type.to_string().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown file type `{value}`"))
    }
}
