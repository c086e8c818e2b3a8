use derive_more::Display;
use ideaproof_std::record::IdeaRecord;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::fingerprint::Fingerprint;

/// Address of the record holding `fingerprint` for one identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display("{address}")]
pub struct Locator {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derives the record address from the `idea_record` seed, the fingerprint
/// and the identity. Submission and lookup both go through here.
pub fn locate(fingerprint: &Fingerprint, identity: &Pubkey, program_id: &Pubkey) -> Locator {
    let (address, bump) = IdeaRecord::pda(fingerprint.as_str(), identity, program_id);
    debug!(%fingerprint, %identity, %address, "derived record locator");

    Locator { address, bump }
}
