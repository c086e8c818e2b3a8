use derive_new::new;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, instrument};

use crate::client::{LedgerClient, Verification};
use crate::error::Result;
use crate::fingerprint::Content;
use crate::ledger::Ledger;

#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct VerifyRequest {
    pub content: Content,
    /// Restricts the lookup to records submitted by this identity.
    pub owner: Option<Pubkey>,
}

/// Answers whether `request.content` was recorded, by whom and when. Never
/// writes to the ledger.
#[instrument(skip_all)]
pub fn verify<L: Ledger>(
    client: &LedgerClient<L>,
    request: &VerifyRequest,
) -> Result<Verification> {
    let fingerprint = request.content.fingerprint()?;
    debug!(%fingerprint, owner = ?request.owner, "verifying");

    client.lookup(&fingerprint, request.owner.as_ref())
}
