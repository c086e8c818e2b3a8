//! # IdeaProof client
//!
//! Records content fingerprints on Solana through the `ideaproof` program and
//! verifies them later.
//!
//! ## Flow
//!
//! 1. [`fingerprint`] hashes text, bytes or files into a 64 character SHA-256
//!    hex digest. Caller supplied digests go through the same validation.
//! 2. [`locator`] derives the record address from the fingerprint and the
//!    submitter, so submission and lookup agree without coordination.
//! 3. [`client::LedgerClient`] sends `record_idea` and reads records back,
//!    classifying every ledger outcome (recorded, absent, rejected by the
//!    program, unreachable) into [`Error`] kinds or results.
//! 4. [`verify`] and [`submit`] are the two user facing workflows. A
//!    submission may mint an NFT through a [`mint::Minter`]; a mint failure is
//!    reported next to, never instead of, a successful record.
//!    [`nft::TokenMinter`] mints Token-2022 NFTs whose metadata document sits
//!    in a [`storage::MetadataStore`].
//!
//! The ledger is reached through the [`ledger::Ledger`] trait. [`rpc::RpcLedger`]
//! talks to a JSON-RPC node; tests plug in a simulated ledger.

pub mod client;
pub mod error;
pub mod fingerprint;
pub mod ledger;
pub mod locator;
pub mod mint;
pub mod nft;
pub mod rpc;
pub mod storage;
pub mod submit;
pub mod verify;

pub use client::{IdeaSnapshot, LedgerClient, RecordMetadata, RecordReceipt, Verification};
pub use error::{Error, InputError, QueryError, Result, SubmissionError, ValidationError};
pub use fingerprint::{Content, Fingerprint};
pub use ledger::{AccountFilter, Delivery, Ledger, TransportError};
pub use locator::{locate, Locator};
pub use mint::{MintError, MintReceipt, MintRequest, Minter};
pub use nft::TokenMinter;
pub use storage::{DirectoryStore, HttpStore, MetadataStore};
pub use submit::{MintOptions, MintOutcome, SubmissionReport, SubmitRequest};
pub use verify::VerifyRequest;
