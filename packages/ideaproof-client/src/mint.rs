//! Boundary to the NFT minting service.
//!
//! A mint publishes an off-chain metadata document and creates the token.
//! This module fixes what goes in and out of that call and builds the
//! document; [`crate::nft::TokenMinter`] is the Token-2022 implementation.

use chrono::{DateTime, SecondsFormat, Utc};
use derive_new::new;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use thiserror::Error;

use crate::fingerprint::Fingerprint;
use crate::ledger::Ledger;

/// Royalty recorded in the metadata, 5%.
pub const SELLER_FEE_BASIS_POINTS: u16 = 500;
pub const NAME_PREFIX: &str = "IdeaProof #";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MintError {
    #[error("no metadata storage is configured")]
    Unavailable,
    #[error("metadata upload failed: {0}")]
    Upload(String),
    #[error("mint transaction failed: {0}")]
    Mint(String),
}

#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct MintRequest {
    pub creator: Pubkey,
    pub name: String,
    pub description: String,
    pub fingerprint: Fingerprint,
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub license: String,
    pub image: Option<Vec<u8>>,
}

impl MintRequest {
    /// Metadata document for this request. `image_uri` is where the service
    /// stored [`MintRequest::image`], if any.
    pub fn metadata(&self, image_uri: Option<String>) -> NftMetadata {
        let timestamp = self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);

        NftMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            image: image_uri,
            seller_fee_basis_points: SELLER_FEE_BASIS_POINTS,
            properties: NftProperties {
                hash: self.fingerprint.to_string(),
                timestamp: timestamp.clone(),
                category: self.category.clone(),
                license: self.license.clone(),
            },
            attributes: vec![
                NftAttribute::new("Category", &self.category),
                NftAttribute::new("License", &self.license),
                NftAttribute::new("Timestamp", &timestamp),
                NftAttribute::new("Creator", &self.creator.to_string()),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    pub mint_address: Pubkey,
    /// Creator's token account holding the single token.
    pub token_account: Pubkey,
    pub metadata_uri: String,
}

/// Off-chain token metadata, in the layout token metadata services expect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub seller_fee_basis_points: u16,
    pub properties: NftProperties,
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftProperties {
    pub hash: String,
    pub timestamp: String,
    pub category: String,
    pub license: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

impl NftAttribute {
    fn new(trait_type: &str, value: &str) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: value.to_string(),
        }
    }
}

/// Mints an NFT attesting a recorded fingerprint. `ledger` is the one the
/// record was just written to.
pub trait Minter {
    fn mint(
        &mut self,
        ledger: &mut dyn Ledger,
        signer: &Keypair,
        request: &MintRequest,
    ) -> Result<MintReceipt, MintError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn metadata_document() {
        let creator = Pubkey::new_unique();
        let timestamp = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let request = MintRequest::new(
            creator,
            "IdeaProof #1700000000000".to_string(),
            "an idea".to_string(),
            Fingerprint::of_text("hello"),
            timestamp,
            "Technology".to_string(),
            "MIT".to_string(),
            None,
        );

        let document: serde_json::Value =
            serde_json::from_str(&request.metadata(None).to_json().unwrap()).unwrap();

        assert_eq!(
            document,
            json!({
                "name": "IdeaProof #1700000000000",
                "description": "an idea",
                "seller_fee_basis_points": 500,
                "properties": {
                    "hash": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
                    "timestamp": "2023-11-14T22:13:20.000Z",
                    "category": "Technology",
                    "license": "MIT",
                },
                "attributes": [
                    { "trait_type": "Category", "value": "Technology" },
                    { "trait_type": "License", "value": "MIT" },
                    { "trait_type": "Timestamp", "value": "2023-11-14T22:13:20.000Z" },
                    { "trait_type": "Creator", "value": creator.to_string() },
                ],
            })
        );
    }

    #[test]
    fn metadata_links_uploaded_image() {
        let request = MintRequest::new(
            Pubkey::new_unique(),
            "name".to_string(),
            String::new(),
            Fingerprint::of_text("hello"),
            Utc::now(),
            "Art".to_string(),
            "Public Domain".to_string(),
            Some(vec![1, 2, 3]),
        );

        assert_eq!(
            request
                .metadata(Some("https://arweave.net/image".to_string()))
                .image
                .as_deref(),
            Some("https://arweave.net/image")
        );
    }
}
