use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use ideaproof_client::rpc::RpcLedger;
use ideaproof_client::{DirectoryStore, HttpStore, MetadataStore, Minter, TokenMinter};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair};
use tracing::debug;

use crate::i18n::Language;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Connection settings shared by every command.
#[derive(Args, Clone, Debug)]
pub struct Settings {
    /// JSON-RPC endpoint of the cluster holding the records
    #[arg(long, global = true, env = "IDEAPROOF_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// Keypair file used to sign submissions
    #[arg(long, global = true, env = "IDEAPROOF_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = Commitment::Confirmed)]
    pub commitment: Commitment,

    #[arg(long, global = true, env = "IDEAPROOF_PROGRAM_ID", default_value_t = ideaproof_std::ID)]
    pub program_id: Pubkey,

    /// Overrides the saved language preference
    #[arg(long, global = true, env = "IDEAPROOF_LANG", value_enum)]
    pub lang: Option<Language>,
}

impl Settings {
    pub fn ledger(&self) -> RpcLedger {
        RpcLedger::new(self.url.clone(), self.commitment.into())
    }

    pub fn keypair_path(&self) -> Option<PathBuf> {
        self.keypair.clone().or_else(default_keypair_path)
    }

    /// Signing identity, if one is configured. A missing file means no
    /// identity; an unreadable one is an error.
    pub fn identity(&self) -> Result<Option<Keypair>> {
        self.keypair_path()
            .map_or(Ok(None), |path| load_keypair(&path))
    }
}

/// Where NFT metadata is published. Without either option a requested mint
/// is reported as unavailable.
#[derive(Args, Clone, Debug, Default)]
pub struct StorageSettings {
    /// Upload images and metadata with HTTP PUT under this URL
    #[arg(long, env = "IDEAPROOF_METADATA_ENDPOINT", conflicts_with = "metadata_dir")]
    pub metadata_endpoint: Option<String>,

    /// Write images and metadata into this directory
    #[arg(long, env = "IDEAPROOF_METADATA_DIR", requires = "metadata_url")]
    pub metadata_dir: Option<PathBuf>,

    /// Public URL the metadata directory is served from
    #[arg(long, env = "IDEAPROOF_METADATA_URL", requires = "metadata_dir")]
    pub metadata_url: Option<String>,
}

impl StorageSettings {
    pub fn store(&self) -> Result<Option<Box<dyn MetadataStore>>> {
        if let Some(endpoint) = &self.metadata_endpoint {
            return Ok(Some(Box::new(HttpStore::new(endpoint.clone(), UPLOAD_TIMEOUT)?)));
        }

        Ok(match (&self.metadata_dir, &self.metadata_url) {
            (Some(dir), Some(url)) => Some(Box::new(DirectoryStore::new(dir, url.clone()))),
            _ => None,
        })
    }

    pub fn minter(&self) -> Result<Option<Box<dyn Minter>>> {
        Ok(self
            .store()?
            .map(|store| Box::new(TokenMinter::new(store)) as Box<dyn Minter>))
    }
}

fn default_keypair_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("solana").join("id.json"))
}

fn load_keypair(path: &Path) -> Result<Option<Keypair>> {
    if !path.exists() {
        debug!(path = %path.display(), "no keypair file");
        return Ok(None);
    }

    read_keypair_file(path)
        .map(Some)
        .map_err(|error| anyhow!("failed to read keypair {}: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use solana_sdk::signature::write_keypair_file;
    use solana_sdk::signer::Signer;

    use super::*;

    fn settings(keypair: Option<PathBuf>) -> Settings {
        Settings {
            url: DEFAULT_RPC_URL.to_string(),
            keypair,
            commitment: Commitment::default(),
            program_id: ideaproof_std::ID,
            lang: None,
        }
    }

    #[test]
    fn commitment_levels() {
        assert_eq!(
            CommitmentConfig::from(Commitment::Processed),
            CommitmentConfig::processed()
        );
        assert_eq!(
            CommitmentConfig::from(Commitment::default()),
            CommitmentConfig::confirmed()
        );
    }

    #[test]
    fn missing_keypair_is_no_identity() {
        let dir = tempfile::tempdir().unwrap();

        assert!(settings(Some(dir.path().join("id.json")))
            .identity()
            .unwrap()
            .is_none());
    }

    #[test]
    fn keypair_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();

        let identity = settings(Some(path)).identity().unwrap().unwrap();

        assert_eq!(identity.pubkey(), keypair.pubkey());
    }

    #[test]
    fn corrupt_keypair_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        std::fs::write(&path, "not a keypair").unwrap();

        assert!(settings(Some(path)).identity().is_err());
    }

    #[test]
    fn no_storage_means_no_minter() {
        assert!(StorageSettings::default().minter().unwrap().is_none());
    }

    #[test]
    fn directory_storage_publishes_under_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageSettings {
            metadata_dir: Some(dir.path().to_path_buf()),
            metadata_url: Some("https://ideas.example/meta".to_string()),
            ..Default::default()
        };

        let uri = storage
            .store()
            .unwrap()
            .unwrap()
            .put("idea.json", "application/json", b"{}".to_vec())
            .unwrap();

        assert_eq!(uri, "https://ideas.example/meta/idea.json");
        assert!(dir.path().join("idea.json").exists());
        assert!(storage.minter().unwrap().is_some());
    }
}
