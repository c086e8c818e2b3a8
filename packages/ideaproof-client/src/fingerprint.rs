use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use derive_more::{Deref, Display};
use ideaproof_std::HASH_LEN;
use sha2::{Digest, Sha256};

use crate::error::{InputError, Result, ValidationError};

/// Lowercase hex SHA-256 digest of some content, always [`HASH_LEN`]
/// characters long.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self::from_digest(Sha256::digest(bytes).as_slice())
    }

    pub fn of_text(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    /// Streams `reader` to the end. A read error aborts the digest, it is
    /// never mistaken for the end of the content.
    pub fn of_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        io::copy(&mut reader, &mut hasher)?;

        Ok(Self::from_digest(hasher.finalize().as_slice()))
    }

    pub fn of_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => InputError::MissingFile(path.to_path_buf()).into(),
            _ => crate::Error::Io(error),
        })?;

        Ok(Self::of_reader(BufReader::new(file))?)
    }

    /// Validates a caller supplied digest. Upper case hex is accepted and
    /// normalized.
    pub fn parse(hash: &str) -> Result<Self, ValidationError> {
        let hash = hash.trim();

        if !hash.is_ascii() {
            return Err(ValidationError::MalformedHash);
        }
        if hash.len() > HASH_LEN {
            return Err(ValidationError::HashTooLong { len: hash.len() });
        }
        if hash.len() != HASH_LEN || !hash.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ValidationError::MalformedHash);
        }

        Ok(Self(hash.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }
}

impl FromStr for Fingerprint {
    type Err = ValidationError;

    fn from_str(hash: &str) -> Result<Self, Self::Err> {
        Self::parse(hash)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Something a user wants to record or verify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
    File(PathBuf),
    /// An already computed fingerprint.
    Digest(String),
}

impl Content {
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        match self {
            Content::Text(text) if text.is_empty() => Err(InputError::MissingContent.into()),
            Content::Text(text) => Ok(Fingerprint::of_text(text)),
            Content::Bytes(bytes) => Ok(Fingerprint::of_bytes(bytes)),
            Content::File(path) => Fingerprint::of_file(path),
            Content::Digest(hash) if hash.trim().is_empty() => {
                Err(InputError::MissingContent.into())
            }
            Content::Digest(hash) => Ok(Fingerprint::parse(hash)?),
        }
    }

    /// Human readable summary, used as NFT description: the text itself or
    /// the file name.
    pub fn summary(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Bytes(_) => String::new(),
            Content::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Content::Digest(hash) => hash.trim().to_string(),
        }
    }
}
