//! Where NFT images and metadata documents are published.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::mint::MintError;

pub trait MetadataStore {
    /// Publishes `bytes` under `name` and returns the URI it is served from.
    fn put(&mut self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, MintError>;
}

impl<S: MetadataStore + ?Sized> MetadataStore for Box<S> {
    fn put(&mut self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, MintError> {
        (**self).put(name, content_type, bytes)
    }
}

/// Writes files into a directory that some web server exposes at `base_url`.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
    base_url: String,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

impl MetadataStore for DirectoryStore {
    fn put(&mut self, name: &str, _: &str, bytes: Vec<u8>) -> Result<String, MintError> {
        let path = self.root.join(name);
        fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(&path, bytes))
            .map_err(|error| MintError::Upload(format!("{}: {error}", path.display())))?;
        debug!(path = %path.display(), "metadata file written");

        Ok(join_url(&self.base_url, name))
    }
}

/// Uploads with `PUT {endpoint}/{name}`; the object is served from that URL.
#[derive(Clone, Debug)]
pub struct HttpStore {
    endpoint: String,
    client: Client,
}

impl HttpStore {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, MintError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| MintError::Upload(error.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl MetadataStore for HttpStore {
    fn put(&mut self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, MintError> {
        let url = join_url(&self.endpoint, name);
        self.client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|error| MintError::Upload(error.to_string()))?;
        debug!(%url, "metadata uploaded");

        Ok(url)
    }
}

fn join_url(base: &str, name: &str) -> String {
    format!("{}/{name}", base.trim_end_matches('/'))
}

/// File extension and media type of an image, from its leading bytes.
pub fn image_kind(bytes: &[u8]) -> (&'static str, &'static str) {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => ("png", "image/png"),
        [0xff, 0xd8, 0xff, ..] => ("jpg", "image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => ("gif", "image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => ("webp", "image/webp"),
        _ => ("bin", "application/octet-stream"),
    }
}
