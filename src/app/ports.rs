use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::types::Tree;

#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub content_length: u64,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turns a dictionary source on disk into a tree. CIF grammar lives behind
/// this port; nothing in this crate parses CIF itself.
#[async_trait]
pub trait DocumentParserPort: Send + Sync {
    async fn parse(&self, source: &Path) -> Result<Tree>;
}

#[async_trait]
pub trait OutputPort: Send + Sync {
    async fn write_tree(&self, path: &Path, tree: &Tree) -> Result<WrittenOutput>;
}

#[derive(Clone, Debug)]
pub struct WrittenOutput {
    pub bytes_written: u64,
    pub sha256: String,
}
