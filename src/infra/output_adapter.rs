use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

use crate::app::ports::{OutputPort, WrittenOutput};
use crate::error::Result;
use crate::observability::metrics;
use crate::types::Tree;

/// Writes trees as compact JSON files.
pub struct JsonFileOutput;

#[async_trait]
impl OutputPort for JsonFileOutput {
    async fn write_tree(&self, path: &Path, tree: &Tree) -> Result<WrittenOutput> {
        let bytes = serde_json::to_vec(tree)?;

        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, &bytes).await?;

        let sha256 = hex::encode(Sha256::digest(&bytes));
        metrics::output::asset_written(bytes.len() as u64);
        info!("Wrote {} ({} bytes, sha256 {})", path.display(), bytes.len(), sha256);

        Ok(WrittenOutput {
            bytes_written: bytes.len() as u64,
            sha256,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_compact_json_and_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/dict.json");
        let tree = json!({"b": "two words", "a": [1, 2]});

        let written = JsonFileOutput.write_tree(&path, &tree).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, r#"{"b":"two words","a":[1,2]}"#);
        assert_eq!(written.bytes_written, content.len() as u64);
        assert_eq!(written.sha256, hex::encode(Sha256::digest(content.as_bytes())));
    }
}
