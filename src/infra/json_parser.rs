use async_trait::async_trait;
use std::path::Path;

use crate::app::ports::DocumentParserPort;
use crate::error::Result;
use crate::types::Tree;

/// Reads a dictionary that is already rendered as JSON.
pub struct JsonDocumentParser;

#[async_trait]
impl DocumentParserPort for JsonDocumentParser {
    async fn parse(&self, source: &Path) -> Result<Tree> {
        let bytes = tokio::fs::read(source).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_json_keeping_key_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict.json");
        std::fs::write(&path, r#"{"b": 1, "a": {"z": "x", "y": [1, null]}}"#).unwrap();

        let tree = JsonDocumentParser.parse(&path).await.unwrap();
        let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(tree["a"]["y"][1], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonDocumentParser.parse(&path).await.unwrap_err();
        assert!(matches!(err, crate::error::BuilderError::Json(_)));
    }
}
