use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::app::ports::DocumentParserPort;
use crate::error::{BuilderError, Result};
use crate::types::Tree;

/// Delegates CIF parsing to `gemmi cif2json`, then reads its JSON output.
///
/// gemmi reads `.gz` input directly, so compressed dictionaries need no
/// separate step.
pub struct GemmiCliParser {
    bin: String,
    extra_args: Vec<String>,
}

impl GemmiCliParser {
    pub fn new(bin: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            bin: bin.into(),
            extra_args,
        }
    }

    fn output_path(source: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dictionary".to_string());
        source.with_file_name(format!("{}.gemmi.json", file_name))
    }
}

#[async_trait]
impl DocumentParserPort for GemmiCliParser {
    async fn parse(&self, source: &Path) -> Result<Tree> {
        let json_path = Self::output_path(source);
        debug!("Running {} cif2json {} {}", self.bin, source.display(), json_path.display());

        let output = Command::new(&self.bin)
            .arg("cif2json")
            .args(&self.extra_args)
            .arg(source)
            .arg(&json_path)
            .output()
            .await
            .map_err(|e| BuilderError::Parser(format!("failed to run '{}': {}", self.bin, e)))?;

        if !output.status.success() {
            let _ = tokio::fs::remove_file(&json_path).await;
            return Err(BuilderError::Parser(format!(
                "'{} cif2json' exited with {}: {}",
                self.bin,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let bytes = tokio::fs::read(&json_path).await?;
        let _ = tokio::fs::remove_file(&json_path).await;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_sits_next_to_source() {
        let path = GemmiCliParser::output_path(Path::new("work/mmcif_pdbx_v50.dic.gz"));
        assert_eq!(path, PathBuf::from("work/mmcif_pdbx_v50.dic.gz.gemmi.json"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_parser_error() {
        let parser = GemmiCliParser::new("definitely-not-a-real-gemmi-binary", Vec::new());
        let err = parser.parse(Path::new("nothing.dic")).await.unwrap_err();
        assert!(matches!(err, BuilderError::Parser(msg) if msg.contains("failed to run")));
    }
}
