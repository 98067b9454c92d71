use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A parsed dictionary document: mappings, sequences and scalar leaves.
///
/// Mapping key order is preserved (`serde_json/preserve_order`).
pub type Tree = serde_json::Value;

/// How a dictionary source on disk should be turned into a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Raw CIF dictionary (`.dic` or `.dic.gz`), converted by an external parser.
    #[default]
    Cif,
    /// A JSON rendering of the dictionary, read as-is.
    Json,
}

/// Outcome of building one dictionary asset.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub name: String,
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub sha256: String,
    pub strings_cleaned: usize,
    pub keys_removed: usize,
    pub built_at: DateTime<Utc>,
}

impl BuildReport {
    pub fn size_mib(&self) -> f64 {
        self.bytes_written as f64 / 1024.0 / 1024.0
    }
}

/// Outcome of downloading prebuilt assets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub downloaded: Vec<PathBuf>,
    /// `(file, error)` for every asset that could not be fetched.
    pub failed: Vec<(String, String)>,
}

impl FetchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
