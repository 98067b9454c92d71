use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{BuilderError, Result};
use crate::types::SourceFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_dictionaries")]
    pub dictionaries: Vec<DictionaryConfig>,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Directory for JSON log files. Console logging is always on.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Where to write the Prometheus exposition text after a run.
    #[serde(default)]
    pub metrics_file: Option<PathBuf>,
}

/// One dictionary to turn into a hover asset.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub name: String,
    /// Source to download. When absent, `local_path` must already exist.
    #[serde(default)]
    pub url: Option<String>,
    pub local_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(default)]
    pub format: SourceFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only the listed keys.
    #[default]
    Allow,
    /// Drop the listed keys, keep everything else.
    Deny,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub mode: FilterMode,
    /// Keys at data-block level. Defaults depend on `mode`.
    #[serde(default)]
    pub block_keys: Option<Vec<String>>,
    /// Keys inside each save frame. Defaults depend on `mode`.
    #[serde(default)]
    pub frame_keys: Option<Vec<String>>,
    #[serde(default = "default_frames_key")]
    pub frames_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_gemmi_bin")]
    pub gemmi_bin: String,
    /// Extra arguments passed to `gemmi cif2json` before the file paths.
    #[serde(default)]
    pub gemmi_args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default = "default_asset_files")]
    pub files: Vec<String>,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_dictionaries() -> Vec<DictionaryConfig> {
    vec![
        DictionaryConfig {
            name: constants::PDBX_DICTIONARY.to_string(),
            url: Some(constants::PDBX_DICTIONARY_URL.to_string()),
            local_path: PathBuf::from("mmcif_pdbx_v50.dic.gz"),
            output_path: PathBuf::from("assets/mmcif_pdbx_v50.dic.json"),
            format: SourceFormat::Cif,
        },
        DictionaryConfig {
            name: constants::MODELCIF_DICTIONARY.to_string(),
            url: Some(constants::MODELCIF_DICTIONARY_URL.to_string()),
            local_path: PathBuf::from("mmcif_ma.dic"),
            output_path: PathBuf::from("assets/mmcif_ma.dic.json"),
            format: SourceFormat::Cif,
        },
    ]
}

fn default_frames_key() -> String {
    constants::FRAMES_KEY.to_string()
}

fn default_gemmi_bin() -> String {
    constants::DEFAULT_GEMMI_BIN.to_string()
}

fn default_base_url() -> String {
    constants::RELEASE_BASE_URL.to_string()
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_ASSETS_DIR)
}

fn default_asset_files() -> Vec<String> {
    constants::DEFAULT_ASSET_FILES.iter().map(|s| s.to_string()).collect()
}

fn default_max_redirects() -> usize {
    constants::DEFAULT_MAX_REDIRECTS
}

fn default_timeout_seconds() -> u64 {
    constants::DEFAULT_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionaries: default_dictionaries(),
            filter: FilterConfig::default(),
            parser: ParserConfig::default(),
            fetch: FetchConfig::default(),
            log_dir: None,
            metrics_file: None,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mode: FilterMode::default(),
            block_keys: None,
            frame_keys: None,
            frames_key: default_frames_key(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            gemmi_bin: default_gemmi_bin(),
            gemmi_args: Vec::new(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            assets_dir: default_assets_dir(),
            files: default_asset_files(),
            max_redirects: default_max_redirects(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl FilterConfig {
    /// Block-level key list, falling back to the built-in list for the mode.
    pub fn effective_block_keys(&self) -> Vec<String> {
        match (&self.block_keys, self.mode) {
            (Some(keys), _) => keys.clone(),
            (None, FilterMode::Allow) => to_owned(constants::ALLOW_BLOCK_KEYS),
            (None, FilterMode::Deny) => to_owned(constants::DENY_BLOCK_KEYS),
        }
    }

    /// Per-frame key list, falling back to the built-in list for the mode.
    pub fn effective_frame_keys(&self) -> Vec<String> {
        match (&self.frame_keys, self.mode) {
            (Some(keys), _) => keys.clone(),
            (None, FilterMode::Allow) => to_owned(constants::ALLOW_FRAME_KEYS),
            (None, FilterMode::Deny) => to_owned(constants::DENY_FRAME_KEYS),
        }
    }
}

fn to_owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Config {
    /// Load configuration from `path`, or from `MMCIF_DICT_CONFIG`, or from
    /// `dictionaries.toml`. Only the implicit default path may be missing, in
    /// which case the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(constants::CONFIG_PATH_ENV).map(PathBuf::from));

        let config_path = match explicit {
            Some(p) => p,
            None => {
                let default_path = PathBuf::from(constants::DEFAULT_CONFIG_PATH);
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            BuilderError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dictionaries.is_empty() {
            return Err(BuilderError::Config("no dictionaries configured".to_string()));
        }
        let mut seen = HashSet::new();
        for dict in &self.dictionaries {
            if dict.name.trim().is_empty() {
                return Err(BuilderError::Config("dictionary name must not be empty".to_string()));
            }
            if !seen.insert(dict.name.as_str()) {
                return Err(BuilderError::Config(format!(
                    "duplicate dictionary name '{}'",
                    dict.name
                )));
            }
        }
        if self.filter.frames_key.is_empty() {
            return Err(BuilderError::Config("filter.frames_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// Restrict the configured dictionaries to `names`, keeping config order.
    pub fn select(&mut self, names: &[String]) -> Result<()> {
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.dictionaries.iter().any(|d| &d.name == *n))
        {
            return Err(BuilderError::Config(format!("unknown dictionary '{}'", unknown)));
        }
        self.dictionaries.retain(|d| names.contains(&d.name));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_both_dictionaries() {
        let config = Config::default();
        let names: Vec<&str> = config.dictionaries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["mmcif_pdbx_v50", "mmcif_ma"]);
        assert_eq!(config.filter.mode, FilterMode::Allow);
        assert_eq!(config.filter.frames_key, "Frames");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parses_toml_with_partial_sections() {
        let config = Config::from_toml(
            r#"
            [[dictionaries]]
            name = "local"
            local_path = "in/local.json"
            output_path = "out/local.json"
            format = "json"

            [filter]
            mode = "deny"
            frame_keys = ["_item_examples.case"]
            "#,
        )
        .unwrap();

        assert_eq!(config.dictionaries.len(), 1);
        let dict = &config.dictionaries[0];
        assert!(dict.url.is_none());
        assert_eq!(dict.format, SourceFormat::Json);
        assert_eq!(config.filter.mode, FilterMode::Deny);
        assert_eq!(config.filter.effective_frame_keys(), vec!["_item_examples.case"]);
        // Omitted list falls back to the deny defaults
        assert!(config
            .filter
            .effective_block_keys()
            .contains(&"_dictionary_history.version".to_string()));
        assert_eq!(config.parser.gemmi_bin, "gemmi");
        assert_eq!(config.fetch.max_redirects, 5);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Config::from_toml(
            r#"
            [[dictionaries]]
            name = "a"
            local_path = "a.dic"
            output_path = "a.json"

            [[dictionaries]]
            name = "a"
            local_path = "b.dic"
            output_path = "b.json"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, BuilderError::Config(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_empty_dictionary_list() {
        let err = Config::from_toml("dictionaries = []").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }

    #[test]
    fn test_select_filters_and_rejects_unknown() {
        let mut config = Config::default();
        config.select(&["mmcif_ma".to_string()]).unwrap();
        assert_eq!(config.dictionaries.len(), 1);
        assert_eq!(config.dictionaries[0].name, "mmcif_ma");

        let mut config = Config::default();
        assert!(config.select(&["nope".to_string()]).is_err());
    }
}
