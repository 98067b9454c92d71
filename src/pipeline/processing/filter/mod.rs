use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::config::{FilterConfig, FilterMode};
use crate::types::Tree;

/// Drops dictionary keys the hover assets do not need.
///
/// The tree is expected to look like the JSON rendering of a CIF dictionary:
/// a mapping of data blocks, each block a mapping of tags plus a frames
/// container mapping save-frame names to their own tag mappings.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    mode: FilterMode,
    block_keys: HashSet<String>,
    frame_keys: HashSet<String>,
    frames_key: String,
}

impl KeyFilter {
    pub fn new(
        mode: FilterMode,
        block_keys: impl IntoIterator<Item = String>,
        frame_keys: impl IntoIterator<Item = String>,
        frames_key: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            block_keys: block_keys.into_iter().collect(),
            frame_keys: frame_keys.into_iter().collect(),
            frames_key: frames_key.into(),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(
            config.mode,
            config.effective_block_keys(),
            config.effective_frame_keys(),
            config.frames_key.clone(),
        )
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Filter a whole document, returning the result and the number of keys removed.
    ///
    /// Anything that does not have the expected shape is passed through.
    pub fn apply(&self, tree: Tree) -> (Tree, usize) {
        let blocks = match tree {
            Value::Object(blocks) => blocks,
            other => return (other, 0),
        };

        let mut removed = 0;
        let filtered = blocks
            .into_iter()
            .map(|(name, block)| match block {
                Value::Object(tags) => (name, Value::Object(self.filter_block(tags, &mut removed))),
                other => (name, other),
            })
            .collect();

        (Value::Object(filtered), removed)
    }

    fn filter_block(&self, tags: Map<String, Value>, removed: &mut usize) -> Map<String, Value> {
        let mut out = Map::with_capacity(tags.len());
        for (key, value) in tags {
            if key == self.frames_key {
                let value = match value {
                    Value::Object(frames) => Value::Object(self.filter_frames(frames, removed)),
                    other => other,
                };
                out.insert(key, value);
            } else if self.keeps(&self.block_keys, &key) {
                out.insert(key, value);
            } else {
                *removed += 1;
            }
        }
        out
    }

    fn filter_frames(&self, frames: Map<String, Value>, removed: &mut usize) -> Map<String, Value> {
        frames
            .into_iter()
            .map(|(frame_name, frame)| match frame {
                Value::Object(tags) => {
                    let before = tags.len();
                    let kept: Map<String, Value> = tags
                        .into_iter()
                        .filter(|(key, _)| self.keeps(&self.frame_keys, key))
                        .collect();
                    *removed += before - kept.len();
                    (frame_name, Value::Object(kept))
                }
                other => (frame_name, other),
            })
            .collect()
    }

    fn keeps(&self, listed: &HashSet<String>, key: &str) -> bool {
        match self.mode {
            FilterMode::Allow => listed.contains(key),
            FilterMode::Deny => !listed.contains(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_dictionary() -> Tree {
        json!({
            "mmcif_pdbx.dic": {
                "_dictionary.title": "mmcif_pdbx.dic",
                "_dictionary_history.version": ["1.0", "1.1"],
                "Frames": {
                    "atom_site": {
                        "_category.id": "atom_site",
                        "_category.description": "Data items in the ATOM_SITE category",
                        "_category_examples.detail": ["Example 1"],
                        "_category_key.name": "_atom_site.id"
                    },
                    "_atom_site.id": {
                        "_item.name": "_atom_site.id",
                        "_item.category_id": "atom_site",
                        "_item.mandatory_code": "yes",
                        "_item_type.code": "code"
                    },
                    "odd": "not a frame"
                }
            },
            "version": 5
        })
    }

    fn deny_filter() -> KeyFilter {
        KeyFilter::from_config(&FilterConfig {
            mode: FilterMode::Deny,
            ..FilterConfig::default()
        })
    }

    #[test]
    fn test_deny_mode_drops_listed_keys() {
        let (out, removed) = deny_filter().apply(sample_dictionary());

        let block = &out["mmcif_pdbx.dic"];
        assert!(block.get("_dictionary_history.version").is_none());
        assert_eq!(block["_dictionary.title"], "mmcif_pdbx.dic");

        let atom_site = &block["Frames"]["atom_site"];
        assert!(atom_site.get("_category_examples.detail").is_none());
        assert!(atom_site.get("_category_key.name").is_none());
        assert_eq!(atom_site["_category.id"], "atom_site");

        let item = &block["Frames"]["_atom_site.id"];
        assert!(item.get("_item.mandatory_code").is_none());
        assert_eq!(item["_item_type.code"], "code");

        assert_eq!(removed, 4);
    }

    #[test]
    fn test_allow_mode_keeps_only_listed_keys() {
        let filter = KeyFilter::from_config(&FilterConfig::default());
        let (out, removed) = filter.apply(sample_dictionary());

        let block = out["mmcif_pdbx.dic"].as_object().unwrap();
        let keys: Vec<&str> = block.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_dictionary.title", "Frames"]);

        let atom_site = out["mmcif_pdbx.dic"]["Frames"]["atom_site"].as_object().unwrap();
        let keys: Vec<&str> = atom_site.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_category.id", "_category.description"]);

        assert_eq!(removed, 4);
    }

    #[test]
    fn test_unexpected_shapes_pass_through() {
        let (out, _) = deny_filter().apply(sample_dictionary());
        assert_eq!(out["version"], 5);
        assert_eq!(out["mmcif_pdbx.dic"]["Frames"]["odd"], "not a frame");

        let (out, removed) = deny_filter().apply(json!(["a", "b"]));
        assert_eq!(out, json!(["a", "b"]));
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_custom_frames_key() {
        let filter = KeyFilter::new(
            FilterMode::Allow,
            Vec::new(),
            vec!["keep".to_string()],
            "save_frames",
        );
        let (out, _) = filter.apply(json!({
            "block": {"save_frames": {"f": {"keep": 1, "drop": 2}}, "other": 3}
        }));
        assert_eq!(out, json!({"block": {"save_frames": {"f": {"keep": 1}}}}));
    }
}
