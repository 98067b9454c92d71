//! Default values for dictionary sources, asset locations and key lists.
//! Everything here is only a fallback for fields missing from the config file.

// Dictionary names
pub const PDBX_DICTIONARY: &str = "mmcif_pdbx_v50";
pub const MODELCIF_DICTIONARY: &str = "mmcif_ma";

// Upstream sources
pub const PDBX_DICTIONARY_URL: &str = "https://mmcif.wwpdb.org/dictionaries/ascii/mmcif_pdbx_v50.dic.gz";
pub const MODELCIF_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/ihmwg/ModelCIF/master/dist/mmcif_ma.dic";

// Prebuilt assets published with each release
pub const RELEASE_BASE_URL: &str =
    "https://github.com/N283T/mmcif-json-dictionary/releases/latest/download/";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_ASSET_FILES: [&str; 2] = ["mmcif_pdbx_v50.dic.json", "mmcif_ma.dic.json"];

pub const DEFAULT_CONFIG_PATH: &str = "dictionaries.toml";
pub const CONFIG_PATH_ENV: &str = "MMCIF_DICT_CONFIG";

pub const DEFAULT_GEMMI_BIN: &str = "gemmi";
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Key under each data block that holds the save frames.
pub const FRAMES_KEY: &str = "Frames";

/// Block-level keys dropped in deny mode.
pub const DENY_BLOCK_KEYS: &[&str] = &[
    // Version history (hundreds of entries)
    "_dictionary_history.version",
    "_dictionary_history.update",
    "_dictionary_history.revision",
    "_pdbx_dictionary_component.datablock_id",
    "_pdbx_dictionary_component.dictionary_component_id",
    "_pdbx_dictionary_component.title",
    "_pdbx_dictionary_component.version",
    "_pdbx_dictionary_component_history.dictionary_component_id",
    "_pdbx_dictionary_component_history.version",
    "_pdbx_dictionary_component_history.update",
    "_pdbx_dictionary_component_history.revision",
    // Unit conversion tables
    "_item_units_conversion.from_code",
    "_item_units_conversion.to_code",
    "_item_units_conversion.operator",
    "_item_units_conversion.factor",
    "_pdbx_conditional_context_list.ordinal_id",
    "_pdbx_conditional_context_list.context_id",
    "_pdbx_conditional_context_list.target_item_name",
    "_pdbx_conditional_context_list.target_item_value",
    "_pdbx_conditional_context_list.cmp_op",
    "_pdbx_conditional_context_list.log_op",
    "_pdbx_comparison_operator_list.code",
    "_pdbx_comparison_operator_list.description",
    "_pdbx_item_linked_group.category_id",
    "_pdbx_item_linked_group.link_group_id",
    "_pdbx_item_linked_group.label",
    "_pdbx_item_linked_group.context",
    "_pdbx_item_linked_group.condition_id",
    "_pdbx_item_linked_group_list.child_category_id",
    "_pdbx_item_linked_group_list.link_group_id",
    "_pdbx_item_linked_group_list.child_name",
    "_pdbx_item_linked_group_list.parent_name",
    "_pdbx_item_linked_group_list.parent_category_id",
];

/// Per-frame keys dropped in deny mode.
pub const DENY_FRAME_KEYS: &[&str] = &[
    // Examples are large and never shown on hover
    "_category_examples.detail",
    "_category_examples.case",
    "_item_examples.case",
    "_item_examples.detail",
    "_item_related.related_name",
    "_item_related.function_code",
    "_item_sub_category.id",
    // Deprecated names
    "_item_aliases.alias_name",
    "_item_aliases.dictionary",
    "_item_aliases.version",
    "_category_group.id",
    "_item.mandatory_code",
    "_category.mandatory_code",
    "_item_type_conditions.code",
    "_item_linked.child_name",
    "_item_linked.parent_name",
    "_pdbx_item_context.item_name",
    "_pdbx_item_context.type",
    "_item_dependent.dependent_name",
    "_pdbx_item_range.name",
    "_pdbx_item_range.minimum",
    "_pdbx_item_range.maximum",
    "_category_key.name",
];

/// Block-level keys kept in allow mode (the frames container is always kept).
pub const ALLOW_BLOCK_KEYS: &[&str] = &["_dictionary.title", "_dictionary.version"];

/// Per-frame keys kept in allow mode: exactly what the hover view reads.
pub const ALLOW_FRAME_KEYS: &[&str] = &[
    "_category.id",
    "_category.description",
    "_item.name",
    "_item.category_id",
    "_item_description.description",
    "_item_type.code",
];
