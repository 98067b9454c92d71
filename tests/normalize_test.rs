use mmcif_dict_builder::pipeline::processing::normalize::{
    classify_paragraph, clean, normalize, split_paragraphs, ParagraphKind,
};
use serde_json::json;

#[test]
fn test_empty_text_is_unchanged() {
    assert_eq!(clean(""), "");
}

#[test]
fn test_delimiter_unwrap() {
    assert_eq!(clean(";abc;"), "abc");
}

#[test]
fn test_prose_reflow() {
    assert_eq!(
        clean("Hello\nworld.\n\nSecond   paragraph."),
        "Hello world.\n\nSecond paragraph."
    );
}

#[test]
fn test_structured_preservation() {
    assert_eq!(
        clean("Options:\n- a = 1\n- b = 2"),
        "Options:\n- a = 1\n- b = 2"
    );
}

#[test]
fn test_single_line_is_never_structured() {
    assert_eq!(clean("- just one line"), "- just one line");
    assert_eq!(clean("-   one   line"), "- one line");
    assert_eq!(classify_paragraph(&["-   one   line"]), ParagraphKind::Prose);
}

#[test]
fn test_marker_line_next_to_prose_paragraph() {
    // Each paragraph is classified on its own lines only
    let raw = "- single bullet\n\nwrapped\ntext";
    assert_eq!(clean(raw), "- single bullet\n\nwrapped text");
    let paragraphs = split_paragraphs(raw);
    assert_eq!(paragraphs.len(), 2);
    assert!(paragraphs
        .iter()
        .all(|p| classify_paragraph(p) == ParagraphKind::Prose));
}

#[test]
fn test_realistic_item_description() {
    let raw = ";\n               The type of bond.\n\n               Ref: Allen, F. H. (1987).\n                    J. Chem. Soc.\n\n               ccdc   = Cambridge\n               other  = elsewhere\n;";
    assert_eq!(
        clean(raw),
        "The type of bond.\n\nRef: Allen, F. H. (1987).\nJ. Chem. Soc.\n\nccdc = Cambridge\nother = elsewhere"
    );
}

#[test]
fn test_idempotence() {
    let samples = [
        "",
        ";abc;",
        "Hello\nworld.\n\nSecond   paragraph.",
        "Options:\n- a = 1\n- b = 2",
        ";\n  text\n\n\n  * one\n  * two\n;",
        "\u{2022} first\n\u{2022} second",
    ];
    for sample in samples {
        let once = clean(sample);
        assert_eq!(clean(&once), once);
    }
}

#[test]
fn test_tree_shape_is_preserved() {
    let tree = json!({"a": ["x", {"b": "y"}]});
    assert_eq!(
        normalize(tree),
        json!({"a": [clean("x"), {"b": clean("y")}]})
    );
}

#[test]
fn test_non_string_scalars_pass_through() {
    let tree = json!({"n": 1.5, "i": -3, "t": true, "f": false, "z": null, "s": [null, 0]});
    assert_eq!(normalize(tree.clone()), tree);
}

#[test]
fn test_nested_sequences_of_text() {
    let tree = json!({
        "mmcif_pdbx.dic": {
            "Frames": {
                "atom_site": {
                    "_category.description": ";\n   Data items\n   wrapped.\n;",
                    "_item.name": ["_atom_site.id", "  _atom_site.type_symbol  "]
                }
            }
        }
    });
    let out = normalize(tree);
    let frame = &out["mmcif_pdbx.dic"]["Frames"]["atom_site"];
    assert_eq!(frame["_category.description"], "Data items wrapped.");
    assert_eq!(frame["_item.name"], json!(["_atom_site.id", "_atom_site.type_symbol"]));
}
