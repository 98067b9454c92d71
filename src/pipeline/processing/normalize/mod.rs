//! Display normalization for dictionary text.
//!
//! Dictionary descriptions arrive as CIF text fields: hard-wrapped prose,
//! bullet lists and `key = value` reference lines separated by blank lines.
//! [`clean`] reflows prose paragraphs onto a single line while keeping the
//! line breaks of list-like paragraphs, and [`normalize`] applies it to every
//! string leaf of a parsed [`Tree`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::Tree;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Line prefixes that mark a paragraph as a list.
const LIST_MARKERS: [&str; 4] = ["-", "*", "\u{2022}", "Ref:"];

/// Substring that marks a `key = value` line.
const ASSIGNMENT_MARKER: &str = " = ";

/// CIF text field delimiter.
const TEXT_FIELD_DELIMITER: char = ';';

/// How a paragraph is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// Reflowed into a single line.
    Prose,
    /// Line breaks kept; each line is whitespace-collapsed on its own.
    Structured,
}

/// Counters gathered while walking a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub strings_cleaned: usize,
    pub prose_paragraphs: usize,
    pub structured_paragraphs: usize,
}

/// Stateless normalizer for dictionary trees.
///
/// ```ignore
/// let normalizer = TextNormalizer;
/// let cleaned = normalizer.clean(";\n  Hello\n  world.\n;");
/// assert_eq!(cleaned, "Hello world.");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn clean(&self, text: &str) -> String {
        clean(text)
    }

    pub fn normalize(&self, tree: Tree) -> Tree {
        normalize(tree)
    }

    pub fn normalize_with_summary(&self, tree: Tree) -> (Tree, NormalizeSummary) {
        normalize_with_summary(tree)
    }
}

/// Rewrite every string leaf with [`clean`]; keys, order and non-string
/// scalars are left untouched.
pub fn normalize(tree: Tree) -> Tree {
    normalize_with_summary(tree).0
}

/// Same as [`normalize`], also returning what was cleaned.
pub fn normalize_with_summary(tree: Tree) -> (Tree, NormalizeSummary) {
    let mut summary = NormalizeSummary::default();
    let tree = walk(tree, &mut summary);
    (tree, summary)
}

fn walk(tree: Tree, summary: &mut NormalizeSummary) -> Tree {
    match tree {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, walk(value, summary)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| walk(item, summary)).collect())
        }
        Value::String(text) => Value::String(clean_counted(&text, summary)),
        other => other,
    }
}

/// Normalize one text value for display.
///
/// Empty input is returned unchanged. Otherwise the text is trimmed, one
/// enclosing pair of `;` delimiters is removed, and the remaining lines are
/// grouped into paragraphs at blank lines. Prose paragraphs are joined into a
/// single line; multi-line paragraphs containing list markers or ` = ` keep
/// their line breaks. Paragraphs are separated by one blank line.
pub fn clean(text: &str) -> String {
    clean_counted(text, &mut NormalizeSummary::default())
}

fn clean_counted(text: &str, summary: &mut NormalizeSummary) -> String {
    if text.is_empty() {
        return String::new();
    }
    summary.strings_cleaned += 1;

    let body = strip_delimiters(text.trim());

    split_paragraphs(body)
        .iter()
        .map(|lines| match classify_paragraph(lines) {
            ParagraphKind::Structured => {
                summary.structured_paragraphs += 1;
                lines
                    .iter()
                    .map(|line| collapse_whitespace(line))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            ParagraphKind::Prose => {
                summary.prose_paragraphs += 1;
                collapse_whitespace(&lines.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Remove exactly one leading and one trailing `;` when both are present.
fn strip_delimiters(text: &str) -> &str {
    if text.len() >= 2
        && text.starts_with(TEXT_FIELD_DELIMITER)
        && text.ends_with(TEXT_FIELD_DELIMITER)
    {
        &text[1..text.len() - 1]
    } else if text.len() == 1 && text.starts_with(TEXT_FIELD_DELIMITER) {
        ""
    } else {
        text
    }
}

/// Group trimmed, non-blank lines into paragraphs separated by blank lines.
pub fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(stripped);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// A paragraph is structured when it spans several lines and any line starts
/// with a list marker or contains ` = `.
pub fn classify_paragraph(lines: &[&str]) -> ParagraphKind {
    let has_marker = lines.iter().any(|line| {
        LIST_MARKERS.iter().any(|marker| line.starts_with(marker)) || line.contains(ASSIGNMENT_MARKER)
    });

    if lines.len() > 1 && has_marker {
        ParagraphKind::Structured
    } else {
        ParagraphKind::Prose
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}
