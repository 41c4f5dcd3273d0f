//! Line parser and serializer for inline checkbox groups
//!
//! A line such as `[ ] wash car | [x] buy milk` is split on the configured
//! separator into segments. Every segment whose trimmed text starts with a
//! checkbox marker (optionally behind a `-` bullet) becomes a `CheckboxItem`;
//! other segments are inert text but still occupy an index, so an item keeps
//! the index of its segment in the raw split.
//!
//! Serialization only regenerates the segment being toggled. All other
//! segments are written back exactly as they were read.

use regex::Regex;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Marker Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Anchored marker at the start of a trimmed segment: optional `-` bullet,
/// then `[`, at most one space or `x`, then `]`.
fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"(?i)^(?P<prefix>-\s*)?\[(?P<mark>[\sx]?)\]").expect("valid marker regex")
    })
}

/// Unanchored marker used to decide whether a block is worth rendering.
fn block_marker_regex() -> &'static Regex {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    BLOCK.get_or_init(|| Regex::new(r"(?i)\[ ?\]|\[x\]").expect("valid block marker regex"))
}

/// Looser pattern used by the live-edit scan. Tolerates padding inside the
/// brackets, so it also flags lines the parser would reject.
fn candidate_regex() -> &'static Regex {
    static CANDIDATE: OnceLock<Regex> = OnceLock::new();
    CANDIDATE.get_or_init(|| {
        Regex::new(r"(?i)(?:-\s*)?\[\s*[x ]?\s*\]").expect("valid candidate regex")
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Checkbox Item
// ─────────────────────────────────────────────────────────────────────────────

/// One checkbox segment of a delimited line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxItem {
    /// The segment with surrounding whitespace stripped
    pub raw_text: String,
    /// Bullet characters before the marker (e.g. `"- "`), kept verbatim
    pub prefix: String,
    /// Whether the marker holds an `x` (either case)
    pub checked: bool,
    /// Text after the marker, trimmed
    pub content: String,
    /// Position of the segment in the raw split of its line
    pub index: usize,
}

impl CheckboxItem {
    /// The marker this item would be written with.
    pub fn marker(checked: bool) -> &'static str {
        if checked {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Split a raw line into untrimmed segments.
///
/// A line without the separator (or an empty separator) is a single segment.
pub fn split_segments<'a>(raw: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() || !raw.contains(separator) {
        vec![raw]
    } else {
        raw.split(separator).collect()
    }
}

/// Parse one segment at position `index` of its line.
///
/// Returns `None` for inert text, including malformed markers like `[xx]`.
pub fn parse_segment(segment: &str, index: usize) -> Option<CheckboxItem> {
    let trimmed = segment.trim();
    let caps = marker_regex().captures(trimmed)?;
    let whole = caps.get(0)?;

    let prefix = caps.name("prefix").map_or("", |m| m.as_str());
    let checked = caps
        .name("mark")
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x"));

    Some(CheckboxItem {
        raw_text: trimmed.to_string(),
        prefix: prefix.to_string(),
        checked,
        content: trimmed[whole.end()..].trim().to_string(),
        index,
    })
}

/// Parse a line into its checkbox items, in line order.
pub fn parse_line(raw: &str, separator: &str) -> Vec<CheckboxItem> {
    split_segments(raw, separator)
        .into_iter()
        .enumerate()
        .filter_map(|(index, segment)| parse_segment(segment, index))
        .collect()
}

/// Whether a block of text contains anything that looks like a checkbox.
///
/// Hosts use this to decide which blocks to hand to the renderer.
pub fn contains_marker(text: &str) -> bool {
    block_marker_regex().is_match(text)
}

/// Whether a buffer line looks like it holds checkbox markers, using the
/// looser live-edit pattern.
pub fn is_candidate_line(text: &str) -> bool {
    candidate_regex().is_match(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialization
// ─────────────────────────────────────────────────────────────────────────────

/// Write an item back out with the given checked state.
///
/// Only the marker character changes meaning; prefix and content are
/// regenerated from the parsed fields rather than copied byte-for-byte.
pub fn serialize_item(item: &CheckboxItem, checked: bool) -> String {
    format!(
        "{}{} {}",
        item.prefix,
        CheckboxItem::marker(checked),
        item.content
    )
}

/// Join pre-rendered segments with the separator, without padding.
pub fn serialize_line<S: AsRef<str>>(segments: &[S], separator: &str) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Rewrite the checkbox at `index` of `raw` to the given state.
///
/// Every other segment is kept exactly as it appears in `raw`. Returns `None`
/// when `index` does not name a checkbox segment of this line (the line may
/// have shrunk or changed since it was rendered).
pub fn rewrite_item(raw: &str, separator: &str, index: usize, checked: bool) -> Option<String> {
    let mut segments: Vec<String> = split_segments(raw, separator)
        .into_iter()
        .map(str::to_string)
        .collect();

    let item = parse_segment(segments.get(index)?, index)?;
    segments[index] = serialize_item(&item, checked);

    Some(serialize_line(&segments, separator))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_states(items: &[CheckboxItem]) -> Vec<bool> {
        items.iter().map(|i| i.checked).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Marker recognition
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_marker_variants() {
        let cases = [("[ ]", false), ("[]", false), ("[x]", true), ("[X]", true)];
        for (marker, expected) in cases {
            let item = parse_segment(&format!("{} task", marker), 0)
                .unwrap_or_else(|| panic!("{} should parse", marker));
            assert_eq!(item.checked, expected, "marker {}", marker);
            assert_eq!(item.content, "task");
        }
    }

    #[test]
    fn test_malformed_markers_are_inert() {
        assert!(parse_segment("[y] nope", 0).is_none());
        assert!(parse_segment("[xx] nope", 0).is_none());
        assert!(parse_segment("[  ] two spaces", 0).is_none());
        assert!(parse_segment("plain text", 0).is_none());
    }

    #[test]
    fn test_marker_must_lead_the_segment() {
        assert!(parse_segment("buy [x] milk", 0).is_none());
    }

    #[test]
    fn test_bullet_prefix_preserved() {
        let item = parse_segment("  - [x] done ", 0).unwrap();
        assert_eq!(item.prefix, "- ");
        assert_eq!(item.raw_text, "- [x] done");
        assert_eq!(item.content, "done");
        assert!(item.checked);

        let item = parse_segment("-[ ]tight", 3).unwrap();
        assert_eq!(item.prefix, "-");
        assert_eq!(item.content, "tight");
        assert_eq!(item.index, 3);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line parsing
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_scenario_line() {
        let items = parse_line("[ ] wash car | [x] buy milk", "|");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content, "wash car");
        assert!(!items[0].checked);
        assert_eq!(items[1].content, "buy milk");
        assert!(items[1].checked);
        assert_eq!(items[1].index, 1);
    }

    #[test]
    fn test_empty_line_has_no_items() {
        assert!(parse_line("", "|").is_empty());
        assert!(parse_line("   ", "|").is_empty());
    }

    #[test]
    fn test_line_without_separator_is_single_item() {
        let items = parse_line("[x] just one", "|");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].index, 0);

        assert!(parse_line("no checkbox here", "|").is_empty());
    }

    #[test]
    fn test_inert_segments_keep_their_index_slot() {
        let items = parse_line("[ ] a | note | [xx] bad | [x] d", "|");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].index, 0);
        assert_eq!(items[1].index, 3);
        assert_eq!(checked_states(&items), vec![false, true]);
    }

    #[test]
    fn test_multi_char_separator() {
        let items = parse_line("[ ] a // [x] b // [ ] c", "//");
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].content, "c");
    }

    #[test]
    fn test_empty_separator_treats_line_as_one_segment() {
        assert_eq!(split_segments("[ ] a | [x] b", ""), vec!["[ ] a | [x] b"]);
    }

    #[test]
    fn test_contains_marker() {
        assert!(contains_marker("[ ] a | [x] b"));
        assert!(contains_marker("something [X] inline"));
        assert!(contains_marker("[]"));
        assert!(!contains_marker("[y] no"));
        assert!(!contains_marker("plain"));
    }

    #[test]
    fn test_candidate_line_is_looser() {
        assert!(is_candidate_line("- [  x ] padded"));
        assert!(!contains_marker("- [  x ] padded"));
        assert!(!is_candidate_line("nothing to see"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_serialize_item_only_changes_marker() {
        let item = parse_segment("- [ ] feed cat", 0).unwrap();
        assert_eq!(serialize_item(&item, true), "- [x] feed cat");
        assert_eq!(serialize_item(&item, false), "- [ ] feed cat");
    }

    #[test]
    fn test_serialize_item_normalizes_marker_and_spacing() {
        let item = parse_segment("[X]shout", 0).unwrap();
        assert_eq!(serialize_item(&item, true), "[x] shout");
        let item = parse_segment("[]  spaced", 0).unwrap();
        assert_eq!(serialize_item(&item, false), "[ ] spaced");
    }

    #[test]
    fn test_serialize_line_joins_without_padding() {
        assert_eq!(serialize_line(&["[ ] a", "[x] b"], "|"), "[ ] a|[x] b");
        assert_eq!(serialize_line::<&str>(&[], "|"), "");
    }

    #[test]
    fn test_roundtrip_of_normalized_line() {
        let line = "[ ] a|- [x] b|[ ] c";
        let rendered: Vec<String> = parse_line(line, "|")
            .iter()
            .map(|item| serialize_item(item, item.checked))
            .collect();
        assert_eq!(serialize_line(&rendered, "|"), line);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rewriting a single item
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_rewrite_scenario() {
        let line = rewrite_item("[ ] wash car | [x] buy milk", "|", 0, true).unwrap();
        assert_eq!(line, "[x] wash car| [x] buy milk");
        assert_eq!(checked_states(&parse_line(&line, "|")), vec![true, true]);
    }

    #[test]
    fn test_rewrite_isolates_the_toggled_item() {
        let before = "[ ] A | [ ] B | [x] C";
        let after = rewrite_item(before, "|", 1, true).unwrap();

        let old = parse_line(before, "|");
        let new = parse_line(&after, "|");
        assert_eq!(new.len(), 3);
        for i in [0, 2] {
            assert_eq!(new[i].content, old[i].content);
            assert_eq!(new[i].checked, old[i].checked);
        }
        assert!(new[1].checked);
        assert_eq!(new[1].content, "B");
        assert!(after.starts_with("[ ] A |"));
        assert!(after.ends_with("| [x] C"));
    }

    #[test]
    fn test_rewrite_out_of_range_or_inert() {
        assert!(rewrite_item("[ ] a | [x] b", "|", 2, true).is_none());
        assert!(rewrite_item("[ ] a | note", "|", 1, true).is_none());
    }

    #[test]
    fn test_rewrite_single_item_line() {
        assert_eq!(
            rewrite_item("- [x] lone", "|", 0, false).as_deref(),
            Some("- [ ] lone")
        );
    }
}
