//! Checkbox group model and its widget projection
//!
//! `CheckboxGroup` is the authoritative state of one rendered line. The
//! widget tree (`BlockView`) is derived from it and rebuilt whenever the
//! model changes, so nothing ever reads state back out of widgets.

use crate::checkbox::parser::{parse_line, CheckboxItem};
use crate::config::Settings;

// ─────────────────────────────────────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────────────────────────────────────

/// All checkbox items parsed from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGroup {
    /// Items in line order
    pub items: Vec<CheckboxItem>,
    /// Whether every item is checked
    pub all_checked: bool,
    /// Buffer line this group was bound to, if any
    pub source_line: Option<usize>,
}

impl CheckboxGroup {
    /// Build an unbound group from its items.
    pub fn new(items: Vec<CheckboxItem>) -> Self {
        let all_checked = Self::compute_all_checked(&items);
        Self {
            items,
            all_checked,
            source_line: None,
        }
    }

    /// Parse a raw line into an unbound group.
    pub fn parse(raw: &str, separator: &str) -> Self {
        Self::new(parse_line(raw, separator))
    }

    /// True iff the group has items and every one of them is checked.
    ///
    /// An empty group renders nothing, so there is nothing to cross out.
    pub fn compute_all_checked(items: &[CheckboxItem]) -> bool {
        !items.is_empty() && items.iter().all(|item| item.checked)
    }

    /// Whether the group has no checkbox items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by its line index.
    pub fn item(&self, index: usize) -> Option<&CheckboxItem> {
        self.items.iter().find(|item| item.index == index)
    }

    /// Set the checked state of the item at `index` and recompute `all_checked`.
    ///
    /// Returns `false` if no item has that index.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.index == index) else {
            return false;
        };
        item.checked = checked;
        self.all_checked = Self::compute_all_checked(&self.items);
        true
    }

    /// Whether the cross-out style applies under the given settings.
    pub fn is_crossed_out(&self, settings: &Settings) -> bool {
        self.all_checked && settings.cross_out_when_all_checked
    }

    /// Project the model into a widget tree.
    pub fn project(&self, settings: &Settings) -> BlockView {
        let crossed_out = self.is_crossed_out(settings);
        let last = self.items.len().saturating_sub(1);

        let containers = self
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| ContainerView {
                index: item.index,
                checked: item.checked,
                label: item.content.clone(),
                separator: (position < last).then(|| settings.separator.clone()),
                crossed_out,
            })
            .collect();

        BlockView {
            crossed_out,
            bound_line: self.source_line,
            containers,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Projection
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered form of one block: the whole line as a row of toggles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockView {
    /// Cross-out style on the block itself
    pub crossed_out: bool,
    /// Bound buffer line, mirrored for hosts that mark lines in their tree
    pub bound_line: Option<usize>,
    /// One container per checkbox item
    pub containers: Vec<ContainerView>,
}

/// One toggle with its label and trailing separator glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerView {
    /// Line index of the item this container toggles
    pub index: usize,
    pub checked: bool,
    pub label: String,
    /// Separator glyph shown after the label (absent on the last item)
    pub separator: Option<String>,
    pub crossed_out: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checked_requires_every_item() {
        assert!(!CheckboxGroup::parse("[ ] a | [x] b", "|").all_checked);
        assert!(CheckboxGroup::parse("[x] a | [X] b", "|").all_checked);
    }

    #[test]
    fn test_empty_group_is_not_all_checked() {
        let group = CheckboxGroup::parse("", "|");
        assert!(group.is_empty());
        assert!(!group.all_checked);
        assert!(group.project(&Settings::default()).containers.is_empty());
    }

    #[test]
    fn test_set_checked_recomputes_aggregate() {
        let mut group = CheckboxGroup::parse("[ ] a | [x] b", "|");
        assert!(group.set_checked(0, true));
        assert!(group.all_checked);

        assert!(group.set_checked(1, false));
        assert!(!group.all_checked);

        assert!(!group.set_checked(9, true));
    }

    #[test]
    fn test_item_lookup_uses_line_index() {
        let group = CheckboxGroup::parse("note | [x] b", "|");
        assert!(group.item(0).is_none());
        assert_eq!(group.item(1).map(|i| i.content.as_str()), Some("b"));
    }

    #[test]
    fn test_projection_separators_between_items() {
        let group = CheckboxGroup::parse("[ ] a | [x] b | [ ] c", "|");
        let view = group.project(&Settings::default());

        let separators: Vec<Option<&str>> = view
            .containers
            .iter()
            .map(|c| c.separator.as_deref())
            .collect();
        assert_eq!(separators, vec![Some("|"), Some("|"), None]);
        assert_eq!(view.containers[1].label, "b");
        assert!(view.containers[1].checked);
    }

    #[test]
    fn test_single_item_has_no_separator() {
        let view = CheckboxGroup::parse("[x] solo", "|").project(&Settings::default());
        assert_eq!(view.containers.len(), 1);
        assert!(view.containers[0].separator.is_none());
    }

    #[test]
    fn test_cross_out_propagates_to_block_and_containers() {
        let mut group = CheckboxGroup::parse("[x] a | [x] b", "|");
        let settings = Settings::default();

        let view = group.project(&settings);
        assert!(view.crossed_out);
        assert!(view.containers.iter().all(|c| c.crossed_out));

        group.set_checked(1, false);
        let view = group.project(&settings);
        assert!(!view.crossed_out);
        assert!(view.containers.iter().all(|c| !c.crossed_out));
    }

    #[test]
    fn test_cross_out_respects_setting() {
        let group = CheckboxGroup::parse("[x] a | [x] b", "|");
        let settings = Settings {
            cross_out_when_all_checked: false,
            ..Settings::default()
        };
        let view = group.project(&settings);
        assert!(!view.crossed_out);
        assert!(view.containers.iter().all(|c| !c.crossed_out));
    }

    #[test]
    fn test_projection_uses_configured_separator() {
        let settings = Settings::with_separator(";");
        let view = CheckboxGroup::parse("[ ] a ; [ ] b", ";").project(&settings);
        assert_eq!(view.containers[0].separator.as_deref(), Some(";"));
    }
}
