//! Checkbox group renderer and sync controller
//!
//! `RenderTree` owns every live rendered block. Rendering parses a block's
//! text, binds it to a buffer line and projects the group into a `BlockView`.
//! Toggling goes the other way: re-read the bound line from the buffer,
//! rewrite the one segment, write the whole line back, commit, and restyle
//! the group from the updated model.
//!
//! Line binding prefers the host-supplied source line. Without one, the
//! buffer is scanned for the first line whose trimmed text equals the
//! block's trimmed text and that no other block has claimed.
//!
//! Nothing here reports errors. A toggle that cannot be applied is skipped
//! and the next projection shows the text's real state.

use crate::checkbox::group::{BlockView, CheckboxGroup};
use crate::checkbox::parser::{is_candidate_line, parse_segment, rewrite_item, split_segments};
use crate::config::Settings;
use crate::host::{ChangeListener, EditableView, Host};
use log::{debug, trace};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers and Events
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque identity of one rendered block, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Per-render inputs handed over by the host.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Settings in effect for this render pass
    pub settings: &'a Settings,
    /// True buffer line of the block, when the host knows it
    pub source_line: Option<usize>,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            source_line: None,
        }
    }

    /// Supply the block's buffer line, skipping content matching.
    #[must_use]
    pub fn with_source_line(mut self, line: usize) -> Self {
        self.source_line = Some(line);
        self
    }
}

/// A toggle control changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleEvent {
    pub block: BlockId,
    /// Line index of the item whose toggle changed
    pub index: usize,
    /// State the toggle now shows
    pub checked: bool,
}

/// Why a toggle was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The block was removed or never rendered
    UnknownBlock,
    /// The block is not bound to a buffer line
    Unbound,
    /// The host has no active editable view
    NoActiveView,
    /// The bound line no longer exists in the buffer
    LineMissing,
    /// The index no longer names a checkbox on the bound line
    StaleIndex,
}

/// Result of handling a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The line was rewritten
    Applied { line: usize, text: String },
    /// Nothing was changed
    Skipped(SkipReason),
}

impl ToggleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ToggleOutcome::Applied { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Tree
// ─────────────────────────────────────────────────────────────────────────────

/// A block currently on screen.
#[derive(Debug, Clone)]
struct RenderedBlock {
    /// Trimmed text the block was rendered from
    raw_text: String,
    group: CheckboxGroup,
    view: BlockView,
}

/// Live rendered blocks plus the line claims that bind them to the buffer.
#[derive(Debug, Default)]
pub struct RenderTree {
    blocks: HashMap<BlockId, RenderedBlock>,
    /// Render order, for hosts that draw blocks top to bottom
    order: Vec<BlockId>,
    /// Buffer line -> block bound to it
    claims: HashMap<usize, BlockId>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `raw_text` as the checkbox group of `block`.
    ///
    /// Re-rendering an existing block replaces its group and releases its old
    /// line claim first.
    pub fn render(
        &mut self,
        block: BlockId,
        raw_text: &str,
        ctx: &RenderContext<'_>,
        host: &mut dyn Host,
    ) -> &BlockView {
        self.release_claim(block);

        let mut group = CheckboxGroup::parse(raw_text, &ctx.settings.separator);
        group.source_line = self.resolve_line(block, raw_text, ctx.source_line, host);

        match group.source_line {
            Some(line) => {
                debug!("Block {:?} bound to line {}", block, line);
                self.claims.insert(line, block);
            }
            None => debug!("Block {:?} rendered without a bound line", block),
        }

        let view = group.project(ctx.settings);
        if !self.blocks.contains_key(&block) {
            self.order.push(block);
        }

        self.blocks.insert(
            block,
            RenderedBlock {
                raw_text: raw_text.trim().to_string(),
                group,
                view,
            },
        );
        &self.blocks[&block].view
    }

    /// Find the buffer line a block belongs to.
    ///
    /// Returns `None` without an active view. A host-supplied line wins;
    /// otherwise the first matching line not claimed by another block.
    fn resolve_line(
        &self,
        block: BlockId,
        raw_text: &str,
        source_line: Option<usize>,
        host: &mut dyn Host,
    ) -> Option<usize> {
        let view = host.active_view()?;

        if let Some(line) = source_line {
            return Some(line);
        }

        let wanted = raw_text.trim();
        view.text()
            .split('\n')
            .enumerate()
            .filter(|(_, line)| line.trim() == wanted)
            .map(|(n, _)| n)
            .find(|n| self.claims.get(n).map_or(true, |owner| *owner == block))
    }

    fn release_claim(&mut self, block: BlockId) {
        if let Some(line) = self.blocks.get(&block).and_then(|b| b.group.source_line) {
            if self.claims.get(&line) == Some(&block) {
                self.claims.remove(&line);
            }
        }
    }

    /// Remove a block. Later toggles addressed to it are skipped.
    pub fn remove(&mut self, block: BlockId) -> bool {
        self.release_claim(block);
        self.order.retain(|id| *id != block);
        self.blocks.remove(&block).is_some()
    }

    /// Drop every block, e.g. before a full re-render.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.order.clear();
        self.claims.clear();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The projected widget tree of a block.
    pub fn view(&self, block: BlockId) -> Option<&BlockView> {
        self.blocks.get(&block).map(|b| &b.view)
    }

    /// The model behind a block.
    pub fn group(&self, block: BlockId) -> Option<&CheckboxGroup> {
        self.blocks.get(&block).map(|b| &b.group)
    }

    /// The trimmed text a block was rendered from.
    pub fn source_text(&self, block: BlockId) -> Option<&str> {
        self.blocks.get(&block).map(|b| b.raw_text.as_str())
    }

    /// Block bound to a buffer line, if any.
    pub fn block_at_line(&self, line: usize) -> Option<BlockId> {
        self.claims.get(&line).copied()
    }

    /// Blocks with their views, in render order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &BlockView)> {
        self.order
            .iter()
            .filter_map(|id| self.blocks.get(id).map(|b| (*id, &b.view)))
    }

    /// Reproject every block, e.g. after the cross-out setting changed.
    pub fn restyle(&mut self, settings: &Settings) {
        for block in self.blocks.values_mut() {
            block.view = block.group.project(settings);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toggle Handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a toggle to the buffer and the model.
    ///
    /// The bound line is re-read from the buffer rather than taken from the
    /// render-time text, so edits made since then to other items survive.
    pub fn toggle(
        &mut self,
        event: ToggleEvent,
        settings: &Settings,
        host: &mut dyn Host,
    ) -> ToggleOutcome {
        let outcome = self.apply_toggle(event, settings, host);
        if let ToggleOutcome::Skipped(reason) = outcome {
            debug!(
                "Toggle of item {} in block {:?} skipped: {:?}",
                event.index, event.block, reason
            );
        }
        outcome
    }

    fn apply_toggle(
        &mut self,
        event: ToggleEvent,
        settings: &Settings,
        host: &mut dyn Host,
    ) -> ToggleOutcome {
        let Some(block) = self.blocks.get_mut(&event.block) else {
            return ToggleOutcome::Skipped(SkipReason::UnknownBlock);
        };
        let Some(line) = block.group.source_line else {
            return ToggleOutcome::Skipped(SkipReason::Unbound);
        };

        let (new_text, file, full_text) = {
            let Some(view) = host.active_view() else {
                return ToggleOutcome::Skipped(SkipReason::NoActiveView);
            };
            let Some(current) = view.line(line) else {
                return ToggleOutcome::Skipped(SkipReason::LineMissing);
            };
            let Some(new_text) =
                rewrite_item(current, &settings.separator, event.index, event.checked)
            else {
                return ToggleOutcome::Skipped(SkipReason::StaleIndex);
            };
            if !view.set_line(line, &new_text) {
                return ToggleOutcome::Skipped(SkipReason::LineMissing);
            }
            (new_text, view.file(), view.text().to_string())
        };

        if let Some(file) = file {
            host.commit(&file, full_text);
            host.request_refresh(true);
        }

        block.group.set_checked(event.index, event.checked);
        block.view = block.group.project(settings);

        ToggleOutcome::Applied {
            line,
            text: new_text,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Live-Edit Hook
// ─────────────────────────────────────────────────────────────────────────────

/// Change listener that scans the buffer for checkbox-looking lines.
///
/// This is a validation-only pass. It records which lines look like they
/// hold checkbox groups and which of their segments the parser would reject,
/// but never touches the buffer or the render tree.
#[derive(Debug, Default)]
pub struct LiveEditHook {
    candidates: Vec<usize>,
    malformed: Vec<(usize, usize)>,
}

impl LiveEditHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that looked like checkbox groups on the last scan.
    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    /// `(line, segment)` pairs that look like markers but fail to parse.
    pub fn malformed(&self) -> &[(usize, usize)] {
        &self.malformed
    }

    fn scan(&mut self, view: &dyn EditableView, separator: &str) {
        self.candidates.clear();
        self.malformed.clear();

        for n in 0..view.line_count() {
            let Some(text) = view.line(n) else {
                continue;
            };
            if !is_candidate_line(text) {
                continue;
            }
            self.candidates.push(n);

            for (index, segment) in split_segments(text, separator).into_iter().enumerate() {
                if is_candidate_line(segment) && parse_segment(segment, index).is_none() {
                    self.malformed.push((n, index));
                }
            }
        }

        trace!(
            "Live-edit scan: {} candidate line(s), {} malformed segment(s)",
            self.candidates.len(),
            self.malformed.len()
        );
    }
}

impl ChangeListener for LiveEditHook {
    fn on_change(&mut self, doc_changed: bool, view: &dyn EditableView, settings: &Settings) {
        if doc_changed {
            self.scan(view, &settings.separator);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
