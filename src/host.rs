//! Host collaborator contracts
//!
//! The sync engine never owns the text buffer, the file system or the
//! render pipeline. It reaches them through these traits, which the bundled
//! desktop host (and the test fakes) implement.

use crate::config::Settings;
use std::path::{Path, PathBuf};

/// Line-addressable access to the buffer the user is editing.
///
/// Line numbers are zero-based. Lines are returned without their line
/// terminator.
pub trait EditableView {
    /// Number of lines in the buffer.
    fn line_count(&self) -> usize;

    /// Text of one line, or `None` past the end of the buffer.
    fn line(&self, line: usize) -> Option<&str>;

    /// Replace the whole text of one line.
    ///
    /// Returns `false` (and changes nothing) if the line does not exist.
    fn set_line(&mut self, line: usize, text: &str) -> bool;

    /// The whole buffer.
    fn text(&self) -> &str;

    /// The file backing this buffer, if it has one.
    fn file(&self) -> Option<PathBuf>;
}

/// Services the host provides to the renderer and sync controller.
pub trait Host {
    /// The active editable view, or `None` when only a read-only rendering
    /// is open.
    fn active_view(&mut self) -> Option<&mut dyn EditableView>;

    /// Persist the full buffer text to `file`.
    ///
    /// Fire-and-forget: completion (or failure) is the host's business.
    fn commit(&mut self, file: &Path, contents: String);

    /// Ask for the rendered view to be rebuilt.
    fn request_refresh(&mut self, force: bool);
}

/// Receives buffer change notifications.
pub trait ChangeListener {
    /// Called after every buffer edit. `doc_changed` is false for edits that
    /// only moved the selection.
    fn on_change(&mut self, doc_changed: bool, view: &dyn EditableView, settings: &Settings);
}
