//! In-memory text buffer for the bundled host
//!
//! `Document` holds the text being edited, the last committed snapshot and an
//! undo history. It implements `EditableView`, addressing lines split on
//! `\n`; a trailing `\r` is hidden from readers and kept on write.

use crate::host::EditableView;
use std::ops::Range;
use std::path::PathBuf;

/// Maximum number of undo snapshots kept per document.
const MAX_UNDO_SIZE: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// An open text document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// File path (None for unsaved/new documents)
    path: Option<PathBuf>,
    /// Current buffer text
    content: String,
    /// Text as last committed to disk (for detecting modifications)
    saved_content: String,
    /// Undo history stack
    undo_stack: Vec<String>,
    /// Redo history stack
    redo_stack: Vec<String>,
    /// Incremented whenever content changes outside the raw text editor,
    /// so the editor widget knows to re-read it
    content_version: u64,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unsaved document with initial text.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Create a document with content read from a file.
    pub fn with_file(path: PathBuf, content: String) -> Self {
        Self {
            path: Some(path),
            saved_content: content.clone(),
            content,
            ..Self::default()
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Mutable access for the raw text editor.
    ///
    /// Pair with [`Document::record_edit`] once the editor reports a change.
    pub fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    /// Check if the document has changes that were not committed.
    pub fn is_modified(&self) -> bool {
        self.content != self.saved_content
    }

    /// Get the display title for this document.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Record that `contents` reached disk.
    ///
    /// Commits complete asynchronously, so the buffer may already be ahead of
    /// the snapshot that was written.
    pub fn mark_committed(&mut self, contents: &str) {
        self.saved_content = contents.to_string();
    }

    /// Replace the whole buffer, e.g. after an external edit on disk.
    ///
    /// The replaced text goes onto the undo stack.
    pub fn set_content(&mut self, new_content: String) {
        if new_content != self.content {
            let old = std::mem::replace(&mut self.content, new_content);
            self.push_undo(old);
            self.content_version = self.content_version.wrapping_add(1);
        }
    }

    /// Replace the buffer with what is on disk and treat it as saved.
    pub fn reload(&mut self, disk_content: String) {
        self.set_content(disk_content);
        self.saved_content = self.content.clone();
    }

    /// Record an edit made directly through [`Document::content_mut`].
    ///
    /// Call this AFTER the content changed, passing the content from before.
    pub fn record_edit(&mut self, old_content: String) {
        if old_content != self.content {
            self.push_undo(old_content);
        }
    }

    fn push_undo(&mut self, snapshot: String) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_UNDO_SIZE {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Undo the last edit. Returns `true` if undo was performed.
    pub fn undo(&mut self) -> bool {
        if let Some(previous) = self.undo_stack.pop() {
            let current = std::mem::replace(&mut self.content, previous);
            self.redo_stack.push(current);
            self.content_version = self.content_version.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Redo the last undone edit. Returns `true` if redo was performed.
    pub fn redo(&mut self) -> bool {
        if let Some(next) = self.redo_stack.pop() {
            let current = std::mem::replace(&mut self.content, next);
            self.undo_stack.push(current);
            self.content_version = self.content_version.wrapping_add(1);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn content_version(&self) -> u64 {
        self.content_version
    }

    /// Iterate over lines without terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    /// Byte range of a line's text, excluding `\n` and any trailing `\r`.
    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (n, raw) in self.content.split('\n').enumerate() {
            if n == line {
                let text_len = raw.strip_suffix('\r').unwrap_or(raw).len();
                return Some(start..start + text_len);
            }
            start += raw.len() + 1;
        }
        None
    }
}

impl EditableView for Document {
    fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    fn line(&self, line: usize) -> Option<&str> {
        self.line_range(line).map(|range| &self.content[range])
    }

    fn set_line(&mut self, line: usize, text: &str) -> bool {
        let Some(range) = self.line_range(line) else {
            return false;
        };
        if &self.content[range.clone()] == text {
            return true;
        }
        let old = self.content.clone();
        self.content.replace_range(range, text);
        self.push_undo(old);
        self.content_version = self.content_version.wrapping_add(1);
        true
    }

    fn text(&self) -> &str {
        &self.content
    }

    fn file(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_access() {
        let doc = Document::from_text("first\n[ ] a | [x] b\nlast");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(1), Some("[ ] a | [x] b"));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn test_empty_document_has_one_empty_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(0), Some(""));
    }

    #[test]
    fn test_set_line_replaces_whole_line_only() {
        let mut doc = Document::from_text("one\ntwo\nthree");
        assert!(doc.set_line(1, "TWO!"));
        assert_eq!(doc.content(), "one\nTWO!\nthree");
        assert!(!doc.set_line(5, "nope"));
        assert_eq!(doc.content(), "one\nTWO!\nthree");
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        let mut doc = Document::from_text("[ ] a\r\n[ ] b\r\n");
        assert_eq!(doc.line(0), Some("[ ] a"));
        assert!(doc.set_line(0, "[x] a"));
        assert_eq!(doc.content(), "[x] a\r\n[ ] b\r\n");
        assert_eq!(doc.lines().collect::<Vec<_>>(), vec!["[x] a", "[ ] b", ""]);
    }

    #[test]
    fn test_set_line_is_undoable() {
        let mut doc = Document::from_text("[ ] a");
        doc.set_line(0, "[x] a");
        assert!(doc.can_undo());
        assert!(doc.undo());
        assert_eq!(doc.content(), "[ ] a");
        assert!(doc.redo());
        assert_eq!(doc.content(), "[x] a");
    }

    #[test]
    fn test_set_line_with_same_text_is_not_an_edit() {
        let mut doc = Document::from_text("[ ] a");
        let version = doc.content_version();
        assert!(doc.set_line(0, "[ ] a"));
        assert!(!doc.can_undo());
        assert_eq!(doc.content_version(), version);
    }

    #[test]
    fn test_modified_tracks_committed_snapshot() {
        let mut doc = Document::with_file(PathBuf::from("/notes/todo.md"), "[ ] a".into());
        assert!(!doc.is_modified());
        assert_eq!(doc.title(), "todo.md");

        doc.set_line(0, "[x] a");
        assert!(doc.is_modified());
        assert_eq!(doc.title(), "todo.md*");

        doc.mark_committed("[x] a");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_record_edit_from_raw_editor() {
        let mut doc = Document::from_text("abc");
        let old = doc.content().to_string();
        doc.content_mut().push('d');
        doc.record_edit(old);
        assert!(doc.undo());
        assert_eq!(doc.content(), "abc");
    }

    #[test]
    fn test_reload_marks_saved() {
        let mut doc = Document::with_file(PathBuf::from("a.md"), "old".into());
        doc.reload("new".into());
        assert_eq!(doc.content(), "new");
        assert!(!doc.is_modified());
        assert!(doc.can_undo());
    }

    #[test]
    fn test_untitled_title() {
        assert_eq!(Document::new().title(), "Untitled");
    }
}
