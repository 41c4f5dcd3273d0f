//! File system watcher for the open document.
//!
//! Watches the document's parent directory (editors often save by renaming
//! a temp file over the original) and reports events for that one file.

use crate::error::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

/// Events about the watched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// The file was written or replaced on disk
    Modified,
    /// The file was deleted
    Removed,
    /// The watcher encountered an error
    Error(String),
}

/// Watches one document file for external changes.
#[derive(Debug)]
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<DocumentEvent>,
    path: PathBuf,
}

impl DocumentWatcher {
    /// Start watching `path`.
    pub fn new(path: &Path) -> Result<Self> {
        let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = channel();
        let watched = target.clone();
        let mut watcher = RecommendedWatcher::new(
            move |result: std::result::Result<Event, notify::Error>| {
                Self::handle_event(result, &watched, &tx);
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path: target,
        })
    }

    /// Convert a raw notify event into document events for our file.
    fn handle_event(
        result: std::result::Result<Event, notify::Error>,
        target: &Path,
        tx: &Sender<DocumentEvent>,
    ) {
        match result {
            Ok(event) => {
                if !event.paths.iter().any(|p| p == target) {
                    return;
                }
                let doc_event = match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => Some(DocumentEvent::Modified),
                    EventKind::Remove(_) => Some(DocumentEvent::Removed),
                    _ => None,
                };
                if let Some(evt) = doc_event {
                    let _ = tx.send(evt);
                }
            }
            Err(e) => {
                let _ = tx.send(DocumentEvent::Error(e.to_string()));
            }
        }
    }

    /// Drain pending events without blocking.
    pub fn poll_events(&self) -> Vec<DocumentEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// The watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
