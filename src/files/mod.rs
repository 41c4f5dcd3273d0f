//! File operations for the bundled host
//!
//! Loading documents, committing them in the background, watching them for
//! external edits, and the native open/save dialogs.

mod commit;
pub mod dialogs;
mod watcher;

pub use commit::{CommitCompletion, CommitWorker};
pub use watcher::{DocumentEvent, DocumentWatcher};

use crate::document::Document;
use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a document from disk.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = read_text(path)?;
    info!("Opened {}", path.display());
    Ok(Document::with_file(path.to_path_buf(), content))
}

/// Read a file as text, mapping failures to `Error::FileRead`.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: PathBuf::from(path),
        source: e,
    })
}
