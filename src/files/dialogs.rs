//! Native file dialog integration using the rfd crate

use rfd::FileDialog;
use std::path::PathBuf;

/// File extensions offered in the dialogs.
const NOTE_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "text"];

/// Opens a native file dialog for picking one document.
///
/// Returns `None` if the dialog was cancelled.
pub fn open_file_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Note")
        .add_filter("Notes", NOTE_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog for an untitled document.
pub fn save_file_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Note")
        .add_filter("Notes", NOTE_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .set_file_name("untitled.md");

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
