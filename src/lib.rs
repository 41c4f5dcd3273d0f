//! Checkline - inline checkbox groups for plain-text notes
//!
//! Renders lines like `[ ] wash car | [x] buy milk` as rows of toggles and
//! writes each toggle back into exactly its own segment of the source line.
//!
//! The engine (`checkbox`) talks to its environment only through the traits
//! in `host`. The rest of the crate is the bundled desktop host: an in-memory
//! buffer, background commits, a file watcher, settings and the eframe app.

pub mod app;
pub mod checkbox;
pub mod config;
pub mod document;
pub mod error;
pub mod files;
pub mod host;
pub mod ui;

pub use error::{Error, Result};
