//! Configuration module for Checkline
//!
//! This module holds the checkbox group settings and their JSON persistence
//! in the platform-specific config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
