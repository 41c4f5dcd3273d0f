//! UI components for Checkline
//!
//! The checkbox group widget itself lives in `checkbox::widgets`; this module
//! holds the surrounding panels.

mod settings;

pub use settings::{SettingsPanel, SettingsPanelOutput};
