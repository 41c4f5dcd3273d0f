//! User settings for Checkline
//!
//! This module defines the `Settings` record consumed by the checkbox
//! renderer and sync controller, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};

/// Separator used between items when nothing else is configured.
pub const DEFAULT_SEPARATOR: &str = "|";

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences for checkbox groups.
///
/// Persisted as `{ "separator": "|", "crossOutWhenAllChecked": true }`.
/// `#[serde(default)]` merges stored values over the defaults, so a record
/// written by an older version (or edited by hand) with missing keys still
/// loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Delimiter between items on one line
    pub separator: String,

    /// Strike through a group once every item in it is checked
    pub cross_out_when_all_checked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            cross_out_when_all_checked: true,
        }
    }
}

impl Settings {
    /// Settings with a custom separator and default cross-out behavior.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    /// Sanitize settings so the renderer can always use them.
    ///
    /// An empty separator cannot delimit anything and is replaced by the default.
    pub fn sanitize(&mut self) {
        if self.separator.is_empty() {
            self.separator = DEFAULT_SEPARATOR.to_string();
        }
    }

    /// Deserialize settings and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.separator, "|");
        assert!(settings.cross_out_when_all_checked);
    }

    #[test]
    fn test_serialized_layout_uses_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, r#"{"separator":"|","crossOutWhenAllChecked":true}"#);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"separator": ";"}"#).unwrap();
        assert_eq!(settings.separator, ";");
        assert!(settings.cross_out_when_all_checked);

        let settings: Settings =
            serde_json::from_str(r#"{"crossOutWhenAllChecked": false}"#).unwrap();
        assert_eq!(settings.separator, "|");
        assert!(!settings.cross_out_when_all_checked);
    }

    #[test]
    fn test_empty_json_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"separator": "/", "futureOption": 3}"#).unwrap();
        assert_eq!(settings.separator, "/");
    }

    #[test]
    fn test_wrong_types_rejected() {
        let result: Result<Settings, _> =
            serde_json::from_str(r#"{"crossOutWhenAllChecked": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_empty_separator() {
        let settings = Settings::from_json_sanitized(r#"{"separator": ""}"#).unwrap();
        assert_eq!(settings.separator, DEFAULT_SEPARATOR);
    }

    #[test]
    fn test_sanitize_keeps_multi_char_separator() {
        let mut settings = Settings::with_separator(" // ");
        settings.sanitize();
        assert_eq!(settings.separator, " // ");
    }
}
