//! Settings Panel Component for Checkline
//!
//! A small modal window with the two checkbox group options: the separator
//! between items and whether completed groups are crossed out.

use crate::config::{Settings, DEFAULT_SEPARATOR};
use eframe::egui::{self, RichText};

/// Result of showing the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanelOutput {
    /// Whether settings were modified.
    pub changed: bool,
    /// Whether the panel should be closed.
    pub close_requested: bool,
}

/// Settings panel state and rendering.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    /// Separator being typed; only applied while non-empty
    separator_draft: Option<String>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the settings panel as a window, editing `settings` in place.
    pub fn show(&mut self, ctx: &egui::Context, settings: &mut Settings) -> SettingsPanelOutput {
        let mut output = SettingsPanelOutput::default();
        let draft = self
            .separator_draft
            .get_or_insert_with(|| settings.separator.clone());

        egui::Window::new("⚙ Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(360.0)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                ui.label(RichText::new("Separator").strong());
                ui.label(
                    RichText::new("Character used to separate checkboxes in a group").weak(),
                );
                let response = ui.add(
                    egui::TextEdit::singleline(&mut *draft)
                        .hint_text(DEFAULT_SEPARATOR)
                        .desired_width(120.0),
                );
                if response.changed() {
                    output.changed |= apply_separator(settings, draft);
                }

                ui.add_space(12.0);

                if ui
                    .checkbox(
                        &mut settings.cross_out_when_all_checked,
                        "Cross out completed items",
                    )
                    .on_hover_text("Cross out text when all checkboxes in a group are checked")
                    .changed()
                {
                    output.changed = true;
                }

                ui.add_space(12.0);
                ui.separator();

                ui.horizontal(|ui| {
                    if ui
                        .button("↺ Reset")
                        .on_hover_text("Reset settings to defaults")
                        .clicked()
                    {
                        *settings = Settings::default();
                        *draft = settings.separator.clone();
                        output.changed = true;
                    }
                    if ui.button("Close").clicked() {
                        output.close_requested = true;
                    }
                });
            });

        if output.close_requested {
            self.separator_draft = None;
        }
        output
    }
}

/// Copy a typed separator into the settings.
///
/// An empty draft is left pending so the renderer never sees an empty
/// separator. Returns whether the settings changed.
fn apply_separator(settings: &mut Settings, draft: &str) -> bool {
    if draft.is_empty() || draft == settings.separator {
        return false;
    }
    settings.separator = draft.to_string();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_separator() {
        let mut settings = Settings::default();
        assert!(apply_separator(&mut settings, ";"));
        assert_eq!(settings.separator, ";");
    }

    #[test]
    fn test_empty_draft_is_not_applied() {
        let mut settings = Settings::default();
        assert!(!apply_separator(&mut settings, ""));
        assert_eq!(settings.separator, "|");
    }

    #[test]
    fn test_same_separator_is_not_a_change() {
        let mut settings = Settings::default();
        assert!(!apply_separator(&mut settings, "|"));
    }

    #[test]
    fn test_show_without_input_changes_nothing() {
        let ctx = egui::Context::default();
        let mut panel = SettingsPanel::new();
        let mut settings = Settings::default();
        let mut output = SettingsPanelOutput::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            output = panel.show(ctx, &mut settings);
        });
        assert!(!output.changed);
        assert_eq!(settings, Settings::default());
    }
}
