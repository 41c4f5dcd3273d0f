//! egui rendering of checkbox groups
//!
//! Paints a `BlockView` as a wrapped row of checkboxes and reports which
//! toggle (if any) the user flipped this frame. The widget never keeps state
//! of its own: what it shows always comes from the view it is given.

use crate::checkbox::group::{BlockView, ContainerView};
use eframe::egui::{self, Color32, FontId, RichText, Ui};

// ─────────────────────────────────────────────────────────────────────────────
// Widget Output
// ─────────────────────────────────────────────────────────────────────────────

/// A toggle flipped by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggledItem {
    /// Line index of the item
    pub index: usize,
    /// State the checkbox now shows
    pub checked: bool,
}

/// Output from showing a checkbox group.
#[derive(Debug, Clone, Default)]
pub struct GroupWidgetOutput {
    pub toggled: Option<ToggledItem>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme-aware Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for checkbox group widgets.
#[derive(Debug, Clone)]
pub struct WidgetColors {
    pub text: Color32,
    pub separator: Color32,
    /// Label color once the group is crossed out
    pub muted: Color32,
}

impl WidgetColors {
    /// Pick colors matching the current egui visuals.
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        if visuals.dark_mode {
            Self {
                text: Color32::from_rgb(220, 220, 220),
                separator: Color32::from_rgb(150, 150, 150),
                muted: Color32::from_rgb(120, 120, 120),
            }
        } else {
            Self {
                text: Color32::from_rgb(30, 30, 30),
                separator: Color32::from_rgb(100, 100, 100),
                muted: Color32::from_rgb(150, 150, 150),
            }
        }
    }

    /// Label color for a container.
    fn label(&self, container: &ContainerView) -> Color32 {
        if container.crossed_out {
            self.muted
        } else {
            self.text
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Checkbox Group Widget
// ─────────────────────────────────────────────────────────────────────────────

/// A row of independently togglable checkboxes for one line.
///
/// # Example
///
/// ```ignore
/// if let Some(view) = tree.view(block) {
///     let output = CheckboxGroupWidget::new(view).font_size(14.0).show(ui);
///     if let Some(toggled) = output.toggled {
///         // hand the toggle to the sync controller
///     }
/// }
/// ```
pub struct CheckboxGroupWidget<'a> {
    view: &'a BlockView,
    font_size: f32,
    colors: Option<WidgetColors>,
}

impl<'a> CheckboxGroupWidget<'a> {
    pub fn new(view: &'a BlockView) -> Self {
        Self {
            view,
            font_size: 14.0,
            colors: None,
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: WidgetColors) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Show the group and return the toggle flipped this frame, if any.
    pub fn show(self, ui: &mut Ui) -> GroupWidgetOutput {
        let colors = self
            .colors
            .unwrap_or_else(|| WidgetColors::from_visuals(ui.visuals()));
        let mut output = GroupWidgetOutput::default();

        ui.horizontal_wrapped(|ui| {
            for container in &self.view.containers {
                let mut checked = container.checked;
                if ui.checkbox(&mut checked, "").changed() {
                    output.toggled = Some(ToggledItem {
                        index: container.index,
                        checked,
                    });
                }

                ui.label(label_text(container, self.font_size, colors.label(container)));

                if let Some(separator) = &container.separator {
                    ui.label(
                        RichText::new(separator)
                            .color(colors.separator)
                            .font(FontId::proportional(self.font_size)),
                    );
                }
            }
        });

        output
    }
}

/// Label for one container, struck through when the group is crossed out.
fn label_text(container: &ContainerView, font_size: f32, color: Color32) -> RichText {
    let text = RichText::new(&container.label)
        .color(color)
        .font(FontId::proportional(font_size));
    if container.crossed_out {
        text.strikethrough()
    } else {
        text
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn container(crossed_out: bool) -> ContainerView {
        ContainerView {
            index: 0,
            checked: true,
            label: "done".to_string(),
            separator: None,
            crossed_out,
        }
    }

    #[test]
    fn test_colors_follow_dark_mode() {
        let dark = WidgetColors::from_visuals(&egui::Visuals::dark());
        let light = WidgetColors::from_visuals(&egui::Visuals::light());
        assert_ne!(dark.text, light.text);
    }

    #[test]
    fn test_crossed_out_label_is_muted() {
        let colors = WidgetColors::from_visuals(&egui::Visuals::light());
        assert_eq!(colors.label(&container(true)), colors.muted);
        assert_eq!(colors.label(&container(false)), colors.text);
    }

    #[test]
    fn test_show_without_interaction_reports_nothing() {
        let view = BlockView {
            crossed_out: false,
            bound_line: Some(0),
            containers: vec![container(false)],
        };
        let ctx = egui::Context::default();
        let mut output = GroupWidgetOutput::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                output = CheckboxGroupWidget::new(&view).show(ui);
            });
        });
        assert!(output.toggled.is_none());
    }
}
