//! Main application module for Checkline
//!
//! The desktop host: a raw text pane on the left, the rendered pane on the
//! right. Every non-blank line of the document becomes a block in the
//! rendered pane; lines with checkbox markers are rendered as interactive
//! groups through the `RenderTree`, everything else as plain text.

use crate::checkbox::{
    contains_marker, BlockId, CheckboxGroupWidget, LiveEditHook, RenderContext, RenderTree,
    ToggleEvent, ToggleOutcome, WidgetColors,
};
use crate::config::{save_config_silent, Settings};
use crate::document::Document;
use crate::files::{self, dialogs, CommitWorker, DocumentEvent, DocumentWatcher};
use crate::host::{ChangeListener, EditableView, Host};
use crate::ui::SettingsPanel;
use eframe::egui;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Font size for the rendered pane.
const FONT_SIZE: f32 = 14.0;

/// How often to wake up to poll the watcher and commit worker.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What the rendered pane shows for one buffer line.
#[derive(Debug, Clone)]
enum PreviewLine {
    Text(String),
    Group(BlockId),
}

/// Toolbar actions, applied after the panels are drawn to avoid borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum ToolbarAction {
    Open,
    Save,
    Undo,
    Redo,
    Settings,
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Services
// ─────────────────────────────────────────────────────────────────────────────

/// `Host` backed by the app's document and commit worker.
struct DesktopHost<'a> {
    document: &'a mut Document,
    commits: &'a mut CommitWorker,
    refresh_requested: &'a mut bool,
}

impl Host for DesktopHost<'_> {
    fn active_view(&mut self) -> Option<&mut dyn EditableView> {
        let view: &mut dyn EditableView = &mut *self.document;
        Some(view)
    }

    fn commit(&mut self, file: &Path, contents: String) {
        self.commits.submit(file.to_path_buf(), contents);
    }

    fn request_refresh(&mut self, force: bool) {
        debug!("Refresh requested (force: {})", force);
        *self.refresh_requested = true;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application
// ─────────────────────────────────────────────────────────────────────────────

/// The main application struct that holds all state and implements eframe::App.
pub struct CheckLineApp {
    settings: Settings,
    settings_panel: SettingsPanel,
    show_settings: bool,
    document: Document,
    tree: RenderTree,
    preview: Vec<PreviewLine>,
    live_edit: LiveEditHook,
    commits: CommitWorker,
    watcher: Option<DocumentWatcher>,
    /// Re-render the rendered pane once outstanding commits have landed
    refresh_requested: bool,
    /// Last error shown in the status bar
    status: Option<String>,
}

impl CheckLineApp {
    /// Create the app, optionally opening a document right away.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: Settings,
        path: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            settings,
            settings_panel: SettingsPanel::new(),
            show_settings: false,
            document: Document::new(),
            tree: RenderTree::new(),
            preview: Vec::new(),
            live_edit: LiveEditHook::new(),
            commits: CommitWorker::new(),
            watcher: None,
            refresh_requested: true,
            status: None,
        };
        if let Some(path) = path {
            app.open(path);
        }
        app
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────

    fn open(&mut self, path: PathBuf) {
        match files::load_document(&path) {
            Ok(document) => {
                self.document = document;
                self.watch(&path);
                self.status = None;
                self.notify_changed();
            }
            Err(e) => {
                warn!("{}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn watch(&mut self, path: &Path) {
        self.watcher = match DocumentWatcher::new(path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("Not watching {}: {}", path.display(), e);
                None
            }
        };
    }

    fn save(&mut self) {
        let path = match self.document.path() {
            Some(path) => path.clone(),
            None => {
                let Some(path) = dialogs::save_file_dialog(None) else {
                    return;
                };
                self.document.set_path(path.clone());
                self.watch(&path);
                path
            }
        };
        self.commits.submit(path, self.document.content().to_string());
    }

    fn poll_commits(&mut self) {
        for done in self.commits.poll() {
            match done.result {
                Ok(()) => {
                    if self.document.path() == Some(&done.path) {
                        self.document.mark_committed(&done.contents);
                    }
                    info!("Saved {}", done.path.display());
                }
                Err(e) => {
                    warn!("{}", e);
                    self.status = Some(e.to_string());
                }
            }
        }
    }

    fn poll_watcher(&mut self) {
        let events = self
            .watcher
            .as_ref()
            .map(DocumentWatcher::poll_events)
            .unwrap_or_default();

        for event in events {
            match event {
                DocumentEvent::Modified => self.reload_from_disk(),
                DocumentEvent::Removed => {
                    self.status = Some(format!("{} was deleted on disk", self.document.title()));
                }
                DocumentEvent::Error(msg) => warn!("File watcher error: {}", msg),
            }
        }
    }

    /// Pick up an external edit, unless local edits would be lost.
    fn reload_from_disk(&mut self) {
        let Some(path) = self.document.path().cloned() else {
            return;
        };
        if self.document.is_modified() || self.commits.pending() > 0 {
            debug!("Ignoring external change while local edits are pending");
            return;
        }
        match files::read_text(&path) {
            Ok(text) if text != self.document.content() => {
                info!("Reloading {} after external change", path.display());
                self.document.reload(text);
                self.notify_changed();
            }
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering and Sync
    // ─────────────────────────────────────────────────────────────────────────

    /// The buffer changed: run change listeners and schedule a re-render.
    fn notify_changed(&mut self) {
        self.live_edit
            .on_change(true, &self.document, &self.settings);
        self.refresh_requested = true;
    }

    /// Rebuild the rendered pane from the current buffer.
    fn rebuild_preview(&mut self) {
        self.tree.clear();
        self.preview.clear();

        let lines: Vec<String> = self.document.lines().map(str::to_string).collect();
        let mut host = DesktopHost {
            document: &mut self.document,
            commits: &mut self.commits,
            refresh_requested: &mut self.refresh_requested,
        };

        for (n, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if contains_marker(line) {
                let block = BlockId::new(n as u64);
                let ctx = RenderContext::new(&self.settings).with_source_line(n);
                if !self.tree.render(block, line, &ctx, &mut host).containers.is_empty() {
                    self.preview.push(PreviewLine::Group(block));
                    continue;
                }
                self.tree.remove(block);
            }
            self.preview.push(PreviewLine::Text(line.trim().to_string()));
        }

        debug!(
            "Rendered {} line(s), {} checkbox group(s)",
            self.preview.len(),
            self.tree.len()
        );
    }

    fn apply_toggle(&mut self, event: ToggleEvent) {
        let mut host = DesktopHost {
            document: &mut self.document,
            commits: &mut self.commits,
            refresh_requested: &mut self.refresh_requested,
        };
        if let ToggleOutcome::Applied { line, .. } =
            self.tree.toggle(event, &self.settings, &mut host)
        {
            debug!("Toggled item {} on line {}", event.index, line);
            self.live_edit
                .on_change(true, &self.document, &self.settings);
        }
    }

    fn handle_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Open => {
                let dir = self
                    .document
                    .path()
                    .and_then(|p| p.parent())
                    .map(Path::to_path_buf);
                if let Some(path) = dialogs::open_file_dialog(dir.as_ref()) {
                    self.open(path);
                }
            }
            ToolbarAction::Save => self.save(),
            ToolbarAction::Undo => {
                if self.document.undo() {
                    self.notify_changed();
                }
            }
            ToolbarAction::Redo => {
                if self.document.redo() {
                    self.notify_changed();
                }
            }
            ToolbarAction::Settings => self.show_settings = !self.show_settings,
        }
    }
}

impl eframe::App for CheckLineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_commits();
        self.poll_watcher();

        if self.refresh_requested && self.commits.pending() == 0 {
            self.refresh_requested = false;
            self.rebuild_preview();
        }

        let mut action = ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                Some(ToolbarAction::Save)
            } else if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Comma) {
                Some(ToolbarAction::Settings)
            } else {
                None
            }
        });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📂 Open").clicked() {
                    action = Some(ToolbarAction::Open);
                }
                if ui.button("💾 Save").clicked() {
                    action = Some(ToolbarAction::Save);
                }
                if ui
                    .add_enabled(self.document.can_undo(), egui::Button::new("↶ Undo"))
                    .clicked()
                {
                    action = Some(ToolbarAction::Undo);
                }
                if ui
                    .add_enabled(self.document.can_redo(), egui::Button::new("↷ Redo"))
                    .clicked()
                {
                    action = Some(ToolbarAction::Redo);
                }
                if ui.button("⚙ Settings").clicked() {
                    action = Some(ToolbarAction::Settings);
                }
                ui.separator();
                ui.label(self.document.title());
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| match &self.status {
            Some(message) => {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
            None => {
                ui.label(format!("{} checkbox group(s)", self.tree.len()));
            }
        });

        let mut edited = false;
        egui::SidePanel::left("raw_editor")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("raw_scroll")
                    .show(ui, |ui| {
                        let old_content = self.document.content().to_string();
                        let response = ui.add(
                            egui::TextEdit::multiline(self.document.content_mut())
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY)
                                .desired_rows(24),
                        );
                        if response.changed() {
                            self.document.record_edit(old_content);
                            edited = true;
                        }
                    });
            });
        if edited {
            self.notify_changed();
        }

        let mut toggled = None;
        let colors = WidgetColors::from_visuals(&ctx.style().visuals);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("preview_scroll")
                .show(ui, |ui| {
                    for entry in &self.preview {
                        match entry {
                            PreviewLine::Text(text) => {
                                ui.label(egui::RichText::new(text).size(FONT_SIZE));
                            }
                            PreviewLine::Group(block) => {
                                let Some(view) = self.tree.view(*block) else {
                                    continue;
                                };
                                let output = CheckboxGroupWidget::new(view)
                                    .font_size(FONT_SIZE)
                                    .colors(colors.clone())
                                    .show(ui);
                                if let Some(item) = output.toggled {
                                    toggled = Some(ToggleEvent {
                                        block: *block,
                                        index: item.index,
                                        checked: item.checked,
                                    });
                                }
                            }
                        }
                    }
                });
        });
        if let Some(event) = toggled {
            self.apply_toggle(event);
        }

        if let Some(action) = action {
            self.handle_action(action);
        }

        if self.show_settings {
            let output = self.settings_panel.show(ctx, &mut self.settings);
            if output.changed {
                save_config_silent(&self.settings);
                self.tree.restyle(&self.settings);
                self.refresh_requested = true;
            }
            if output.close_requested {
                self.show_settings = false;
            }
        }

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
