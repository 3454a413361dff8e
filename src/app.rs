use chrono::Local;

use crate::canvas::CanvasHost;
use crate::config::AppConfig;
use crate::gallery::Gallery;
use crate::panels::{SaveDialog, ToolbarAction, ToolbarView, shortcut_actions};
use crate::store::{DrawingStore, SavedDrawing};
use crate::tool::ToolState;

/// Top-level application state. Tool selection and view transform are
/// transient and start from their defaults on every launch.
pub struct SketchApp {
    store: DrawingStore,
    canvas: CanvasHost,
    tools: ToolState,
    gallery: Gallery,
    save_dialog: SaveDialog,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        // Appearance is configured once for the whole process
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_store(DrawingStore::from_config(config))
    }

    pub fn with_store(store: DrawingStore) -> Self {
        let tools = ToolState::default();
        let mut canvas = CanvasHost::new();
        canvas.set_tool(tools.canvas_tool());

        Self {
            store,
            canvas,
            tools,
            gallery: Gallery::new(),
            save_dialog: SaveDialog::new(),
        }
    }

    pub fn store(&self) -> &DrawingStore {
        &self.store
    }

    pub fn canvas(&self) -> &CanvasHost {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasHost {
        &mut self.canvas
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn save_dialog(&self) -> &SaveDialog {
        &self.save_dialog
    }

    /// Carry out a toolbar action
    pub fn apply(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::SelectTool(kind) => {
                let tool = self.tools.select_kind(kind);
                self.canvas.set_tool(tool);
            }
            ToolbarAction::SelectColor(color) => {
                let tool = self.tools.select_color(color);
                self.canvas.set_tool(tool);
            }
            ToolbarAction::SetWidth(width) => {
                let tool = self.tools.set_width(width);
                self.canvas.set_tool(tool);
            }
            ToolbarAction::Clear => self.canvas.clear(),
            ToolbarAction::ResetView => self.canvas.reset_view(),
            ToolbarAction::Undo => self.canvas.undo(),
            ToolbarAction::Redo => self.canvas.redo(),
            ToolbarAction::Save => self.save_dialog.open(Local::now()),
            ToolbarAction::OpenGallery => self.gallery.open(),
            ToolbarAction::Export => self.export(),
        }
    }

    /// Save the canvas under an already validated name
    pub fn save_as(&mut self, name: &str) -> Option<SavedDrawing> {
        self.store.save(self.canvas.document(), name)
    }

    fn export(&mut self) {
        let name = format!("Drawing {}", Local::now().format("%Y-%m-%d"));
        let Some(path) = self.store.export_png(self.canvas.document(), &name) else {
            return;
        };
        if let Err(err) = open::that(&path) {
            log::warn!("Could not open exported image {}: {}", path.display(), err);
        }
    }

    fn show_gallery(&mut self, ctx: &egui::Context) {
        for action in self.gallery.show(ctx, &self.store) {
            if let Some(document) = self.gallery.apply(action, &mut self.store) {
                self.canvas.replace_document(document);
            }
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.save_dialog.is_open() || self.gallery.pending_delete().is_some();

        let mut actions = if modal_open { Vec::new() } else { shortcut_actions(ctx) };
        if !self.gallery.is_open() {
            let toolbar = ToolbarView {
                tools: &self.tools,
                can_undo: self.canvas.can_undo(),
                can_redo: self.canvas.can_redo(),
            };
            actions.extend(toolbar.show(ctx));
        }
        for action in actions {
            self.apply(action);
        }

        if self.gallery.is_open() {
            self.show_gallery(ctx);
        } else {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    ui.add_enabled_ui(!modal_open, |ui| {
                        self.canvas.show(ui);
                    });
                });
        }

        if let Some(name) = self.save_dialog.show(ctx) {
            self.save_as(&name);
        }
    }
}
