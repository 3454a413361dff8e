use chrono::Local;
use eframe::egui::{self, Color32, Sense, Vec2};
use uuid::Uuid;

use crate::document::Document;
use crate::store::{DrawingStore, SavedDrawing};
use crate::texture_manager::TextureManager;

/// Widths below this get the compact two-column layout
pub const COMPACT_WIDTH: f32 = 600.0;
const CARD_SPACING: f32 = 20.0;
const THUMBNAIL_HEIGHT: f32 = 200.0;

/// Number of grid columns for the available width
pub fn column_count(available_width: f32) -> usize {
    if available_width < COMPACT_WIDTH { 2 } else { 4 }
}

/// User intents raised by the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Load(Uuid),
    RequestDelete(Uuid),
    ConfirmDelete,
    CancelDelete,
    Close,
}

/// Browser of saved drawings
#[derive(Default)]
pub struct Gallery {
    open: bool,
    pending_delete: Option<Uuid>,
    textures: TextureManager,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.pending_delete = None;
    }

    /// Drawing awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    /// Apply an action against the store. Returns the drawing to show on the
    /// canvas when one was loaded.
    pub fn apply(&mut self, action: GalleryAction, store: &mut DrawingStore) -> Option<Document> {
        match action {
            GalleryAction::Load(id) => {
                let record = store.get(id)?;
                let document = store.load(record)?;
                // The gallery stays open if the drawing could not be read
                self.close();
                Some(document)
            }
            GalleryAction::RequestDelete(id) => {
                self.pending_delete = Some(id);
                None
            }
            GalleryAction::ConfirmDelete => {
                let id = self.pending_delete.take()?;
                if let Some(record) = store.get(id).cloned() {
                    store.delete(&record);
                }
                if store.get(id).is_none() {
                    self.textures.invalidate(id);
                }
                None
            }
            GalleryAction::CancelDelete => {
                self.pending_delete = None;
                None
            }
            GalleryAction::Close => {
                self.close();
                None
            }
        }
    }

    /// Draw the gallery in place of the canvas
    pub fn show(&mut self, ctx: &egui::Context, store: &DrawingStore) -> Vec<GalleryAction> {
        let mut actions = Vec::new();
        self.textures.retain(|id| store.get(id).is_some());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("My Drawings");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Done").clicked() {
                        actions.push(GalleryAction::Close);
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                if store.is_empty() {
                    show_empty_state(ui);
                } else {
                    self.show_grid(ui, store, &mut actions);
                }
            });
        });

        if let Some(id) = self.pending_delete {
            show_delete_confirmation(ctx, store.get(id), &mut actions);
        }

        actions
    }

    fn show_grid(&mut self, ui: &mut egui::Ui, store: &DrawingStore, actions: &mut Vec<GalleryAction>) {
        let columns = column_count(ui.available_width());
        let card_width = (ui.available_width() - CARD_SPACING * (columns as f32 - 1.0)) / columns as f32;

        egui::Grid::new("gallery_grid")
            .num_columns(columns)
            .spacing([CARD_SPACING, CARD_SPACING])
            .show(ui, |ui| {
                for (index, drawing) in store.drawings().iter().enumerate() {
                    let response = self.show_card(ui, drawing, card_width.max(80.0));
                    if response.clicked() {
                        actions.push(GalleryAction::Load(drawing.id()));
                    }
                    response.context_menu(|ui| {
                        if ui.button("🗑 Delete").clicked() {
                            actions.push(GalleryAction::RequestDelete(drawing.id()));
                            ui.close_menu();
                        }
                    });
                    if (index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    fn show_card(&mut self, ui: &mut egui::Ui, drawing: &SavedDrawing, width: f32) -> egui::Response {
        let inner = ui.vertical(|ui| {
            ui.set_width(width);
            let size = Vec2::new(width, THUMBNAIL_HEIGHT);
            let texture = drawing
                .thumbnail
                .as_ref()
                .and_then(|thumbnail| self.textures.get_or_create(ui.ctx(), drawing.id(), thumbnail));

            match texture {
                Some(texture) => {
                    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                    ui.painter().rect_filled(rect, 12.0, Color32::WHITE);
                    let image = egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                        .maintain_aspect_ratio(true)
                        .fit_to_exact_size(size - Vec2::splat(16.0));
                    ui.put(rect.shrink(8.0), image);
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                    ui.painter().rect_filled(rect, 12.0, Color32::from_gray(220));
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "🖼",
                        egui::FontId::proportional(40.0),
                        Color32::GRAY,
                    );
                }
            }

            ui.add(egui::Label::new(egui::RichText::new(&drawing.name).strong()).truncate());
            ui.small(drawing.date().with_timezone(&Local).format("%b %-d, %Y").to_string());
        });

        ui.interact(inner.response.rect, ui.id().with(drawing.id()), Sense::click())
    }
}

fn show_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.label(egui::RichText::new("🖼").size(60.0).color(Color32::GRAY));
        ui.add_space(20.0);
        ui.label(egui::RichText::new("No saved drawings").heading().color(Color32::GRAY));
        ui.label("Your saved drawings will appear here");
    });
}

fn show_delete_confirmation(ctx: &egui::Context, drawing: Option<&SavedDrawing>, actions: &mut Vec<GalleryAction>) {
    egui::Window::new("Delete Drawing")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            if let Some(drawing) = drawing {
                ui.strong(&drawing.name);
            }
            ui.label("Are you sure you want to delete this drawing? This action cannot be undone.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    actions.push(GalleryAction::CancelDelete);
                }
                let delete = egui::Button::new(egui::RichText::new("Delete").color(Color32::WHITE))
                    .fill(Color32::from_rgb(220, 53, 69));
                if ui.add(delete).clicked() {
                    actions.push(GalleryAction::ConfirmDelete);
                }
            });
        });
}
