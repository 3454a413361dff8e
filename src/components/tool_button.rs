use eframe::egui;

use crate::tool::ToolKind;

/// Toolbar button showing a tool's icon above its label
pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(60.0, 50.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246).gamma_multiply(0.4)
            } else if response.hovered() {
                egui::Color32::from_gray(215)
            } else {
                egui::Color32::from_gray(235)
            };
            ui.painter().rect_filled(rect, 8.0, bg_color);

            let text_color = ui.visuals().text_color();
            ui.painter().text(
                rect.center_top() + egui::vec2(0.0, 18.0),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                text_color,
            );
            ui.painter().text(
                rect.center_bottom() - egui::vec2(0.0, 10.0),
                egui::Align2::CENTER_CENTER,
                self.tool.label(),
                egui::FontId::proportional(11.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    8.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(format!("{} ({:?})", self.tool.label(), self.tool.shortcut()))
    }
}
