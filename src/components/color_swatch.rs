use eframe::egui;

/// Round color button, ringed when selected
pub struct ColorSwatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(30.0, 30.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.circle_filled(rect.center(), 13.0, self.color);
            if self.selected {
                painter.circle_stroke(
                    rect.center(),
                    14.0,
                    egui::Stroke::new(3.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response
    }
}
