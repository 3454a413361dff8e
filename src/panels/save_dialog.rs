use chrono::{DateTime, Local};
use eframe::egui;

/// Modal asking for the name of the drawing to save
#[derive(Debug, Default)]
pub struct SaveDialog {
    open: bool,
    name: String,
}

/// Name offered when the dialog opens, e.g. `Drawing 12/17/25, 9:30 AM`
pub fn default_name(now: DateTime<Local>) -> String {
    format!("Drawing {}", now.format("%-m/%-d/%y, %-I:%M %p"))
}

/// Trimmed name, or `None` if nothing is left after trimming
pub fn validate_name(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

impl SaveDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open(&mut self, now: DateTime<Local>) {
        self.name = default_name(now);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Validate the current name and close the dialog if it is usable
    pub fn submit(&mut self) -> Option<String> {
        let name = validate_name(&self.name)?;
        self.close();
        Some(name)
    }

    /// Draw the dialog. Returns the chosen name once the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.open {
            return None;
        }

        let mut saved = None;
        let mut cancelled = false;
        egui::Window::new("Save Drawing")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Drawing Name");
                let field = ui.add(egui::TextEdit::singleline(&mut self.name).hint_text("Enter name"));
                let can_save = validate_name(&self.name).is_some();
                let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    let save = ui.add_enabled(can_save, egui::Button::new("Save Drawing"));
                    if save.clicked() || (entered && can_save) {
                        saved = self.submit();
                    }
                });
            });

        if cancelled || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
        }
        saved
    }
}
