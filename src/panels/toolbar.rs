use eframe::egui::{self, Color32, Key, KeyboardShortcut, Modifiers};

use crate::components::{ColorSwatch, ToolButton};
use crate::tool::{MAX_WIDTH, MIN_WIDTH, PALETTE, ToolKind, ToolState};

/// Something the user asked for from the toolbar or a shortcut
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    SelectTool(ToolKind),
    SelectColor(Color32),
    SetWidth(f32),
    Clear,
    ResetView,
    Undo,
    Redo,
    Save,
    OpenGallery,
    Export,
}

/// What the toolbar needs to know to draw itself
pub struct ToolbarView<'a> {
    pub tools: &'a ToolState,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl ToolbarView<'_> {
    /// Draw the toolbar across the top of the window
    pub fn show(&self, ctx: &egui::Context) -> Vec<ToolbarAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("🗑 Clear").on_hover_text("Clear (⌘K)").clicked() {
                    actions.push(ToolbarAction::Clear);
                }
                if ui.button("⟲ Reset View").on_hover_text("Reset View (⌘R)").clicked() {
                    actions.push(ToolbarAction::ResetView);
                }
                ui.separator();
                if ui.button("💾 Save").on_hover_text("Save (⌘S)").clicked() {
                    actions.push(ToolbarAction::Save);
                }
                if ui.button("🖼 Gallery").on_hover_text("Gallery (⌘G)").clicked() {
                    actions.push(ToolbarAction::OpenGallery);
                }
                if ui.button("📤 Export").on_hover_text("Export (⌘E)").clicked() {
                    actions.push(ToolbarAction::Export);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(self.can_redo, egui::Button::new("↪ Redo"))
                        .on_hover_text("Redo (⇧⌘Z)")
                        .clicked()
                    {
                        actions.push(ToolbarAction::Redo);
                    }
                    if ui
                        .add_enabled(self.can_undo, egui::Button::new("↩ Undo"))
                        .on_hover_text("Undo (⌘Z)")
                        .clicked()
                    {
                        actions.push(ToolbarAction::Undo);
                    }
                });
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 15.0;
                for kind in ToolKind::ALL {
                    if ToolButton::new(kind, self.tools.kind() == kind).show(ui).clicked() {
                        actions.push(ToolbarAction::SelectTool(kind));
                    }
                }

                ui.separator();

                let inking = self.tools.kind().uses_color_and_width();
                ui.add_enabled_ui(inking, |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    for color in PALETTE {
                        if ColorSwatch::new(color, self.tools.color() == color).show(ui).clicked() {
                            actions.push(ToolbarAction::SelectColor(color));
                        }
                    }

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.small("Width");
                        let mut width = self.tools.width();
                        let slider = egui::Slider::new(&mut width, MIN_WIDTH..=MAX_WIDTH)
                            .step_by(1.0)
                            .suffix("pt");
                        if ui.add(slider).changed() {
                            actions.push(ToolbarAction::SetWidth(width));
                        }
                    });
                });
            });
            ui.add_space(4.0);
        });

        actions
    }
}

/// Keyboard equivalents of the toolbar buttons
pub fn shortcut_actions(ctx: &egui::Context) -> Vec<ToolbarAction> {
    // Redo before undo: ⇧⌘Z would otherwise also match ⌘Z
    let command_shortcuts = [
        (Modifiers::COMMAND | Modifiers::SHIFT, Key::Z, ToolbarAction::Redo),
        (Modifiers::COMMAND, Key::Z, ToolbarAction::Undo),
        (Modifiers::COMMAND, Key::K, ToolbarAction::Clear),
        (Modifiers::COMMAND, Key::R, ToolbarAction::ResetView),
        (Modifiers::COMMAND, Key::S, ToolbarAction::Save),
        (Modifiers::COMMAND, Key::G, ToolbarAction::OpenGallery),
        (Modifiers::COMMAND, Key::E, ToolbarAction::Export),
    ];

    let typing = ctx.wants_keyboard_input();
    ctx.input_mut(|input| {
        let mut actions = Vec::new();
        for (modifiers, key, action) in command_shortcuts {
            if input.consume_shortcut(&KeyboardShortcut::new(modifiers, key)) {
                actions.push(action);
            }
        }
        if !typing {
            for kind in ToolKind::ALL {
                if input.consume_key(Modifiers::NONE, kind.shortcut()) {
                    actions.push(ToolbarAction::SelectTool(kind));
                }
            }
        }
        actions
    })
}
