use eframe::egui::{self, Pos2, Rect, Sense};

use crate::command::{Command, CommandHistory};
use crate::document::Document;
use crate::input::{Gesture, GestureRecognizer, InputState};
use crate::renderer::Renderer;
use crate::stroke::MutableStroke;
use crate::tool::CanvasTool;
use crate::transform::CanvasTransform;

/// The drawing surface: captures strokes from the pointer, keeps the undo
/// history and applies view gestures
#[derive(Debug, Default)]
pub struct CanvasHost {
    document: Document,
    history: CommandHistory,
    tool: CanvasTool,
    current_stroke: Option<MutableStroke>,
    transform: CanvasTransform,
    gestures: GestureRecognizer,
    renderer: Renderer,
}

impl CanvasHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tool(&self) -> CanvasTool {
        self.tool
    }

    pub fn transform(&self) -> &CanvasTransform {
        &self.transform
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    /// Takes effect from the next stroke on
    pub fn set_tool(&mut self, tool: CanvasTool) {
        log::debug!("Canvas tool set to {:?}", tool);
        self.tool = tool;
    }

    /// Start a stroke at `pos`, in canvas coordinates
    pub fn begin_stroke(&mut self, pos: Pos2) {
        self.current_stroke = Some(self.tool.begin_stroke(pos));
    }

    pub fn extend_stroke(&mut self, pos: Pos2) {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(pos);
        }
    }

    /// Finish the current stroke and record it in the history
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.current_stroke.take() {
            if !stroke.is_empty() {
                self.history.execute(Command::AddStroke(stroke.finish()), &mut self.document);
            }
        }
    }

    /// Drop the current stroke without recording it
    pub fn cancel_stroke(&mut self) {
        if self.current_stroke.take().is_some() {
            log::debug!("Stroke cancelled");
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        self.cancel_stroke();
        if let Some(name) = self.history.undo(&mut self.document) {
            log::debug!("Undid {}", name);
        }
    }

    pub fn redo(&mut self) {
        self.cancel_stroke();
        if let Some(name) = self.history.redo(&mut self.document) {
            log::debug!("Redid {}", name);
        }
    }

    /// Remove every stroke. Can be undone.
    pub fn clear(&mut self) {
        self.cancel_stroke();
        if self.document.is_empty() {
            return;
        }
        let strokes = self.document.strokes().to_vec();
        self.history.execute(Command::Clear { strokes }, &mut self.document);
    }

    /// Show a loaded drawing; the previous history no longer applies
    pub fn replace_document(&mut self, document: Document) {
        self.cancel_stroke();
        self.document = document;
        self.history.clear();
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
    }

    pub fn apply_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Pinch { ratio } => self.transform.pinch(ratio),
            Gesture::Rotate { angle } => self.transform.rotate_to(angle),
            Gesture::Pan { delta } => self.transform.pan(delta),
        }
    }

    /// Lay out the canvas in the remaining space, handle its input and paint it
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;

        // Runs every frame; multi-touch state ends with the gesture
        let input = ui.input(InputState::from_egui);
        let gestures = self.gestures.update(&input);
        if input.is_multi_touch() || ui.rect_contains_pointer(rect) {
            for gesture in gestures {
                self.apply_gesture(gesture);
            }
        }

        if self.gestures.in_multi_touch() {
            // The first finger of a pinch also drives the pointer
            self.cancel_stroke();
        } else {
            self.handle_pointer(&response, rect);
        }

        let preview = self.current_stroke.as_ref().map(MutableStroke::to_stroke);
        self.renderer
            .render(&painter, rect, &self.transform, &self.document, preview.as_ref());

        response
    }

    fn handle_pointer(&mut self, response: &egui::Response, rect: Rect) {
        let canvas_pos = response
            .interact_pointer_pos()
            .map(|pos| self.transform.screen_to_canvas(pos, rect));

        if response.drag_started() {
            if let Some(pos) = canvas_pos {
                self.begin_stroke(pos);
            }
        } else if response.dragged() {
            if let Some(pos) = canvas_pos {
                self.extend_stroke(pos);
            }
        }

        if response.drag_stopped() {
            self.end_stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Ink, StrokeKind};
    use egui::{Color32, Vec2, pos2};

    fn draw_line(canvas: &mut CanvasHost, from: Pos2, to: Pos2) {
        canvas.begin_stroke(from);
        canvas.extend_stroke(to);
        canvas.end_stroke();
    }

    #[test]
    fn test_stroke_uses_active_tool() {
        let mut canvas = CanvasHost::new();
        canvas.set_tool(CanvasTool::Inking {
            ink: Ink::Marker,
            color: Color32::RED,
            width: 9.0,
        });
        draw_line(&mut canvas, pos2(0.0, 0.0), pos2(10.0, 10.0));

        let stroke = &canvas.document().strokes()[0];
        assert_eq!(stroke.kind(), StrokeKind::Ink(Ink::Marker));
        assert_eq!(stroke.color(), Color32::RED);
        assert_eq!(stroke.width(), 9.0);
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn test_undo_redo_strokes() {
        let mut canvas = CanvasHost::new();
        draw_line(&mut canvas, pos2(0.0, 0.0), pos2(10.0, 0.0));
        draw_line(&mut canvas, pos2(0.0, 5.0), pos2(10.0, 5.0));
        assert_eq!(canvas.document().strokes().len(), 2);

        canvas.undo();
        assert_eq!(canvas.document().strokes().len(), 1);
        assert!(canvas.can_redo());

        canvas.redo();
        assert_eq!(canvas.document().strokes().len(), 2);
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_new_stroke_discards_redo() {
        let mut canvas = CanvasHost::new();
        draw_line(&mut canvas, pos2(0.0, 0.0), pos2(10.0, 0.0));
        canvas.undo();
        draw_line(&mut canvas, pos2(0.0, 5.0), pos2(10.0, 5.0));
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_clear_can_be_undone() {
        let mut canvas = CanvasHost::new();
        draw_line(&mut canvas, pos2(0.0, 0.0), pos2(10.0, 0.0));
        draw_line(&mut canvas, pos2(0.0, 5.0), pos2(10.0, 5.0));

        canvas.clear();
        assert!(canvas.document().is_empty());

        canvas.undo();
        assert_eq!(canvas.document().strokes().len(), 2);
    }

    #[test]
    fn test_clearing_an_empty_canvas_records_nothing() {
        let mut canvas = CanvasHost::new();
        canvas.clear();
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_cancelled_stroke_is_not_recorded() {
        let mut canvas = CanvasHost::new();
        canvas.begin_stroke(pos2(1.0, 1.0));
        canvas.extend_stroke(pos2(2.0, 2.0));
        canvas.cancel_stroke();
        canvas.end_stroke();
        assert!(canvas.document().is_empty());
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_replace_document_clears_history() {
        let mut canvas = CanvasHost::new();
        draw_line(&mut canvas, pos2(0.0, 0.0), pos2(10.0, 0.0));

        let mut loaded = Document::new();
        loaded.add_stroke(crate::stroke::Stroke::new(
            StrokeKind::Ink(Ink::Pen),
            Color32::BLUE,
            2.0,
            vec![pos2(3.0, 3.0)],
        ));
        canvas.replace_document(loaded.clone());

        assert_eq!(canvas.document(), &loaded);
        assert!(!canvas.can_undo());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_gestures_drive_the_transform() {
        let mut canvas = CanvasHost::new();
        canvas.apply_gesture(Gesture::Pinch { ratio: 2.0 });
        canvas.apply_gesture(Gesture::Pinch { ratio: 2.0 });
        canvas.apply_gesture(Gesture::Rotate { angle: 0.3 });
        canvas.apply_gesture(Gesture::Pan {
            delta: Vec2::new(5.0, 5.0),
        });
        assert_eq!(canvas.transform().scale(), 3.0);
        assert_eq!(canvas.transform().rotation(), 0.3);
        assert_eq!(canvas.transform().translation(), Vec2::new(5.0, 5.0));

        canvas.reset_view();
        assert!(canvas.transform().is_identity());
    }

    #[test]
    fn test_multi_touch_state_clears_without_pointer() {
        let mut canvas = CanvasHost::new();
        canvas.gestures.update(&InputState {
            touch_count: 2,
            ..InputState::default()
        });
        assert!(canvas.gestures.in_multi_touch());

        // A frame with no touches and no pointer over the canvas
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                canvas.show(ui);
            });
        });
        assert!(!canvas.gestures.in_multi_touch());
    }
}
