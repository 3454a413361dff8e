use eframe::egui::{self, Color32, Painter, Pos2, Rect, Shape};

use crate::document::Document;
use crate::stroke::{Stroke, StrokeKind};
use crate::transform::CanvasTransform;

/// Draws documents onto the canvas through the view transform
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
        }
    }
}

impl Renderer {
    /// Paint the canvas background, every stroke of `document`, then the
    /// stroke still being drawn
    pub fn render(
        &self,
        painter: &Painter,
        rect: Rect,
        transform: &CanvasTransform,
        document: &Document,
        preview: Option<&Stroke>,
    ) {
        let page = Rect::from_min_max(
            transform.canvas_to_screen(Pos2::ZERO, rect),
            transform.canvas_to_screen(rect.size().to_pos2(), rect),
        );
        painter.rect_filled(rect, 0.0, Color32::from_gray(230));
        if transform.rotation() == 0.0 {
            painter.rect_filled(page, 0.0, self.background);
        } else {
            let corners = [
                Pos2::ZERO,
                Pos2::new(rect.width(), 0.0),
                rect.size().to_pos2(),
                Pos2::new(0.0, rect.height()),
            ]
            .map(|corner| transform.canvas_to_screen(corner, rect));
            painter.add(Shape::convex_polygon(corners.to_vec(), self.background, egui::Stroke::NONE));
        }

        for stroke in document.strokes().iter().chain(preview) {
            self.render_stroke(painter, rect, transform, stroke);
        }
    }

    fn render_stroke(&self, painter: &Painter, rect: Rect, transform: &CanvasTransform, stroke: &Stroke) {
        let color = match stroke.kind() {
            StrokeKind::Ink(ink) => stroke.color().gamma_multiply(ink.opacity()),
            // Erasing on screen means painting the page colour back
            StrokeKind::Erase => self.background,
        };
        let width = stroke.width() * transform.scale();
        let points: Vec<Pos2> = stroke
            .points()
            .iter()
            .map(|point| transform.canvas_to_screen(*point, rect))
            .collect();

        match points.as_slice() {
            [] => {}
            [point] => {
                painter.circle_filled(*point, width / 2.0, color);
            }
            _ => {
                painter.add(Shape::line(points, egui::Stroke::new(width, color)));
            }
        }
    }
}
