use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Ink flavours understood by the stroke engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ink {
    Pen,
    Pencil,
    Marker,
}

impl Ink {
    /// Coverage multiplier applied when the ink is laid down
    pub fn opacity(self) -> f32 {
        match self {
            Ink::Pen => 1.0,
            Ink::Pencil => 0.8,
            Ink::Marker => 0.5,
        }
    }
}

/// What a stroke does to the pixels under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    Ink(Ink),
    /// Bitmap eraser: clears whatever lies under the stroke
    Erase,
}

// Immutable stroke stored in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    kind: StrokeKind,
    color: Color32,
    width: f32,
    points: Vec<Pos2>,
}

// Stroke still being captured from pointer input
#[derive(Debug, Clone)]
pub struct MutableStroke {
    kind: StrokeKind,
    color: Color32,
    width: f32,
    points: Vec<Pos2>,
}

impl Stroke {
    pub fn new(kind: StrokeKind, color: Color32, width: f32, points: Vec<Pos2>) -> Self {
        Self {
            kind,
            color,
            width,
            points,
        }
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn is_eraser(&self) -> bool {
        self.kind == StrokeKind::Erase
    }

    /// Area covered by the stroke, including half its width on every side
    pub fn bounds(&self) -> Rect {
        geometry::calculate_bounds(&self.points, self.width / 2.0)
    }
}

impl MutableStroke {
    pub fn new(kind: StrokeKind, color: Color32, width: f32) -> Self {
        Self {
            kind,
            color,
            width,
            points: Vec::new(),
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        // Pointers often report the same position twice in a row
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Snapshot for previewing without finishing the stroke
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.kind, self.color, self.width, self.points.clone())
    }

    pub fn finish(self) -> Stroke {
        Stroke::new(self.kind, self.color, self.width, self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutable_stroke_skips_repeated_points() {
        let mut stroke = MutableStroke::new(StrokeKind::Ink(Ink::Pen), Color32::BLACK, 5.0);
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(2.0, 1.0));
        assert_eq!(stroke.points().len(), 2);

        let finished = stroke.finish();
        assert_eq!(finished.points(), &[Pos2::new(1.0, 1.0), Pos2::new(2.0, 1.0)]);
        assert_eq!(finished.width(), 5.0);
    }

    #[test]
    fn test_stroke_bounds_include_half_width() {
        let stroke = Stroke::new(
            StrokeKind::Ink(Ink::Marker),
            Color32::RED,
            4.0,
            vec![Pos2::new(10.0, 10.0), Pos2::new(20.0, 30.0)],
        );
        let bounds = stroke.bounds();
        assert_eq!(bounds.min, Pos2::new(8.0, 8.0));
        assert_eq!(bounds.max, Pos2::new(22.0, 32.0));
    }

    #[test]
    fn test_ink_opacity_ordering() {
        assert!(Ink::Pen.opacity() > Ink::Pencil.opacity());
        assert!(Ink::Pencil.opacity() > Ink::Marker.opacity());
    }
}
