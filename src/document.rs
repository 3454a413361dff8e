use egui::Rect;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stroke::Stroke;

const DATA_VERSION: u32 = 1;

/// The strokes that make up one drawing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    strokes: Vec<Stroke>,
}

// On-disk envelope; the version guards against silently misreading newer files
#[derive(Serialize, Deserialize)]
struct DocumentData {
    version: u32,
    strokes: Vec<Stroke>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn remove_last_stroke(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn take_strokes(&mut self) -> Vec<Stroke> {
        std::mem::take(&mut self.strokes)
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Union of the bounds of all inked strokes. Eraser strokes remove
    /// content and never grow the bounds; `Rect::NOTHING` when nothing is inked.
    pub fn bounds(&self) -> Rect {
        self.strokes
            .iter()
            .filter(|stroke| !stroke.is_eraser())
            .map(Stroke::bounds)
            .fold(Rect::NOTHING, |acc, rect| acc.union(rect))
    }

    /// True when there is nothing visible to render
    pub fn has_empty_bounds(&self) -> bool {
        !self.bounds().is_positive()
    }

    /// Serializes the drawing into the opaque blob stored on disk
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let data = DocumentData {
            version: DATA_VERSION,
            strokes: self.strokes.clone(),
        };
        serde_json::to_vec(&data).map_err(Error::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: DocumentData = serde_json::from_slice(bytes).map_err(Error::Decode)?;
        if data.version != DATA_VERSION {
            return Err(Error::UnsupportedVersion(data.version));
        }
        Ok(Self {
            strokes: data.strokes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Ink, StrokeKind};
    use egui::{Color32, Pos2};

    fn line(kind: StrokeKind, from: Pos2, to: Pos2) -> Stroke {
        Stroke::new(kind, Color32::BLACK, 2.0, vec![from, to])
    }

    #[test]
    fn test_empty_document_has_empty_bounds() {
        let doc = Document::new();
        assert!(doc.has_empty_bounds());
        assert_eq!(doc.bounds(), Rect::NOTHING);
    }

    #[test]
    fn test_bounds_ignore_eraser_strokes() {
        let mut doc = Document::new();
        doc.add_stroke(line(StrokeKind::Erase, Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0)));
        assert!(doc.has_empty_bounds());

        doc.add_stroke(line(StrokeKind::Ink(Ink::Pen), Pos2::new(10.0, 10.0), Pos2::new(20.0, 20.0)));
        let bounds = doc.bounds();
        assert_eq!(bounds.min, Pos2::new(9.0, 9.0));
        assert_eq!(bounds.max, Pos2::new(21.0, 21.0));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut doc = Document::new();
        doc.add_stroke(line(StrokeKind::Ink(Ink::Pencil), Pos2::new(1.0, 2.0), Pos2::new(3.0, 4.0)));
        doc.add_stroke(line(StrokeKind::Erase, Pos2::new(2.0, 2.0), Pos2::new(2.5, 2.5)));

        let bytes = doc.to_bytes().unwrap();
        let decoded = Document::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(Document::from_bytes(b"not a drawing"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let bytes = br#"{"version":99,"strokes":[]}"#;
        assert!(matches!(Document::from_bytes(bytes), Err(Error::UnsupportedVersion(99))));
    }
}
