use crate::document::Document;
use crate::stroke::Stroke;

/// Undoable edits applied to a document
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a finished stroke
    AddStroke(Stroke),

    /// Remove every stroke; keeps them so the clear can be undone
    Clear { strokes: Vec<Stroke> },
}

impl Command {
    pub fn execute(&self, document: &mut Document) {
        match self {
            Command::AddStroke(stroke) => document.add_stroke(stroke.clone()),
            Command::Clear { .. } => {
                document.take_strokes();
            }
        }
    }

    pub fn undo(&self, document: &mut Document) {
        match self {
            Command::AddStroke(_) => {
                document.remove_last_stroke();
            }
            Command::Clear { strokes } => {
                *document = Document::from_strokes(strokes.clone());
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddStroke(_) => "Add Stroke",
            Command::Clear { .. } => "Clear",
        }
    }
}
