mod state;

pub use state::{PALETTE, ToolState, MAX_WIDTH, MIN_WIDTH};

use egui::{Color32, Key, Pos2};

use crate::stroke::{Ink, MutableStroke, StrokeKind};

/// Width of the bitmap eraser, which ignores the width selection
pub const ERASER_WIDTH: f32 = 20.0;

/// The tools offered in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pen,
    Pencil,
    Marker,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [ToolKind::Pen, ToolKind::Pencil, ToolKind::Marker, ToolKind::Eraser];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Pencil => "Pencil",
            ToolKind::Marker => "Marker",
            ToolKind::Eraser => "Eraser",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Pen => "✒",
            ToolKind::Pencil => "✏",
            ToolKind::Marker => "🖊",
            ToolKind::Eraser => "⌫",
        }
    }

    /// Single-key shortcut; pencil takes `N` since `P` belongs to the pen
    pub fn shortcut(self) -> Key {
        match self {
            ToolKind::Pen => Key::P,
            ToolKind::Pencil => Key::N,
            ToolKind::Marker => Key::M,
            ToolKind::Eraser => Key::E,
        }
    }

    pub fn uses_color_and_width(self) -> bool {
        self != ToolKind::Eraser
    }
}

/// Tool object understood by the canvas host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasTool {
    Inking { ink: Ink, color: Color32, width: f32 },
    Eraser,
}

impl Default for CanvasTool {
    fn default() -> Self {
        ToolState::default().canvas_tool()
    }
}

impl CanvasTool {
    /// Start capturing a stroke drawn with this tool
    pub fn begin_stroke(&self, pos: Pos2) -> MutableStroke {
        let mut stroke = match *self {
            CanvasTool::Inking { ink, color, width } => MutableStroke::new(StrokeKind::Ink(ink), color, width),
            CanvasTool::Eraser => MutableStroke::new(StrokeKind::Erase, Color32::TRANSPARENT, ERASER_WIDTH),
        };
        stroke.add_point(pos);
        stroke
    }
}
