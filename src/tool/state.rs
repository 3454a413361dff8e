use egui::Color32;

use super::{CanvasTool, ToolKind};
use crate::stroke::Ink;

pub const MIN_WIDTH: f32 = 1.0;
pub const MAX_WIDTH: f32 = 20.0;
const DEFAULT_WIDTH: f32 = 5.0;

/// Colors offered by the toolbar
pub const PALETTE: [Color32; 8] = [
    Color32::BLACK,
    Color32::from_rgb(255, 59, 48),
    Color32::from_rgb(0, 122, 255),
    Color32::from_rgb(52, 199, 89),
    Color32::from_rgb(255, 204, 0),
    Color32::from_rgb(255, 149, 0),
    Color32::from_rgb(175, 82, 222),
    Color32::from_rgb(255, 45, 85),
];

/// Current tool selection. Every change re-derives the canvas tool right away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    kind: ToolKind,
    color: Color32,
    width: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            kind: ToolKind::Pen,
            color: Color32::BLACK,
            width: DEFAULT_WIDTH,
        }
    }
}

impl ToolState {
    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn select_kind(&mut self, kind: ToolKind) -> CanvasTool {
        log::debug!("Tool selected: {}", kind.label());
        self.kind = kind;
        self.canvas_tool()
    }

    pub fn select_color(&mut self, color: Color32) -> CanvasTool {
        self.color = color;
        self.canvas_tool()
    }

    /// Width snaps to whole points within `MIN_WIDTH..=MAX_WIDTH`
    pub fn set_width(&mut self, width: f32) -> CanvasTool {
        if width.is_finite() {
            self.width = width.round().clamp(MIN_WIDTH, MAX_WIDTH);
        }
        self.canvas_tool()
    }

    pub fn canvas_tool(&self) -> CanvasTool {
        let ink = match self.kind {
            ToolKind::Pen => Ink::Pen,
            ToolKind::Pencil => Ink::Pencil,
            ToolKind::Marker => Ink::Marker,
            ToolKind::Eraser => return CanvasTool::Eraser,
        };
        CanvasTool::Inking {
            ink,
            color: self.color,
            width: self.width,
        }
    }
}
