use egui::emath::Rot2;
use egui::{Pos2, Rect, Vec2};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;

/// View transform of the canvas: scale, then rotate, then translate,
/// all about the centre of the canvas rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Zoom factor, always within `MIN_SCALE..=MAX_SCALE`
    scale: f32,
    /// Rotation in radians
    rotation: f32,
    /// Offset in screen points, applied after scale and rotation
    translation: Vec2,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            translation: Vec2::ZERO,
        }
    }
}

impl CanvasTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Multiply the scale by an incremental pinch ratio and clamp it
    pub fn pinch(&mut self, ratio: f32) {
        if !ratio.is_finite() || ratio <= 0.0 {
            log::warn!("Ignoring invalid pinch ratio {}", ratio);
            return;
        }
        self.scale = (self.scale * ratio).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Replace the rotation with the cumulative angle of the current gesture
    pub fn rotate_to(&mut self, angle: f32) {
        if angle.is_finite() {
            self.rotation = angle;
        }
    }

    pub fn pan(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.translation += delta;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Map a point in canvas coordinates (relative to the unscaled canvas
    /// origin) to screen coordinates inside `rect`
    pub fn canvas_to_screen(&self, point: Pos2, rect: Rect) -> Pos2 {
        let pivot = rect.size() / 2.0;
        let scaled = (point.to_vec2() - pivot) * self.scale;
        let rotated = Rot2::from_angle(self.rotation) * scaled;
        rect.min + pivot + self.translation + rotated
    }

    /// Exact inverse of [`Self::canvas_to_screen`]
    pub fn screen_to_canvas(&self, point: Pos2, rect: Rect) -> Pos2 {
        let pivot = rect.size() / 2.0;
        let rotated = point - rect.min - pivot - self.translation;
        let scaled = Rot2::from_angle(self.rotation).inverse() * rotated;
        (pivot + scaled / self.scale).to_pos2()
    }
}
