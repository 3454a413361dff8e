use eframe::egui::{self, Vec2};

/// Per-frame snapshot of the inputs that drive canvas gestures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Fingers currently on a touch surface
    pub touch_count: usize,
    /// Zoom factor since last frame (1.0 = no change)
    pub zoom_delta: f32,
    /// Rotation since last frame, in radians
    pub rotation_delta: f32,
    /// Translation since last frame, in points
    pub pan_delta: Vec2,
    /// The pan came from a trackpad scroll rather than touches
    pub from_trackpad: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            touch_count: 0,
            zoom_delta: 1.0,
            rotation_delta: 0.0,
            pan_delta: Vec2::ZERO,
            from_trackpad: false,
        }
    }
}

impl InputState {
    /// Extract gesture input from egui. Touch screens report everything through
    /// `multi_touch`; trackpads report pinch as zoom and two-finger pan as scroll.
    pub fn from_egui(input: &egui::InputState) -> Self {
        if let Some(touch) = input.multi_touch() {
            return Self {
                touch_count: touch.num_touches,
                zoom_delta: touch.zoom_delta,
                rotation_delta: touch.rotation_delta,
                pan_delta: touch.translation_delta,
                from_trackpad: false,
            };
        }

        Self {
            touch_count: 0,
            zoom_delta: input.zoom_delta(),
            rotation_delta: 0.0,
            pan_delta: input.smooth_scroll_delta,
            from_trackpad: true,
        }
    }

    pub fn is_multi_touch(&self) -> bool {
        self.touch_count >= 2
    }
}
