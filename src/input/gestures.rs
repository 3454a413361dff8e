use eframe::egui::Vec2;

use super::state::InputState;

/// A recognized canvas gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Incremental zoom ratio since the previous update
    Pinch { ratio: f32 },
    /// Cumulative rotation since the gesture began, in radians
    Rotate { angle: f32 },
    /// Incremental translation since the previous update
    Pan { delta: Vec2 },
}

/// Configuration for gesture recognition
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Zoom ratios closer to 1.0 than this are ignored
    pub min_pinch_delta: f32,
    /// Rotation deltas smaller than this (radians) are ignored
    pub min_rotation_delta: f32,
    /// Number of fingers a touch pan requires
    pub pan_touches: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_pinch_delta: 1e-4,
            min_rotation_delta: 1e-4,
            pan_touches: 2,
        }
    }
}

/// Turns per-frame input into pinch, rotate and pan gestures
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    /// Rotation accumulated over the current multi-touch gesture
    accumulated_rotation: f32,
    in_multi_touch: bool,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while two or more fingers are down
    pub fn in_multi_touch(&self) -> bool {
        self.in_multi_touch
    }

    /// Update gesture state and return the gestures recognized this frame
    pub fn update(&mut self, input: &InputState) -> Vec<Gesture> {
        let mut gestures = Vec::new();

        if input.is_multi_touch() {
            if !self.in_multi_touch {
                self.in_multi_touch = true;
                self.accumulated_rotation = 0.0;
            }
        } else if self.in_multi_touch {
            self.in_multi_touch = false;
            self.accumulated_rotation = 0.0;
        }

        if (input.zoom_delta - 1.0).abs() >= self.config.min_pinch_delta {
            gestures.push(Gesture::Pinch {
                ratio: input.zoom_delta,
            });
        }

        if self.in_multi_touch && input.rotation_delta.abs() >= self.config.min_rotation_delta {
            self.accumulated_rotation += input.rotation_delta;
            gestures.push(Gesture::Rotate {
                angle: self.accumulated_rotation,
            });
        }

        let pan_allowed = input.from_trackpad || input.touch_count == self.config.pan_touches;
        if pan_allowed && input.pan_delta != Vec2::ZERO {
            gestures.push(Gesture::Pan {
                delta: input.pan_delta,
            });
        }

        if !gestures.is_empty() {
            log::trace!("Recognized gestures: {:?}", gestures);
        }
        gestures
    }
}
