mod gestures;
mod state;

pub use gestures::{Gesture, GestureConfig, GestureRecognizer};
pub use state::InputState;
