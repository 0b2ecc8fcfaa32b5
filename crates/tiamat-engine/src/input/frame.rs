use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton};

/// Transitions and streams collected during one frame.
///
/// Cleared by the runtime after every `on_frame` call.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Keys that went up this frame, including releases forced by focus loss.
    pub keys_released: HashSet<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Pointer travel this frame in logical pixels.
    pub pointer_delta: (f32, f32),

    /// Wheel travel this frame; line deltas and pixel deltas are summed
    /// separately.
    pub wheel_lines: (f32, f32),
    pub wheel_pixels: (f32, f32),

    /// Text committed this frame.
    pub text: String,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel_lines = (0.0, 0.0);
        self.wheel_pixels = (0.0, 0.0);
        self.text.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }
}
