use std::collections::HashSet;

use super::frame::InputFrame;
use super::gamepad::{GamepadSnapshot, MAX_GAMEPADS};
use super::types::{
    ButtonState, GamepadAxis, GamepadButton, InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta,
};

/// Polled input state for the window.
///
/// Holds what is down right now and where the pointer is. Transitions for the
/// current frame go to an [`InputFrame`].
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window has keyboard focus.
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Keys currently held.
    pub keys_down: HashSet<Key>,

    /// Mouse buttons currently held.
    pub buttons_down: HashSet<MouseButton>,

    /// Gamepads by slot, refreshed once per frame by the runtime.
    pub gamepads: [GamepadSnapshot; MAX_GAMEPADS],
}

impl InputState {
    /// Applies one event and records its transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                    for button in self.buttons_down.drain() {
                        frame.buttons_released.insert(button);
                    }
                }
            }

            InputEvent::PointerMoved { x, y } => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;

                match state {
                    ButtonState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    ButtonState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton { button, state, x, y, modifiers } => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                match *delta {
                    MouseWheelDelta::Line { x, y } => {
                        frame.wheel_lines.0 += x;
                        frame.wheel_lines.1 += y;
                    }
                    MouseWheelDelta::Pixel { x, y } => {
                        frame.wheel_pixels.0 += x;
                        frame.wheel_pixels.1 += y;
                    }
                }
            }

            InputEvent::Text(t) => frame.text.push_str(t),
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Snapshot of gamepad slot `gamepad`; `None` outside `0..MAX_GAMEPADS`.
    pub fn gamepad(&self, gamepad: usize) -> Option<&GamepadSnapshot> {
        self.gamepads.get(gamepad)
    }

    pub fn gamepad_button_down(&self, gamepad: usize, button: GamepadButton) -> bool {
        self.gamepad(gamepad).is_some_and(|pad| pad.button_down(button))
    }

    /// Axis reading of slot `gamepad`, `0.0` for empty or unknown slots.
    pub fn gamepad_axis(&self, gamepad: usize, axis: GamepadAxis) -> f32 {
        self.gamepad(gamepad).map_or(0.0, |pad| pad.axis(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: 0, repeat: false }
    }

    #[test]
    fn repeat_press_is_not_a_new_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::W, ButtonState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, key(Key::W, ButtonState::Pressed));

        assert!(state.key_down(Key::W));
        assert!(!frame.key_pressed(Key::W));
    }

    #[test]
    fn focus_loss_releases_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::A, ButtonState::Pressed));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::A));
        assert!(frame.key_released(Key::A));
    }

    #[test]
    fn pointer_and_wheel_accumulate_per_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 13.0, y: 8.0 });
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 15.0, y: 8.0 });
        let wheel = InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: -1.0 },
            modifiers: Modifiers::default(),
        };
        state.apply_event(&mut frame, wheel.clone());
        state.apply_event(&mut frame, wheel);

        assert_eq!(frame.pointer_delta, (5.0, -2.0));
        assert_eq!(frame.wheel_lines, (0.0, -2.0));
        assert_eq!(frame.events.len(), 5);

        frame.clear();
        assert_eq!(frame.pointer_delta, (0.0, 0.0));
        assert_eq!(state.pointer_pos, Some((15.0, 8.0)));
    }
}
