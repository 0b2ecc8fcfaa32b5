//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s and polls
//! gamepads into `InputState::gamepads`; `ActionMap`
//! layers named, rebindable actions on top of the polled `InputState`.

mod action;
mod frame;
mod gamepad;
mod state;
mod translate;
mod types;

pub use action::{ActionMap, ActionState, Binding, BindingSource, DEFAULT_DEAD_ZONE};
pub use frame::InputFrame;
pub use gamepad::{GamepadSnapshot, MAX_GAMEPADS};
pub(crate) use gamepad::GamepadPoller;
pub use state::InputState;
pub(crate) use translate::{translate_key_text, translate_window_event};
pub use types::{
    Axis, ButtonState, GamepadAxis, GamepadButton, InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta,
};
