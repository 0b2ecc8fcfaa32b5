use std::collections::HashMap;

use super::state::InputState;
use super::types::{Axis, GamepadAxis, GamepadButton, Key, MouseButton};

/// Default dead zone for axis bindings.
pub const DEFAULT_DEAD_ZONE: f32 = 0.1;

/// Physical source feeding an action.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BindingSource {
    Key(Key),
    MouseButton(MouseButton),
    /// Pointer position along `Axis`, in logical pixels.
    MouseAxis(Axis),
    /// Button on gamepad slot `gamepad`.
    GamepadButton { gamepad: usize, button: GamepadButton },
    /// Analog axis on gamepad slot `gamepad`.
    GamepadAxis { gamepad: usize, axis: GamepadAxis },
}

/// One physical input attached to an action.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Binding {
    pub source: BindingSource,
    pub scale: f32,
    /// Readings with a magnitude at or below this are ignored.
    pub dead_zone: f32,
}

impl Binding {
    fn read(&self, input: &InputState) -> f32 {
        match self.source {
            BindingSource::Key(key) => f32::from(u8::from(input.key_down(key))),
            BindingSource::MouseButton(button) => f32::from(u8::from(input.button_down(button))),
            BindingSource::MouseAxis(axis) => input.pointer_pos.map_or(0.0, |pos| axis.pick(pos)),
            BindingSource::GamepadButton { gamepad, button } => {
                f32::from(u8::from(input.gamepad_button_down(gamepad, button)))
            }
            BindingSource::GamepadAxis { gamepad, axis } => input.gamepad_axis(gamepad, axis),
        }
    }
}

/// Per-action state after the last [`ActionMap::update`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ActionState {
    pub current: bool,
    pub previous: bool,
    pub value: f32,
}

#[derive(Debug, Default, Clone)]
struct Action {
    bindings: Vec<Binding>,
    state: ActionState,
}

/// Maps named logical actions to physical inputs.
///
/// An action is active while any of its bindings reads past its dead zone.
/// Its value is the mean of the scaled readings of those bindings, or `0.0`
/// when none are active. Call [`update`](Self::update) once per frame.
#[derive(Debug, Default, Clone)]
pub struct ActionMap {
    actions: HashMap<String, Action>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: &str, binding: Binding) {
        self.actions.entry(name.to_owned()).or_default().bindings.push(binding);
    }

    pub fn bind_key(&mut self, name: &str, key: Key, scale: f32) {
        self.bind(name, Binding { source: BindingSource::Key(key), scale, dead_zone: DEFAULT_DEAD_ZONE });
    }

    pub fn bind_mouse_button(&mut self, name: &str, button: MouseButton, scale: f32) {
        self.bind(
            name,
            Binding { source: BindingSource::MouseButton(button), scale, dead_zone: DEFAULT_DEAD_ZONE },
        );
    }

    pub fn bind_mouse_axis(&mut self, name: &str, axis: Axis, dead_zone: f32, scale: f32) {
        self.bind(name, Binding { source: BindingSource::MouseAxis(axis), scale, dead_zone });
    }

    pub fn bind_gamepad_button(&mut self, name: &str, button: GamepadButton, gamepad: usize, scale: f32) {
        self.bind(
            name,
            Binding {
                source: BindingSource::GamepadButton { gamepad, button },
                scale,
                dead_zone: DEFAULT_DEAD_ZONE,
            },
        );
    }

    pub fn bind_gamepad_axis(&mut self, name: &str, axis: GamepadAxis, gamepad: usize, dead_zone: f32, scale: f32) {
        self.bind(name, Binding { source: BindingSource::GamepadAxis { gamepad, axis }, scale, dead_zone });
    }

    /// Drops every binding and the state of `name`.
    pub fn unbind(&mut self, name: &str) -> bool {
        self.actions.remove(name).is_some()
    }

    /// Samples every binding against `input` and advances action state.
    pub fn update(&mut self, input: &InputState) {
        for action in self.actions.values_mut() {
            let mut sum = 0.0;
            let mut active = 0u32;

            for binding in &action.bindings {
                let reading = binding.read(input);
                if reading.abs() > binding.dead_zone {
                    sum += reading * binding.scale;
                    active += 1;
                }
            }

            let state = &mut action.state;
            state.previous = state.current;
            state.current = active > 0;
            state.value = if active > 0 { sum / active as f32 } else { 0.0 };
        }
    }

    pub fn state(&self, name: &str) -> Option<ActionState> {
        self.actions.get(name).map(|a| a.state)
    }

    pub fn pressed(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| s.current)
    }

    pub fn just_pressed(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| s.current && !s.previous)
    }

    pub fn just_released(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| !s.current && s.previous)
    }

    /// Analog value; `0.0` for unknown or inactive actions.
    pub fn value(&self, name: &str) -> f32 {
        self.state(name).map_or(0.0, |s| s.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MAX_GAMEPADS;

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::default();
        input.keys_down.extend(keys.iter().copied());
        input
    }

    // ── transitions ───────────────────────────────────────────────────────

    #[test]
    fn press_hold_release_sequence() {
        let mut map = ActionMap::new();
        map.bind_key("jump", Key::Space, 1.0);

        map.update(&held(&[Key::Space]));
        assert!(map.pressed("jump"));
        assert!(map.just_pressed("jump"));

        map.update(&held(&[Key::Space]));
        assert!(map.pressed("jump"));
        assert!(!map.just_pressed("jump"));

        map.update(&held(&[]));
        assert!(!map.pressed("jump"));
        assert!(map.just_released("jump"));

        map.update(&held(&[]));
        assert!(!map.just_released("jump"));
    }

    #[test]
    fn any_binding_keeps_action_active() {
        let mut map = ActionMap::new();
        map.bind_key("fire", Key::F, 1.0);
        map.bind_mouse_button("fire", MouseButton::Left, 1.0);

        let mut input = held(&[Key::F]);
        map.update(&input);
        assert!(map.just_pressed("fire"));

        input.keys_down.clear();
        input.buttons_down.insert(MouseButton::Left);
        map.update(&input);
        assert!(map.pressed("fire"));
        assert!(!map.just_pressed("fire"));
        assert!(!map.just_released("fire"));
    }

    #[test]
    fn unknown_action_is_inactive() {
        let map = ActionMap::new();
        assert!(!map.pressed("nope"));
        assert!(!map.just_released("nope"));
        assert_eq!(map.value("nope"), 0.0);
    }

    // ── values ────────────────────────────────────────────────────────────

    #[test]
    fn opposing_keys_average_out() {
        let mut map = ActionMap::new();
        map.bind_key("move_x", Key::D, 1.0);
        map.bind_key("move_x", Key::A, -1.0);

        map.update(&held(&[Key::A]));
        assert_eq!(map.value("move_x"), -1.0);

        map.update(&held(&[Key::A, Key::D]));
        assert_eq!(map.value("move_x"), 0.0);
        assert!(map.pressed("move_x"));
    }

    #[test]
    fn mouse_axis_respects_dead_zone() {
        let mut map = ActionMap::new();
        map.bind_mouse_axis("aim_x", Axis::X, 5.0, 0.5);

        let mut input = InputState::default();
        input.pointer_pos = Some((4.0, 100.0));
        map.update(&input);
        assert!(!map.pressed("aim_x"));
        assert_eq!(map.value("aim_x"), 0.0);

        input.pointer_pos = Some((40.0, 100.0));
        map.update(&input);
        assert!(map.pressed("aim_x"));
        assert_eq!(map.value("aim_x"), 20.0);

        input.pointer_pos = None;
        map.update(&input);
        assert!(map.just_released("aim_x"));
    }

    // ── gamepads ──────────────────────────────────────────────────────────

    #[test]
    fn gamepad_axis_past_dead_zone_drives_action() {
        let mut map = ActionMap::new();
        map.bind_gamepad_axis("throttle", GamepadAxis::RightTrigger, 1, 0.2, 2.0);

        let mut input = InputState::default();
        input.gamepads[1].axes.insert(GamepadAxis::RightTrigger, 0.15);
        map.update(&input);
        assert!(!map.pressed("throttle"));
        assert_eq!(map.value("throttle"), 0.0);

        input.gamepads[1].axes.insert(GamepadAxis::RightTrigger, 0.75);
        map.update(&input);
        assert!(map.just_pressed("throttle"));
        assert_eq!(map.value("throttle"), 1.5);
    }

    #[test]
    fn gamepad_button_reads_only_its_slot() {
        let mut map = ActionMap::new();
        map.bind_gamepad_button("jump", GamepadButton::South, 0, 1.0);

        let mut input = InputState::default();
        input.gamepads[2].buttons.insert(GamepadButton::South);
        map.update(&input);
        assert!(!map.pressed("jump"));

        input.gamepads[0].buttons.insert(GamepadButton::South);
        map.update(&input);
        assert!(map.pressed("jump"));
        assert_eq!(map.value("jump"), 1.0);
    }

    #[test]
    fn out_of_range_gamepad_reads_neutral() {
        let mut map = ActionMap::new();
        map.bind_gamepad_axis("steer", GamepadAxis::LeftStickX, MAX_GAMEPADS + 3, 0.1, 1.0);
        map.bind_gamepad_button("steer", GamepadButton::East, MAX_GAMEPADS, 1.0);

        map.update(&InputState::default());
        assert!(!map.pressed("steer"));
    }

    #[test]
    fn unbind_forgets_action() {
        let mut map = ActionMap::new();
        map.bind_key("pause", Key::Escape, 1.0);
        map.update(&held(&[Key::Escape]));
        assert!(map.unbind("pause"));
        assert!(!map.pressed("pause"));
        assert!(!map.unbind("pause"));
    }
}
