use std::collections::{HashMap, HashSet};

use gilrs::{EventType, GamepadId, Gilrs};

use super::state::InputState;
use super::types::{GamepadAxis, GamepadButton};

/// Number of gamepad slots tracked by [`InputState`].
pub const MAX_GAMEPADS: usize = 4;

/// Polled state of one gamepad slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Whether a device currently occupies this slot.
    pub connected: bool,
    /// Buttons held down.
    pub buttons: HashSet<GamepadButton>,
    /// Last reading per axis; missing axes read `0.0`.
    pub axes: HashMap<GamepadAxis, f32>,
}

impl GamepadSnapshot {
    pub fn button_down(&self, button: GamepadButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }
}

const BUTTONS: [(GamepadButton, gilrs::Button); 15] = [
    (GamepadButton::South, gilrs::Button::South),
    (GamepadButton::East, gilrs::Button::East),
    (GamepadButton::West, gilrs::Button::West),
    (GamepadButton::North, gilrs::Button::North),
    (GamepadButton::LeftBumper, gilrs::Button::LeftTrigger),
    (GamepadButton::RightBumper, gilrs::Button::RightTrigger),
    (GamepadButton::Select, gilrs::Button::Select),
    (GamepadButton::Start, gilrs::Button::Start),
    (GamepadButton::Mode, gilrs::Button::Mode),
    (GamepadButton::LeftThumb, gilrs::Button::LeftThumb),
    (GamepadButton::RightThumb, gilrs::Button::RightThumb),
    (GamepadButton::DPadUp, gilrs::Button::DPadUp),
    (GamepadButton::DPadDown, gilrs::Button::DPadDown),
    (GamepadButton::DPadLeft, gilrs::Button::DPadLeft),
    (GamepadButton::DPadRight, gilrs::Button::DPadRight),
];

// gilrs reports analog triggers as the second trigger buttons.
const TRIGGERS: [(GamepadButton, GamepadAxis, gilrs::Button); 2] = [
    (GamepadButton::LeftTrigger, GamepadAxis::LeftTrigger, gilrs::Button::LeftTrigger2),
    (GamepadButton::RightTrigger, GamepadAxis::RightTrigger, gilrs::Button::RightTrigger2),
];

const STICKS: [(GamepadAxis, gilrs::Axis); 4] = [
    (GamepadAxis::LeftStickX, gilrs::Axis::LeftStickX),
    (GamepadAxis::LeftStickY, gilrs::Axis::LeftStickY),
    (GamepadAxis::RightStickX, gilrs::Axis::RightStickX),
    (GamepadAxis::RightStickY, gilrs::Axis::RightStickY),
];

fn snapshot(pad: &gilrs::Gamepad<'_>) -> GamepadSnapshot {
    let mut snap = GamepadSnapshot { connected: pad.is_connected(), ..Default::default() };

    for (button, native) in BUTTONS {
        if pad.is_pressed(native) {
            snap.buttons.insert(button);
        }
    }
    for (button, axis, native) in TRIGGERS {
        let value = pad.button_data(native).map_or(0.0, |data| data.value());
        snap.axes.insert(axis, value.clamp(0.0, 1.0));
        if pad.is_pressed(native) {
            snap.buttons.insert(button);
        }
    }
    for (axis, native) in STICKS {
        snap.axes.insert(axis, pad.value(native));
    }

    snap
}

/// Lowest slot in `0..MAX_GAMEPADS` not present in `taken`.
fn free_slot<'a>(taken: impl Iterator<Item = &'a usize> + Clone) -> Option<usize> {
    (0..MAX_GAMEPADS).find(|slot| !taken.clone().any(|s| s == slot))
}

/// Feeds connected gamepads into [`InputState::gamepads`].
///
/// Devices get the lowest free slot when they connect and keep it until they
/// disconnect. Without a usable gamepad backend every slot stays empty.
pub(crate) struct GamepadPoller {
    gilrs: Option<Gilrs>,
    slots: HashMap<GamepadId, usize>,
}

impl GamepadPoller {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                log::warn!("gamepad support unavailable: {err}");
                None
            }
        };

        let present: Vec<GamepadId> = gilrs
            .as_ref()
            .map(|g| g.gamepads().map(|(id, _)| id).collect())
            .unwrap_or_default();

        let mut poller = Self { gilrs, slots: HashMap::new() };
        for id in present {
            poller.connect(id);
        }
        poller
    }

    fn connect(&mut self, id: GamepadId) {
        if self.slots.contains_key(&id) {
            return;
        }
        match free_slot(self.slots.values()) {
            Some(slot) => {
                self.slots.insert(id, slot);
                log::info!("gamepad {id} connected as #{slot}");
            }
            None => log::warn!("gamepad {id} connected but all {MAX_GAMEPADS} slots are taken"),
        }
    }

    /// Drains connection events and refreshes every occupied slot.
    pub fn poll(&mut self, input: &mut InputState) {
        let Some(gilrs) = self.gilrs.as_mut() else { return };

        let mut events = Vec::new();
        while let Some(event) = gilrs.next_event() {
            events.push((event.id, event.event));
        }

        for (id, event) in events {
            match event {
                EventType::Connected => self.connect(id),
                EventType::Disconnected => {
                    if let Some(slot) = self.slots.remove(&id) {
                        input.gamepads[slot] = GamepadSnapshot::default();
                        log::info!("gamepad {id} (#{slot}) disconnected");
                    }
                }
                _ => {}
            }
        }

        let Some(gilrs) = self.gilrs.as_ref() else { return };
        for (&id, &slot) in &self.slots {
            input.gamepads[slot] = snapshot(&gilrs.gamepad(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_slot_fills_gaps_first() {
        assert_eq!(free_slot(std::iter::empty()), Some(0));
        assert_eq!(free_slot([0, 2].iter()), Some(1));
        assert_eq!(free_slot([0, 1, 2, 3].iter()), None);
    }

    #[test]
    fn every_button_is_mapped_once() {
        let mut seen: HashSet<GamepadButton> = BUTTONS.iter().map(|(b, _)| *b).collect();
        seen.extend(TRIGGERS.iter().map(|(b, _, _)| *b));
        assert_eq!(seen.len(), BUTTONS.len() + TRIGGERS.len());
    }

    #[test]
    fn empty_snapshot_reads_neutral() {
        let snap = GamepadSnapshot::default();
        assert!(!snap.connected);
        assert!(!snap.button_down(GamepadButton::South));
        assert_eq!(snap.axis(GamepadAxis::LeftStickX), 0.0);
    }
}
