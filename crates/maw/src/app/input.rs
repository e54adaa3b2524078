use std::collections::{HashMap, HashSet};

use thiserror::Error;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::controls::{Device, InputHost, InputValue, Key, KeyState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowInputError {
    #[error("unknown {device} key '{key}'")]
    UnknownKey { device: Device, key: String },
}

/// Keyboard and mouse state collected from `winit` window events, one tick at a time.
///
/// Down means pressed during the current tick, held means down since an earlier
/// tick, up means released during the current tick. Gamepads are not read, so
/// every controller device reports inactive.
#[derive(Debug, Default)]
pub struct WindowInput {
    tick_count: u64,
    keys_down: HashMap<KeyCode, u64>,
    keys_pressed: HashMap<KeyCode, u64>,
    keys_released: HashSet<KeyCode>,
    buttons_down: HashMap<MouseButton, u64>,
    buttons_pressed: HashMap<MouseButton, u64>,
    buttons_released: HashSet<MouseButton>,
    cursor_position_px: Option<(f32, f32)>,
    pending_wheel_steps: i32,
}

impl WindowInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        self.handle_physical_key(key_event.physical_key, key_event.state);
    }

    pub fn handle_physical_key(&mut self, key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        match state {
            ElementState::Pressed => {
                if !self.keys_down.contains_key(&code) {
                    self.keys_down.insert(code, self.tick_count);
                    self.keys_pressed.insert(code, self.tick_count);
                }
            }
            ElementState::Released => {
                if self.keys_down.remove(&code).is_some() {
                    self.keys_released.insert(code);
                }
            }
        }
    }

    pub fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.buttons_down.contains_key(&button) {
                    self.buttons_down.insert(button, self.tick_count);
                    self.buttons_pressed.insert(button, self.tick_count);
                }
            }
            ElementState::Released => {
                if self.buttons_down.remove(&button).is_some() {
                    self.buttons_released.insert(button);
                }
            }
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        let steps = wheel_steps_from_scroll_delta(delta);
        self.pending_wheel_steps = self.pending_wheel_steps.saturating_add(steps);
    }

    pub fn set_cursor_position_px(&mut self, x: f32, y: f32) {
        self.cursor_position_px = Some((x, y));
    }

    pub fn clear_cursor_position(&mut self) {
        self.cursor_position_px = None;
    }

    pub fn end_tick(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pending_wheel_steps = 0;
        self.tick_count = self.tick_count.saturating_add(1);
    }

    fn keyboard_reading(&self, state: KeyState, codes: &[KeyCode]) -> Option<InputValue> {
        codes.iter().find_map(|code| match state {
            KeyState::Down => self
                .keys_pressed
                .get(code)
                .map(|since| InputValue::Since(*since)),
            KeyState::Held => self
                .keys_down
                .get(code)
                .filter(|_| !self.keys_pressed.contains_key(code))
                .map(|since| InputValue::Since(*since)),
            KeyState::Up => self
                .keys_released
                .contains(code)
                .then_some(InputValue::Pressed),
        })
    }

    fn button_held(&self, button: MouseButton) -> Option<InputValue> {
        self.buttons_down
            .get(&button)
            .map(|since| InputValue::Since(*since))
    }
}

impl InputHost for WindowInput {
    type Error = WindowInputError;

    fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn key_state(
        &self,
        device: Device,
        state: KeyState,
        key: &Key,
    ) -> Result<Option<InputValue>, Self::Error> {
        match device {
            Device::Keyboard => {
                let codes =
                    key_codes_from_name(key.as_str()).ok_or_else(|| WindowInputError::UnknownKey {
                        device,
                        key: key.to_string(),
                    })?;
                Ok(self.keyboard_reading(state, codes))
            }
            Device::Mouse => self.mouse(key),
            Device::ControllerOne
            | Device::ControllerTwo
            | Device::ControllerThree
            | Device::ControllerFour => Ok(None),
        }
    }

    fn mouse(&self, key: &Key) -> Result<Option<InputValue>, Self::Error> {
        let reading = match key.as_str() {
            "click" => self
                .buttons_pressed
                .get(&MouseButton::Left)
                .map(|since| InputValue::Since(*since)),
            "up" => (!self.buttons_released.is_empty()).then_some(InputValue::Pressed),
            "button_left" => self.button_held(MouseButton::Left),
            "button_right" => self.button_held(MouseButton::Right),
            "button_middle" => self.button_held(MouseButton::Middle),
            "x" => self.cursor_position_px.map(|(x, _)| InputValue::Analog(x)),
            "y" => self.cursor_position_px.map(|(_, y)| InputValue::Analog(y)),
            "wheel" => (self.pending_wheel_steps != 0)
                .then(|| InputValue::Analog(self.pending_wheel_steps as f32)),
            _ => {
                return Err(WindowInputError::UnknownKey {
                    device: Device::Mouse,
                    key: key.to_string(),
                })
            }
        };
        Ok(reading)
    }

    fn indexed_controller_state(
        &self,
        _index: usize,
        _state: KeyState,
        _key: &Key,
    ) -> Result<Option<InputValue>, Self::Error> {
        Ok(None)
    }
}

fn wheel_steps_from_scroll_delta(delta: MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
        MouseScrollDelta::PixelDelta(position) => {
            if position.y > 0.0 {
                1
            } else if position.y < 0.0 {
                -1
            } else {
                0
            }
        }
    }
}

/// Physical keys behind a keyboard key name. Modifier names cover both sides.
fn key_codes_from_name(name: &str) -> Option<&'static [KeyCode]> {
    let codes: &'static [KeyCode] = match name {
        "a" => &[KeyCode::KeyA],
        "b" => &[KeyCode::KeyB],
        "c" => &[KeyCode::KeyC],
        "d" => &[KeyCode::KeyD],
        "e" => &[KeyCode::KeyE],
        "f" => &[KeyCode::KeyF],
        "g" => &[KeyCode::KeyG],
        "h" => &[KeyCode::KeyH],
        "i" => &[KeyCode::KeyI],
        "j" => &[KeyCode::KeyJ],
        "k" => &[KeyCode::KeyK],
        "l" => &[KeyCode::KeyL],
        "m" => &[KeyCode::KeyM],
        "n" => &[KeyCode::KeyN],
        "o" => &[KeyCode::KeyO],
        "p" => &[KeyCode::KeyP],
        "q" => &[KeyCode::KeyQ],
        "r" => &[KeyCode::KeyR],
        "s" => &[KeyCode::KeyS],
        "t" => &[KeyCode::KeyT],
        "u" => &[KeyCode::KeyU],
        "v" => &[KeyCode::KeyV],
        "w" => &[KeyCode::KeyW],
        "x" => &[KeyCode::KeyX],
        "y" => &[KeyCode::KeyY],
        "z" => &[KeyCode::KeyZ],
        "zero" => &[KeyCode::Digit0],
        "one" => &[KeyCode::Digit1],
        "two" => &[KeyCode::Digit2],
        "three" => &[KeyCode::Digit3],
        "four" => &[KeyCode::Digit4],
        "five" => &[KeyCode::Digit5],
        "six" => &[KeyCode::Digit6],
        "seven" => &[KeyCode::Digit7],
        "eight" => &[KeyCode::Digit8],
        "nine" => &[KeyCode::Digit9],
        "space" => &[KeyCode::Space],
        "enter" => &[KeyCode::Enter, KeyCode::NumpadEnter],
        "escape" => &[KeyCode::Escape],
        "tab" => &[KeyCode::Tab],
        "backspace" => &[KeyCode::Backspace],
        "delete" => &[KeyCode::Delete],
        "up" | "up_arrow" => &[KeyCode::ArrowUp],
        "down" | "down_arrow" => &[KeyCode::ArrowDown],
        "left" | "left_arrow" => &[KeyCode::ArrowLeft],
        "right" | "right_arrow" => &[KeyCode::ArrowRight],
        "shift" => &[KeyCode::ShiftLeft, KeyCode::ShiftRight],
        "shift_left" => &[KeyCode::ShiftLeft],
        "shift_right" => &[KeyCode::ShiftRight],
        "control" => &[KeyCode::ControlLeft, KeyCode::ControlRight],
        "control_left" => &[KeyCode::ControlLeft],
        "control_right" => &[KeyCode::ControlRight],
        "alt" => &[KeyCode::AltLeft, KeyCode::AltRight],
        "alt_left" => &[KeyCode::AltLeft],
        "alt_right" => &[KeyCode::AltRight],
        "f1" => &[KeyCode::F1],
        "f2" => &[KeyCode::F2],
        "f3" => &[KeyCode::F3],
        "f4" => &[KeyCode::F4],
        "f5" => &[KeyCode::F5],
        "f6" => &[KeyCode::F6],
        "f7" => &[KeyCode::F7],
        "f8" => &[KeyCode::F8],
        "f9" => &[KeyCode::F9],
        "f10" => &[KeyCode::F10],
        "f11" => &[KeyCode::F11],
        "f12" => &[KeyCode::F12],
        _ => return None,
    };
    Some(codes)
}
