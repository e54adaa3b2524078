use std::collections::HashMap;
use std::convert::Infallible;

use crate::controls::{Device, InputHost, InputValue, Key, KeyState};

const CONTROLLER_SLOTS: usize = 4;

/// In-memory host whose raw input is scripted frame by frame.
///
/// Named devices always answer; the indexed controller list only answers for
/// slots that were connected with [`SimulatedInput::connect_controller`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedInput {
    tick_count: u64,
    states: HashMap<(KeyState, Device, Key), InputValue>,
    mouse: HashMap<Key, InputValue>,
    connected: [bool; CONTROLLER_SLOTS],
}

impl SimulatedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_tick(tick_count: u64) -> Self {
        Self {
            tick_count,
            ..Self::default()
        }
    }

    pub fn set(&mut self, state: KeyState, device: Device, key: impl Into<Key>, value: InputValue) {
        self.states.insert((state, device, key.into()), value);
    }

    pub fn press(&mut self, state: KeyState, device: Device, key: impl Into<Key>) {
        self.set(state, device, key, InputValue::Pressed);
    }

    pub fn release(&mut self, state: KeyState, device: Device, key: impl Into<Key>) {
        self.states.remove(&(state, device, key.into()));
    }

    pub fn set_mouse(&mut self, key: impl Into<Key>, value: InputValue) {
        self.mouse.insert(key.into(), value);
    }

    pub fn with_down(mut self, device: Device, key: impl Into<Key>) -> Self {
        self.press(KeyState::Down, device, key);
        self
    }

    pub fn with_held(mut self, device: Device, key: impl Into<Key>) -> Self {
        self.press(KeyState::Held, device, key);
        self
    }

    pub fn with_up(mut self, device: Device, key: impl Into<Key>) -> Self {
        self.press(KeyState::Up, device, key);
        self
    }

    pub fn with_mouse(mut self, key: impl Into<Key>, value: InputValue) -> Self {
        self.set_mouse(key, value);
        self
    }

    pub fn connect_controller(&mut self, index: usize) {
        if let Some(slot) = self.connected.get_mut(index) {
            *slot = true;
        }
    }

    pub fn disconnect_controller(&mut self, index: usize) {
        if let Some(slot) = self.connected.get_mut(index) {
            *slot = false;
        }
    }

    pub fn set_tick_count(&mut self, tick_count: u64) {
        self.tick_count = tick_count;
    }

    pub fn advance_frame(&mut self) {
        self.tick_count = self.tick_count.saturating_add(1);
        self.states.clear();
        self.mouse.clear();
    }

    fn reading(&self, state: KeyState, device: Device, key: &Key) -> Option<InputValue> {
        self.states.get(&(state, device, key.clone())).copied()
    }
}

impl InputHost for SimulatedInput {
    type Error = Infallible;

    fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn key_state(
        &self,
        device: Device,
        state: KeyState,
        key: &Key,
    ) -> Result<Option<InputValue>, Self::Error> {
        Ok(self.reading(state, device, key))
    }

    fn mouse(&self, key: &Key) -> Result<Option<InputValue>, Self::Error> {
        Ok(self.mouse.get(key).copied())
    }

    fn indexed_controller_state(
        &self,
        index: usize,
        state: KeyState,
        key: &Key,
    ) -> Result<Option<InputValue>, Self::Error> {
        if !self.connected.get(index).copied().unwrap_or(false) {
            return Ok(None);
        }
        let device = match index {
            0 => Device::ControllerOne,
            1 => Device::ControllerTwo,
            2 => Device::ControllerThree,
            _ => Device::ControllerFour,
        };
        Ok(self.reading(state, device, key))
    }
}
