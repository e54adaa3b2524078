use super::{Device, Key, KeyState};

/// A truthy raw reading from the host. Falsy readings are `None` at every call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Pressed,
    Since(u64),
    Analog(f32),
}

impl InputValue {
    pub fn magnitude(self) -> f32 {
        match self {
            InputValue::Analog(value) => value,
            InputValue::Pressed | InputValue::Since(_) => 1.0,
        }
    }
}

/// Every query passes its failure straight through; Controls never inspects or
/// translates `Self::Error`.
pub trait InputHost {
    type Error;

    fn tick_count(&self) -> u64;

    fn key_state(
        &self,
        device: Device,
        state: KeyState,
        key: &Key,
    ) -> Result<Option<InputValue>, Self::Error>;

    fn mouse(&self, key: &Key) -> Result<Option<InputValue>, Self::Error>;

    /// `inputs.controllers[index].<state>.<key>`. A missing controller reports `Ok(None)`.
    fn indexed_controller_state(
        &self,
        index: usize,
        state: KeyState,
        key: &Key,
    ) -> Result<Option<InputValue>, Self::Error>;
}

pub fn input_state<H>(
    host: &H,
    state: KeyState,
    device: Device,
    key: &Key,
) -> Result<Option<InputValue>, H::Error>
where
    H: InputHost + ?Sized,
{
    if device == Device::Mouse {
        return host.mouse(key);
    }
    match device.controller_list_index() {
        Some(index) => host.indexed_controller_state(index, state, key),
        None => host.key_state(device, state, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatedInput;

    #[test]
    fn digital_readings_have_unit_magnitude() {
        assert_eq!(InputValue::Pressed.magnitude(), 1.0);
        assert_eq!(InputValue::Since(40).magnitude(), 1.0);
        assert_eq!(InputValue::Analog(0.25).magnitude(), 0.25);
    }

    #[test]
    fn named_controllers_are_read_by_device() {
        let host = SimulatedInput::new().with_down(Device::ControllerTwo, "x");

        assert_eq!(
            input_state(&host, KeyState::Down, Device::ControllerTwo, &Key::from("x")),
            Ok(Some(InputValue::Pressed))
        );
    }
}
