use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Keyboard,
    Mouse,
    ControllerOne,
    ControllerTwo,
    ControllerThree,
    ControllerFour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Held,
    Up,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input device '{name}'")]
pub struct ParseDeviceError {
    pub name: String,
}

const ALL_DEVICES: [Device; 6] = [
    Device::Keyboard,
    Device::Mouse,
    Device::ControllerOne,
    Device::ControllerTwo,
    Device::ControllerThree,
    Device::ControllerFour,
];

impl Device {
    pub const fn all() -> [Device; 6] {
        ALL_DEVICES
    }

    pub const fn name(self) -> &'static str {
        match self {
            Device::Keyboard => "keyboard",
            Device::Mouse => "mouse",
            Device::ControllerOne => "controller_one",
            Device::ControllerTwo => "controller_two",
            Device::ControllerThree => "controller_three",
            Device::ControllerFour => "controller_four",
        }
    }

    pub(crate) const fn controller_list_index(self) -> Option<usize> {
        match self {
            Device::ControllerThree => Some(2),
            Device::ControllerFour => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Device {
    type Err = ParseDeviceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ALL_DEVICES
            .into_iter()
            .find(|device| device.name() == value)
            .ok_or_else(|| ParseDeviceError {
                name: value.to_string(),
            })
    }
}

impl KeyState {
    pub const fn query_name(self) -> &'static str {
        match self {
            KeyState::Down => "key_down",
            KeyState::Held => "key_held",
            KeyState::Up => "key_up",
        }
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_names_round_trip_through_from_str() {
        for device in Device::all() {
            assert_eq!(device.name().parse::<Device>(), Ok(device), "device={device}");
        }
    }

    #[test]
    fn unknown_device_name_is_rejected() {
        let error = "joystick".parse::<Device>().expect_err("should reject");
        assert_eq!(error.name, "joystick");
        assert_eq!(error.to_string(), "unknown input device 'joystick'");
    }

    #[test]
    fn only_third_and_fourth_controllers_use_the_controller_list() {
        assert_eq!(Device::ControllerThree.controller_list_index(), Some(2));
        assert_eq!(Device::ControllerFour.controller_list_index(), Some(3));
        assert_eq!(Device::ControllerOne.controller_list_index(), None);
        assert_eq!(Device::Keyboard.controller_list_index(), None);
    }
}
