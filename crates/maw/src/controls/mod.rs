mod binding;
mod config;
mod device;
mod evaluator;
mod global;
mod host;
mod latch;
mod set;
mod signal;

pub use binding::{normalize, BindingTable, Key, Keys};
pub use config::{ConfigError, ControlsConfig, ControlsOptions, PRODUCTION_ENV_VAR};
pub use device::{Device, KeyState, ParseDeviceError};
pub use evaluator::{any, find};
pub use global::{default_controls, with_default_controls};
pub use host::{input_state, InputHost, InputValue};
pub use latch::LatchMemory;
pub use set::Controls;
pub use signal::{method_name_to_action, Signal, SignalName, SignalReading};
