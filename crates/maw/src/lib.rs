pub mod app;
pub mod controls;
mod lifecycle;
mod sim;

pub use app::{run_app, AppError, FrameContext, LoopConfig, WindowInput, WindowInputError};
pub use controls::{
    any, default_controls, find, input_state, method_name_to_action, normalize,
    with_default_controls, BindingTable, ConfigError, Controls, ControlsConfig, ControlsOptions,
    Device, InputHost, InputValue, Key, KeyState, Keys, LatchMemory, ParseDeviceError, Signal,
    SignalName, SignalReading, PRODUCTION_ENV_VAR,
};
pub use lifecycle::Lifecycle;
pub use sim::SimulatedInput;
