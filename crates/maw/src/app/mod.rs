mod input;
mod loop_runner;

pub use input::{WindowInput, WindowInputError};
pub use loop_runner::{run_app, AppError, FrameContext, LoopConfig};
