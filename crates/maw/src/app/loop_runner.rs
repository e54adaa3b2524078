use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::controls::{Controls, InputHost};
use crate::lifecycle::Lifecycle;

use super::WindowInput;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Maw".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

#[derive(Debug)]
pub struct FrameContext {
    pub input: WindowInput,
    pub controls: Controls,
    exit_requested: bool,
}

impl FrameContext {
    pub fn new(controls: Controls) -> Self {
        Self {
            input: WindowInput::new(),
            controls,
            exit_requested: false,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.input.tick_count()
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn run_tick(&mut self, lifecycle: &mut Lifecycle<FrameContext>) {
        lifecycle.tick(self);
        self.input.end_tick();
    }
}

pub fn run_app(
    config: LoopConfig,
    controls: Controls,
    mut lifecycle: Lifecycle<FrameContext>,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(
            config.window_width as f64,
            config.window_height as f64,
        ))
        .build(&event_loop)
        .map_err(AppError::CreateWindow)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    info!(
        controls = %controls,
        action_count = controls.action_names().count(),
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        "startup"
    );

    let mut context = FrameContext::new(controls);
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    context.input.handle_keyboard_input(&event);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    context.input.handle_mouse_input(button, state);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    context.input.handle_mouse_wheel(delta);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    context
                        .input
                        .set_cursor_position_px(position.x as f32, position.y as f32);
                }
                WindowEvent::CursorLeft { .. } => {
                    context.input.clear_cursor_position();
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
                    accumulator = accumulator.saturating_add(clamped_frame_dt);

                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        context.run_tick(&mut lifecycle);
                        if context.exit_requested() {
                            info!(tick = context.tick_count(), "shutdown_requested");
                            window_target.exit();
                            break;
                        }
                    }
                    accumulator = step_plan.remaining_accumulator;

                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame, "sim_clamp_triggered"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(tick = context.tick_count(), "shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    // Backlog beyond the tick cap is dropped rather than carried into the next frame.
    let dropped_backlog = if accumulator >= fixed_dt {
        std::mem::take(&mut accumulator)
    } else {
        Duration::ZERO
    };
    StepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
        dropped_backlog,
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
