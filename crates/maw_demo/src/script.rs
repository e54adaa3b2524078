use std::convert::Infallible;

use maw::{Controls, Device, InputHost, InputValue, KeyState, Lifecycle, SimulatedInput};
use tracing::info;

/// What the demo actions read on one scripted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameReport {
    pub tick: u64,
    pub jump: bool,
    pub jump_down: bool,
    pub jump_held: bool,
    pub fire: Option<InputValue>,
    pub paused: bool,
    pub dash: bool,
}

struct HeadlessContext {
    host: SimulatedInput,
    controls: Controls,
    reports: Vec<FrameReport>,
}

/// Raw input for tick `tick` of the demo script.
pub(crate) fn scripted_frame(tick: u64) -> SimulatedInput {
    let mut host = SimulatedInput::at_tick(tick);
    match tick {
        1 => host.press(KeyState::Down, Device::Keyboard, "space"),
        2 | 3 => host.press(KeyState::Held, Device::Keyboard, "space"),
        4 => host.press(KeyState::Up, Device::Keyboard, "space"),
        5 | 9 => host.press(KeyState::Down, Device::Keyboard, "p"),
        6 => host.set_mouse("click", InputValue::Since(6)),
        7 | 8 => host.press(KeyState::Held, Device::ControllerOne, "a"),
        _ => {}
    }
    host
}

fn settled<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

fn read_frame(context: &mut HeadlessContext) -> FrameReport {
    let host = &context.host;
    let controls = &mut context.controls;
    FrameReport {
        tick: host.tick_count(),
        jump: settled(controls.is_active(host, "jump")),
        jump_down: settled(controls.is_down(host, "jump")),
        jump_held: settled(controls.is_held(host, "jump")),
        fire: settled(controls.active(host, "fire")),
        paused: settled(controls.is_latched(host, "pause")),
        dash: settled(controls.is_active(host, "dash")),
    }
}

/// Plays `frames` ticks of the demo script against `controls`.
pub(crate) fn run_headless(controls: Controls, frames: u64) -> Vec<FrameReport> {
    let mut context = HeadlessContext {
        host: SimulatedInput::new(),
        controls,
        reports: Vec::new(),
    };
    let mut lifecycle = Lifecycle::new()
        .on_init(|context: &mut HeadlessContext| {
            info!(
                controls = %context.controls,
                action_count = context.controls.action_names().count(),
                "controls_ready"
            );
        })
        .on_tick(|context: &mut HeadlessContext| {
            let report = read_frame(context);
            info!(
                tick = report.tick,
                jump = report.jump,
                jump_down = report.jump_down,
                jump_held = report.jump_held,
                fire = ?report.fire,
                paused = report.paused,
                dash = report.dash,
                "frame"
            );
            context.reports.push(report);
        });

    for tick in 1..=frames {
        context.host = scripted_frame(tick);
        lifecycle.tick(&mut context);
    }
    context.reports
}

#[cfg(test)]
mod tests {
    use maw::ControlsConfig;

    use super::*;
    use crate::DEFAULT_CONTROLS_JSON;

    fn demo_controls() -> Controls {
        let config = ControlsConfig::from_json_str(DEFAULT_CONTROLS_JSON).expect("config");
        Controls::from_config(config)
    }

    #[test]
    fn jump_reads_down_then_held() {
        let reports = run_headless(demo_controls(), 4);

        assert!(reports[0].jump_down && !reports[0].jump_held && reports[0].jump);
        assert!(!reports[1].jump_down && reports[1].jump_held && reports[1].jump);
        assert!(!reports[3].jump, "released key is not active");
    }

    #[test]
    fn pause_latch_toggles_on_each_press() {
        let reports = run_headless(demo_controls(), 10);
        let paused = reports.iter().map(|report| report.paused).collect::<Vec<_>>();

        assert_eq!(
            paused,
            vec![false, false, false, false, true, true, true, true, false, false]
        );
    }

    #[test]
    fn fire_reports_mouse_click_value() {
        let reports = run_headless(demo_controls(), 6);
        assert_eq!(reports[5].fire, Some(InputValue::Since(6)));
        assert_eq!(reports[4].fire, None);
    }

    #[test]
    fn controller_held_counts_as_jump() {
        let reports = run_headless(demo_controls(), 8);
        assert!(reports[6].jump && reports[6].jump_held);
    }

    #[test]
    fn unbound_dash_never_fires() {
        let reports = run_headless(demo_controls(), 10);
        assert!(reports.iter().all(|report| !report.dash));
    }
}
