mod script;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use maw::{run_app, Controls, ControlsConfig, FrameContext, Lifecycle, LoopConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_CONTROLS_JSON: &str = include_str!("../controls.json");
const CONTROLS_PATH_ENV_VAR: &str = "MAW_CONTROLS";
const DEFAULT_HEADLESS_FRAMES: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DemoOptions {
    config_path: Option<PathBuf>,
    headless: bool,
    frames: u64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            headless: false,
            frames: DEFAULT_HEADLESS_FRAMES,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    info!("=== Maw Controls Demo ===");

    let options = match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", usage_text());
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(error = %message, "demo_failed");
            ExitCode::from(1)
        }
    }
}

fn run(options: DemoOptions) -> Result<(), String> {
    let controls = load_controls(options.config_path)?;
    if options.headless {
        let reports = script::run_headless(controls, options.frames);
        info!(frames = reports.len(), "headless_finished");
        return Ok(());
    }

    let config = LoopConfig {
        window_title: "Maw Controls Demo".to_string(),
        ..LoopConfig::default()
    };
    run_app(config, controls, window_lifecycle()).map_err(|err| err.to_string())
}

fn window_lifecycle() -> Lifecycle<FrameContext> {
    Lifecycle::new()
        .on_init(|frame: &mut FrameContext| {
            info!(controls = %frame.controls, "controls_ready");
        })
        .on_tick(|frame: &mut FrameContext| {
            if let Err(err) = log_actions(frame) {
                error!(error = %err, "controls_read_failed");
                frame.request_exit();
            }
        })
}

fn log_actions(frame: &mut FrameContext) -> Result<(), maw::WindowInputError> {
    let tick = frame.tick_count();
    let input = &frame.input;
    let controls = &mut frame.controls;

    if controls.is_down(input, "jump")? {
        info!(tick, "jump");
    }
    if let Some(value) = controls.down(input, "fire")? {
        info!(tick, value = ?value, "fire");
    }
    if controls.latch(input, "pause")?.is_some() {
        let paused = controls.is_latched(input, "pause")?;
        info!(tick, paused, "pause_toggled");
    }
    if controls.is_down(input, "quit")? {
        info!(tick, "quit");
        frame.request_exit();
    }
    Ok(())
}

fn load_controls(config_path: Option<PathBuf>) -> Result<Controls, String> {
    let config_path = config_path.or_else(|| env::var_os(CONTROLS_PATH_ENV_VAR).map(PathBuf::from));
    let config = match config_path {
        Some(path) => ControlsConfig::from_path(&path),
        None => ControlsConfig::from_json_str(DEFAULT_CONTROLS_JSON),
    }
    .map_err(|err| err.to_string())?;
    Ok(Controls::from_config(config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// `Ok(None)` means help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<DemoOptions>, String> {
    let args = args.into_iter().collect::<Vec<_>>();
    let mut options = DemoOptions::default();
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(None),
            "--headless" => {
                options.headless = true;
                index += 1;
            }
            "--config" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --config".to_string())?;
                options.config_path = Some(PathBuf::from(value));
                index += 2;
            }
            "--frames" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --frames".to_string())?;
                options.frames = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --frames value '{value}' (expected u64)"))?;
                index += 2;
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(Some(options))
}

fn usage_text() -> String {
    format!(
        "usage: maw_demo [--headless] [--frames <n>] [--config <path>]\n\
\n\
Without --config the controls come from ${CONTROLS_PATH_ENV_VAR}, then the built-in set.\n\
--headless plays a scripted input sequence instead of opening a window."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn no_arguments_opens_a_window_with_defaults() {
        let options = parse_args(args(&[])).expect("parse").expect("options");
        assert_eq!(options, DemoOptions::default());
    }

    #[test]
    fn headless_options_are_parsed() {
        let options = parse_args(args(&["--headless", "--frames", "3", "--config", "c.json"]))
            .expect("parse")
            .expect("options");

        assert!(options.headless);
        assert_eq!(options.frames, 3);
        assert_eq!(options.config_path, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(args(&["--headless", "-h"])), Ok(None));
    }

    #[test]
    fn invalid_arguments_are_reported() {
        assert_eq!(
            parse_args(args(&["--frames", "many"])),
            Err("invalid --frames value 'many' (expected u64)".to_string())
        );
        assert_eq!(
            parse_args(args(&["--config"])),
            Err("missing value for --config".to_string())
        );
        assert_eq!(
            parse_args(args(&["--fast"])),
            Err("unknown argument '--fast'".to_string())
        );
    }

    #[test]
    fn built_in_controls_define_the_demo_actions() {
        let controls = load_controls(None).expect("controls");
        for action in ["jump", "fire", "pause", "quit"] {
            assert!(controls.is_defined(action), "action={action}");
        }
        assert_eq!(controls.name(), "Demo");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let error = load_controls(Some(PathBuf::from("/definitely/not/here.json")))
            .expect_err("should fail");
        assert!(error.contains("failed to read controls config"));
    }
}
