use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

use tracing::warn;

use super::Controls;

static DEFAULT_CONTROLS: OnceLock<Mutex<Controls>> = OnceLock::new();
static DEFAULT_CONTROLS_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_default_controls_poison_once() {
    if DEFAULT_CONTROLS_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!("default controls lock poisoned; recovered inner value");
    }
}

/// Process-wide control set, created on first access and kept for the process lifetime.
pub fn default_controls() -> &'static Mutex<Controls> {
    DEFAULT_CONTROLS.get_or_init(|| Mutex::new(Controls::new()))
}

pub fn with_default_controls<R>(f: impl FnOnce(&mut Controls) -> R) -> R {
    let mut guard = match default_controls().lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn_default_controls_poison_once();
            poisoned.into_inner()
        }
    };
    f(&mut guard)
}
