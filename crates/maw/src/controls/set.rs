use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, info};

use super::evaluator::{any, find};
use super::{
    normalize, BindingTable, ControlsOptions, Device, InputHost, InputValue, KeyState, Keys,
    LatchMemory, Signal, SignalName, SignalReading,
};

static NEXT_CONTROL_SET: AtomicU32 = AtomicU32::new(1);

fn next_control_set_name() -> String {
    let index = NEXT_CONTROL_SET.fetch_add(1, Ordering::Relaxed);
    format!("Control Set {index}")
}

/// Named actions bound to raw device keys, evaluated on demand against an [`InputHost`].
///
/// Only latch memory is kept between calls, and it survives redefinition. Reading an
/// undefined action defines an empty stub in its place instead of failing.
#[derive(Debug)]
pub struct Controls {
    name: String,
    production: bool,
    actions: HashMap<String, DefinedAction>,
    latches: HashMap<String, LatchMemory>,
    next_sequence: u64,
}

#[derive(Debug)]
struct DefinedAction {
    bindings: BindingTable,
    sequence: u64,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    pub fn new() -> Self {
        Self::with_options(ControlsOptions::default())
    }

    pub fn with_options(options: ControlsOptions) -> Self {
        Self {
            name: options.name.unwrap_or_else(next_control_set_name),
            production: options.production,
            actions: HashMap::new(),
            latches: HashMap::new(),
            next_sequence: 0,
        }
    }

    pub fn build(configure: impl FnOnce(&mut Controls)) -> Self {
        let mut controls = Self::new();
        configure(&mut controls);
        controls
    }

    pub fn configure(&mut self, configure: impl FnOnce(&mut Controls)) -> &mut Self {
        configure(self);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    pub fn set_production(&mut self, production: bool) {
        self.production = production;
    }

    pub fn define<I, K>(&mut self, action: impl Into<String>, bindings: I) -> &mut Self
    where
        I: IntoIterator<Item = (Device, K)>,
        K: Into<Keys>,
    {
        self.define_table(action, normalize(bindings))
    }

    pub fn action<I, K>(&mut self, action: impl Into<String>, bindings: I) -> &mut Self
    where
        I: IntoIterator<Item = (Device, K)>,
        K: Into<Keys>,
    {
        self.define(action, bindings)
    }

    pub fn define_table(&mut self, action: impl Into<String>, table: BindingTable) -> &mut Self {
        let action = action.into();
        debug!(
            controls = %self,
            action = action.as_str(),
            devices = table.device_count(),
            bindings = table.binding_count(),
            "action_defined"
        );
        self.next_sequence += 1;
        self.actions.insert(
            action,
            DefinedAction {
                bindings: table,
                sequence: self.next_sequence,
            },
        );
        self
    }

    pub fn stub(&mut self, action: impl Into<String>) -> &mut Self {
        self.define_table(action, BindingTable::new())
    }

    pub fn is_defined(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    pub fn bindings(&self, action: &str) -> Option<&BindingTable> {
        self.actions.get(action).map(|defined| &defined.bindings)
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.keys().map(String::as_str)
    }

    pub fn latch_memory(&self, action: &str) -> Option<LatchMemory> {
        self.latches.get(action).copied()
    }

    pub fn down<H>(&mut self, host: &H, action: &str) -> Result<Option<InputValue>, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.read(host, action, Signal::Down)
    }

    pub fn held<H>(&mut self, host: &H, action: &str) -> Result<Option<InputValue>, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.read(host, action, Signal::Held)
    }

    pub fn up<H>(&mut self, host: &H, action: &str) -> Result<Option<InputValue>, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.read(host, action, Signal::Up)
    }

    pub fn active<H>(&mut self, host: &H, action: &str) -> Result<Option<InputValue>, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.read(host, action, Signal::Active)
    }

    /// Updates the latch and returns the down value that toggled it on this call, if any.
    pub fn latch<H>(&mut self, host: &H, action: &str) -> Result<Option<InputValue>, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.read(host, action, Signal::Latch)
    }

    pub fn is_down<H>(&mut self, host: &H, action: &str) -> Result<bool, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.check(host, action, Signal::Down)
    }

    pub fn is_held<H>(&mut self, host: &H, action: &str) -> Result<bool, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.check(host, action, Signal::Held)
    }

    pub fn is_up<H>(&mut self, host: &H, action: &str) -> Result<bool, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.check(host, action, Signal::Up)
    }

    pub fn is_active<H>(&mut self, host: &H, action: &str) -> Result<bool, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.check(host, action, Signal::Active)
    }

    pub fn is_latched<H>(&mut self, host: &H, action: &str) -> Result<bool, H::Error>
    where
        H: InputHost + ?Sized,
    {
        self.check(host, action, Signal::Latch)
    }

    pub fn read<H>(
        &mut self,
        host: &H,
        action: &str,
        signal: Signal,
    ) -> Result<Option<InputValue>, H::Error>
    where
        H: InputHost + ?Sized,
    {
        let requested = SignalName {
            action,
            signal,
            predicate: false,
        };
        Ok(match self.evaluate(host, requested)? {
            SignalReading::Value(value) => value,
            SignalReading::Flag(flag) => flag.then_some(InputValue::Pressed),
        })
    }

    pub fn check<H>(&mut self, host: &H, action: &str, signal: Signal) -> Result<bool, H::Error>
    where
        H: InputHost + ?Sized,
    {
        let requested = SignalName {
            action,
            signal,
            predicate: true,
        };
        Ok(self.evaluate(host, requested)?.is_truthy())
    }

    /// Evaluates a signal by method name, e.g. `jump`, `jump?`, `jump_down?`, `pause_latch`.
    ///
    /// `fire_up?` names both the active signal of an action `fire_up` and the up signal
    /// of `fire`. Whichever of the two was defined last answers; if neither is defined,
    /// `fire` is stubbed.
    pub fn call<H>(&mut self, host: &H, name: &str) -> Result<SignalReading, H::Error>
    where
        H: InputHost + ?Sized,
    {
        let requested = self.resolve(name);
        self.evaluate(host, requested)
    }

    fn resolve<'n>(&self, name: &'n str) -> SignalName<'n> {
        let whole = SignalName::whole(name);
        let parsed = SignalName::parse(name);
        match (self.sequence(whole.action), self.sequence(parsed.action)) {
            (Some(whole_sequence), Some(parsed_sequence)) if whole_sequence > parsed_sequence => {
                whole
            }
            (Some(_), None) => whole,
            _ => parsed,
        }
    }

    fn sequence(&self, action: &str) -> Option<u64> {
        self.actions.get(action).map(|defined| defined.sequence)
    }

    fn evaluate<H>(&mut self, host: &H, requested: SignalName<'_>) -> Result<SignalReading, H::Error>
    where
        H: InputHost + ?Sized,
    {
        if !self.is_defined(requested.action) {
            self.report_stub(requested);
            self.stub(requested.action);
        }
        let Some(table) = self
            .actions
            .get(requested.action)
            .map(|defined| &defined.bindings)
        else {
            return Ok(inactive(requested.predicate));
        };

        let predicate = requested.predicate;
        let reading = match requested.signal {
            Signal::Down => read_state(host, KeyState::Down, table, predicate)?,
            Signal::Held => read_state(host, KeyState::Held, table, predicate)?,
            Signal::Up => read_state(host, KeyState::Up, table, predicate)?,
            Signal::Active if predicate => SignalReading::Flag(
                any(host, KeyState::Down, table)? || any(host, KeyState::Held, table)?,
            ),
            Signal::Active => {
                let value = match find(host, KeyState::Down, table)? {
                    Some(value) => Some(value),
                    None => find(host, KeyState::Held, table)?,
                };
                SignalReading::Value(value)
            }
            Signal::Latch => {
                let down = find(host, KeyState::Down, table)?;
                let latch = self
                    .latches
                    .entry(requested.action.to_string())
                    .or_default();
                let toggled = latch.update(down.is_some(), host.tick_count());
                if predicate {
                    SignalReading::Flag(latch.state())
                } else {
                    SignalReading::Value(down.filter(|_| toggled))
                }
            }
        };
        Ok(reading)
    }

    fn report_stub(&self, requested: SignalName<'_>) {
        if self.production {
            return;
        }
        info!(
            controls = %self,
            action = requested.action,
            called = %requested,
            hint = %format!(
                "controls.define(\"{}\", bindings! {{ Keyboard => \"e\", ControllerOne => \"b\" }})",
                requested.action
            ),
            "stub_defined"
        );
    }
}

fn read_state<H>(
    host: &H,
    state: KeyState,
    table: &BindingTable,
    predicate: bool,
) -> Result<SignalReading, H::Error>
where
    H: InputHost + ?Sized,
{
    if predicate {
        Ok(SignalReading::Flag(any(host, state, table)?))
    } else {
        Ok(SignalReading::Value(find(host, state, table)?))
    }
}

fn inactive(predicate: bool) -> SignalReading {
    if predicate {
        SignalReading::Flag(false)
    } else {
        SignalReading::Value(None)
    }
}

impl fmt::Display for Controls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}
