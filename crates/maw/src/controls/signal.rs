use std::fmt;

use super::InputValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Down,
    Held,
    Up,
    Active,
    Latch,
}

// Order matters: the first matching suffix wins when recovering an action name.
const SUFFIXED_SIGNALS: [(&str, Signal); 4] = [
    ("_down", Signal::Down),
    ("_held", Signal::Held),
    ("_up", Signal::Up),
    ("_latch", Signal::Latch),
];

impl Signal {
    pub const fn suffix(self) -> &'static str {
        match self {
            Signal::Down => "_down",
            Signal::Held => "_held",
            Signal::Up => "_up",
            Signal::Active => "",
            Signal::Latch => "_latch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalReading {
    Value(Option<InputValue>),
    Flag(bool),
}

impl SignalReading {
    pub fn is_truthy(self) -> bool {
        match self {
            SignalReading::Value(value) => value.is_some(),
            SignalReading::Flag(flag) => flag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalName<'a> {
    pub action: &'a str,
    pub signal: Signal,
    pub predicate: bool,
}

impl<'a> SignalName<'a> {
    /// Strips a trailing `?`, then at most one signal suffix.
    ///
    /// Purely textual: `fire_up` always parses as the `Up` signal of `fire`. Telling it
    /// apart from an action named `fire_up` is left to [`Controls::call`](crate::Controls::call).
    pub fn parse(name: &'a str) -> Self {
        let (bare, predicate) = match name.strip_suffix('?') {
            Some(bare) => (bare, true),
            None => (name, false),
        };
        for (suffix, signal) in SUFFIXED_SIGNALS {
            if let Some(action) = bare.strip_suffix(suffix) {
                if !action.is_empty() {
                    return Self {
                        action,
                        signal,
                        predicate,
                    };
                }
            }
        }
        Self {
            action: bare,
            signal: Signal::Active,
            predicate,
        }
    }

    pub(crate) fn whole(name: &'a str) -> Self {
        let (action, predicate) = match name.strip_suffix('?') {
            Some(bare) => (bare, true),
            None => (name, false),
        };
        Self {
            action,
            signal: Signal::Active,
            predicate,
        }
    }
}

impl fmt::Display for SignalName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.action, self.signal.suffix())?;
        if self.predicate {
            f.write_str("?")?;
        }
        Ok(())
    }
}

pub fn method_name_to_action(name: &str) -> &str {
    SignalName::parse(name).action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recovers_action_signal_and_form() {
        let cases = [
            ("jump", "jump", Signal::Active, false),
            ("jump?", "jump", Signal::Active, true),
            ("jump_down", "jump", Signal::Down, false),
            ("jump_held?", "jump", Signal::Held, true),
            ("move_left_up", "move_left", Signal::Up, false),
            ("pause_latch?", "pause", Signal::Latch, true),
        ];
        for (name, action, signal, predicate) in cases {
            let parsed = SignalName::parse(name);
            assert_eq!(parsed.action, action, "name={name}");
            assert_eq!(parsed.signal, signal, "name={name}");
            assert_eq!(parsed.predicate, predicate, "name={name}");
        }
    }

    #[test]
    fn parse_strips_only_one_suffix() {
        let parsed = SignalName::parse("fire_latch_up");
        assert_eq!(parsed.action, "fire_latch");
        assert_eq!(parsed.signal, Signal::Up);
    }

    #[test]
    fn action_named_like_a_signal_is_read_as_that_signal() {
        assert_eq!(method_name_to_action("fire_up"), "fire");
        assert_eq!(method_name_to_action("fire_up?"), "fire");
    }

    #[test]
    fn bare_suffix_is_kept_as_the_action_name() {
        let parsed = SignalName::parse("_up");
        assert_eq!(parsed.action, "_up");
        assert_eq!(parsed.signal, Signal::Active);
    }

    #[test]
    fn display_rebuilds_the_method_name() {
        for name in ["jump", "jump?", "jump_down", "jump_latch?"] {
            assert_eq!(SignalName::parse(name).to_string(), name);
        }
    }

    #[test]
    fn readings_report_truthiness() {
        assert!(SignalReading::Value(Some(InputValue::Analog(0.0))).is_truthy());
        assert!(!SignalReading::Value(None).is_truthy());
        assert!(SignalReading::Flag(true).is_truthy());
        assert!(!SignalReading::Flag(false).is_truthy());
    }
}
