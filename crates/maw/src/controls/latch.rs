#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatchMemory {
    state: bool,
    last_updated: Option<u64>,
}

impl LatchMemory {
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn last_updated(&self) -> Option<u64> {
        self.last_updated
    }

    /// Flips the latch when `is_down` and it has not flipped during `tick` yet.
    ///
    /// Keyed on frame equality only: if the tick never advances, neither does the latch.
    pub(crate) fn update(&mut self, is_down: bool, tick: u64) -> bool {
        if !is_down || self.last_updated == Some(tick) {
            return false;
        }
        self.state = !self.state;
        self.last_updated = Some(tick);
        true
    }
}
