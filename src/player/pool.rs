use serde::{Deserialize, Serialize};

/// A bounded resource such as health or mana.
///
/// `current` never exceeds `max`; every write goes through a clamping method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    current: u32,
    max: u32,
}

impl Pool {
    /// A full pool.
    pub fn full(max: u32) -> Self {
        Pool { current: max, max }
    }

    pub fn new(current: u32, max: u32) -> Self {
        Pool {
            current: current.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Adds up to `amount`, returning what was actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.set(self.current.saturating_add(amount));
        self.current - before
    }

    /// Removes up to `amount`, returning what was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Raises the maximum; the current value is left where it was.
    pub fn grow(&mut self, delta: u32) {
        self.max = self.max.saturating_add(delta);
    }

    /// Sets the current value to `floor(max * percent / 100)`.
    pub fn set_percent(&mut self, percent: u32) {
        let value = (u64::from(self.max) * u64::from(percent) / 100) as u32;
        self.set(value);
    }

    /// Re-establishes the bound after deserializing untrusted data.
    pub fn clamp(&mut self) {
        self.current = self.current.min(self.max);
    }
}
