//! Mock timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};

/// Mock timer implementation
///
/// Advances simulated time instead of sleeping, so retry-loop tests can
/// assert exactly how long an operation would have blocked.
#[derive(Debug, Default)]
pub struct MockTimer {
    now_us: u64,
}

impl MockTimer {
    /// Create a new mock timer at t = 0
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us = self.now_us.wrapping_add(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}
