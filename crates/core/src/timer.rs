//! Gravity timer - a cancellable periodic scheduler driven by elapsed time.
//!
//! The caller feeds wall-clock (or simulated) milliseconds with
//! [`GravityTimer::accumulate`] and drains due ticks with
//! [`GravityTimer::take_due`]. Each interval latches its period when it
//! starts, so [`GravityTimer::set_period`] only affects intervals that have
//! not started yet.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityTimer {
    armed: bool,
    period_ms: u32,
    elapsed_ms: u32,
    /// Period latched for the interval in progress
    deadline_ms: Option<u32>,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period_ms`, discarding any accumulated time.
    pub fn arm(&mut self, period_ms: u32) {
        self.armed = true;
        self.period_ms = period_ms.max(1);
        self.elapsed_ms = 0;
        self.deadline_ms = Some(self.period_ms);
    }

    /// Stop ticking. A disarmed timer never fires and ignores elapsed time.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
        self.deadline_ms = None;
    }

    /// Change the period from the next interval on.
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms.max(1);
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Time left until the next tick, if armed
    pub fn remaining_ms(&self) -> Option<u32> {
        if !self.armed {
            return None;
        }
        let deadline = self.deadline_ms.unwrap_or(self.period_ms);
        Some(deadline.saturating_sub(self.elapsed_ms))
    }

    pub fn accumulate(&mut self, elapsed_ms: u32) {
        if self.armed {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Consume one due tick, if any.
    pub fn take_due(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        let deadline = *self.deadline_ms.get_or_insert(self.period_ms);
        if self.elapsed_ms < deadline {
            return false;
        }
        self.elapsed_ms -= deadline;
        // The next interval latches whatever period is current when it is polled.
        self.deadline_ms = None;
        true
    }
}
