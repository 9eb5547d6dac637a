//! Deferred work
//!
//! Timers carry [`TimerTask`] values rather than closures, so the same
//! notification code runs against `setTimeout` in the browser and against a
//! [`SimulatedClock`] in tests.

use std::collections::BTreeMap;

use crate::page::NodeId;

/// Work scheduled for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Start fading a notification or flash message out
    FadeOut(NodeId),
    /// Remove a faded node from the page
    Detach(NodeId),
}

/// Schedules [`TimerTask`]s
pub trait Timers {
    /// Runs `task` once, `delay_ms` from now
    fn schedule(&mut self, delay_ms: u32, task: TimerTask);
}

/// Fake clock for deterministic tests
///
/// Time only moves when the owner fast-forwards it. Tasks due at the same
/// instant run in the order they were scheduled.
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    now_ms: u64,
    seq: u64,
    pending: BTreeMap<(u64, u64), TimerTask>,
}

impl SimulatedClock {
    /// Creates a clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks not yet run
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending task
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Takes the earliest task due at or before `until_ms`
    ///
    /// The clock moves to the task's due time, so tasks it schedules are
    /// timed from the moment it ran.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerTask> {
        let (&key, _) = self.pending.iter().next()?;
        if key.0 > until_ms {
            return None;
        }
        self.now_ms = self.now_ms.max(key.0);
        self.pending.remove(&key)
    }

    /// Moves the clock forward without running anything
    pub fn set_now_ms(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl Timers for SimulatedClock {
    fn schedule(&mut self, delay_ms: u32, task: TimerTask) {
        let due = self.now_ms + u64::from(delay_ms);
        self.pending.insert((due, self.seq), task);
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_idle() {
        let clock = SimulatedClock::new();
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.pending_len(), 0);
        assert_eq!(clock.next_due_ms(), None);
    }

    #[test]
    fn test_pop_due_respects_deadline() {
        let mut clock = SimulatedClock::new();
        clock.schedule(5000, TimerTask::FadeOut(NodeId(1)));
        assert_eq!(clock.pop_due(4999), None);
        assert_eq!(clock.pop_due(5000), Some(TimerTask::FadeOut(NodeId(1))));
        assert_eq!(clock.now_ms(), 5000);
    }

    #[test]
    fn test_same_instant_fifo() {
        let mut clock = SimulatedClock::new();
        clock.schedule(10, TimerTask::FadeOut(NodeId(1)));
        clock.schedule(10, TimerTask::FadeOut(NodeId(2)));
        assert_eq!(clock.pop_due(10), Some(TimerTask::FadeOut(NodeId(1))));
        assert_eq!(clock.pop_due(10), Some(TimerTask::FadeOut(NodeId(2))));
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut clock = SimulatedClock::new();
        clock.schedule(100, TimerTask::FadeOut(NodeId(1)));
        clock.pop_due(100);
        clock.schedule(50, TimerTask::Detach(NodeId(1)));
        assert_eq!(clock.next_due_ms(), Some(150));
    }

    #[test]
    fn test_set_now_never_rewinds() {
        let mut clock = SimulatedClock::new();
        clock.set_now_ms(200);
        clock.set_now_ms(100);
        assert_eq!(clock.now_ms(), 200);
    }
}
