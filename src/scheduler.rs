//! Single-slot deferred task on a logical clock
//!
//! The wizard's auto-advance is the only timed behavior in the engine. Rather
//! than a wall-clock timer, the owner holds a [`Scheduler`] and moves its
//! clock forward explicitly; a due task is handed back to the caller to act
//! on. Scheduling again replaces the pending task, and dropping the
//! scheduler abandons it.

use std::time::Duration;

/// A payload waiting for its due time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredTask<T> {
    pub due_at: Duration,
    pub payload: T,
}

/// Logical clock with at most one pending task.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    pending: Option<DeferredTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: None,
        }
    }

    /// Current logical time
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule `payload` to fire `delay` from now, replacing any pending
    /// task. Returns the replaced task.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> Option<DeferredTask<T>> {
        self.pending.replace(DeferredTask {
            due_at: self.now.saturating_add(delay),
            payload,
        })
    }

    /// Drop the pending task without firing it.
    pub fn cancel(&mut self) -> Option<DeferredTask<T>> {
        self.pending.take()
    }

    /// Move the clock forward by `elapsed`, returning the payload if its due
    /// time has been reached.
    pub fn advance(&mut self, elapsed: Duration) -> Option<T> {
        self.now = self.now.saturating_add(elapsed);
        if self.pending.as_ref().is_some_and(|task| task.due_at <= self.now) {
            self.pending.take().map(|task| task.payload)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_only_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(MS * 400, "advance");
        assert_eq!(scheduler.advance(MS * 399), None);
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.advance(MS), Some("advance"));
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.advance(MS * 1000), None);
    }

    #[test]
    fn test_reschedule_replaces_and_restarts() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(MS * 400, 1);
        scheduler.advance(MS * 300);
        let replaced = scheduler.schedule(MS * 400, 2);
        assert_eq!(replaced.map(|t| t.payload), Some(1));
        assert_eq!(scheduler.advance(MS * 300), None);
        assert_eq!(scheduler.advance(MS * 100), Some(2));
    }

    #[test]
    fn test_cancel_abandons_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(MS * 10, ());
        assert!(scheduler.cancel().is_some());
        assert_eq!(scheduler.advance(MS * 10), None);
    }

    #[test]
    fn test_clock_saturates_instead_of_overflowing() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(Duration::MAX);
        assert_eq!(scheduler.advance(Duration::MAX), None);
        assert_eq!(scheduler.now(), Duration::MAX);

        scheduler.schedule(MS * 400, "late");
        assert_eq!(scheduler.pending.as_ref().map(|t| t.due_at), Some(Duration::MAX));
        assert_eq!(scheduler.advance(MS), Some("late"));
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::ZERO, 'x');
        assert_eq!(scheduler.advance(Duration::ZERO), Some('x'));
        assert_eq!(scheduler.now(), Duration::ZERO);
    }
}
