#![forbid(unsafe_code)]

//! Deterministic timer queue.
//!
//! Timers are armed with a delay relative to the queue's current time and
//! fire when the host advances the clock past their deadline. The queue
//! never fires on its own; [`TimerQueue::advance`] is the only source of
//! progress, which keeps widget transitions reproducible under test.
//!
//! # Invariants
//!
//! - Ids are unique for the lifetime of the queue and never reused.
//! - `advance` returns due timers in `(deadline, id)` order, so two timers
//!   armed at the same instant fire in arming order.
//! - A cleared timer never fires, even if its deadline has already passed.

use std::time::Duration;

/// Handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    id: TimerId,
    deadline: Duration,
}

/// Monotonic queue of one-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[inline]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Arm a one-shot timer that fires `after` from now.
    pub fn set(&mut self, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push(TimerEntry {
            id,
            deadline: self.now + after,
        });
        id
    }

    /// Cancel a pending timer. Returns whether it was still pending.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Whether the timer is still armed.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Advance the clock and collect every timer whose deadline has passed,
    /// ordered by `(deadline, id)`.
    pub fn advance(&mut self, delta: Duration) -> Vec<TimerId> {
        self.now += delta;
        let now = self.now;
        let mut due: Vec<TimerEntry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.deadline <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.deadline, entry.id.0));
        due.into_iter().map(|entry| entry.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fires_at_deadline_not_before() {
        let mut queue = TimerQueue::new();
        let id = queue.set(Duration::from_millis(250));

        assert!(queue.advance(Duration::from_millis(249)).is_empty());
        assert!(queue.is_pending(id));
        assert_eq!(queue.advance(Duration::from_millis(1)), vec![id]);
        assert!(!queue.is_pending(id));
    }

    #[test]
    fn cleared_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.set(Duration::from_millis(10));
        assert!(queue.clear(id));
        assert!(queue.advance(Duration::from_millis(100)).is_empty());
        assert!(!queue.clear(id));
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut queue = TimerQueue::new();
        let id = queue.set(Duration::ZERO);
        assert_eq!(queue.advance(Duration::ZERO), vec![id]);
    }

    #[test]
    fn same_deadline_fires_in_arming_order() {
        let mut queue = TimerQueue::new();
        let a = queue.set(Duration::from_millis(5));
        let b = queue.set(Duration::from_millis(5));
        assert_eq!(queue.advance(Duration::from_millis(5)), vec![a, b]);
    }

    proptest! {
        /// Advancing in arbitrary chunks fires the same timers as one jump.
        #[test]
        fn advance_is_chunking_invariant(
            delays in prop::collection::vec(0u64..400, 1..12),
            chunks in prop::collection::vec(1u64..150, 1..12),
        ) {
            let mut chunked = TimerQueue::new();
            let mut jump = TimerQueue::new();
            for &d in &delays {
                chunked.set(Duration::from_millis(d));
                jump.set(Duration::from_millis(d));
            }

            let total: u64 = chunks.iter().sum();
            let mut fired = Vec::new();
            for &c in &chunks {
                fired.extend(chunked.advance(Duration::from_millis(c)));
            }
            let fired_jump = jump.advance(Duration::from_millis(total));

            prop_assert_eq!(fired, fired_jump);
        }
    }
}
