//! Single-threaded timer queue.
//!
//! Every delayed effect in the simulation - decay ticks, toast expiries,
//! pending break commits - is an entry in one min-heap ordered by due time,
//! then insertion order. The engine drains due entries on `advance`, so all
//! timing is deterministic. A dismissed toast's expiry entry stays in the
//! heap and becomes a no-op when it fires.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// A scheduled callback in simulation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Periodic wellness decay and toast emission.
    DecayTick,
    /// Auto-expiry for the toast with this id.
    ToastExpiry(String),
    /// Commit a pending break once the connect delay elapses, clearing the
    /// named toast if one was supplied.
    BreakCommit { clears: Option<String> },
}

/// One pending timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEntry {
    pub due: f64,
    /// Insertion sequence, used to break ties at equal due times.
    seq: u64,
    pub kind: TimerKind,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due.total_cmp(&other.due) == Ordering::Equal && self.seq == other.seq
    }
}

impl Eq for TimerEntry {}

impl Ord for TimerEntry {
    // Reversed so the max-heap pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of pending timers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    heap: BinaryHeap<TimerEntry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer due at the given sim time.
    pub fn schedule(&mut self, due: f64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(TimerEntry { due, seq, kind });
    }

    /// Pop the earliest timer if it is due at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<TimerEntry> {
        if self.heap.peek().is_some_and(|entry| entry.due <= now) {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
