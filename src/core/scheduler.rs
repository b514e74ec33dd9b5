//! Logical-clock scheduler of named, cancellable timers.
//!
//! Engines never block and never call into wall-clock time. Every delay —
//! spawn cadence, playback step, feedback pause, settle delay — is a timer
//! owned by the engine's scheduler, and the host drives the clock forward
//! with `advance(elapsed_ms)`.
//!
//! Timer keys are opaque to the scheduler; each game defines its own key
//! enum, the same way games define their own action set.
//!
//! ## Ordering
//!
//! `advance` returns fired keys in deadline order; ties break by creation
//! order. A repeating timer whose period elapsed several times within one
//! `advance` fires once per elapsed period.
//!
//! ## Cancellation
//!
//! Timers are cancelled by id, by key, or all at once with `clear`. The
//! owning engine clears the scheduler when its round ends so no stale fire
//! can reach a finished round.

use smallvec::SmallVec;

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<K> {
    id: TimerId,
    key: K,
    deadline_ms: u64,
    period_ms: Option<u64>,
}

/// Owns every timer an engine schedules.
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry<K>>,
}

impl<K: Copy + Eq> Scheduler<K> {
    /// Create an empty scheduler at logical time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current logical time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of outstanding timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    fn alloc_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Schedule a one-shot timer firing `delay_ms` from now.
    pub fn schedule_once(&mut self, key: K, delay_ms: u64) -> TimerId {
        let id = self.alloc_id();
        self.entries.push(Entry {
            id,
            key,
            deadline_ms: self.now_ms + delay_ms,
            period_ms: None,
        });
        id
    }

    /// Schedule a repeating timer, first firing one period from now.
    ///
    /// `period_ms` must be non-zero; a zero period would fire forever
    /// within a single `advance`.
    pub fn schedule_repeating(&mut self, key: K, period_ms: u64) -> TimerId {
        assert!(period_ms > 0, "repeating timer period must be non-zero");
        let id = self.alloc_id();
        self.entries.push(Entry {
            id,
            key,
            deadline_ms: self.now_ms + period_ms,
            period_ms: Some(period_ms),
        });
        id
    }

    /// Cancel a timer by id. Returns true if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every timer with the given key. Returns how many were pending.
    pub fn cancel_key(&mut self, key: K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        before - self.entries.len()
    }

    /// Cancel every outstanding timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether any timer with the given key is pending.
    #[must_use]
    pub fn is_scheduled(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Advance the clock by `elapsed_ms`, returning fired keys in order.
    ///
    /// Repeating timers re-arm themselves; one-shot timers are consumed.
    pub fn advance(&mut self, elapsed_ms: u64) -> SmallVec<[K; 4]> {
        let target = self.now_ms + elapsed_ms;
        let mut fired = SmallVec::new();

        loop {
            let due = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.deadline_ms <= target)
                .min_by_key(|(_, e)| (e.deadline_ms, e.id.0))
                .map(|(i, _)| i);

            let Some(i) = due else { break };

            fired.push(self.entries[i].key);
            match self.entries[i].period_ms {
                Some(period) => self.entries[i].deadline_ms += period,
                None => {
                    self.entries.swap_remove(i);
                }
            }
        }

        self.now_ms = target;
        fired
    }
}

impl<K: Copy + Eq> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
