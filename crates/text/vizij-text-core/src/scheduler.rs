//! Deterministic virtual-clock scheduler.
//!
//! Nothing fires on its own: the driver pops the next due timer, advancing
//! the virtual clock, and hands the handle to the owning engine.
//!
//! ```
//! use vizij_text_core::{RecordingSink, Typewriter, TypewriterConfig, VirtualScheduler};
//!
//! let mut sched = VirtualScheduler::new();
//! let mut sink = RecordingSink::new();
//! let mut tw = Typewriter::start(vec!["hi".into()], TypewriterConfig::default(), &mut sched)
//!     .unwrap();
//! while let Some(h) = sched.pop_until(500.0) {
//!     tw.on_timer(h, &mut sink, &mut sched);
//! }
//! assert_eq!(sink.text, "hi");
//! ```

use crate::host::Scheduler;
use crate::ids::{TimerAllocator, TimerHandle};

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: f64,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: f64,
    ids: TimerAllocator,
    seq: u64,
    pending: Vec<PendingTimer>,
    scheduled_total: usize,
    cancelled_total: usize,
    fired_total: usize,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Due time of a pending timer.
    pub fn due_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.due_ms)
    }

    pub fn scheduled_total(&self) -> usize {
        self.scheduled_total
    }

    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }

    pub fn fired_total(&self) -> usize {
        self.fired_total
    }

    fn next_index(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)
    }

    /// Remove the earliest pending timer, moving the clock to its due time.
    pub fn pop_due(&mut self) -> Option<TimerHandle> {
        let idx = self.next_index()?;
        let timer = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(timer.due_ms);
        self.fired_total += 1;
        Some(timer.handle)
    }

    /// Like [`pop_due`](Self::pop_due) but only for timers due at or before
    /// `deadline_ms`. When none remain the clock settles on the deadline.
    pub fn pop_until(&mut self, deadline_ms: f64) -> Option<TimerHandle> {
        match self.next_index() {
            Some(idx) if self.pending[idx].due_ms <= deadline_ms => self.pop_due(),
            _ => {
                self.now_ms = self.now_ms.max(deadline_ms);
                None
            }
        }
    }

    /// Dequeue every timer due within the next `ms`, in firing order, and
    /// leave the clock at `now + ms`. The handles are returned rather than
    /// dispatched, so timers scheduled by the engines in response land
    /// after the new clock and are not included.
    pub fn advance_by(&mut self, ms: f64) -> Vec<TimerHandle> {
        let deadline = self.now_ms + ms.max(0.0);
        let mut fired = Vec::new();
        while let Some(h) = self.pop_until(deadline) {
            fired.push(h);
        }
        fired
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = self.ids.alloc();
        let seq = self.seq;
        self.seq += 1;
        self.pending.push(PendingTimer {
            handle,
            due_ms: self.now_ms + delay_ms.max(0.0),
            seq,
        });
        self.scheduled_total += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(idx) = self.pending.iter().position(|p| p.handle == handle) {
            self.pending.swap_remove(idx);
            self.cancelled_total += 1;
        }
    }
}
