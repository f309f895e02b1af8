//! Timer handles and a simple allocator.

use serde::{Deserialize, Serialize};

/// Opaque handle for one scheduled callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Monotonic allocator for [`TimerHandle`]s. Handles are never reused within
/// the lifetime of one allocator.
#[derive(Default, Debug)]
pub struct TimerAllocator {
    next: u32,
}

impl TimerAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> TimerHandle {
        let id = TimerHandle(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
