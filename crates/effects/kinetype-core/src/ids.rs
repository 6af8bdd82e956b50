//! Identifiers and a simple allocator for effect handles.

use serde::{Deserialize, Serialize};

/// Opaque handle for one in-flight effect. Owned by the caller that started
/// the effect; cancelling it stops all future writes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandleId(pub u32);

/// Monotonic allocator for HandleId. IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_handle: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_handle(&mut self) -> HandleId {
        let id = HandleId(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
