//! Domain identifiers.
//!
//! Task ids are allocated from a per-sequencer counter inside the same
//! critical section that appends the task to its lane, so comparing two ids
//! tells you which task was submitted first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a submitted display task.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Hands out ascending task ids, starting at 1.
#[derive(Debug)]
pub struct TaskIdAllocator {
    next: u64,
}

impl TaskIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> TaskId {
        let id = TaskId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for TaskIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        assert_eq!(TaskId::new(7).to_string(), "task-7");
    }

    #[test]
    fn test_allocator_is_ascending() {
        let mut ids = TaskIdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_eq!(a.as_u64(), 1);
        assert!(a < b);
    }
}
