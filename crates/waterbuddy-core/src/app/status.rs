//! Status - 状態ごとのタスク数
//!
//! Task counts per lifecycle state, kept in atomics so reading them never
//! takes the submission lock.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::TaskState;

/// Snapshot of how many tasks are in each state.
///
/// `done` counts every finished task; `failed` is the subset whose device
/// call failed. Fields are read one by one, so a snapshot taken while lanes
/// are busy may be off by a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerCounts {
    pub queued: usize,
    pub waiting: usize,
    pub running: usize,
    pub done: usize,
    pub failed: usize,
}

impl SequencerCounts {
    /// Tasks accepted but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.queued + self.waiting + self.running
    }
}

#[derive(Debug, Default)]
pub(crate) struct TaskCounters {
    queued: AtomicUsize,
    waiting: AtomicUsize,
    running: AtomicUsize,
    done: AtomicUsize,
    failed: AtomicUsize,
}

impl TaskCounters {
    fn slot(&self, state: TaskState) -> &AtomicUsize {
        match state {
            TaskState::Queued => &self.queued,
            TaskState::Waiting => &self.waiting,
            TaskState::Running => &self.running,
            TaskState::Done => &self.done,
        }
    }

    pub(crate) fn enqueued(&self) {
        self.queued.fetch_add(1, Ordering::SeqCst);
    }

    /// Undo [`TaskCounters::enqueued`] for a task the lane never accepted.
    pub(crate) fn rejected(&self) {
        self.queued.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn transition(&self, from: TaskState, to: TaskState) {
        self.slot(from).fetch_sub(1, Ordering::SeqCst);
        self.slot(to).fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn finished(&self, ok: bool) {
        self.transition(TaskState::Running, TaskState::Done);
        if !ok {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) fn snapshot(&self) -> SequencerCounts {
        SequencerCounts {
            queued: self.queued.load(Ordering::SeqCst),
            waiting: self.waiting.load(Ordering::SeqCst),
            running: self.running.load(Ordering::SeqCst),
            done: self.done.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}
