//! State - lane and task lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two lanes of deferred display work.
///
/// Messages and flashes share [`Lane::Message`]; animations run on
/// [`Lane::Animation`]. Tasks are ordered within a lane by submission and
/// across lanes by the barrier each task captures at enqueue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Message,
    Animation,
}

impl Lane {
    /// The opposite lane. A new task waits for its tail as well as its own.
    pub fn other(self) -> Lane {
        match self {
            Lane::Message => Lane::Animation,
            Lane::Animation => Lane::Message,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Message => "message",
            Lane::Animation => "animation",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TaskState is where a task sits in its lane.
///
/// State transitions (strictly linear):
/// - Queued -> Waiting -> Running -> Done
///
/// `Waiting` means the lane runner picked the task up and is blocked on its
/// predecessors. There is no timeout on that wait: a predecessor that never
/// finishes stalls both lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    Queued,
    Waiting,
    Running,
    Done,
}
