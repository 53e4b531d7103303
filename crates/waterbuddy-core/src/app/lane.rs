//! Lanes - 表示タスクの順序付きチェーン
//!
//! # フロー（lane ごとの runner）
//! 1. receive the next job from the lane queue (Queued -> Waiting)
//! 2. wait for every predecessor barrier captured at submission
//! 3. run the device work on the blocking pool (Waiting -> Running)
//! 4. publish the outcome, which opens this task's barrier (Running -> Done)
//!
//! One runner per lane processes its queue strictly in order, so the
//! own-lane predecessor is always finished by the time a job is received.
//! The cross-lane barrier is what keeps the two lanes off the device at
//! the same time.

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, watch};

use super::active::ActiveAnimation;
use super::status::TaskCounters;
use crate::domain::{DeviceError, DisplayTask, Lane, SequencerError, TaskId, TaskState};
use crate::ports::{AnimationFactory, DisplayDevice};

pub(crate) type Outcome = Result<(), SequencerError>;

/// Write side of a task's barrier. Dropping it without finishing also
/// releases waiters.
#[derive(Debug)]
pub(crate) struct Completion {
    tx: watch::Sender<Option<Outcome>>,
}

impl Completion {
    pub(crate) fn finish(self, outcome: Outcome) {
        self.tx.send_replace(Some(outcome));
    }
}

/// Read side of a task's barrier: resolves once the task is Done.
#[derive(Debug, Clone)]
pub(crate) struct Barrier {
    rx: watch::Receiver<Option<Outcome>>,
}

impl Barrier {
    pub(crate) fn pair() -> (Completion, Barrier) {
        let (tx, rx) = watch::channel(None);
        (Completion { tx }, Barrier { rx })
    }

    /// Wait until the task finished. `None` means it was dropped unfinished.
    ///
    /// There is no timeout: a task that never finishes blocks this forever.
    pub(crate) async fn passed(&mut self) -> Option<Outcome> {
        match self.rx.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(_) => None,
        }
    }

    pub(crate) fn is_passed(&self) -> bool {
        self.rx.borrow().is_some() || self.rx.has_changed().is_err()
    }
}

/// The most recently submitted task of each lane.
#[derive(Debug, Default)]
pub(crate) struct LaneTails {
    message: Option<Barrier>,
    animation: Option<Barrier>,
}

impl LaneTails {
    fn slot(&mut self, lane: Lane) -> &mut Option<Barrier> {
        match lane {
            Lane::Message => &mut self.message,
            Lane::Animation => &mut self.animation,
        }
    }

    fn tail(&self, lane: Lane) -> Option<&Barrier> {
        match lane {
            Lane::Message => self.message.as_ref(),
            Lane::Animation => self.animation.as_ref(),
        }
    }

    /// What a new task on `lane` must wait for: its own lane's tail, then
    /// the other lane's tail. Empty lanes are skipped.
    pub(crate) fn predecessors(&self, lane: Lane) -> Vec<Barrier> {
        self.tail(lane)
            .into_iter()
            .chain(self.tail(lane.other()))
            .cloned()
            .collect()
    }

    /// Every current tail, skipping empty lanes.
    pub(crate) fn snapshot(&self) -> Vec<Barrier> {
        self.message
            .iter()
            .chain(self.animation.iter())
            .cloned()
            .collect()
    }

    /// Install `tail` as the newest task of `lane`.
    pub(crate) fn replace(&mut self, lane: Lane, tail: Barrier) -> Option<Barrier> {
        self.slot(lane).replace(tail)
    }
}

/// A task travelling through a lane queue.
#[derive(Debug)]
pub(crate) struct LaneJob {
    pub(crate) id: TaskId,
    pub(crate) task: DisplayTask,
    pub(crate) predecessors: Vec<Barrier>,
    pub(crate) done: Completion,
}

/// Everything a lane runner touches besides its own queue.
pub(crate) struct LaneContext {
    pub(crate) device: Arc<dyn DisplayDevice>,
    pub(crate) animations: Arc<dyn AnimationFactory>,
    pub(crate) active: ActiveAnimation,
    pub(crate) counters: TaskCounters,
}

pub(crate) async fn lane_loop(
    lane: Lane,
    mut jobs: mpsc::UnboundedReceiver<LaneJob>,
    ctx: Arc<LaneContext>,
) {
    info!("{lane} lane started");

    while let Some(job) = jobs.recv().await {
        let LaneJob {
            id,
            task,
            predecessors,
            done,
        } = job;

        ctx.counters.transition(TaskState::Queued, TaskState::Waiting);
        for mut barrier in predecessors {
            barrier.passed().await;
        }

        ctx.counters.transition(TaskState::Waiting, TaskState::Running);
        debug!("[{lane}] {id} running {}", task.kind());

        let outcome = execute(&ctx, id, task).await;
        match &outcome {
            Ok(()) => debug!("[{lane}] {id} done"),
            Err(e) => warn!("[{lane}] {id} failed: {e}"),
        }

        ctx.counters.finished(outcome.is_ok());
        done.finish(outcome);
    }

    info!("{lane} lane drained");
}

/// Run one task's device work off the async workers; device calls block.
async fn execute(ctx: &Arc<LaneContext>, id: TaskId, task: DisplayTask) -> Outcome {
    let ctx = Arc::clone(ctx);
    match tokio::task::spawn_blocking(move || run_on_device(&ctx, task)).await {
        Ok(result) => result.map_err(SequencerError::from),
        Err(join_err) => {
            error!("{id}: device task aborted: {join_err}");
            Err(SequencerError::Aborted(join_err.to_string()))
        }
    }
}

fn run_on_device(ctx: &LaneContext, task: DisplayTask) -> Result<(), DeviceError> {
    match task {
        DisplayTask::ShowMessage { text, chime } => {
            ctx.device.play_chime(&chime)?;
            ctx.device.show_message(&text)
        }
        DisplayTask::Flash { color } => ctx.device.flash(color),
        DisplayTask::StartAnimation {
            name,
            budget,
            interruptible,
        } => {
            let mut animation = ctx.animations.get_animation(&name, budget, interruptible)?;
            ctx.active.replace(animation.control());
            animation.show()
        }
    }
}
