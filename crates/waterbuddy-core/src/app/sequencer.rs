//! DisplaySequencer - ディスプレイへの排他的なアクセス
//!
//! # 設計
//! - two lanes: messages/flashes and animations, each with one runner
//! - submitting reads both lane tails and installs the new task as its own
//!   lane's tail in one short critical section, then returns
//! - the runner waits for the captured tails before touching the device, so
//!   device calls never overlap and follow submission order
//! - pause/resume/stop only flip flags on the active animation
//!
//! # Liveness（タイムアウトなし）
//! Waiting has no timeout. If a device call hangs, every later task in both
//! lanes waits behind it.

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::active::ActiveAnimation;
use super::lane::{Barrier, LaneContext, LaneJob, LaneTails, lane_loop};
use super::status::{SequencerCounts, TaskCounters};
use crate::domain::{
    ChimeCode, DisplayTask, FrameBudget, Lane, Rgb, SequencerError, TaskId, TaskIdAllocator,
};
use crate::ports::{AnimationFactory, DisplayDevice};

/// Handle to a submitted task.
///
/// Dropping it does not cancel anything; the task still runs.
#[derive(Debug, Clone)]
pub struct TaskTicket {
    id: TaskId,
    lane: Lane,
    done: Barrier,
}

impl TaskTicket {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn is_done(&self) -> bool {
        self.done.is_passed()
    }

    /// Wait until the task is Done and return how its device work went.
    pub async fn wait(mut self) -> Result<(), SequencerError> {
        match self.done.passed().await {
            Some(outcome) => outcome,
            None => Err(SequencerError::Aborted(format!(
                "{} dropped before it finished",
                self.id
            ))),
        }
    }
}

struct LaneSenders {
    message: mpsc::UnboundedSender<LaneJob>,
    animation: mpsc::UnboundedSender<LaneJob>,
}

impl LaneSenders {
    fn get(&self, lane: Lane) -> &mpsc::UnboundedSender<LaneJob> {
        match lane {
            Lane::Message => &self.message,
            Lane::Animation => &self.animation,
        }
    }
}

/// Submission-side state. Guarded by a single lock so that reading both
/// tails, allocating the id and enqueueing happen as one step.
struct Intake {
    tails: LaneTails,
    ids: TaskIdAllocator,
    /// `None` once shut down.
    lanes: Option<LaneSenders>,
}

pub struct DisplaySequencer {
    intake: Mutex<Intake>,
    ctx: Arc<LaneContext>,
    runners: Mutex<Vec<JoinHandle<()>>>,
}

impl DisplaySequencer {
    /// Spawn both lane runners on `runtime`.
    pub(crate) fn start(
        runtime: &Handle,
        device: Arc<dyn DisplayDevice>,
        animations: Arc<dyn AnimationFactory>,
    ) -> Self {
        let ctx = Arc::new(LaneContext {
            device,
            animations,
            active: ActiveAnimation::default(),
            counters: TaskCounters::default(),
        });

        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (animation_tx, animation_rx) = mpsc::unbounded_channel();
        let runners = vec![
            runtime.spawn(lane_loop(Lane::Message, message_rx, Arc::clone(&ctx))),
            runtime.spawn(lane_loop(Lane::Animation, animation_rx, Arc::clone(&ctx))),
        ];
        info!("display sequencer started");

        Self {
            intake: Mutex::new(Intake {
                tails: LaneTails::default(),
                ids: TaskIdAllocator::new(),
                lanes: Some(LaneSenders {
                    message: message_tx,
                    animation: animation_tx,
                }),
            }),
            ctx,
            runners: Mutex::new(runners),
        }
    }

    /// Show `message` without a chime.
    pub fn display_message(&self, message: impl Into<String>) -> Result<TaskTicket, SequencerError> {
        self.display_message_with_chime(message, ChimeCode::none())
    }

    /// Play `chime`, then show `message`.
    pub fn display_message_with_chime(
        &self,
        message: impl Into<String>,
        chime: ChimeCode,
    ) -> Result<TaskTicket, SequencerError> {
        self.submit(DisplayTask::ShowMessage {
            text: message.into(),
            chime,
        })
    }

    pub fn flash(&self, color: Rgb) -> Result<TaskTicket, SequencerError> {
        self.submit(DisplayTask::Flash { color })
    }

    pub fn start_animation(
        &self,
        name: impl Into<String>,
        budget: FrameBudget,
        interruptible: bool,
    ) -> Result<TaskTicket, SequencerError> {
        self.submit(DisplayTask::StartAnimation {
            name: name.into(),
            budget,
            interruptible,
        })
    }

    /// Append `task` to its lane and return without waiting for it.
    ///
    /// The only error is [`SequencerError::ShutDown`]; device failures show
    /// up in [`TaskTicket::wait`].
    pub fn submit(&self, task: DisplayTask) -> Result<TaskTicket, SequencerError> {
        let lane = task.lane();
        let mut intake = self.intake.lock().unwrap_or_else(PoisonError::into_inner);
        let Intake { tails, ids, lanes } = &mut *intake;
        let senders = lanes.as_ref().ok_or(SequencerError::ShutDown)?;

        let id = ids.allocate();
        let predecessors = tails.predecessors(lane);
        let (done, barrier) = Barrier::pair();
        debug!(
            "[{lane}] {id} queued {} behind {} task(s)",
            task.kind(),
            predecessors.len()
        );

        self.ctx.counters.enqueued();
        let job = LaneJob {
            id,
            task,
            predecessors,
            done,
        };
        if senders.get(lane).send(job).is_err() {
            // runner is gone; the dropped job released its barrier
            self.ctx.counters.rejected();
            return Err(SequencerError::ShutDown);
        }
        tails.replace(lane, barrier.clone());

        Ok(TaskTicket {
            id,
            lane,
            done: barrier,
        })
    }

    /// Pause the active animation, if any.
    pub fn pause_animation(&self) {
        self.ctx.active.with(|control| control.pause());
    }

    /// Resume the active animation, if any.
    pub fn resume_animation(&self) {
        self.ctx.active.with(|control| control.resume());
    }

    /// Raise the stop flag on the active animation and forget it.
    ///
    /// This returns before the animation has necessarily noticed the flag.
    /// Only interruptible animations honor it, at their next frame.
    pub fn stop_animation(&self) {
        if let Some(control) = self.ctx.active.take() {
            control.stop();
            debug!("active animation stopped");
        }
    }

    pub fn has_active_animation(&self) -> bool {
        self.ctx.active.is_set()
    }

    pub fn counts(&self) -> SequencerCounts {
        self.ctx.counters.snapshot()
    }

    /// Wait until everything submitted before this call is Done.
    pub async fn wait_idle(&self) {
        let tails = self
            .intake
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .tails
            .snapshot();
        for mut tail in tails {
            tail.passed().await;
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.intake
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lanes
            .is_none()
    }

    /// Stop accepting work, let both lanes drain, and wait for the runners.
    ///
    /// Queued tasks still run. An unbounded animation that is not stopped
    /// keeps this from returning.
    pub async fn shutdown(&self) {
        let senders = self
            .intake
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lanes
            .take();
        drop(senders);

        let runners = std::mem::take(
            &mut *self
                .runners
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for runner in runners {
            if let Err(e) = runner.await {
                error!("lane runner failed: {e}");
            }
        }
        info!("display sequencer shut down");
    }
}
