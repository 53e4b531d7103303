//! App - 表示シーケンサ
//!
//! # 主要コンポーネント
//! - **SequencerBuilder**: wiring and start-up checks
//! - **DisplaySequencer**: submission API, animation controls, teardown
//! - **lane**: per-lane runner, barriers and lane tails
//! - **status**: task counts per lifecycle state

mod active;
pub mod builder;
mod lane;
pub mod sequencer;
pub mod status;

pub use self::builder::{BuildError, SequencerBuilder};
pub use self::sequencer::{DisplaySequencer, TaskTicket};
pub use self::status::SequencerCounts;
