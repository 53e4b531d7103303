//! SequencerBuilder - 表示シーケンサの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンで device と animation factory を受け取る
//! - 起動時検証（Fail-fast）: 足りない部品や tokio runtime の不在は
//!   lane が動き出す前に BuildError で返す

use std::sync::Arc;

use tokio::runtime::Handle;

use super::sequencer::DisplaySequencer;
use crate::ports::{AnimationFactory, DisplayDevice};

/// # 使用例
/// ```ignore
/// let sequencer = SequencerBuilder::new()
///     .device(device)
///     .animations(factory)
///     .build()?;
/// sequencer.display_message("Time to drink!")?;
/// ```
#[derive(Default)]
pub struct SequencerBuilder {
    device: Option<Arc<dyn DisplayDevice>>,
    animations: Option<Arc<dyn AnimationFactory>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no display device configured")]
    MissingDevice,

    #[error("no animation factory configured")]
    MissingAnimations,

    #[error("the display sequencer must be built inside a tokio runtime")]
    NoRuntime,
}

impl SequencerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, device: Arc<dyn DisplayDevice>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn animations(mut self, animations: Arc<dyn AnimationFactory>) -> Self {
        self.animations = Some(animations);
        self
    }

    /// Start both lane runners on the current runtime.
    pub fn build(self) -> Result<DisplaySequencer, BuildError> {
        let device = self.device.ok_or(BuildError::MissingDevice)?;
        let animations = self.animations.ok_or(BuildError::MissingAnimations)?;
        let runtime = Handle::try_current().map_err(|_| BuildError::NoRuntime)?;
        Ok(DisplaySequencer::start(&runtime, device, animations))
    }
}
