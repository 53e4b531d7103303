//! RecordingDevice - 呼び出しを記録するテスト用ディスプレイ
//!
//! # 学習ポイント
//! - 各呼び出しの enter/exit 時刻をタイムラインとして残す
//! - 別の呼び出しの最中に始まった呼び出しを overlap として数える
//!
//! Ordering checks in the sequencer tests run against this timeline.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::{ChimeCode, DeviceError, Frame, Rgb};
use crate::ports::DisplayDevice;

/// What the device was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    ShowMessage(String),
    Flash(Rgb),
    PlayChime(ChimeCode),
    DrawFrame,
    Clear,
}

#[derive(Debug, Clone)]
pub struct CallRecord {
    pub call: DeviceCall,
    pub entered: Instant,
    pub exited: Instant,
}

pub struct RecordingDevice {
    log: Mutex<Vec<CallRecord>>,
    in_flight: AtomicUsize,
    overlaps: AtomicUsize,
    call_duration: Duration,
    failing_messages: HashSet<String>,
}

impl RecordingDevice {
    /// Every call holds the device for `call_duration`.
    pub fn new(call_duration: Duration) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            overlaps: AtomicUsize::new(0),
            call_duration,
            failing_messages: HashSet::new(),
        }
    }

    /// `show_message(text)` will fail with [`DeviceError::Rejected`].
    pub fn failing_on_message(mut self, text: impl Into<String>) -> Self {
        self.failing_messages.insert(text.into());
        self
    }

    pub fn records(&self) -> Vec<CallRecord> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Calls in the order they entered the device.
    pub fn calls(&self) -> Vec<DeviceCall> {
        let mut records = self.records();
        records.sort_by_key(|r| r.entered);
        records.into_iter().map(|r| r.call).collect()
    }

    pub fn frames_drawn(&self) -> usize {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.call == DeviceCall::DrawFrame)
            .count()
    }

    /// Number of calls that entered while another call was in flight.
    pub fn overlap_count(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    /// Does any recorded call start before the previous one exited?
    pub fn timeline_overlaps(&self) -> bool {
        let mut records = self.records();
        records.sort_by_key(|r| r.entered);
        records
            .windows(2)
            .any(|pair| pair[1].entered < pair[0].exited)
    }

    fn record<F>(&self, call: DeviceCall, body: F) -> Result<(), DeviceError>
    where
        F: FnOnce() -> Result<(), DeviceError>,
    {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        let entered = Instant::now();
        if !self.call_duration.is_zero() {
            thread::sleep(self.call_duration);
        }
        let result = body();
        let exited = Instant::now();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CallRecord {
                call,
                entered,
                exited,
            });
        result
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl DisplayDevice for RecordingDevice {
    fn show_message(&self, text: &str) -> Result<(), DeviceError> {
        self.record(DeviceCall::ShowMessage(text.to_string()), || {
            if self.failing_messages.contains(text) {
                return Err(DeviceError::Rejected(format!("message {text:?}")));
            }
            Ok(())
        })
    }

    fn flash(&self, color: Rgb) -> Result<(), DeviceError> {
        self.record(DeviceCall::Flash(color), || Ok(()))
    }

    fn play_chime(&self, chime: &ChimeCode) -> Result<(), DeviceError> {
        self.record(DeviceCall::PlayChime(chime.clone()), || Ok(()))
    }

    fn draw_frame(&self, _frame: &Frame) -> Result<(), DeviceError> {
        self.record(DeviceCall::DrawFrame, || Ok(()))
    }

    fn clear(&self) -> Result<(), DeviceError> {
        self.record(DeviceCall::Clear, || Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_records_calls_in_order() {
        let device = RecordingDevice::default();
        device.play_chime(&ChimeCode::none()).unwrap();
        device.show_message("hi").unwrap();
        device.flash(Rgb::RED).unwrap();

        assert_eq!(
            device.calls(),
            vec![
                DeviceCall::PlayChime(ChimeCode::none()),
                DeviceCall::ShowMessage("hi".into()),
                DeviceCall::Flash(Rgb::RED),
            ]
        );
        assert!(!device.timeline_overlaps());
        assert_eq!(device.overlap_count(), 0);
    }

    #[test]
    fn test_detects_concurrent_calls() {
        let device = Arc::new(RecordingDevice::new(Duration::from_millis(50)));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let device = Arc::clone(&device);
                thread::spawn(move || device.clear().unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(device.timeline_overlaps());
        assert_eq!(device.overlap_count(), 1);
    }

    #[test]
    fn test_failing_message() {
        let device = RecordingDevice::default().failing_on_message("boom");
        assert!(device.show_message("ok").is_ok());
        assert!(matches!(
            device.show_message("boom"),
            Err(DeviceError::Rejected(_))
        ));
        assert_eq!(device.calls().len(), 2);
    }
}
