//! Impls - ポートの実装
//!
//! # 含まれる実装
//! - **RecordingDevice**: instrumented device that records a call timeline
//! - **ConsoleDevice**: logs what the LED matrix and buzzer would do
//! - **FrameAnimationFactory**: named frame loops rendered through a device
//! - **InMemoryStationStore**: station tables kept in memory

pub mod console_device;
pub mod frame_animation;
pub mod inmem_station;
pub mod recording_device;

pub use self::console_device::ConsoleDevice;
pub use self::frame_animation::FrameAnimationFactory;
pub use self::inmem_station::InMemoryStationStore;
pub use self::recording_device::{CallRecord, DeviceCall, RecordingDevice};
