//! Ports - traits at the seams
//!
//! The sequencer only ever talks to hardware through these traits, so a
//! recording or console implementation can stand in for the real peripheral.

pub mod animation;
pub mod device;
pub mod station_store;

pub use self::animation::{Animation, AnimationControl, AnimationFactory};
pub use self::device::DisplayDevice;
pub use self::station_store::StationStore;
