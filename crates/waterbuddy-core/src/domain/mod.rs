//! Domain model (ids, tasks, lanes, colors, station records, errors).

pub mod color;
pub mod errors;
pub mod ids;
pub mod state;
pub mod station;
pub mod task;

pub use self::color::{Frame, MATRIX_PIXELS, MATRIX_SIDE, Rgb};
pub use self::errors::{DeviceError, SequencerError, StoreError};
pub use self::ids::{TaskId, TaskIdAllocator};
pub use self::state::{Lane, TaskState};
pub use self::station::{StationData, UserData, WaterData};
pub use self::task::{ChimeCode, DisplayTask, FrameBudget};
