pub mod osd;
pub mod pathset;

pub use osd::{Alarms, CameraFrame, Parameters, Settings, UnitMode, VideoSystem};
pub use pathset::{Path, PathSet, Value};
