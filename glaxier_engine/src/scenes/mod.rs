//! Built-in demo scenes

mod cameras;

pub use cameras::{CamerasConfig, CamerasScene};
