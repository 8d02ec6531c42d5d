//! Utility Module
//!
//! - [`FrameClock`]: monotonic per-frame time source for sampling

pub mod time;

pub use time::FrameClock;
