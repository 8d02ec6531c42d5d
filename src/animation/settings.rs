//! Clip Playback Settings
//!
//! Configuration applied to every clip a [`ClipLoader`](super::ClipLoader)
//! produces.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use saf::animation::{ClipLoader, ClipSettings, LoopMode};
//!
//! // Default: one second per time-point unit, looping forever
//! let loader = ClipLoader::default();
//!
//! // Authored at 24 units per second, played once and held
//! let loader = ClipLoader::new(ClipSettings {
//!     time_stamp_duration: 1.0 / 24.0,
//!     loop_mode: LoopMode::Once,
//! })?;
//! ```

use crate::errors::{AnimationError, Result};

/// What happens when elapsed time leaves `[0, duration)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Hold the first/last keyframe outside the clip's span.
    Once,
    /// Wrap elapsed time with a true modulo of the clip duration.
    #[default]
    Loop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSettings {
    /// Seconds per integer time-point unit stored in the file.
    pub time_stamp_duration: f32,
    pub loop_mode: LoopMode,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            time_stamp_duration: 1.0,
            loop_mode: LoopMode::Loop,
        }
    }
}

impl ClipSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.time_stamp_duration.is_finite() || self.time_stamp_duration <= 0.0 {
            return Err(AnimationError::InvalidSettings(format!(
                "time_stamp_duration must be finite and positive, got {}",
                self.time_stamp_duration
            )));
        }
        Ok(())
    }
}
