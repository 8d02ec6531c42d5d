#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod errors;
pub mod scene;
pub mod utils;

pub use animation::{AnimationClip, AnimationMixer, ClipLoader, ClipSettings, LoopMode};
pub use errors::{AnimationError, Result};
pub use scene::{Node, NodeHandle, NodeRecord, Pose, TransformTree, TreeBuilder};
pub use utils::FrameClock;
