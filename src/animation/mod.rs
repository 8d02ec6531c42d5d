pub mod clip;
pub mod loader;
pub mod mixer;
pub mod sampler;
pub mod settings;
pub mod values;

pub use clip::{AnimationClip, Bracket, Keyframe, NodeDelta};
pub use loader::ClipLoader;
pub use mixer::AnimationMixer;
pub use sampler::{sample, sample_deltas};
pub use settings::{ClipSettings, LoopMode};
pub use values::{Interpolatable, Motion};
