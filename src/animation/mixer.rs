use crate::animation::clip::AnimationClip;
use crate::animation::sampler;
use crate::errors::Result;
use crate::scene::{Pose, TransformTree};

/// Plays several clips as additive layers on one tree.
///
/// Layers are sampled in insertion order into the same pose with a single
/// reset per frame, so every node ends up with the vector sum of all layers'
/// contributions.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    clips: Vec<AnimationClip>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.push(clip);
    }

    #[must_use]
    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.add_clip(clip);
        self
    }

    #[must_use]
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    pub fn clips_mut(&mut self) -> &mut [AnimationClip] {
        &mut self.clips
    }

    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.name == name)
    }

    /// Starts every layer at `start_time`.
    pub fn begin(&mut self, start_time: f64) {
        for clip in &mut self.clips {
            clip.begin(start_time);
        }
    }

    /// Checks every layer's node indices against `tree` once, up front.
    pub fn validate(&self, tree: &TransformTree) -> Result<()> {
        self.clips.iter().try_for_each(|c| c.validate_for(tree))
    }

    /// Per-frame entry point: resets `pose`, then samples each layer in order.
    ///
    /// If any layer fails, `pose` is reset again before the error is returned,
    /// so earlier layers never leave a partial sum behind.
    pub fn update(&self, tree: &TransformTree, pose: &mut Pose, time: f64) -> Result<()> {
        pose.reset_all();
        for clip in &self.clips {
            if let Err(err) = sampler::sample(clip, tree, pose, time) {
                log::warn!("Layer `{}` failed to sample: {err}", clip.name);
                pose.reset_all();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Like [`update`](Self::update) but into a freshly allocated pose.
    pub fn evaluate(&self, tree: &TransformTree, time: f64) -> Result<Pose> {
        let mut pose = tree.new_pose();
        self.update(tree, &mut pose, time)?;
        Ok(pose)
    }
}
