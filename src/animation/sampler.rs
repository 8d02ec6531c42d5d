//! Clip sampling.
//!
//! Sampling converts a wall-clock time into per-node motion:
//!
//! 1. `elapsed = time - clip.start_time`, wrapped or clamped by the loop mode
//! 2. bracket `elapsed` between the previous and current keyframe
//! 3. blend each node of the current keyframe with the same node in the
//!    previous keyframe (absent, or no previous keyframe, means zero)
//! 4. add the result to the pose, carrying the node's whole subtree
//!
//! Sampling only adds to the pose. Several clips sampled into the same pose
//! therefore sum; resetting is the caller's job (see
//! [`AnimationMixer`](super::AnimationMixer)).

use crate::animation::clip::{AnimationClip, Bracket, Keyframe, NodeDelta};
use crate::animation::values::{Interpolatable, Motion};
use crate::errors::Result;
use crate::scene::{Pose, TransformTree};

/// Interpolated deltas of `clip` at wall-clock `time`, in the authored order
/// of the current keyframe.
#[must_use]
pub fn sample_deltas(clip: &AnimationClip, time: f64) -> Vec<NodeDelta> {
    let (bracket, current, previous) = locate(clip, time);
    current
        .deltas()
        .iter()
        .map(|delta| {
            let blended = blend(previous, delta, bracket.factor);
            NodeDelta::new(delta.node, blended.translation, blended.rotation_y)
        })
        .collect()
}

/// Samples `clip` at wall-clock `time` and adds the result to `pose`.
///
/// Every addressed node is checked before anything is written, so on
/// [`NodeIndexOutOfRange`](crate::errors::AnimationError::NodeIndexOutOfRange)
/// the pose is left untouched.
pub fn sample(clip: &AnimationClip, tree: &TransformTree, pose: &mut Pose, time: f64) -> Result<()> {
    let (bracket, current, previous) = locate(clip, time);

    for delta in current.deltas() {
        pose.check_node(tree, delta.node)?;
    }

    for delta in current.deltas() {
        let blended = blend(previous, delta, bracket.factor);
        pose.translate_by(tree, delta.node, blended.translation)?;
        pose.rotate_y_by(tree, delta.node, blended.rotation_y)?;
    }
    Ok(())
}

fn locate(clip: &AnimationClip, time: f64) -> (Bracket, &Keyframe, Option<&Keyframe>) {
    let elapsed = clip.local_time(time);
    let bracket = clip.bracket(elapsed);
    let keyframes = clip.keyframes();

    log::trace!(
        "Sampling `{}` at {elapsed:.4}s: keyframe {} (factor {:.3})",
        clip.name,
        bracket.current,
        bracket.factor
    );

    (
        bracket,
        &keyframes[bracket.current],
        bracket.previous.map(|i| &keyframes[i]),
    )
}

/// A node absent from the previous keyframe blends from zero.
#[inline]
fn blend(previous: Option<&Keyframe>, delta: &NodeDelta, factor: f32) -> Motion {
    let from = previous
        .and_then(|k| k.delta_for(delta.node))
        .map_or(Motion::ZERO, NodeDelta::motion);
    Motion::interpolate_linear(from, delta.motion(), factor)
}
