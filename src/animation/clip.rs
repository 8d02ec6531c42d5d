use glam::Vec3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::animation::settings::{ClipSettings, LoopMode};
use crate::animation::values::Motion;
use crate::errors::{AnimationError, Result};
use crate::scene::TransformTree;

/// Offset and yaw for one node at one keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDelta {
    /// Flattened index of the target node.
    pub node: usize,
    pub translation: Vec3,
    pub rotation_y: f32,
}

impl NodeDelta {
    #[must_use]
    pub const fn new(node: usize, translation: Vec3, rotation_y: f32) -> Self {
        Self {
            node,
            translation,
            rotation_y,
        }
    }

    #[inline]
    #[must_use]
    pub fn motion(&self) -> Motion {
        Motion::new(self.translation, self.rotation_y)
    }
}

/// A time-point and the node deltas reached at that time.
///
/// Deltas keep their authored order and are also indexed by node, so
/// interpolation can find a node's previous value even when two keyframes
/// cover different node sets.
#[derive(Debug, Clone, Default)]
pub struct Keyframe {
    pub time_point: u32,
    deltas: SmallVec<[NodeDelta; 4]>,
    by_node: FxHashMap<usize, usize>,
}

impl Keyframe {
    #[must_use]
    pub fn new(time_point: u32) -> Self {
        Self {
            time_point,
            ..Default::default()
        }
    }

    /// Adds a delta. Returns `false` and leaves the keyframe unchanged if the
    /// node already has one.
    #[must_use = "a `false` return means the delta was rejected as a duplicate"]
    pub fn insert(&mut self, delta: NodeDelta) -> bool {
        if self.by_node.contains_key(&delta.node) {
            return false;
        }
        self.by_node.insert(delta.node, self.deltas.len());
        self.deltas.push(delta);
        true
    }

    /// Builder form of [`insert`](Self::insert); a duplicate node is an error.
    pub fn with_delta(mut self, delta: NodeDelta) -> Result<Self> {
        if self.insert(delta) {
            Ok(self)
        } else {
            Err(AnimationError::DuplicateDelta {
                time_point: self.time_point,
                node: delta.node,
            })
        }
    }

    #[inline]
    #[must_use]
    pub fn deltas(&self) -> &[NodeDelta] {
        &self.deltas
    }

    #[must_use]
    pub fn delta_for(&self, node: usize) -> Option<&NodeDelta> {
        self.by_node.get(&node).map(|&i| &self.deltas[i])
    }
}

/// The pair of keyframes straddling a sampling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Keyframe being approached (or reached).
    pub current: usize,
    /// Keyframe being left; `None` means "blend from zero at time 0".
    pub previous: Option<usize>,
    /// Blend weight of `current`, in `[0, 1]`.
    pub factor: f32,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    start_time: f64,
    time_stamp_duration: f32,
    loop_mode: LoopMode,
    keyframes: Vec<Keyframe>,
}

impl AnimationClip {
    /// Builds a clip from keyframes in any order; they are stably sorted by
    /// time-point.
    pub fn new(
        name: impl Into<String>,
        mut keyframes: Vec<Keyframe>,
        settings: ClipSettings,
    ) -> Result<Self> {
        let name = name.into();
        settings.validate()?;
        if keyframes.is_empty() {
            return Err(AnimationError::EmptyClip(name));
        }
        keyframes.sort_by_key(|k| k.time_point);

        Ok(Self {
            name,
            start_time: 0.0,
            time_stamp_duration: settings.time_stamp_duration,
            loop_mode: settings.loop_mode,
            keyframes,
        })
    }

    /// Sets the wall-clock time that sampling is relative to.
    pub fn begin(&mut self, start_time: f64) {
        self.start_time = start_time;
    }

    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    #[inline]
    #[must_use]
    pub fn time_stamp_duration(&self) -> f32 {
        self.time_stamp_duration
    }

    #[inline]
    #[must_use]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.loop_mode = loop_mode;
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Time of keyframe `index` in seconds.
    pub(crate) fn keyframe_time(&self, index: usize) -> f64 {
        f64::from(self.keyframes[index].time_point) * f64::from(self.time_stamp_duration)
    }

    /// Loop length: the last keyframe's time.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.keyframe_time(self.keyframes.len() - 1)
    }

    /// Highest node index any keyframe addresses.
    #[must_use]
    pub fn max_node_index(&self) -> Option<usize> {
        self.keyframes
            .iter()
            .flat_map(|k| k.deltas.iter().map(|d| d.node))
            .max()
    }

    /// Checks that every addressed node exists in `tree`.
    pub fn validate_for(&self, tree: &TransformTree) -> Result<()> {
        match self.max_node_index() {
            Some(index) => tree.check_index(index),
            None => Ok(()),
        }
    }

    /// Converts wall-clock `time` into clip-local time, applying the loop mode.
    #[must_use]
    pub fn local_time(&self, time: f64) -> f64 {
        let elapsed = time - self.start_time;
        let duration = self.duration();

        match self.loop_mode {
            LoopMode::Once => elapsed.clamp(0.0, duration),
            LoopMode::Loop if duration > 0.0 => {
                if (0.0..duration).contains(&elapsed) {
                    elapsed
                } else {
                    elapsed.rem_euclid(duration)
                }
            }
            LoopMode::Loop => elapsed.max(0.0),
        }
    }

    /// Finds the keyframes straddling clip-local time `elapsed`.
    ///
    /// `current` is the first keyframe whose time is `>= elapsed`, so sampling
    /// exactly on a keyframe reproduces it with `factor == 1`.
    #[must_use]
    pub fn bracket(&self, elapsed: f64) -> Bracket {
        let last = self.keyframes.len() - 1;
        let current = self
            .keyframes
            .partition_point(|k| {
                f64::from(k.time_point) * f64::from(self.time_stamp_duration) < elapsed
            })
            .min(last);
        let previous = current.checked_sub(1);

        let current_time = self.keyframe_time(current);
        let previous_time = previous.map_or(0.0, |i| self.keyframe_time(i));
        let span = current_time - previous_time;

        let factor = if span > 0.0 {
            ((elapsed - previous_time) / span).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };

        Bracket {
            current,
            previous,
            factor,
        }
    }
}
