//! Frame-scoped animation state.
//!
//! A [`Pose`] stores, for every flattened node index, the translation and yaw
//! accumulated from all clips sampled this frame. It is kept apart from the
//! [`TransformTree`] so that the hierarchy stays immutable and a skipped reset
//! can never leak last frame's motion into a freshly allocated pose.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::errors::{AnimationError, Result};
use crate::scene::tree::TransformTree;

/// One exported node record, laid out as a std140 `vec4`:
/// `xyz` = accumulated translation, `w` = accumulated rotation around Y.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct NodeRecord {
    pub translation: [f32; 3],
    pub rotation_y: f32,
}

impl NodeRecord {
    /// Size in bytes of one record in the uniform array.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// Per-node accumulation buffer, indexed by flattened node index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    translations: Vec<Vec3>,
    rotations_y: Vec<f32>,
}

impl Pose {
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            translations: vec![Vec3::ZERO; node_count],
            rotations_y: vec![0.0; node_count],
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    #[must_use]
    pub fn translation(&self, index: usize) -> Option<Vec3> {
        self.translations.get(index).copied()
    }

    #[must_use]
    pub fn rotation_y(&self, index: usize) -> Option<f32> {
        self.rotations_y.get(index).copied()
    }

    // ========================================================================
    // Node operations (propagate over the whole subtree)
    // ========================================================================

    /// Moves the node at `index` and every descendant by the same `delta`.
    pub fn translate_by(&mut self, tree: &TransformTree, index: usize, delta: Vec3) -> Result<()> {
        let range = self.subtree(tree, index)?;
        for t in &mut self.translations[range] {
            *t += delta;
        }
        Ok(())
    }

    /// Adds `delta` radians of yaw to the node at `index` and every descendant.
    pub fn rotate_y_by(&mut self, tree: &TransformTree, index: usize, delta: f32) -> Result<()> {
        let range = self.subtree(tree, index)?;
        for r in &mut self.rotations_y[range] {
            *r += delta;
        }
        Ok(())
    }

    /// Zeroes the translation of the node at `index` and its descendants.
    pub fn reset_translation(&mut self, tree: &TransformTree, index: usize) -> Result<()> {
        let range = self.subtree(tree, index)?;
        self.translations[range].fill(Vec3::ZERO);
        Ok(())
    }

    /// Zeroes the yaw of the node at `index` and its descendants.
    pub fn reset_rotation_y(&mut self, tree: &TransformTree, index: usize) -> Result<()> {
        let range = self.subtree(tree, index)?;
        self.rotations_y[range].fill(0.0);
        Ok(())
    }

    /// Zeroes every node. Call once per frame before the first clip is sampled.
    pub fn reset_all(&mut self) {
        self.translations.fill(Vec3::ZERO);
        self.rotations_y.fill(0.0);
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Produces one [`NodeRecord`] per node in flattened order.
    #[must_use]
    pub fn export_transforms(&self) -> Vec<NodeRecord> {
        self.translations
            .iter()
            .zip(&self.rotations_y)
            .map(|(t, &rotation_y)| NodeRecord {
                translation: t.to_array(),
                rotation_y,
            })
            .collect()
    }

    /// Same as [`export_transforms`](Self::export_transforms) but writes into
    /// a caller-owned buffer so the render loop can reuse its allocation.
    pub fn export_into(&self, out: &mut Vec<NodeRecord>) {
        out.clear();
        out.extend(
            self.translations
                .iter()
                .zip(&self.rotations_y)
                .map(|(t, &rotation_y)| NodeRecord {
                    translation: t.to_array(),
                    rotation_y,
                }),
        );
    }

    /// Fails the same way a node operation on `index` would, without writing.
    pub(crate) fn check_node(&self, tree: &TransformTree, index: usize) -> Result<()> {
        self.subtree(tree, index).map(|_| ())
    }

    fn subtree(&self, tree: &TransformTree, index: usize) -> Result<std::ops::Range<usize>> {
        let range = tree.subtree(index)?;
        if range.end > self.len() {
            return Err(AnimationError::NodeIndexOutOfRange {
                index: range.end - 1,
                node_count: self.len(),
            });
        }
        Ok(range)
    }
}

/// Views exported records as the raw bytes of the uniform upload.
#[must_use]
pub fn records_as_bytes(records: &[NodeRecord]) -> &[u8] {
    bytemuck::cast_slice(records)
}
