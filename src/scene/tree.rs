//! Transform tree construction and pre-order flattening.
//!
//! A hierarchy is assembled with a [`TreeBuilder`] and frozen into a
//! [`TransformTree`] by [`TreeBuilder::build`]. Freezing computes the
//! flattened pre-order list that keyframes, poses and the exported uniform
//! buffer all index into:
//!
//! ```text
//!        root (0)
//!       /        \
//!    a (1)      d (4)
//!    /   \
//!  b (2) c (3)
//! ```
//!
//! Because the order is pre-order, every subtree occupies a contiguous range
//! of indices (`a` owns `1..4`). Subtree propagation in [`Pose`] walks that
//! range instead of recursing through child lists.

use std::ops::Range;

use glam::Vec3;
use slotmap::{SecondaryMap, SlotMap};

use crate::errors::{AnimationError, Result};
use crate::scene::node::Node;
use crate::scene::pose::Pose;
use crate::scene::NodeHandle;

/// Mutable hierarchy under construction.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    nodes: SlotMap<NodeHandle, Node>,
    root: NodeHandle,
}

impl TreeBuilder {
    /// Starts a hierarchy whose root sits at `root_rest_position`.
    #[must_use]
    pub fn new(root_rest_position: Vec3) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root_rest_position));
        Self { nodes, root }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// Appends a new child to `parent` and returns its handle.
    pub fn add_child(&mut self, parent: NodeHandle, rest_position: Vec3) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(AnimationError::UnknownNode(format!("{parent:?}")));
        }

        let mut child = Node::new(rest_position);
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(handle);
        }
        Ok(handle)
    }

    /// Freezes the hierarchy and computes the flattened pre-order list.
    #[must_use]
    pub fn build(self) -> TransformTree {
        let count = self.nodes.len();
        let mut flattened = Vec::with_capacity(count);
        let mut stack = vec![self.root];

        // Children are pushed in reverse so the first child is visited first.
        while let Some(handle) = stack.pop() {
            flattened.push(handle);
            if let Some(node) = self.nodes.get(handle) {
                stack.extend(node.children.iter().rev().copied());
            }
        }

        let mut indices = SecondaryMap::with_capacity(count);
        for (i, &handle) in flattened.iter().enumerate() {
            indices.insert(handle, i);
        }

        // Walk backwards so every child's extent is known before its parent's.
        let mut subtree_end: Vec<usize> = (1..=flattened.len()).collect();
        for i in (0..flattened.len()).rev() {
            let node = &self.nodes[flattened[i]];
            if let Some(&last_child) = node.children.last() {
                subtree_end[i] = subtree_end[indices[last_child]];
            }
        }

        log::debug!("Built transform tree with {} nodes", flattened.len());

        TransformTree {
            nodes: self.nodes,
            root: self.root,
            flattened,
            indices,
            subtree_end,
        }
    }
}

/// Immutable node hierarchy with a stable flattened index.
#[derive(Debug, Clone)]
pub struct TransformTree {
    nodes: SlotMap<NodeHandle, Node>,
    root: NodeHandle,
    flattened: Vec<NodeHandle>,
    indices: SecondaryMap<NodeHandle, usize>,
    subtree_end: Vec<usize>,
}

impl TransformTree {
    /// Number of nodes, which is also the addressable keyframe index range.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.flattened.len()
    }

    /// Always `false`: a built tree holds at least its root.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flattened.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Handles in flattened (pre-order) order.
    #[inline]
    #[must_use]
    pub fn flattened(&self) -> &[NodeHandle] {
        &self.flattened
    }

    #[must_use]
    pub fn handle(&self, index: usize) -> Option<NodeHandle> {
        self.flattened.get(index).copied()
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.handle(index).and_then(|h| self.nodes.get(h))
    }

    #[must_use]
    pub fn index_of(&self, handle: NodeHandle) -> Option<usize> {
        self.indices.get(handle).copied()
    }

    #[must_use]
    pub fn parent_index(&self, index: usize) -> Option<usize> {
        self.node(index)
            .and_then(Node::parent)
            .and_then(|p| self.index_of(p))
    }

    /// Flattened index range covered by the node at `index` and all its
    /// descendants.
    pub fn subtree(&self, index: usize) -> Result<Range<usize>> {
        self.check_index(index)?;
        Ok(index..self.subtree_end[index])
    }

    /// Rest positions in flattened order.
    pub fn rest_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.flattened.iter().map(|&h| self.nodes[h].rest_position())
    }

    /// Allocates a zeroed pose sized for this tree.
    #[must_use]
    pub fn new_pose(&self) -> Pose {
        Pose::new(self.len())
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(AnimationError::NodeIndexOutOfRange {
                index,
                node_count: self.len(),
            })
        }
    }
}
