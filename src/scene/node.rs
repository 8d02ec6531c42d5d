use crate::scene::NodeHandle;
use glam::Vec3;

/// A skeleton-proxy point in the transform hierarchy.
///
/// # Design Principles
///
/// - Holds only structural data: hierarchy links and the rest position
/// - Per-frame animation state lives in [`Pose`](crate::scene::Pose), indexed
///   by the node's flattened index, so nothing here changes after
///   [`TreeBuilder::build`](crate::scene::TreeBuilder::build)
///
/// # Hierarchy
///
/// - `parent`: Optional handle to parent node (None for the root)
/// - `children`: Exclusively owned child handles, in insertion order
#[derive(Debug, Clone)]
pub struct Node {
    // === Core Hierarchy ===
    /// Parent node handle (None for the root)
    pub(crate) parent: Option<NodeHandle>,
    /// Child node handles
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    /// Bind-pose offset relative to the parent's local frame.
    rest_position: Vec3,
}

impl Node {
    /// Creates a detached node at the given rest position.
    #[must_use]
    pub fn new(rest_position: Vec3) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            rest_position,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
