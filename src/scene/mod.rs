//! Transform hierarchy module
//!
//! Manages the skeleton-proxy hierarchy and its per-frame state:
//! - Node: a point in the hierarchy (rest position and children)
//! - TreeBuilder / TransformTree: construction and pre-order flattening
//! - Pose: frame-scoped translation/yaw accumulation and uniform export

pub mod node;
pub mod pose;
pub mod tree;

pub use node::Node;
pub use pose::{NodeRecord, Pose, records_as_bytes};
pub use tree::{TransformTree, TreeBuilder};

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
