//! Error Types
//!
//! This module defines the error type shared by the tree, the clip loader and
//! the sampler.
//!
//! # Overview
//!
//! [`AnimationError`] covers two families of failures:
//! - Load errors: malformed SAF text, empty clips, unreadable files and
//!   invalid playback settings. These are reported to the caller with the
//!   offending line and never defaulted to zero.
//! - Structural errors: a keyframe addressing a node the tree does not have,
//!   or a builder handle that does not exist.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, AnimationError>`.
//!
//! ```rust,ignore
//! use saf::errors::Result;
//!
//! fn load() -> Result<saf::AnimationClip> {
//!     saf::ClipLoader::default().load("resources/jump.saf")
//! }
//! ```

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// The main error type for clip loading and sampling.
#[derive(Error, Debug)]
pub enum AnimationError {
    // ========================================================================
    // Clip Parsing Errors
    // ========================================================================
    /// A delta line appeared before the first `ts` line.
    #[error("line {line}: node delta before any `ts` line")]
    MissingTimestamp {
        /// 1-based line number
        line: usize,
    },

    /// An integer field (time-point or node index) failed to parse.
    #[error("line {line}: invalid {field} `{value}`: {source}")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A float field failed to parse or was not finite.
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidFloat {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },

    /// A line carried the wrong number of whitespace-separated fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    /// A `ts` line went backwards in time.
    #[error("line {line}: time-point {current} is earlier than previous time-point {previous}")]
    UnsortedKeyframes {
        line: usize,
        previous: u32,
        current: u32,
    },

    /// The same node appeared twice inside one keyframe.
    #[error("line {line}: node {node} already has a delta in this keyframe")]
    DuplicateNode { line: usize, node: usize },

    /// A keyframe built in code received a second delta for the same node.
    #[error("keyframe at time-point {time_point} already has a delta for node {node}")]
    DuplicateDelta { time_point: u32, node: usize },

    /// The input contained no `ts` line at all.
    #[error("clip `{0}` has no keyframes")]
    EmptyClip(String),

    /// Playback settings rejected before loading.
    #[error("invalid clip settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Structural Errors
    // ========================================================================
    /// A keyframe or pose operation addressed a node outside the tree.
    #[error("node index {index} out of range (tree has {node_count} nodes)")]
    NodeIndexOutOfRange {
        /// The invalid flattened index
        index: usize,
        /// Number of nodes in the tree
        node_count: usize,
    },

    /// A builder handle that does not belong to the tree under construction.
    #[error("unknown node handle: {0}")]
    UnknownNode(String),
}

impl AnimationError {
    /// Returns `true` for failures raised while reading or validating a clip,
    /// as opposed to structural mismatches discovered against a tree.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        !matches!(
            self,
            Self::NodeIndexOutOfRange { .. } | Self::UnknownNode(_)
        )
    }
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
