//! Animation System Tests
//!
//! Tests for:
//! - Interpolatable implementations (f32, Vec3, Motion)
//! - Bracketing and interpolation factor at, between and before keyframes
//! - Loop wrap-around idempotence and Once clamping
//! - Node-keyed matching between keyframes with different coverage
//! - Additive multi-clip composition through AnimationMixer
//! - Out-of-range node indices failing loudly

use glam::Vec3;

use saf::animation::sampler::{sample, sample_deltas};
use saf::animation::values::{Interpolatable, Motion};
use saf::animation::{AnimationClip, AnimationMixer, ClipLoader, ClipSettings, Keyframe, LoopMode, NodeDelta};
use saf::errors::AnimationError;
use saf::scene::{NodeRecord, TransformTree, TreeBuilder};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn record_approx(a: NodeRecord, b: NodeRecord) -> bool {
    vec3_approx(Vec3::from(a.translation), Vec3::from(b.translation))
        && approx(a.rotation_y, b.rotation_y)
}

fn one_node_tree() -> TransformTree {
    TreeBuilder::new(Vec3::ZERO).build()
}

/// Root at the bottom of the cube with the top half hanging off it.
fn two_node_tree() -> TransformTree {
    let mut builder = TreeBuilder::new(Vec3::new(0.0, -1.0, 0.0));
    let root = builder.root();
    builder.add_child(root, Vec3::new(0.0, 1.0, 0.0)).unwrap();
    builder.build()
}

fn clip(text: &str) -> AnimationClip {
    ClipLoader::default().parse("test", text).unwrap()
}

fn sampled(clip: &AnimationClip, tree: &TransformTree, time: f64) -> Vec<NodeRecord> {
    let mut pose = tree.new_pose();
    sample(clip, tree, &mut pose, time).unwrap();
    pose.export_transforms()
}

// ============================================================================
// Interpolatable
// ============================================================================

#[test]
fn lerp_f32_endpoints_are_exact() {
    assert_eq!(f32::interpolate_linear(3.0, 7.0, 0.0), 3.0);
    assert_eq!(f32::interpolate_linear(3.0, 7.0, 1.0), 7.0);
    assert!(approx(f32::interpolate_linear(3.0, 7.0, 0.25), 4.0));
}

#[test]
fn lerp_vec3_componentwise() {
    let v = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(2.0, -4.0, 8.0), 0.5);
    assert!(vec3_approx(v, Vec3::new(1.0, -2.0, 4.0)));
}

#[test]
fn lerp_motion_blends_translation_and_yaw() {
    let a = Motion::new(Vec3::X, 1.0);
    let b = Motion::new(Vec3::Y, 3.0);
    let m = Motion::interpolate_linear(a, b, 0.5);
    assert!(vec3_approx(m.translation, Vec3::new(0.5, 0.5, 0.0)));
    assert!(approx(m.rotation_y, 2.0));
    assert_eq!(a + Motion::ZERO, a);
}

// ============================================================================
// Single-clip Sampling
// ============================================================================

#[test]
fn round_trip_midpoint() {
    let tree = one_node_tree();
    let c = clip("ts 0\n0 0 0 0 0\nts 10\n0 1 0 0 0\n");

    let records = sampled(&c, &tree, 5.0);
    assert_eq!(records.len(), 1);
    assert!(record_approx(
        records[0],
        NodeRecord {
            translation: [0.5, 0.0, 0.0],
            rotation_y: 0.0
        }
    ));
}

#[test]
fn exact_keyframe_time_yields_raw_deltas() {
    let tree = two_node_tree();
    let c = clip("ts 0\n0 0 0 0 0\nts 4\n0 1 2 3 0.5\nts 8\n0 -1 0 0 0\n");

    let deltas = sample_deltas(&c, 4.0);
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(deltas[0].rotation_y, 0.5);

    let records = sampled(&c, &tree, 4.0);
    assert!(record_approx(
        records[0],
        NodeRecord {
            translation: [1.0, 2.0, 3.0],
            rotation_y: 0.5
        }
    ));
}

#[test]
fn before_first_keyframe_blends_from_zero() {
    let tree = one_node_tree();
    let c = clip("ts 4\n0 4 0 0 2\nts 8\n0 0 0 0 0\n");

    let records = sampled(&c, &tree, 1.0);
    assert!(vec3_approx(Vec3::from(records[0].translation), Vec3::new(1.0, 0.0, 0.0)));
    assert!(approx(records[0].rotation_y, 0.5));

    let at_zero = sampled(&c, &tree, 0.0);
    assert!(record_approx(at_zero[0], NodeRecord::default()));
}

#[test]
fn first_keyframe_at_zero_is_reproduced_at_zero() {
    let tree = one_node_tree();
    let c = clip("ts 0\n0 2 0 0\nts 10\n0 4 0 0\n");
    let records = sampled(&c, &tree, 0.0);
    assert!(vec3_approx(Vec3::from(records[0].translation), Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn sampling_is_relative_to_begin() {
    let tree = one_node_tree();
    let mut c = clip("ts 0\n0 0 0 0\nts 10\n0 10 0 0\n");
    c.begin(100.0);

    let records = sampled(&c, &tree, 103.0);
    assert!(approx(records[0].translation[0], 3.0));
}

#[test]
fn time_stamp_duration_scales_keyframe_times() {
    let tree = one_node_tree();
    let loader = ClipLoader::new(ClipSettings {
        time_stamp_duration: 0.1,
        ..Default::default()
    })
    .unwrap();
    let c = loader.parse("fast", "ts 0\n0 0 0 0\nts 10\n0 1 0 0\n").unwrap();

    let records = sampled(&c, &tree, 0.25);
    assert!(approx(records[0].translation[0], 0.25));
}

#[test]
fn delta_on_parent_moves_child() {
    let tree = two_node_tree();
    let c = clip("ts 0\n0 0 0 0\nts 2\n0 0 2 0 1\n");

    let records = sampled(&c, &tree, 1.0);
    assert!(record_approx(records[0], records[1]));
    assert!(approx(records[1].translation[1], 1.0));
    assert!(approx(records[1].rotation_y, 0.5));
}

#[test]
fn child_delta_adds_to_parent_delta() {
    let tree = two_node_tree();
    let c = clip("ts 0\n0 0 1 0\n1 1 0 0\n");

    let records = sampled(&c, &tree, 2.0);
    assert!(vec3_approx(Vec3::from(records[0].translation), Vec3::new(0.0, 1.0, 0.0)));
    assert!(vec3_approx(Vec3::from(records[1].translation), Vec3::new(1.0, 1.0, 0.0)));
}

// ============================================================================
// Coverage Differences Between Keyframes
// ============================================================================

#[test]
fn previous_keyframe_matched_by_node_not_position() {
    // Node order differs between the two keyframes.
    let c = clip("ts 0\n1 0 4 0\n0 2 0 0\nts 10\n0 4 0 0\n1 0 8 0\n");

    let deltas = sample_deltas(&c, 5.0);
    let node0 = deltas.iter().find(|d| d.node == 0).unwrap();
    let node1 = deltas.iter().find(|d| d.node == 1).unwrap();
    assert!(vec3_approx(node0.translation, Vec3::new(3.0, 0.0, 0.0)));
    assert!(vec3_approx(node1.translation, Vec3::new(0.0, 6.0, 0.0)));
}

#[test]
fn node_absent_from_previous_keyframe_blends_from_zero() {
    let tree = two_node_tree();
    let c = clip("ts 0\n0 2 0 0\nts 10\n0 2 0 0\n1 0 10 0\n");

    let records = sampled(&c, &tree, 5.0);
    assert!(vec3_approx(Vec3::from(records[0].translation), Vec3::new(2.0, 0.0, 0.0)));
    assert!(vec3_approx(Vec3::from(records[1].translation), Vec3::new(2.0, 5.0, 0.0)));
}

#[test]
fn node_absent_from_current_keyframe_contributes_nothing() {
    let tree = two_node_tree();
    let c = clip("ts 0\n1 0 10 0\nts 10\n0 1 0 0\n");

    let records = sampled(&c, &tree, 5.0);
    assert!(vec3_approx(Vec3::from(records[1].translation), Vec3::new(0.5, 0.0, 0.0)));
}

#[test]
fn coincident_keyframes_never_produce_nan() {
    let tree = one_node_tree();
    let c = clip("ts 0\n0 1 0 0\nts 0\n0 2 0 0\nts 5\n0 3 0 0\n");

    for t in [0.0, 0.0001, 2.5, 4.999] {
        let records = sampled(&c, &tree, t);
        assert!(records[0].translation.iter().all(|v| v.is_finite()), "t={t}");
        assert!(records[0].rotation_y.is_finite());
    }
}

#[test]
fn single_keyframe_clip_holds_its_value() {
    let tree = one_node_tree();
    let c = clip("ts 0\n0 1 2 3 4\n");
    for t in [0.0, 1.0, 1000.0, -5.0] {
        let records = sampled(&c, &tree, t);
        assert!(record_approx(
            records[0],
            NodeRecord {
                translation: [1.0, 2.0, 3.0],
                rotation_y: 4.0
            }
        ));
    }
}

// ============================================================================
// Looping
// ============================================================================

#[test]
fn loop_wraps_by_duration() {
    let tree = two_node_tree();
    let c = clip("ts 0\n0 0 0 0 0\nts 2\n0 0 1 0 1\n1 1 0 0 0\nts 6\n0 0 -1 0 0\n1 0 0 0 0\n");
    let duration = c.duration();
    assert!((duration - 6.0).abs() < 1e-9);

    for t in [0.0, 0.5, 1.0, 3.0, 4.5] {
        let a = sampled(&c, &tree, t);
        let b = sampled(&c, &tree, t + duration);
        let z = sampled(&c, &tree, t + duration * 1000.0);
        for i in 0..tree.len() {
            assert!(record_approx(a[i], b[i]), "t={t} node={i}");
            assert!(record_approx(a[i], z[i]), "t={t} node={i}");
        }
    }
}

#[test]
fn loop_wraps_times_before_start() {
    let tree = one_node_tree();
    let mut c = clip("ts 0\n0 0 0 0\nts 10\n0 10 0 0\n");
    c.begin(20.0);

    let records = sampled(&c, &tree, 17.0);
    assert!(approx(records[0].translation[0], 7.0));
}

#[test]
fn once_clamps_to_last_keyframe() {
    let tree = one_node_tree();
    let mut c = clip("ts 0\n0 0 0 0\nts 10\n0 10 0 0\n");
    c.set_loop_mode(LoopMode::Once);

    assert!(approx(sampled(&c, &tree, 25.0)[0].translation[0], 10.0));
    assert!(approx(sampled(&c, &tree, -3.0)[0].translation[0], 0.0));
    assert!(approx(sampled(&c, &tree, 4.0)[0].translation[0], 4.0));
}

// ============================================================================
// Structural Errors
// ============================================================================

#[test]
fn out_of_range_node_fails_loudly() {
    let tree = one_node_tree();
    let c = clip("ts 0\n3 1 0 0\n");

    let mut pose = tree.new_pose();
    let err = sample(&c, &tree, &mut pose, 0.0).unwrap_err();
    assert!(matches!(
        err,
        AnimationError::NodeIndexOutOfRange {
            index: 3,
            node_count: 1
        }
    ));
    assert!(c.validate_for(&tree).is_err());
}

#[test]
fn validate_accepts_clip_within_tree() {
    let tree = two_node_tree();
    assert!(clip("ts 0\n1 0 0 0\n").validate_for(&tree).is_ok());
    assert!(clip("ts 0\n").validate_for(&tree).is_ok());
}

#[test]
fn programmatic_clip_requires_keyframes() {
    let result = AnimationClip::new("none", Vec::new(), ClipSettings::default());
    assert!(matches!(result, Err(AnimationError::EmptyClip(name)) if name == "none"));
}

#[test]
fn programmatic_clip_samples_like_parsed_clip() {
    let tree = one_node_tree();
    let keyframes = vec![
        Keyframe::new(10)
            .with_delta(NodeDelta::new(0, Vec3::X, 0.0))
            .unwrap(),
        Keyframe::new(0)
            .with_delta(NodeDelta::new(0, Vec3::ZERO, 0.0))
            .unwrap(),
    ];
    let built = AnimationClip::new("built", keyframes, ClipSettings::default()).unwrap();
    let parsed = clip("ts 0\n0 0 0 0\nts 10\n0 1 0 0\n");

    assert_eq!(sampled(&built, &tree, 3.0), sampled(&parsed, &tree, 3.0));
}

#[test]
fn programmatic_duplicate_delta_is_rejected_like_parsed_one() {
    let result = Keyframe::new(4)
        .with_delta(NodeDelta::new(0, Vec3::X, 0.0))
        .and_then(|k| k.with_delta(NodeDelta::new(0, Vec3::Y, 1.0)));
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        AnimationError::DuplicateDelta {
            time_point: 4,
            node: 0
        }
    ));
    assert!(err.is_load_error());

    let parsed = ClipLoader::default().parse("dup", "ts 4\n0 1 0 0\n0 0 1 0 1\n");
    assert!(matches!(parsed, Err(AnimationError::DuplicateNode { node: 0, .. })));
}

#[test]
fn keyframe_insert_keeps_first_delta_for_node() {
    let mut keyframe = Keyframe::new(0);
    assert!(keyframe.insert(NodeDelta::new(2, Vec3::X, 0.0)));
    assert!(!keyframe.insert(NodeDelta::new(2, Vec3::Y, 0.0)));
    assert_eq!(keyframe.deltas().len(), 1);
    assert_eq!(keyframe.delta_for(2).map(|d| d.translation), Some(Vec3::X));
}

// ============================================================================
// Multi-clip Composition (AnimationMixer)
// ============================================================================

fn jump() -> AnimationClip {
    clip("ts 0\n0 0 0 0\nts 2\n0 0 2 0\nts 4\n0 0 0 0\n")
}

fn sway() -> AnimationClip {
    clip("ts 0\n1 0 0 0 0\nts 3\n1 3 0 0 1.5\nts 6\n1 0 0 0 0\n0 0 0 1 0\n")
}

#[test]
fn layers_are_additive() {
    let tree = two_node_tree();
    let mixer = AnimationMixer::new().with_clip(jump()).with_clip(sway());

    for t in [0.0, 0.7, 1.0, 2.5, 3.9, 5.5, 11.0] {
        let combined = mixer.evaluate(&tree, t).unwrap().export_transforms();
        let a = sampled(&jump(), &tree, t);
        let b = sampled(&sway(), &tree, t);

        for i in 0..tree.len() {
            let expected = NodeRecord {
                translation: (Vec3::from(a[i].translation) + Vec3::from(b[i].translation))
                    .to_array(),
                rotation_y: a[i].rotation_y + b[i].rotation_y,
            };
            assert!(record_approx(combined[i], expected), "t={t} node={i}");
        }
    }
}

#[test]
fn update_resets_between_frames() {
    let tree = two_node_tree();
    let mixer = AnimationMixer::new().with_clip(jump());
    let mut pose = tree.new_pose();

    mixer.update(&tree, &mut pose, 1.0).unwrap();
    let first = pose.export_transforms();
    mixer.update(&tree, &mut pose, 1.0).unwrap();
    assert_eq!(pose.export_transforms(), first);

    mixer.update(&tree, &mut pose, 0.0).unwrap();
    assert!(record_approx(pose.export_transforms()[0], NodeRecord::default()));
}

#[test]
fn begin_sets_every_layer() {
    let mut mixer = AnimationMixer::new().with_clip(jump()).with_clip(sway());
    mixer.begin(42.0);
    assert!(mixer.clips().iter().all(|c| c.start_time() == 42.0));
    assert!(mixer.clip("test").is_some());
    assert!(mixer.clip("missing").is_none());
}

#[test]
fn mixer_validate_reports_bad_layer() {
    let tree = one_node_tree();
    let mixer = AnimationMixer::new().with_clip(jump()).with_clip(sway());
    assert!(matches!(
        mixer.validate(&tree),
        Err(AnimationError::NodeIndexOutOfRange { index: 1, .. })
    ));
}

#[test]
fn mixer_update_propagates_sampling_errors() {
    let tree = one_node_tree();
    let mixer = AnimationMixer::new().with_clip(sway());
    let mut pose = tree.new_pose();
    assert!(mixer.update(&tree, &mut pose, 1.0).is_err());
}

#[test]
fn failed_update_leaves_no_partial_layers() {
    let tree = two_node_tree();
    let bad = clip("ts 0\n0 1 0 0\n9 1 0 0\n");
    let mixer = AnimationMixer::new().with_clip(jump()).with_clip(bad);
    let mut pose = tree.new_pose();

    assert!(matches!(
        mixer.update(&tree, &mut pose, 1.0),
        Err(AnimationError::NodeIndexOutOfRange { index: 9, .. })
    ));
    assert!(pose
        .export_transforms()
        .iter()
        .all(|r| record_approx(*r, NodeRecord::default())));
}

#[test]
fn failed_sample_writes_nothing() {
    let tree = two_node_tree();
    let c = clip("ts 0\n0 1 0 0\n1 0 2 0 0.5\n5 1 0 0\n");
    let mut pose = tree.new_pose();

    assert!(sample(&c, &tree, &mut pose, 0.0).is_err());
    assert_eq!(pose.export_transforms(), tree.new_pose().export_transforms());
}
