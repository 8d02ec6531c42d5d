//! Headless playback loop.
//!
//! Builds the two-node rig used by the cube demo, layers `jump` and `bounce`,
//! and logs the uniform payload a renderer would upload each frame.
//!
//! ```text
//! RUST_LOG=debug cargo run --example playback -- [clip.saf ...]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use saf::scene::records_as_bytes;
use saf::{AnimationMixer, ClipLoader, FrameClock, TreeBuilder};

const FRAME_TIME: Duration = Duration::from_millis(16);
const RUN_SECONDS: f64 = 4.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        let resources = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/resources");
        paths = vec![resources.join("jump.saf"), resources.join("bounce.saf")];
    }

    // Bottom half of the cube, with the top half hanging off it.
    let mut builder = TreeBuilder::new(Vec3::new(0.0, -1.0, 0.0));
    let root = builder.root();
    builder.add_child(root, Vec3::new(0.0, 1.0, 0.0))?;
    let tree = builder.build();

    let loader = ClipLoader::default();
    let mut mixer = AnimationMixer::new();
    for path in &paths {
        let clip = loader.load(path)?;
        println!(
            "Loaded `{}`: {} keyframes, {:.2}s",
            clip.name,
            clip.keyframes().len(),
            clip.duration()
        );
        mixer.add_clip(clip);
    }
    mixer.validate(&tree)?;

    let mut clock = FrameClock::new();
    let mut pose = tree.new_pose();
    let mut records = Vec::with_capacity(tree.len());

    mixer.begin(clock.now());
    while clock.now() < RUN_SECONDS {
        let now = clock.tick();

        mixer.update(&tree, &mut pose, now)?;
        pose.export_into(&mut records);

        let bytes = records_as_bytes(&records);
        log::info!(
            "frame {:>4} t={now:.3}s upload {} bytes: {:?}",
            clock.frame_count(),
            bytes.len(),
            records
        );

        std::thread::sleep(FRAME_TIME);
    }

    println!("Played {} frames", clock.frame_count());
    Ok(())
}
