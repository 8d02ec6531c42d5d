//! SAF clip loader.
//!
//! SAF is a hand-authored, line-oriented keyframe format:
//!
//! ```text
//! ts 0
//! 0 0.0 0.0 0.0
//! ts 10
//! 0 0.0 1.5 0.0 0.25
//! 1 0.0 0.5 0.0
//! ```
//!
//! `ts <time-point>` opens a keyframe. Every following line until the next
//! `ts` (or end of input) is `<node> <tx> <ty> <tz> [<rot_y>]`. Blank lines are
//! ignored; there are no comments or headers.

use std::path::Path;
use std::str::FromStr;

use glam::Vec3;

use crate::animation::clip::{AnimationClip, Keyframe, NodeDelta};
use crate::animation::settings::ClipSettings;
use crate::errors::{AnimationError, Result};

const TIMESTAMP_MARKER: &str = "ts";

/// Parses SAF text into [`AnimationClip`]s using fixed [`ClipSettings`].
#[derive(Debug, Clone, Default)]
pub struct ClipLoader {
    settings: ClipSettings,
}

impl ClipLoader {
    pub fn new(settings: ClipSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    #[must_use]
    pub fn settings(&self) -> &ClipSettings {
        &self.settings
    }

    /// Reads and parses a clip file. The clip is named after the file stem.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<AnimationClip> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        self.parse(name, &text)
    }

    pub fn parse(&self, name: impl Into<String>, text: &str) -> Result<AnimationClip> {
        let name = name.into();
        let mut keyframes: Vec<Keyframe> = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let fields: Vec<&str> = raw.split_whitespace().collect();
            let Some(&first) = fields.first() else {
                continue;
            };

            if first == TIMESTAMP_MARKER {
                if fields.len() != 2 {
                    return Err(AnimationError::FieldCount {
                        line,
                        expected: "2 (`ts <time-point>`)",
                        found: fields.len(),
                    });
                }
                let time_point = parse_u32(fields[1], line, "time-point")?;
                if let Some(prev) = keyframes.last() {
                    if time_point < prev.time_point {
                        return Err(AnimationError::UnsortedKeyframes {
                            line,
                            previous: prev.time_point,
                            current: time_point,
                        });
                    }
                    if prev.deltas().is_empty() {
                        log::warn!(
                            "Clip `{name}`: keyframe at time-point {} has no node deltas",
                            prev.time_point
                        );
                    }
                }
                keyframes.push(Keyframe::new(time_point));
                continue;
            }

            let Some(keyframe) = keyframes.last_mut() else {
                return Err(AnimationError::MissingTimestamp { line });
            };
            let delta = parse_delta(&fields, line)?;
            if !keyframe.insert(delta) {
                return Err(AnimationError::DuplicateNode {
                    line,
                    node: delta.node,
                });
            }
        }

        let clip = AnimationClip::new(name, keyframes, self.settings)?;
        log::debug!(
            "Loaded clip `{}`: {} keyframes, duration {:.3}s",
            clip.name,
            clip.keyframes().len(),
            clip.duration()
        );
        Ok(clip)
    }
}

impl FromStr for AnimationClip {
    type Err = AnimationError;

    /// Parses with default settings and an empty name.
    fn from_str(s: &str) -> Result<Self> {
        ClipLoader::default().parse(String::new(), s)
    }
}

fn parse_delta(fields: &[&str], line: usize) -> Result<NodeDelta> {
    if !(4..=5).contains(&fields.len()) {
        return Err(AnimationError::FieldCount {
            line,
            expected: "4 or 5 (`<node> <tx> <ty> <tz> [<rot_y>]`)",
            found: fields.len(),
        });
    }

    let node = parse_usize(fields[0], line, "node index")?;
    let translation = Vec3::new(
        parse_f32(fields[1], line, "translation x")?,
        parse_f32(fields[2], line, "translation y")?,
        parse_f32(fields[3], line, "translation z")?,
    );
    let rotation_y = match fields.get(4) {
        Some(field) => parse_f32(field, line, "rotation y")?,
        None => 0.0,
    };

    Ok(NodeDelta::new(node, translation, rotation_y))
}

fn parse_u32(value: &str, line: usize, field: &'static str) -> Result<u32> {
    value
        .parse()
        .map_err(|source| AnimationError::InvalidInteger {
            line,
            field,
            value: value.to_owned(),
            source,
        })
}

fn parse_usize(value: &str, line: usize, field: &'static str) -> Result<usize> {
    value
        .parse()
        .map_err(|source| AnimationError::InvalidInteger {
            line,
            field,
            value: value.to_owned(),
            source,
        })
}

fn parse_f32(value: &str, line: usize, field: &'static str) -> Result<f32> {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(AnimationError::InvalidFloat {
            line,
            field,
            value: value.to_owned(),
            source: None,
        }),
        Err(source) => Err(AnimationError::InvalidFloat {
            line,
            field,
            value: value.to_owned(),
            source: Some(source),
        }),
    }
}
