use std::ops::{Add, AddAssign};

use glam::Vec3;

/// Values that can be blended between two keyframes.
///
/// Implementations use `start * (1 - t) + end * t`, which returns `start`
/// exactly at `t == 0` and `end` exactly at `t == 1`.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

impl Interpolatable for Vec3 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

/// The animated part of a node delta: an offset and a yaw.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub translation: Vec3,
    pub rotation_y: f32,
}

impl Motion {
    pub const ZERO: Self = Self {
        translation: Vec3::ZERO,
        rotation_y: 0.0,
    };

    #[must_use]
    pub const fn new(translation: Vec3, rotation_y: f32) -> Self {
        Self {
            translation,
            rotation_y,
        }
    }
}

impl Interpolatable for Motion {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        Self {
            translation: Vec3::interpolate_linear(start.translation, end.translation, t),
            rotation_y: f32::interpolate_linear(start.rotation_y, end.rotation_y, t),
        }
    }
}

impl Add for Motion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            translation: self.translation + rhs.translation,
            rotation_y: self.rotation_y + rhs.rotation_y,
        }
    }
}

impl AddAssign for Motion {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
