//! Spatial math: world positions, block positions, and rotations.
//!
//! Rotations use the voxel-game convention: yaw 0 faces +z (south) and grows
//! clockwise seen from above, pitch is positive looking down.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point or direction in world space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    /// East-west axis.
    pub x: f64,
    /// Vertical axis.
    pub y: f64,
    /// North-south axis.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the component for `axis` (0 = x, 1 = y, 2 = z).
    #[must_use]
    pub fn axis(self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns a copy with the component for `axis` replaced.
    #[must_use]
    pub fn with_axis(mut self, axis: usize, value: f64) -> Self {
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
        self
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Floors every component.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Rotation that looks from `self` towards `target`.
    #[must_use]
    pub fn look_at(self, target: Self) -> Rotation {
        let d = target - self;
        let horizontal = d.x.hypot(d.z);
        let yaw = d.z.atan2(d.x).to_degrees() - 90.0;
        let pitch = -d.y.atan2(horizontal).to_degrees();
        Rotation::new(yaw, pitch)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Integer coordinates of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block containing a world position.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing(v: Vec3) -> Self {
        Self::new(v.x.floor() as i32, v.y.floor() as i32, v.z.floor() as i32)
    }

    /// Centre of the block's bottom face.
    #[must_use]
    pub fn bottom_center(self) -> Vec3 {
        Vec3::new(f64::from(self.x) + 0.5, f64::from(self.y), f64::from(self.z) + 0.5)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Yaw and pitch in degrees.
///
/// Both components are always finite: [`Rotation::new`] replaces NaN with
/// zero, wraps yaw into `[-180, 180)` and clamps pitch into `[-90, 90]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    yaw: f64,
    pitch: f64,
}

impl Rotation {
    /// Creates a normalized rotation.
    #[must_use]
    pub fn new(yaw: f64, pitch: f64) -> Self {
        let yaw = if yaw.is_finite() { yaw } else { 0.0 };
        let pitch = if pitch.is_nan() { 0.0 } else { pitch };
        Self {
            yaw: (yaw + 180.0).rem_euclid(360.0) - 180.0,
            pitch: pitch.clamp(-90.0, 90.0),
        }
    }

    /// Horizontal angle in degrees.
    #[must_use]
    pub fn yaw(self) -> f64 {
        self.yaw
    }

    /// Vertical angle in degrees.
    #[must_use]
    pub fn pitch(self) -> f64 {
        self.pitch
    }

    /// Component by index (0 = yaw, 1 = pitch).
    #[must_use]
    pub fn component(self, index: usize) -> f64 {
        if index == 0 { self.yaw } else { self.pitch }
    }

    /// The orthonormal frame used by local (`^`) coordinates.
    #[must_use]
    pub fn local_frame(self) -> LocalFrame {
        let (yaw, pitch) = ((self.yaw + 90.0).to_radians(), (-self.pitch).to_radians());
        let up_pitch = (-self.pitch + 90.0).to_radians();
        let forward = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        let up = Vec3::new(yaw.cos() * up_pitch.cos(), up_pitch.sin(), yaw.sin() * up_pitch.cos());
        let left = -forward.cross(up);
        LocalFrame { forward, up, left }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.yaw, self.pitch)
    }
}

/// Unit axes relative to a rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    /// Direction the rotation looks at.
    pub forward: Vec3,
    /// Perpendicular to forward, towards the top of the view.
    pub up: Vec3,
    /// Perpendicular to both, towards the left of the view.
    pub left: Vec3,
}

impl LocalFrame {
    /// Offsets `origin` by `left`, `up`, `forward` units along this frame.
    #[must_use]
    pub fn offset(&self, origin: Vec3, left: f64, up: f64, forward: f64) -> Vec3 {
        origin + self.left * left + self.up * up + self.forward * forward
    }
}
