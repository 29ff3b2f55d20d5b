//! Plane projections and rotation helpers shared by movement behaviors.
//!
//! Behaviors frequently work on a 2-D slice of 3-D space (a side-scroller
//! moves in XY, a top-down game in XZ).  [`Plane`] names the slice and
//! converts between the 3-D vector and its 2-D coordinates.

use glam::{Mat3, Quat, Vec2, Vec3};

/// One of the three axis-aligned planes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// 2-D coordinates of `v` within this plane.
    #[inline]
    pub fn project(self, v: Vec3) -> Vec2 {
        match self {
            Plane::XY => Vec2::new(v.x, v.y),
            Plane::XZ => Vec2::new(v.x, v.z),
            Plane::YZ => Vec2::new(v.y, v.z),
        }
    }

    /// Lift plane coordinates back to 3-D, zeroing the normal axis.
    #[inline]
    pub fn embed(self, v: Vec2) -> Vec3 {
        match self {
            Plane::XY => Vec3::new(v.x, v.y, 0.0),
            Plane::XZ => Vec3::new(v.x, 0.0, v.y),
            Plane::YZ => Vec3::new(0.0, v.x, v.y),
        }
    }

    /// `v` with its component along the plane normal removed.
    #[inline]
    pub fn flatten(self, v: Vec3) -> Vec3 {
        self.embed(self.project(v))
    }
}

/// Snap an analog axis value to `-1`, `0` or `1`.
#[inline]
pub fn snap_axis(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `true` when every component of `v` lies strictly inside `(-eps, eps)`.
#[inline]
pub fn within_deadzone(v: Vec3, eps: f32) -> bool {
    v.x.abs() < eps && v.y.abs() < eps && v.z.abs() < eps
}

/// Normalized `v`, or zero when `v` has no usable length.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Rotation whose +Z axis points along `forward` and whose +Y axis is as close
/// to `up` as possible.
///
/// Falls back to the shortest arc from +Z when `forward` is parallel to `up`.
/// Returns identity for a zero `forward`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    match up.cross(z).try_normalize() {
        Some(x) => {
            let y = z.cross(x);
            Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
        }
        None => Quat::from_rotation_arc(Vec3::Z, z),
    }
}
