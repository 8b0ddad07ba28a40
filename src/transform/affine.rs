//! Elementary 4x4 homogeneous transforms.

use crate::{
    command::model::Axis,
    foundation::core::{Mat4, Vec3},
};

#[inline]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

#[inline]
pub fn translate(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

#[inline]
pub fn scale(factors: Vec3) -> Mat4 {
    Mat4::from_scale(factors)
}

/// Rotation about a principal axis; `degrees` is converted to radians here.
pub fn rotate(axis: Axis, degrees: f64) -> Mat4 {
    let theta = degrees.to_radians();
    match axis {
        Axis::X => Mat4::from_rotation_x(theta),
        Axis::Y => Mat4::from_rotation_y(theta),
        Axis::Z => Mat4::from_rotation_z(theta),
    }
}

/// `current * local`: `local` is applied to points first, then `current`.
#[inline]
pub fn compose(current: Mat4, local: Mat4) -> Mat4 {
    current * local
}

pub fn transform_points(m: &Mat4, points: &mut [Vec3]) {
    for p in points {
        *p = m.transform_point3(*p);
    }
}
