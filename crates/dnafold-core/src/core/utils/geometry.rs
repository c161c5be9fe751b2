use crate::core::models::rotation_table::AngleSet;
use nalgebra::{Matrix4, Point3};

/// Rise between two consecutive base pairs along the local helix axis.
pub const RISE: f64 = 3.38;

/// Translation by half a rise down the local z axis.
pub fn half_rise_translation() -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, -RISE / 2.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about z by half of `twist_degrees`.
pub fn half_twist_rotation(twist_degrees: f64) -> Matrix4<f64> {
    let half = twist_degrees.to_radians() / 2.0;
    let (s, c) = half.sin_cos();
    Matrix4::new(
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Wedge rotation about the in-plane axis selected by `direction - 90°`.
///
/// Built as a z rotation onto the axis, an x rotation by the wedge angle, and the
/// inverse z rotation back.
pub fn tilt_rotation(wedge_degrees: f64, direction_degrees: f64) -> Matrix4<f64> {
    let alpha = wedge_degrees.to_radians();
    let beta = (direction_degrees - 90.0).to_radians();
    let (sb, cb) = beta.sin_cos();
    let (sa, ca) = alpha.sin_cos();

    let to_axis = Matrix4::new(
        cb, -sb, 0.0, 0.0, //
        sb, cb, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    let wedge = Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, ca, -sa, 0.0, //
        0.0, sa, ca, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    let from_axis = Matrix4::new(
        cb, sb, 0.0, 0.0, //
        -sb, cb, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    to_axis * wedge * from_axis
}

/// Full transform of one dinucleotide step: `T · Rz · Q · Rz · T`.
pub fn step_transform(angles: &AngleSet) -> Matrix4<f64> {
    let t = half_rise_translation();
    let rz = half_twist_rotation(angles.twist);
    let q = tilt_rotation(angles.wedge, angles.direction);
    t * rz * q * rz * t
}

/// Applies a homogeneous transform to the origin.
#[inline]
pub fn transform_origin(transform: &Matrix4<f64>) -> Point3<f64> {
    Point3::new(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)])
}
