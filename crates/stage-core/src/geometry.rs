//! Pure pose-to-world conversion: where the staged camera sits and how
//! it faces the subject at the origin.

use crate::constants::{VISUAL_SCALE, ZOOM_HANDLE_FRACTION};
use crate::pose::SphericalPose;
use glam::{Mat3, Quat, Vec3};

/// World-space position of the staged camera.
///
/// Elevation is measured from the horizon, so the polar angle from +Y
/// is `90 - elevation`. Azimuth 0 looks down +Z.
pub fn position_of(pose: &SphericalPose) -> Vec3 {
    let phi = (90.0 - pose.elevation).to_radians();
    let theta = pose.azimuth.to_radians();
    let radius = pose.distance * VISUAL_SCALE;
    Vec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    )
}

/// Rotation looking from `position` at the origin with world-up +Y.
///
/// Built as a plain orthonormal basis so it stays testable with vector
/// arithmetic: the camera's -Z axis points at the origin. The clamped
/// distance range keeps `position` away from the origin, so the basis
/// never degenerates there; a camera exactly on the Y axis is excluded
/// by the elevation range.
pub fn orientation_of(position: Vec3) -> Quat {
    let back = position.normalize();
    let right = Vec3::Y.cross(back).normalize();
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// World-space position of the distance (zoom) handle, sitting part way
/// along the subject-to-camera axis.
pub fn zoom_handle_position(pose: &SphericalPose) -> Vec3 {
    position_of(pose) * ZOOM_HANDLE_FRACTION
}
