//! Direct-manipulation drag logic.
//!
//! The viewer surface hands us a world-space pointer ray and the pose
//! as it currently stands; everything here is a pure function of those
//! two, so the whole interaction model is testable without a canvas.
//! Geometric degeneracies (ray misses the orbit sphere, projection
//! denominator near zero) are silent no-ops that keep the previous
//! valid pose.

use crate::constants::{PICK_HANDLE_RADIUS, PROJECTION_EPSILON, VISUAL_SCALE};
use crate::geometry::{position_of, zoom_handle_position};
use crate::pose::SphericalPose;
use glam::Vec3;

/// World-space pointer ray supplied by the rendering surface.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }
}

/// Nearest non-negative hit distance of `ray` against a sphere, or
/// `None` on a miss.
#[inline]
pub fn ray_sphere(ray: Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Which pickable primitive a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    CameraHandle,
    ZoomHandle,
}

/// Test the pointer ray against both handle spheres; the nearer hit
/// wins when both are under the cursor.
pub fn pick(pose: &SphericalPose, ray: Ray) -> Option<PickTarget> {
    let cam_t = ray_sphere(ray, position_of(pose), PICK_HANDLE_RADIUS);
    let zoom_t = ray_sphere(ray, zoom_handle_position(pose), PICK_HANDLE_RADIUS);
    match (cam_t, zoom_t) {
        (Some(a), Some(b)) => Some(if a <= b {
            PickTarget::CameraHandle
        } else {
            PickTarget::ZoomHandle
        }),
        (Some(_), None) => Some(PickTarget::CameraHandle),
        (None, Some(_)) => Some(PickTarget::ZoomHandle),
        (None, None) => None,
    }
}

/// Drag state. Exists only between a pointer-down and the matching
/// pointer-up or pointer-leave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Idle,
    Orbiting,
    Zooming,
}

/// One pointer-move step: (current pose, active mode, pointer ray) to
/// an updated pose, or `None` when the move should be ignored.
pub fn drag_step(pose: &SphericalPose, mode: DragMode, ray: Ray) -> Option<SphericalPose> {
    match mode {
        DragMode::Idle => None,
        DragMode::Orbiting => orbit_step(pose, ray),
        DragMode::Zooming => zoom_step(pose, ray),
    }
}

/// Intersect the pointer ray with the orbit sphere and recover the
/// spherical angles of the hit point. Angles are rounded to whole
/// degrees so the numeric readout stays stable under pointer noise.
fn orbit_step(pose: &SphericalPose, ray: Ray) -> Option<SphericalPose> {
    let radius = pose.distance * VISUAL_SCALE;
    let t = ray_sphere(ray, Vec3::ZERO, radius)?;
    let target = ray.origin + ray.dir * t;
    let len = target.length();
    if len < PROJECTION_EPSILON {
        return None;
    }
    let phi = (target.y / len).clamp(-1.0, 1.0).acos();
    let theta = target.x.atan2(target.z);

    let mut azimuth = theta.to_degrees();
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    let elevation = 90.0 - phi.to_degrees();

    Some(
        SphericalPose {
            azimuth: azimuth.round(),
            elevation: elevation.round(),
            ..*pose
        }
        .clamped(),
    )
}

/// Project the pointer ray onto the line through the origin along the
/// current camera direction and take the projected point's distance
/// from the origin as the new semantic distance. Not rounded: distance
/// is displayed with two decimals downstream.
fn zoom_step(pose: &SphericalPose, ray: Ray) -> Option<SphericalPose> {
    let axis = position_of(pose).normalize();
    // Closest-approach parameter between the ray and the zoom axis.
    // With both directions unit length the denominator is 1 - (d.u)^2,
    // which vanishes when the ray is parallel to the axis.
    let b = ray.dir.dot(axis);
    let denom = 1.0 - b * b;
    if denom.abs() < PROJECTION_EPSILON {
        return None;
    }
    let d = ray.dir.dot(ray.origin);
    let e = axis.dot(ray.origin);
    let t = (b * e - d) / denom;
    if !t.is_finite() {
        return None;
    }
    let point = ray.origin + ray.dir * t;
    let distance = point.length() / VISUAL_SCALE;

    Some(
        SphericalPose {
            distance,
            ..*pose
        }
        .clamped(),
    )
}

/// Small wrapper owning the ephemeral drag session.
#[derive(Debug, Default)]
pub struct DragController {
    mode: DragMode,
}

impl DragController {
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Pointer-down: pick a handle and arm the matching mode. Returns
    /// the mode entered so callers can set pointer capture only when a
    /// drag actually started.
    pub fn pointer_down(&mut self, pose: &SphericalPose, ray: Ray) -> DragMode {
        self.mode = match pick(pose, ray) {
            Some(PickTarget::CameraHandle) => DragMode::Orbiting,
            Some(PickTarget::ZoomHandle) => DragMode::Zooming,
            None => DragMode::Idle,
        };
        self.mode
    }

    /// Pointer-move while a drag is active. `None` means leave the
    /// pose untouched for this event.
    pub fn pointer_move(&self, pose: &SphericalPose, ray: Ray) -> Option<SphericalPose> {
        drag_step(pose, self.mode, ray)
    }

    /// Pointer-up or pointer-leave: unconditionally back to idle.
    pub fn pointer_up(&mut self) {
        self.mode = DragMode::Idle;
    }
}
