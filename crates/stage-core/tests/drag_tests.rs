// Host-side tests for the drag state machine and the two pointer-move
// algorithms. Rays are built by hand; no rendering surface involved.

use glam::Vec3;
use stage_core::constants::VISUAL_SCALE;
use stage_core::drag::*;
use stage_core::geometry::{position_of, zoom_handle_position};
use stage_core::pose::{ShotType, SphericalPose};

fn pose(azimuth: f32, elevation: f32, distance: f32) -> SphericalPose {
    SphericalPose {
        azimuth,
        elevation,
        distance,
        shot: ShotType::Medium,
    }
}

// A ray from far outside aimed straight at `point`.
fn ray_at(point: Vec3, from: Vec3) -> Ray {
    Ray::new(from, point - from)
}

#[test]
fn ray_sphere_hit_and_miss() {
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);
    let t = ray_sphere(ray, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(t.is_some());
    assert!((t.unwrap() - 3.0).abs() < 1e-4);

    let miss = Ray::new(Vec3::ZERO, Vec3::X);
    assert!(ray_sphere(miss, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_sphere_behind_origin_is_rejected() {
    // Sphere entirely behind the ray origin.
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
    assert!(ray_sphere(ray, Vec3::ZERO, 2.0).is_none());
}

#[test]
fn orbit_ray_through_side_point_recovers_90_0() {
    // Ray passing through the sphere point for azimuth=90,
    // elevation=0 must land the pose there (within rounding).
    let p = pose(45.0, 35.0, 1.0);
    let side = Vec3::new(VISUAL_SCALE, 0.0, 0.0);
    let ray = Ray::new(Vec3::new(6.0, 0.0, 0.0), Vec3::NEG_X);
    let updated = drag_step(&p, DragMode::Orbiting, ray).expect("ray should hit the orbit sphere");
    assert!((updated.azimuth - 90.0).abs() <= 1.0, "azimuth {}", updated.azimuth);
    assert!(updated.elevation.abs() <= 1.0, "elevation {}", updated.elevation);
    // Distance and shot are untouched by orbiting.
    assert_eq!(updated.distance, p.distance);
    assert_eq!(updated.shot, p.shot);
    // Sanity: the aim point really is on the orbit sphere.
    assert!((side.length() - p.distance * VISUAL_SCALE).abs() < 1e-4);
}

#[test]
fn orbit_angles_are_rounded_to_whole_degrees() {
    let p = pose(0.0, 0.0, 1.0);
    // Hit the sphere slightly off the +Z pole so the recovered angles
    // are fractional before rounding.
    let hit = Vec3::new(0.31, 0.47, 2.4).normalize() * VISUAL_SCALE;
    let ray = ray_at(hit, hit * 4.0);
    let updated = drag_step(&p, DragMode::Orbiting, ray).expect("hit");
    assert_eq!(updated.azimuth, updated.azimuth.round());
    assert_eq!(updated.elevation, updated.elevation.round());
}

#[test]
fn orbit_miss_is_a_no_op() {
    let p = pose(45.0, 35.0, 1.0);
    // Outward-pointing ray that can never touch the orbit sphere.
    let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X);
    assert!(drag_step(&p, DragMode::Orbiting, ray).is_none());
}

#[test]
fn orbit_clamps_elevation_at_the_poles() {
    let p = pose(0.0, 0.0, 1.0);
    // Ray straight down through the top of the sphere recovers an
    // elevation near 90, which must clamp to 60.
    let ray = Ray::new(Vec3::new(0.0, 6.0, 0.001), Vec3::NEG_Y);
    let updated = drag_step(&p, DragMode::Orbiting, ray).expect("hit");
    assert_eq!(updated.elevation, 60.0);
}

#[test]
fn zoom_projects_pointer_onto_camera_axis() {
    // Camera at azimuth 0 sits on +Z; its axis is the Z axis. A ray
    // sweeping in X passes the axis closest at (0, 0, 3), i.e. a
    // semantic distance of 3 / VISUAL_SCALE = 1.2.
    let p = pose(0.0, 0.0, 1.0);
    let ray = Ray::new(Vec3::new(3.0, 0.0, 3.0), Vec3::NEG_X);
    let updated = drag_step(&p, DragMode::Zooming, ray).expect("projection is well posed");
    assert!((updated.distance - 1.2).abs() < 1e-4, "distance {}", updated.distance);
    // Angles are untouched by zooming.
    assert_eq!(updated.azimuth, p.azimuth);
    assert_eq!(updated.elevation, p.elevation);
}

#[test]
fn zoom_distance_is_not_integer_rounded() {
    let p = pose(0.0, 0.0, 1.0);
    let ray = Ray::new(Vec3::new(3.0, 0.0, 3.12), Vec3::NEG_X);
    let updated = drag_step(&p, DragMode::Zooming, ray).expect("hit");
    assert!((updated.distance - 3.12 / VISUAL_SCALE).abs() < 1e-4);
}

#[test]
fn zoom_clamps_into_semantic_range() {
    let p = pose(0.0, 0.0, 1.0);
    // Closest approach far beyond the range: clamps to 1.4.
    let far = Ray::new(Vec3::new(3.0, 0.0, 20.0), Vec3::NEG_X);
    assert_eq!(drag_step(&p, DragMode::Zooming, far).unwrap().distance, 1.4);
    // Closest approach at the origin: clamps to 0.6.
    let near = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_X);
    assert_eq!(drag_step(&p, DragMode::Zooming, near).unwrap().distance, 0.6);
}

#[test]
fn zoom_ray_parallel_to_axis_is_a_no_op() {
    // A ray parallel to the camera axis has no unique closest point;
    // the documented fallback is to ignore the move.
    let p = pose(0.0, 0.0, 1.0);
    let ray = Ray::new(Vec3::new(1.0, 0.0, 10.0), Vec3::NEG_Z);
    assert!(drag_step(&p, DragMode::Zooming, ray).is_none());
}

#[test]
fn idle_mode_never_updates_the_pose() {
    let p = pose(45.0, 35.0, 1.0);
    let ray = ray_at(position_of(&p), position_of(&p) * 3.0);
    assert!(drag_step(&p, DragMode::Idle, ray).is_none());
}

#[test]
fn pick_prefers_the_nearer_handle() {
    // Both handles sit on the subject-to-camera axis, so a ray along
    // that axis from outside hits the camera handle first.
    let p = pose(45.0, 35.0, 1.0);
    let cam = position_of(&p);
    let ray = ray_at(cam, cam * 3.0);
    assert_eq!(pick(&p, ray), Some(PickTarget::CameraHandle));
}

#[test]
fn pick_finds_the_zoom_handle_off_axis() {
    // Approach the zoom handle perpendicular to the camera axis so the
    // camera handle stays well clear of the ray.
    let p = pose(45.0, 35.0, 1.0);
    let handle = zoom_handle_position(&p);
    let axis = position_of(&p).normalize();
    let side = axis.cross(Vec3::Y).normalize();
    let ray = ray_at(handle, handle + side * 5.0);
    assert_eq!(pick(&p, ray), Some(PickTarget::ZoomHandle));
}

#[test]
fn pick_misses_empty_space() {
    let p = pose(45.0, 35.0, 1.0);
    let ray = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::Y);
    assert_eq!(pick(&p, ray), None);
}

#[test]
fn controller_walks_the_state_machine() {
    let p = pose(45.0, 35.0, 1.0);
    let cam = position_of(&p);
    let mut ctl = DragController::default();
    assert_eq!(ctl.mode(), DragMode::Idle);

    // Down on the camera handle arms orbiting.
    let down = ray_at(cam, cam * 3.0);
    assert_eq!(ctl.pointer_down(&p, down), DragMode::Orbiting);

    // Moves while orbiting produce updated poses.
    let side = Ray::new(Vec3::new(6.0, 0.0, 0.0), Vec3::NEG_X);
    let moved = ctl.pointer_move(&p, side).expect("orbit move");
    assert!((moved.azimuth - 90.0).abs() <= 1.0);

    // Release resets unconditionally; further moves are no-ops.
    ctl.pointer_up();
    assert_eq!(ctl.mode(), DragMode::Idle);
    assert!(ctl.pointer_move(&p, side).is_none());
}

#[test]
fn controller_down_on_empty_space_stays_idle() {
    let p = pose(45.0, 35.0, 1.0);
    let mut ctl = DragController::default();
    let ray = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::Y);
    assert_eq!(ctl.pointer_down(&p, ray), DragMode::Idle);
    assert!(ctl.pointer_move(&p, ray).is_none());
}

#[test]
fn controller_down_on_zoom_handle_arms_zooming() {
    let p = pose(0.0, 0.0, 1.0);
    let handle = zoom_handle_position(&p); // (0, 0, 1.75)
    let mut ctl = DragController::default();
    let down = ray_at(handle, Vec3::new(5.0, 0.0, 1.75));
    assert_eq!(ctl.pointer_down(&p, down), DragMode::Zooming);
}
