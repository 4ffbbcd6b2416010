// Host-side tests for the pure pose-to-world conversion.

use glam::Vec3;
use stage_core::constants::VISUAL_SCALE;
use stage_core::geometry::*;
use stage_core::pose::{ShotType, SphericalPose};

fn pose(azimuth: f32, elevation: f32, distance: f32) -> SphericalPose {
    SphericalPose {
        azimuth,
        elevation,
        distance,
        shot: ShotType::Medium,
    }
}

#[test]
fn position_at_zero_angles_sits_on_positive_z() {
    // Azimuth 0, elevation 0 is straight ahead on the +Z axis.
    let p = position_of(&pose(0.0, 0.0, 1.0));
    assert!((p.x).abs() < 1e-5);
    assert!((p.y).abs() < 1e-5);
    assert!((p.z - VISUAL_SCALE).abs() < 1e-5);
}

#[test]
fn position_radius_tracks_distance() {
    for d in [0.6, 0.85, 1.0, 1.4] {
        let p = position_of(&pose(123.0, 20.0, d));
        assert!(
            (p.length() - d * VISUAL_SCALE).abs() < 1e-4,
            "radius for distance {d} was {}",
            p.length()
        );
    }
}

#[test]
fn position_height_follows_elevation() {
    // y = radius * sin(elevation) since the polar angle is measured
    // from the pole as 90 - elevation.
    let p = position_of(&pose(45.0, 30.0, 1.0));
    let expected_y = VISUAL_SCALE * 30.0f32.to_radians().sin();
    assert!((p.y - expected_y).abs() < 1e-4);
}

#[test]
fn position_round_trips_through_spherical_recovery() {
    // Recover (azimuth, elevation) from the computed position across
    // the full pose domain and compare against the inputs.
    for az in [0.0f32, 10.0, 45.0, 90.0, 179.0, 180.0, 270.0, 359.0] {
        for el in [-30.0f32, -15.0, 0.0, 35.0, 60.0] {
            for d in [0.6f32, 1.0, 1.4] {
                let p = position_of(&pose(az, el, d));
                let len = p.length();
                let phi = (p.y / len).clamp(-1.0, 1.0).acos();
                let mut rec_az = p.x.atan2(p.z).to_degrees();
                if rec_az < 0.0 {
                    rec_az += 360.0;
                }
                let rec_el = 90.0 - phi.to_degrees();
                let diff = (rec_az - az).abs();
                let az_err = diff.min(360.0 - diff);
                assert!(az_err < 0.01, "azimuth {az} recovered as {rec_az}");
                assert!((rec_el - el).abs() < 0.01, "elevation {el} recovered as {rec_el}");
            }
        }
    }
}

#[test]
fn orientation_looks_at_the_origin() {
    // The rotation's -Z axis must point from the camera to the subject.
    for az in [0.0f32, 60.0, 200.0, 315.0] {
        for el in [-25.0f32, 0.0, 50.0] {
            let position = position_of(&pose(az, el, 1.0));
            let q = orientation_of(position);
            let look = q * Vec3::NEG_Z;
            let expected = (-position).normalize();
            assert!(
                (look - expected).length() < 1e-4,
                "look {look:?} vs expected {expected:?} at az={az} el={el}"
            );
        }
    }
}

#[test]
fn orientation_keeps_world_up_reference() {
    // The camera's up axis should have a non-negative world-Y
    // component everywhere inside the elevation range.
    for el in [-30.0f32, 0.0, 60.0] {
        let position = position_of(&pose(135.0, el, 1.0));
        let q = orientation_of(position);
        let up = q * Vec3::Y;
        assert!(up.y > 0.0, "up {up:?} flipped at elevation {el}");
    }
}

#[test]
fn orientation_is_deterministic() {
    let position = position_of(&pose(222.0, 12.0, 0.9));
    let a = orientation_of(position);
    let b = orientation_of(position);
    assert_eq!(a, b);
}

#[test]
fn zoom_handle_sits_at_fraction_of_camera_position() {
    let p = pose(80.0, 10.0, 1.2);
    let cam = position_of(&p);
    let handle = zoom_handle_position(&p);
    assert!((handle - cam * 0.7).length() < 1e-5);
}
