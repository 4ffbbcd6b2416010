// Host-side tests for the three prompt classifiers and the composed
// output string.

use stage_core::pose::{ShotType, SphericalPose};
use stage_core::prompt::*;

#[test]
fn horizontal_sector_boundaries() {
    // Sector boundaries sit at the midpoints between the eight
    // principal directions.
    assert_eq!(horizontal_label(22.4), "Front view");
    assert_eq!(horizontal_label(22.6), "Front-right 45° angle");
    assert_eq!(horizontal_label(0.0), "Front view");
    assert_eq!(horizontal_label(359.9), "Front view");
    assert_eq!(horizontal_label(337.4), "Front-left 315° angle");
    assert_eq!(horizontal_label(337.5), "Front view");
}

#[test]
fn horizontal_sector_centers() {
    let centers = [
        (0.0, "Front view"),
        (45.0, "Front-right 45° angle"),
        (90.0, "Right side view"),
        (135.0, "Back-right 135° angle"),
        (180.0, "Back view"),
        (225.0, "Back-left 225° angle"),
        (270.0, "Left side view"),
        (315.0, "Front-left 315° angle"),
    ];
    for (az, label) in centers {
        assert_eq!(horizontal_label(az), label, "azimuth {az}");
    }
}

#[test]
fn horizontal_label_accepts_unnormalized_azimuth() {
    assert_eq!(horizontal_label(-45.0), horizontal_label(315.0));
    assert_eq!(horizontal_label(450.0), horizontal_label(90.0));
}

#[test]
fn vertical_band_boundaries() {
    // Overhead is strictly above 45; exactly 45 is still a high angle.
    assert_eq!(vertical_label(45.1), "Bird's-eye view from overhead");
    assert_eq!(vertical_label(45.0), "High angle looking down");
    assert_eq!(vertical_label(15.1), "High angle looking down");
    assert_eq!(vertical_label(15.0), "Eye-level horizontal view");
    assert_eq!(vertical_label(0.0), "Eye-level horizontal view");
    assert_eq!(vertical_label(-15.0), "Eye-level horizontal view");
    assert_eq!(vertical_label(-15.1), "Low angle looking up");
}

#[test]
fn shot_labels_are_one_to_one() {
    assert_eq!(shot_label(ShotType::Long), "Wide shot, full subject visible");
    assert_eq!(shot_label(ShotType::Medium), "Medium shot, standard framing");
    assert_eq!(shot_label(ShotType::Close), "Close-up shot, tight framing");
    assert_eq!(shot_label(ShotType::Extreme), "Extreme close-up, macro detail");
}

#[test]
fn aspect_tokens_round_trip() {
    for a in AspectRatio::ALL {
        assert_eq!(AspectRatio::from_token(a.token()), Some(a));
    }
    assert_eq!(AspectRatio::from_token("21:9"), None);
}

#[test]
fn composed_prompt_for_front_eye_level_medium() {
    // End-to-end scenario from the front at eye level.
    let pose = SphericalPose {
        azimuth: 0.0,
        elevation: 0.0,
        distance: 1.0,
        shot: ShotType::Medium,
    };
    let s = compose(&pose, AspectRatio::Square);
    assert!(s.contains("Front view (0°)"), "{s}");
    assert!(s.contains("Eye-level horizontal view"), "{s}");
    assert!(s.contains("(pitch 0°)"), "{s}");
    assert!(s.contains("Medium shot, standard framing"), "{s}");
    assert!(s.contains(STUDIO_BOILERPLATE), "{s}");
    assert!(s.contains("1:1 aspect ratio"), "{s}");
}

#[test]
fn composed_prompt_embeds_rounded_numeric_angles() {
    let pose = SphericalPose {
        azimuth: 224.6,
        elevation: -15.4,
        distance: 0.7,
        shot: ShotType::Close,
    };
    let s = compose(&pose, AspectRatio::Wide);
    assert!(s.contains("(225°)"), "{s}");
    assert!(s.contains("(pitch -15°)"), "{s}");
    assert!(s.contains("Close-up shot, tight framing"), "{s}");
    assert!(s.contains("16:9 aspect ratio"), "{s}");
}
