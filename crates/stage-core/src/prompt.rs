//! Pose-to-prompt composition.
//!
//! Three independent classifications (horizontal sector, vertical
//! band, shot type) plus fixed studio boilerplate. The output string
//! is the sole artifact handed to the generation collaborator.

use crate::pose::{ShotType, SphericalPose};

/// Aspect-ratio token passed through to the generation service
/// verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AspectRatio {
    Wide,
    Classic,
    #[default]
    Square,
    Tall,
}

impl AspectRatio {
    pub fn token(self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Classic => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::Tall => "9:16",
        }
    }

    pub fn from_token(token: &str) -> Option<AspectRatio> {
        match token {
            "16:9" => Some(AspectRatio::Wide),
            "4:3" => Some(AspectRatio::Classic),
            "1:1" => Some(AspectRatio::Square),
            "9:16" => Some(AspectRatio::Tall),
            _ => None,
        }
    }

    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Wide,
        AspectRatio::Classic,
        AspectRatio::Square,
        AspectRatio::Tall,
    ];
}

/// Fixed quality boilerplate appended to every composed prompt.
pub const STUDIO_BOILERPLATE: &str =
    "Product photography on a pure white seamless background, soft studio lighting, sharp focus, high detail.";

const HORIZONTAL_LABELS: [&str; 8] = [
    "Front view",
    "Front-right 45° angle",
    "Right side view",
    "Back-right 135° angle",
    "Back view",
    "Back-left 225° angle",
    "Left side view",
    "Front-left 315° angle",
];

/// Classify azimuth into one of eight 45°-wide sectors centered on the
/// principal directions, boundaries at the midpoints (so the front
/// sector is [337.5, 360) plus [0, 22.5)).
pub fn horizontal_label(azimuth: f32) -> &'static str {
    let az = crate::pose::normalize_azimuth(azimuth);
    let sector = (((az + 22.5) / 45.0).floor() as usize) % 8;
    HORIZONTAL_LABELS[sector]
}

/// Classify elevation into one of four vertical bands. Evaluated
/// highest threshold first; overhead is strictly above 45.
pub fn vertical_label(elevation: f32) -> &'static str {
    if elevation > 45.0 {
        "Bird's-eye view from overhead"
    } else if elevation > 15.0 {
        "High angle looking down"
    } else if elevation >= -15.0 {
        "Eye-level horizontal view"
    } else {
        "Low angle looking up"
    }
}

pub fn shot_label(shot: ShotType) -> &'static str {
    match shot {
        ShotType::Long => "Wide shot, full subject visible",
        ShotType::Medium => "Medium shot, standard framing",
        ShotType::Close => "Close-up shot, tight framing",
        ShotType::Extreme => "Extreme close-up, macro detail",
    }
}

/// Compose the full descriptive prompt for the current pose. The
/// numeric yaw/pitch are restated verbatim alongside the classified
/// phrases, followed by the studio boilerplate and the aspect token.
pub fn compose(pose: &SphericalPose, aspect: AspectRatio) -> String {
    let yaw = pose.azimuth.round() as i32;
    let pitch = pose.elevation.round() as i32;
    format!(
        "{horizontal} ({yaw}°), {vertical} (pitch {pitch}°). {shot}. {boilerplate} {token} aspect ratio.",
        horizontal = horizontal_label(pose.azimuth),
        vertical = vertical_label(pose.elevation),
        shot = shot_label(pose.shot),
        boilerplate = STUDIO_BOILERPLATE,
        token = aspect.token(),
    )
}
