//! Camera pose types shared between the core logic and the web viewer.
//!
//! A pose is three scalars plus a framing tag. Every mutation source
//! (sliders, preset buttons, keyboard nudges, drag output) funnels
//! through [`SphericalPose::clamped`] so the domain invariants hold no
//! matter who wrote the candidate values.

use crate::constants::{
    DEFAULT_AZIMUTH, DEFAULT_DISTANCE, DEFAULT_ELEVATION, DISTANCE_MAX, DISTANCE_MIN,
    ELEVATION_MAX, ELEVATION_MIN,
};

/// Discrete framing preset. Selecting one also suggests a canonical
/// distance, but after that overwrite the two fields are independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotType {
    Long,
    Medium,
    Close,
    Extreme,
}

impl ShotType {
    /// Canonical distance applied when the tag is selected.
    pub fn preset_distance(self) -> f32 {
        match self {
            ShotType::Long => 1.4,
            ShotType::Medium => 1.0,
            ShotType::Close => 0.7,
            ShotType::Extreme => 0.5,
        }
    }

    /// Stable id used for DOM element lookup and keyboard selection.
    pub fn id(self) -> &'static str {
        match self {
            ShotType::Long => "long",
            ShotType::Medium => "medium",
            ShotType::Close => "close",
            ShotType::Extreme => "extreme",
        }
    }

    pub fn from_id(id: &str) -> Option<ShotType> {
        match id {
            "long" => Some(ShotType::Long),
            "medium" => Some(ShotType::Medium),
            "close" => Some(ShotType::Close),
            "extreme" => Some(ShotType::Extreme),
            _ => None,
        }
    }

    pub const ALL: [ShotType; 4] = [
        ShotType::Long,
        ShotType::Medium,
        ShotType::Close,
        ShotType::Extreme,
    ];
}

/// Full camera state: horizontal orbit angle, vertical tilt, semantic
/// camera-to-subject distance and the framing tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalPose {
    /// Degrees, always reduced into [0, 360).
    pub azimuth: f32,
    /// Degrees, always within [-30, 60].
    pub elevation: f32,
    /// Unitless scale factor, always within [0.6, 1.4].
    pub distance: f32,
    pub shot: ShotType,
}

impl Default for SphericalPose {
    fn default() -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            elevation: DEFAULT_ELEVATION,
            distance: DEFAULT_DISTANCE,
            shot: ShotType::Medium,
        }
    }
}

impl SphericalPose {
    /// Enforce all domain invariants on a candidate pose. This is the
    /// single funnel for every mutation source.
    pub fn clamped(self) -> Self {
        Self {
            azimuth: normalize_azimuth(self.azimuth),
            elevation: clamp_elevation(self.elevation),
            distance: clamp_distance(self.distance),
            shot: self.shot,
        }
    }

    /// Select a framing tag, overwriting distance with its preset.
    pub fn with_shot(self, shot: ShotType) -> Self {
        Self {
            shot,
            distance: shot.preset_distance(),
            ..self
        }
        .clamped()
    }
}

/// Reduce an azimuth into [0, 360). Works for any finite input,
/// including large negative angles.
pub fn normalize_azimuth(az: f32) -> f32 {
    let r = az % 360.0;
    if r < 0.0 {
        r + 360.0
    } else {
        r
    }
}

pub fn clamp_elevation(el: f32) -> f32 {
    el.clamp(ELEVATION_MIN, ELEVATION_MAX)
}

pub fn clamp_distance(d: f32) -> f32 {
    d.clamp(DISTANCE_MIN, DISTANCE_MAX)
}

/// Sanitize a free-text numeric field: unparseable text reverts to the
/// last valid value, out-of-range numbers clamp rather than reject.
pub fn sanitize_field(text: &str, last: f32, lo: f32, hi: f32) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v.clamp(lo, hi),
        _ => last,
    }
}
