// Shared staging constants used by both the core logic and the web viewer.

// Pose domains
pub const ELEVATION_MIN: f32 = -30.0; // degrees, below the horizon plane
pub const ELEVATION_MAX: f32 = 60.0;
pub const DISTANCE_MIN: f32 = 0.6; // semantic scale factor, not render units
pub const DISTANCE_MAX: f32 = 1.4;

// Default session pose
pub const DEFAULT_AZIMUTH: f32 = 45.0;
pub const DEFAULT_ELEVATION: f32 = 35.0;
pub const DEFAULT_DISTANCE: f32 = 1.0;

// Render-space scaling
pub const VISUAL_SCALE: f32 = 2.5; // maps semantic distance to world-space orbit radius
pub const ZOOM_HANDLE_FRACTION: f32 = 0.7; // distance handle sits at 0.7x the camera position

// Interaction
pub const PICK_HANDLE_RADIUS: f32 = 0.35; // ray-sphere radius for the camera/zoom handles
pub const PROJECTION_EPSILON: f32 = 1e-6; // below this the zoom projection is degenerate

// Keyboard nudges
pub const NUDGE_DEGREES: f32 = 1.0;
pub const NUDGE_DISTANCE: f32 = 0.05;
