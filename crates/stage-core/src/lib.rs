pub mod constants;
pub mod drag;
pub mod generate;
pub mod geometry;
pub mod pose;
pub mod prompt;

pub use constants::*;
pub use drag::{drag_step, pick, ray_sphere, DragController, DragMode, PickTarget, Ray};
pub use generate::{
    generate_batch, GenerateError, GeneratedImage, ImageGenerator, ReferenceImage, ReferenceImages,
};
pub use geometry::{orientation_of, position_of, zoom_handle_position};
pub use pose::{
    clamp_distance, clamp_elevation, normalize_azimuth, sanitize_field, ShotType, SphericalPose,
};
pub use prompt::{compose, horizontal_label, shot_label, vertical_label, AspectRatio};
