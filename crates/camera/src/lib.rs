//! Viewer camera and screen projection.
//!
//! Builds the camera pose from the viewer's location and device attitude,
//! and projects sphere-surface points into normalized/screen coordinates for
//! label placement. The renderer consumes the same pose, which is what keeps
//! markers and labels aligned.

pub mod labels;
pub mod pose;
pub mod transform;

pub use labels::{ScreenLabel, ScreenPoint, ScreenProjector, Viewport, place_labels};
pub use pose::CameraPose;
pub use transform::Mat4;

/// Globe mesh radius in scene units.
pub const GLOBE_RADIUS: f64 = 5.0;
/// Camera sits slightly above the surface so the horizon is visible.
pub const CAMERA_RADIUS: f64 = 5.3;
/// POI markers float just off the surface.
pub const MARKER_RADIUS: f64 = 5.08;

/// Vertical field of view (degrees) and clip planes.
pub const FOV_Y_DEG: f64 = 75.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;
