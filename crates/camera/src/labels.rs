use foundation::math::{Vec3, sphere_point};
use visibility::ScoredPoi;

use crate::{CameraPose, MARKER_RADIUS, Mat4, transform};

/// Output surface in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width_px / self.height_px
    }
}

/// A projected world point. `in_front` distinguishes real screen positions
/// from the mirror coordinates a behind-camera point produces; `x`/`y` are
/// meaningless when it is false.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub in_front: bool,
}

/// Projects world-space points onto a viewport with a fixed pose.
///
/// Build one per frame and reuse it for every marker; the matrix multiply is
/// the whole cost.
#[derive(Debug, Clone)]
pub struct ScreenProjector {
    view_proj: Mat4,
    viewport: Viewport,
}

impl ScreenProjector {
    pub fn new(pose: &CameraPose, viewport: Viewport) -> Self {
        Self {
            view_proj: transform::view_proj(pose, viewport.aspect()),
            viewport,
        }
    }

    /// Screen coordinates for a world point, y-down from the top-left.
    ///
    /// `None` only for the degenerate eye-plane case; off-screen and
    /// behind-camera points still come back so callers can decide how to
    /// treat them.
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let ndc = self.view_proj.transform_point(world)?;
        Some(ScreenPoint {
            x: (ndc.x + 1.0) / 2.0 * self.viewport.width_px,
            y: (1.0 - ndc.y) / 2.0 * self.viewport.height_px,
            in_front: ndc.z < 1.0,
        })
    }
}

/// Label anchor for one selected POI.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLabel {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// In front of the camera and strictly inside the viewport.
    pub visible: bool,
    pub distance_km: f64,
}

/// Place a label at each POI's marker position.
///
/// Every input POI yields a label, hidden or not, so the caller can keep
/// label widgets alive across frames and just toggle them.
pub fn place_labels(
    pose: &CameraPose,
    viewport: Viewport,
    selected: &[ScoredPoi],
) -> Vec<ScreenLabel> {
    let projector = ScreenProjector::new(pose, viewport);
    selected
        .iter()
        .map(|s| {
            let anchor = sphere_point(s.location(), MARKER_RADIUS);
            let (x, y, visible) = match projector.project(anchor) {
                Some(p) => {
                    let on_screen = p.x > 0.0
                        && p.x < viewport.width_px
                        && p.y > 0.0
                        && p.y < viewport.height_px;
                    (p.x, p.y, p.in_front && on_screen)
                }
                None => (0.0, 0.0, false),
            };
            ScreenLabel {
                id: s.poi.id.clone(),
                x,
                y,
                visible,
                distance_km: s.distance_km,
            }
        })
        .collect()
}
