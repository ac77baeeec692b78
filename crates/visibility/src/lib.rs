//! Visibility ranking and selection.
//!
//! Scores every catalog POI against the viewer's position and facing
//! direction, then reduces the scored set to a bounded, spatially separated
//! display list that stays stable across repeated passes.

pub mod score;
pub mod select;

pub use score::{PoiScore, score_poi, view_center};
pub use select::{ScoredPoi, SelectionState, select_visible};

/// Display budget: at most this many POIs are selected per pass.
pub const MAX_VISIBLE: usize = 15;

/// Minimum pairwise angular separation between selected POIs (degrees, in the
/// km-linear approximation of `angular_separation_deg`).
pub const MIN_SEPARATION_DEG: f64 = 10.0;
