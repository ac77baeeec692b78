use catalog::{Poi, PoiKind};
use foundation::Attitude;
use foundation::math::{GeoPoint, angular_separation_deg, distance_km};

use crate::select::SelectionState;

/// A POI standing at the viewer's own position is excluded outright.
const SELF_EXCLUSION_KM: f64 = 20.0;

/// Horizon band: nearby POIs, scored with a linear falloff.
const HORIZON_KM: f64 = 2000.0;
const HORIZON_MAX: f64 = 50.0;

/// Antipodal band: far enough to be "through the Earth".
const ANTIPODAL_KM: f64 = 10_000.0;
const ANTIPODAL_MAX: f64 = 100.0;
/// Population factor for entries without population data.
const ANTIPODAL_DEFAULT_POP_FACTOR: f64 = 0.3;

/// Mid-range band only surfaces very large cities.
const MAJOR_CITY_POP: u64 = 10_000_000;
const MAJOR_CITY_POP_SCALE: f64 = 40_000_000.0;
const MAJOR_CITY_MAX: f64 = 20.0;

const SAME_COUNTRY_BONUS: f64 = 40.0;
const LANDMARK_BONUS: f64 = 10.0;

/// View-direction modulation: boost inside this cone...
const VIEW_BOOST_DEG: f64 = 60.0;
/// ...penalize behind the viewer.
const VIEW_BEHIND_DEG: f64 = 120.0;
const VIEW_BEHIND_FACTOR: f64 = 0.3;

/// Retention bonus for a POI selected last pass and still roughly in view.
/// Large enough to dominate every other term.
const STICKINESS_BONUS: f64 = 200.0;
const STICKINESS_MAX_VIEW_DEG: f64 = 90.0;

/// Scoring result for one POI.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PoiScore {
    pub score: f64,
    pub distance_km: f64,
    pub is_horizon: bool,
    pub is_antipodal: bool,
    /// Angle between the approximate view center and the POI (degrees).
    /// Transient: consumed by the stickiness rule, not part of the output
    /// contract.
    pub view_angle_deg: f64,
}

/// Approximate geographic point the viewer is facing.
///
/// Pitch tilts the center along latitude, yaw along longitude, each damped by
/// half. Crude, but it only drives coarse cone tests (60°/90°/120°), not
/// projection.
pub fn view_center(viewer: GeoPoint, attitude: Attitude) -> GeoPoint {
    GeoPoint::new(
        viewer.lat_deg + (-attitude.beta_rad.to_degrees()) * 0.5,
        viewer.lng_deg + attitude.alpha_rad.to_degrees() * 0.5,
    )
}

/// Score one POI.
///
/// Additive terms (horizon, antipodal, mid-range major city, same country,
/// landmark type) accumulate first; the view-direction factor then scales the
/// sum; the stickiness bonus lands last so retention survives the
/// behind-viewer penalty.
pub fn score_poi(
    poi: &Poi,
    viewer: GeoPoint,
    view_center: GeoPoint,
    home_country: Option<&str>,
    previous: &SelectionState,
) -> PoiScore {
    let distance = distance_km(viewer, poi.location());
    let view_angle_deg = angular_separation_deg(view_center, poi.location());

    if distance < SELF_EXCLUSION_KM {
        return PoiScore {
            score: 0.0,
            distance_km: distance,
            is_horizon: false,
            is_antipodal: false,
            view_angle_deg,
        };
    }

    let mut score = 0.0;
    let mut is_horizon = false;
    let mut is_antipodal = false;

    if distance < HORIZON_KM {
        score += (1.0 - distance / HORIZON_KM) * HORIZON_MAX;
        is_horizon = true;
    }

    if distance > ANTIPODAL_KM {
        let antipode_factor = ((distance - ANTIPODAL_KM) / ANTIPODAL_KM).min(1.0);
        let population_factor = match poi.population {
            Some(pop) => (pop as f64).log10() / 8.0,
            None => ANTIPODAL_DEFAULT_POP_FACTOR,
        };
        score += antipode_factor * population_factor * ANTIPODAL_MAX;
        is_antipodal = true;
    }

    if (HORIZON_KM..=ANTIPODAL_KM).contains(&distance)
        && let Some(pop) = poi.population
        && pop > MAJOR_CITY_POP
    {
        score += pop as f64 / MAJOR_CITY_POP_SCALE * MAJOR_CITY_MAX;
    }

    if home_country.is_some_and(|home| poi.country == home) {
        score += SAME_COUNTRY_BONUS;
    }

    if matches!(poi.kind, PoiKind::Landmark | PoiKind::Natural) {
        score += LANDMARK_BONUS;
    }

    if view_angle_deg < VIEW_BOOST_DEG {
        score *= 1.0 + (1.0 - view_angle_deg / VIEW_BOOST_DEG);
    } else if view_angle_deg > VIEW_BEHIND_DEG {
        score *= VIEW_BEHIND_FACTOR;
    }

    if previous.contains(&poi.id) && view_angle_deg < STICKINESS_MAX_VIEW_DEG {
        score += STICKINESS_BONUS;
    }

    PoiScore {
        score,
        distance_km: distance,
        is_horizon,
        is_antipodal,
        view_angle_deg,
    }
}
