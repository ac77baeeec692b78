use std::collections::BTreeSet;

use catalog::{Catalog, Poi};
use foundation::Attitude;
use foundation::math::{GeoPoint, angular_separation_deg, stable_total_cmp_f64};

use crate::score::score_poi;
use crate::{MAX_VISIBLE, MIN_SEPARATION_DEG, view_center};

/// Ids selected by the previous pass.
///
/// Owned by the caller and passed into [`select_visible`], which returns the
/// replacement state. Membership is the only contract; iteration is ascending
/// by id for deterministic inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    ids: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// A catalog entry with its per-pass scoring attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoi {
    pub poi: Poi,
    pub score: f64,
    pub distance_km: f64,
    pub is_horizon: bool,
    pub is_antipodal: bool,
    pub view_angle_deg: f64,
}

impl ScoredPoi {
    pub fn location(&self) -> GeoPoint {
        self.poi.location()
    }
}

/// One full ranking pass: score the catalog, pick the display set, and return
/// the replacement selection state.
///
/// Contract:
/// - `location == None` returns an empty list and the previous state
///   unchanged; the catalog is not iterated.
/// - Output is ordered by descending score; ties keep catalog order (stable
///   sort over a deterministic comparator).
/// - Every returned entry has `score > 0`, at most [`MAX_VISIBLE`] entries
///   are returned, and each pair is at least [`MIN_SEPARATION_DEG`] apart.
/// - The returned state holds exactly the returned ids.
///
/// The greedy walk is deliberately order-biased: an accepted POI can shadow a
/// later, lower-scored one inside its exclusion radius. That bias is part of
/// the determinism contract; do not replace it with a globally optimal
/// packing.
pub fn select_visible(
    catalog: &Catalog,
    location: Option<GeoPoint>,
    attitude: Attitude,
    previous: &SelectionState,
) -> (Vec<ScoredPoi>, SelectionState) {
    let Some(viewer) = location else {
        return (Vec::new(), previous.clone());
    };

    let center = view_center(viewer, attitude);
    let home_country = catalog.home_country(viewer);

    let mut scored: Vec<ScoredPoi> = catalog
        .iter()
        .map(|poi| {
            let s = score_poi(poi, viewer, center, home_country, previous);
            ScoredPoi {
                poi: poi.clone(),
                score: s.score,
                distance_km: s.distance_km,
                is_horizon: s.is_horizon,
                is_antipodal: s.is_antipodal,
                view_angle_deg: s.view_angle_deg,
            }
        })
        .collect();

    scored.sort_by(|a, b| stable_total_cmp_f64(b.score, a.score));

    let mut selected: Vec<ScoredPoi> = Vec::with_capacity(MAX_VISIBLE);
    for candidate in scored {
        if selected.len() >= MAX_VISIBLE {
            break;
        }
        if candidate.score <= 0.0 {
            continue;
        }
        let too_close = selected.iter().any(|s| {
            angular_separation_deg(s.location(), candidate.location()) < MIN_SEPARATION_DEG
        });
        if !too_close {
            selected.push(candidate);
        }
    }

    let next = SelectionState::from_ids(selected.iter().map(|s| s.poi.id.clone()));
    (selected, next)
}

#[cfg(test)]
mod tests {
    use super::{SelectionState, select_visible};
    use crate::{MAX_VISIBLE, MIN_SEPARATION_DEG};
    use catalog::{Catalog, Poi, PoiKind, world_catalog};
    use foundation::Attitude;
    use foundation::math::{GeoPoint, angular_separation_deg};

    const TOKYO: GeoPoint = GeoPoint {
        lat_deg: 35.6762,
        lng_deg: 139.6503,
    };
    const GULF_OF_GUINEA: GeoPoint = GeoPoint {
        lat_deg: 0.0,
        lng_deg: 0.0,
    };

    fn city(id: &str, country: &str, population: u64, lat: f64, lng: f64) -> Poi {
        Poi {
            id: id.to_string(),
            name: id.to_string(),
            country: country.to_string(),
            kind: PoiKind::City,
            population: Some(population),
            lat,
            lng,
        }
    }

    #[test]
    fn missing_location_short_circuits() {
        let previous = SelectionState::from_ids(["tokyo".to_string()]);
        let (selected, next) =
            select_visible(world_catalog(), None, Attitude::level(), &previous);
        assert!(selected.is_empty());
        assert_eq!(next, previous);
    }

    #[test]
    fn selection_respects_budget_score_and_separation() {
        for viewer in [
            TOKYO,
            GULF_OF_GUINEA,
            GeoPoint::new(51.5074, -0.1278),
            GeoPoint::new(-33.8688, 151.2093),
        ] {
            let (selected, next) = select_visible(
                world_catalog(),
                Some(viewer),
                Attitude::level(),
                &SelectionState::new(),
            );

            assert!(!selected.is_empty());
            assert!(selected.len() <= MAX_VISIBLE);
            assert!(selected.iter().all(|s| s.score > 0.0));
            assert_eq!(next.len(), selected.len());

            for (i, a) in selected.iter().enumerate() {
                for b in &selected[i + 1..] {
                    let sep = angular_separation_deg(a.location(), b.location());
                    assert!(
                        sep >= MIN_SEPARATION_DEG - 1e-9,
                        "{} and {} only {sep} deg apart",
                        a.poi.id,
                        b.poi.id
                    );
                }
            }

            // Ordered by descending score.
            for pair in selected.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn pass_is_idempotent_for_identical_inputs() {
        let previous = SelectionState::from_ids(["osaka".to_string()]);
        let run = || {
            select_visible(
                world_catalog(),
                Some(TOKYO),
                Attitude::new(0.3, 1.2, -0.1),
                &previous,
            )
        };
        let (a_sel, a_state) = run();
        let (b_sel, b_state) = run();
        assert_eq!(a_sel, b_sel);
        assert_eq!(a_state, b_state);
    }

    #[test]
    fn viewer_in_tokyo_never_sees_tokyo_itself() {
        let (selected, _) = select_visible(
            world_catalog(),
            Some(TOKYO),
            Attitude::level(),
            &SelectionState::new(),
        );
        assert!(selected.iter().all(|s| s.poi.id != "tokyo"));
        // Nearby horizon entries dominate the front of the list.
        assert!(selected.iter().any(|s| s.is_horizon));
        assert!(selected[0].is_horizon);
    }

    #[test]
    fn gulf_of_guinea_surfaces_antipodal_pacific_cities() {
        let (selected, _) = select_visible(
            world_catalog(),
            Some(GULF_OF_GUINEA),
            Attitude::level(),
            &SelectionState::new(),
        );
        let antipodal: Vec<&str> = selected
            .iter()
            .filter(|s| s.is_antipodal)
            .map(|s| s.poi.id.as_str())
            .collect();
        assert!(!antipodal.is_empty());
        assert!(
            selected
                .iter()
                .filter(|s| s.is_antipodal)
                .all(|s| s.distance_km > 10_000.0)
        );
    }

    #[test]
    fn sticky_poi_survives_a_stronger_newcomer() {
        // Two cities far apart so separation never interferes. The viewer
        // faces between them (yaw 170° puts the view center at lng 85°):
        // the incumbent sits ~65° off-view (no boost, no penalty) and the
        // antipodal newcomer ~85° off-view.
        let incumbent = city("incumbent", "A", 400_000, 0.0, 20.0);
        let newcomer = city("newcomer", "B", 35_000_000, 0.0, 170.0);
        let catalog = Catalog::new(vec![incumbent, newcomer]).unwrap();
        let facing_between = Attitude::new(170.0_f64.to_radians(), 0.0, 0.0);

        // Without history the newcomer's antipodal score wins.
        let (fresh, _) = select_visible(
            &catalog,
            Some(GULF_OF_GUINEA),
            facing_between,
            &SelectionState::new(),
        );
        assert_eq!(fresh[0].poi.id, "newcomer");

        // With the incumbent on screen last pass, stickiness keeps it on top.
        let previous = SelectionState::from_ids(["incumbent".to_string()]);
        let (selected, next) =
            select_visible(&catalog, Some(GULF_OF_GUINEA), facing_between, &previous);
        let ids: Vec<&str> = selected.iter().map(|s| s.poi.id.as_str()).collect();
        assert_eq!(ids[0], "incumbent");
        assert!(ids.contains(&"newcomer"));
        assert!(next.contains("incumbent"));
    }

    #[test]
    fn ties_keep_catalog_order() {
        // Two identical landmarks far apart: identical scores, so the earlier
        // catalog entry must come out first on every run.
        let mut first = city("first", "X", 1, 10.0, 60.0);
        first.kind = PoiKind::Landmark;
        first.population = None;
        let mut second = first.clone();
        second.id = "second".to_string();
        second.name = "second".to_string();
        second.lat = -10.0;
        second.lng = -60.0;
        // A city so the home-country scan has something to find. It sits on
        // top of the viewer, so the self-exclusion rule keeps it (and its
        // same-country bonus) out of the selection.
        let anchor = city("anchor", "Elsewhere", 100_000, 0.05, 0.05);
        let catalog = Catalog::new(vec![first, second, anchor]).unwrap();

        let viewer = GeoPoint::new(0.0, 0.0);
        // Symmetric placement: equal distance and equal view angle.
        let (selected, _) =
            select_visible(&catalog, Some(viewer), Attitude::level(), &SelectionState::new());
        let ids: Vec<&str> = selected.iter().map(|s| s.poi.id.as_str()).collect();
        assert_eq!(ids.first().copied(), Some("first"));
        let pos_second = ids.iter().position(|id| *id == "second");
        assert!(pos_second.is_some());
    }
}
