//! Static point-of-interest catalog.
//!
//! The catalog is loaded once, validated, and never mutated afterwards. Entry
//! order is preserved from the source data: it is the deterministic tie-break
//! for the selector, not a priority.

use foundation::math::{GeoPoint, distance_km, stable_total_cmp_f64};
use serde::{Deserialize, Serialize};

mod world;

pub use world::world_catalog;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    City,
    Landmark,
    Natural,
}

/// One point of interest. Immutable once the catalog is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub country: String,
    pub kind: PoiKind,
    /// Present iff `kind == City`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    pub lat: f64,
    pub lng: f64,
}

impl Poi {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Parse(String),
    DuplicateId(String),
    InvalidField { id: String, reason: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate catalog id: {id:?}"),
            CatalogError::InvalidField { id, reason } => {
                write!(f, "invalid catalog entry {id:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// A validated, ordered POI catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Vec<Poi>,
}

impl Catalog {
    /// Validates and adopts `entries`, preserving their order.
    ///
    /// Rules:
    /// - `lat ∈ [-90, 90]`, `lng ∈ [-180, 180]`
    /// - `population` present iff the entry is a city
    /// - ids are unique
    pub fn new(entries: Vec<Poi>) -> Result<Self, CatalogError> {
        let mut seen: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for poi in &entries {
            validate_entry(poi)?;
        }
        for poi in &entries {
            if !seen.insert(poi.id.as_str()) {
                return Err(CatalogError::DuplicateId(poi.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<Poi> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Poi> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Poi> {
        self.entries.iter().find(|p| p.id == id)
    }

    /// The city geographically nearest to `viewer` (linear scan).
    ///
    /// Ties resolve to the earlier entry. Returns `None` for a catalog with
    /// no cities.
    pub fn nearest_city(&self, viewer: GeoPoint) -> Option<&Poi> {
        self.entries
            .iter()
            .filter(|p| p.kind == PoiKind::City)
            .min_by(|a, b| {
                stable_total_cmp_f64(
                    distance_km(viewer, a.location()),
                    distance_km(viewer, b.location()),
                )
            })
    }

    /// The viewer's inferred home country: the country of the nearest city.
    pub fn home_country(&self, viewer: GeoPoint) -> Option<&str> {
        self.nearest_city(viewer).map(|p| p.country.as_str())
    }
}

fn validate_entry(poi: &Poi) -> Result<(), CatalogError> {
    let err = |reason: String| CatalogError::InvalidField {
        id: poi.id.clone(),
        reason,
    };

    if !(-90.0..=90.0).contains(&poi.lat) {
        return Err(err(format!("latitude {} out of [-90, 90]", poi.lat)));
    }
    if !(-180.0..=180.0).contains(&poi.lng) {
        return Err(err(format!("longitude {} out of [-180, 180]", poi.lng)));
    }
    match (poi.kind, poi.population) {
        (PoiKind::City, None) => Err(err("city without population".to_string())),
        (PoiKind::Landmark | PoiKind::Natural, Some(_)) => {
            Err(err("population on a non-city entry".to_string()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError, Poi, PoiKind};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;

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
    fn parses_and_preserves_order() {
        let json = r#"[
            {"id":"a","name":"A","country":"X","kind":"city","population":1000,"lat":1.0,"lng":2.0},
            {"id":"b","name":"B","country":"Y","kind":"landmark","lat":-1.0,"lng":-2.0}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(catalog.get("b").unwrap().kind, PoiKind::Landmark);
        assert_eq!(catalog.get("b").unwrap().population, None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let entries = vec![
            city("x", "A", 10, 0.0, 0.0),
            city("x", "A", 10, 1.0, 1.0),
        ];
        assert_eq!(
            Catalog::new(entries).unwrap_err(),
            CatalogError::DuplicateId("x".to_string())
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut bad = city("p", "A", 10, 91.0, 0.0);
        assert!(matches!(
            Catalog::new(vec![bad.clone()]),
            Err(CatalogError::InvalidField { .. })
        ));
        bad.lat = 0.0;
        bad.lng = 200.0;
        assert!(matches!(
            Catalog::new(vec![bad]),
            Err(CatalogError::InvalidField { .. })
        ));
    }

    #[test]
    fn rejects_population_kind_mismatch() {
        let mut no_pop = city("c", "A", 10, 0.0, 0.0);
        no_pop.population = None;
        assert!(Catalog::new(vec![no_pop]).is_err());

        let mut landmark_pop = city("l", "A", 10, 0.0, 0.0);
        landmark_pop.kind = PoiKind::Landmark;
        assert!(Catalog::new(vec![landmark_pop]).is_err());
    }

    #[test]
    fn nearest_city_ignores_landmarks() {
        let mut tower = city("tower", "France", 1, 48.8584, 2.2945);
        tower.kind = PoiKind::Landmark;
        tower.population = None;
        let entries = vec![
            city("paris", "France", 11_020_000, 48.8566, 2.3522),
            city("london", "UK", 9_540_000, 51.5074, -0.1278),
            tower,
        ];
        let catalog = Catalog::new(entries).unwrap();

        // The tower is closer to the probe point than the Paris city entry,
        // but only cities participate in the scan.
        let near_tower = GeoPoint::new(48.8584, 2.2945);
        assert_eq!(catalog.nearest_city(near_tower).unwrap().id, "paris");
        assert_eq!(catalog.home_country(near_tower), Some("France"));
    }

    #[test]
    fn reference_dataset_loads_and_is_deduplicated() {
        let catalog = super::world_catalog();
        assert_eq!(catalog.len(), 156);
        assert_eq!(catalog.get("mumbai").unwrap().country, "India");
        assert!(catalog.iter().all(|p| (-90.0..=90.0).contains(&p.lat)));
    }
}
