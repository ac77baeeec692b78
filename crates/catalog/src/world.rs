use std::sync::OnceLock;

use crate::Catalog;

static WORLD: OnceLock<Catalog> = OnceLock::new();

/// The bundled reference dataset: ~100 major cities plus ~50 landmarks and
/// natural features (156 entries after removing one duplicated city record
/// from the upstream data).
///
/// Validated on first access; the data ships with the crate, so a validation
/// failure is a build defect, not a runtime condition.
pub fn world_catalog() -> &'static Catalog {
    WORLD.get_or_init(|| {
        Catalog::from_json_str(include_str!("../data/world_pois.json"))
            .expect("bundled world dataset must validate")
    })
}
