//! Deterministic float ordering.
//!
//! The selector sorts scores with a stable sort; ties must fall back to the
//! input order on every run, on every platform. These helpers make the float
//! comparison itself total and canonical so the sort never depends on NaN
//! payloads or the sign of zero.

use core::cmp::Ordering;

/// Canonicalize a float for ordering: `-0.0` becomes `0.0`, every NaN becomes
/// the canonical NaN.
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Total, deterministic ordering for floats. Prefer this over `partial_cmp`
/// anywhere floats are sorted or used as keys.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

/// Float wrapper whose `Ord` is [`stable_total_cmp_f64`]. NaN equals NaN, so
/// the wrapper can live in ordered keys.
#[derive(Debug, Copy, Clone, Default)]
pub struct StableF64(pub f64);

impl PartialEq for StableF64 {
    fn eq(&self, other: &Self) -> bool {
        stable_total_cmp_f64(self.0, other.0) == Ordering::Equal
    }
}

impl Eq for StableF64 {}

impl PartialOrd for StableF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StableF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        stable_total_cmp_f64(self.0, other.0)
    }
}
