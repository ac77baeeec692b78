use super::Vec3;

/// Mean Earth radius (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Earth circumference (kilometers), used by the km→degree approximation.
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40075.0;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }
}

/// Great-circle distance between two points (haversine, kilometers).
///
/// The haversine term is clamped to [0, 1] so near-antipodal and polar inputs
/// stay inside the domain of the square roots.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lng = (b.lng_deg - a.lng_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_deg.to_radians().cos() * b.lat_deg.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Approximate angle between two points as seen from the sphere's center
/// (degrees).
///
/// This deliberately converts kilometers linearly via the Earth circumference
/// (`d / 40075 * 360`) instead of using the true spherical angle. Every
/// angular threshold in the scorer and selector is calibrated against this
/// mapping, so it must stay exactly as written.
pub fn angular_separation_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_km(a, b) / EARTH_CIRCUMFERENCE_KM * 360.0
}

/// The point on the opposite side of the globe.
pub fn antipode(p: GeoPoint) -> GeoPoint {
    GeoPoint::new(
        -p.lat_deg,
        if p.lng_deg > 0.0 {
            p.lng_deg - 180.0
        } else {
            p.lng_deg + 180.0
        },
    )
}

/// Whether `b` lies within `tolerance_km` of the antipode of `a`.
pub fn is_near_antipode(a: GeoPoint, b: GeoPoint, tolerance_km: f64) -> bool {
    distance_km(antipode(a), b) < tolerance_km
}

/// Initial bearing from `a` to `b` in degrees, normalized to [0, 360).
///
/// 0 is north, 90 is east.
pub fn initial_bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lng = (b.lng_deg - a.lng_deg).to_radians();
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();

    let y = d_lng.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lng.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Map geographic coordinates to a Cartesian point on a sphere of `radius`.
///
/// Convention (shared by the camera and marker placement, do not change):
/// - polar angle `phi = (90 - lat)·π/180` measured from the north pole,
/// - azimuth `theta = (lng + 180)·π/180`,
/// - `x = -r sinφ cosθ`, `y = r cosφ`, `z = r sinφ sinθ`.
///
/// The y axis is the rotation axis (north pole at `(0, r, 0)`).
pub fn sphere_point(p: GeoPoint, radius: f64) -> Vec3 {
    let phi = (90.0 - p.lat_deg).to_radians();
    let theta = (p.lng_deg + 180.0).to_radians();

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Human-readable distance: meters below 1 km, one-decimal km below 10 km,
/// thousands-separated whole km otherwise.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else if km < 10.0 {
        format!("{km:.1} km")
    } else {
        format!("{} km", group_thousands(km.round() as i64))
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
