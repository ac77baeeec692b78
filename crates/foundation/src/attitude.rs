/// Device attitude in radians.
///
/// - `alpha_rad`: yaw, compass heading (rotation about the vertical).
/// - `beta_rad`: pitch, forward/back tilt. A device held upright reads ~π/2.
/// - `gamma_rad`: roll, left/right tilt.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Attitude {
    pub alpha_rad: f64,
    pub beta_rad: f64,
    pub gamma_rad: f64,
}

impl Attitude {
    pub fn new(alpha_rad: f64, beta_rad: f64, gamma_rad: f64) -> Self {
        Self {
            alpha_rad,
            beta_rad,
            gamma_rad,
        }
    }

    /// Device flat on its back, facing north.
    pub fn level() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Device held upright (pitch π/2), facing north. Yields a horizon-level
    /// camera view.
    pub fn upright() -> Self {
        Self::new(0.0, std::f64::consts::FRAC_PI_2, 0.0)
    }
}

/// Attitude as delivered by a sensor provider.
///
/// `Unavailable` is a distinct state, not `{0,0,0}`: callers must be able to
/// render an error surface instead of silently showing a flat-north view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AttitudeSignal {
    Unavailable,
    Available(Attitude),
}

impl AttitudeSignal {
    pub fn attitude(self) -> Option<Attitude> {
        match self {
            AttitudeSignal::Unavailable => None,
            AttitudeSignal::Available(a) => Some(a),
        }
    }
}
