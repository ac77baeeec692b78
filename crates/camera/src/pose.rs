use foundation::Attitude;
use foundation::math::{GeoPoint, Vec3, sphere_point};

use crate::CAMERA_RADIUS;

/// Latitudes beyond this use a fixed fallback tangent: the north-pole
/// cross-product construction degenerates there.
const POLE_LAT_DEG: f64 = 89.0;

/// Instantaneous camera pose on the sphere.
///
/// `position`/`up`/`look_target` define the view; `roll_rad` is an extra
/// rotation about the final forward axis (the renderer applies the same
/// value). Yaw and pitch are already folded into `look_target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub up: Vec3,
    pub look_target: Vec3,
    pub roll_rad: f64,
}

impl CameraPose {
    /// Pose for a viewer standing at `location`, at the default camera
    /// radius.
    pub fn for_viewer(location: GeoPoint, attitude: Attitude) -> Self {
        Self::at_radius(location, attitude, CAMERA_RADIUS)
    }

    /// Construction:
    /// 1. place the camera on the sphere, `up` radially outward;
    /// 2. `forward` = surface tangent toward the north pole (fallback
    ///    `(1,0,0)` near the poles);
    /// 3. yaw the look target about `up` by `-alpha`;
    /// 4. pitch it about the yaw-rotated `right` by `beta - π/2`, so an
    ///    upright device looks at the horizon and tilting forward looks
    ///    down;
    /// 5. roll is `-gamma` about the resulting forward axis.
    pub fn at_radius(location: GeoPoint, attitude: Attitude, radius: f64) -> Self {
        let position = sphere_point(location, radius);
        let up = position.normalized();

        let north = Vec3::new(0.0, 1.0, 0.0);
        let forward = if location.lat_deg.abs() > POLE_LAT_DEG {
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            up.cross(north.cross(up)).normalized()
        };
        let right = forward.cross(up).normalized();

        let mut offset = forward * 10.0;
        offset = offset.rotated_about(up, -attitude.alpha_rad);

        let pitch_axis = right.rotated_about(up, -attitude.alpha_rad);
        let pitch = attitude.beta_rad - std::f64::consts::FRAC_PI_2;
        offset = offset.rotated_about(pitch_axis, pitch);

        Self {
            position,
            up,
            look_target: position + offset,
            roll_rad: -attitude.gamma_rad,
        }
    }

    /// Unit look direction.
    pub fn look_dir(&self) -> Vec3 {
        (self.look_target - self.position).normalized()
    }
}
