use foundation::math::Vec3;

use crate::{CameraPose, FAR_PLANE, FOV_Y_DEG, NEAR_PLANE};

/// When the look direction is parallel to `up` (device held flat, looking
/// straight down the radial), the look-at basis collapses; nudge the back
/// vector by this much and renormalize.
const DEGENERATE_NUDGE: f64 = 1e-4;

/// Row-major 4x4 matrix.
///
/// `rows[r][c]`; points transform as column vectors, so composition reads
/// right to left: `a.mul(&b)` applies `b` first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub rows: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn mul(&self, other: &Self) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[r][k] * other.rows[k][c]).sum();
            }
        }
        Self { rows }
    }

    /// Rotation about the z axis by `angle_rad`, counter-clockwise looking
    /// down -z.
    pub fn rotation_z(angle_rad: f64) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self {
            rows: [
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// World-to-camera transform for an eye at `eye` looking at `target`.
    ///
    /// Camera space is right-handed with the view down -z. The basis is
    /// re-orthogonalized from `up`, so `up` only needs to be roughly
    /// perpendicular to the view.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut back = eye - target;
        if back.length() == 0.0 {
            back.z = 1.0;
        }
        back = back.normalized();

        let mut right = up.cross(back);
        if right.length() < 1e-10 {
            // Looking straight along up; tip the back vector sideways.
            if up.z.abs() > 0.999_999 {
                back.x += DEGENERATE_NUDGE;
            } else {
                back.z += DEGENERATE_NUDGE;
            }
            back = back.normalized();
            right = up.cross(back);
        }
        let right = right.normalized();
        let true_up = back.cross(right);

        Self {
            rows: [
                [right.x, right.y, right.z, -right.dot(eye)],
                [true_up.x, true_up.y, true_up.z, -true_up.dot(eye)],
                [back.x, back.y, back.z, -back.dot(eye)],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// OpenGL-convention perspective projection: z maps to [-1, 1] between
    /// the near and far planes, and `w` carries -z for the divide.
    pub fn perspective(fov_y_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fov_y_deg.to_radians() / 2.0).tan();
        Self {
            rows: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) / (near - far), 2.0 * far * near / (near - far)],
                [0.0, 0.0, -1.0, 0.0],
            ],
        }
    }

    /// Transform a point and perform the perspective divide.
    ///
    /// Returns the NDC coordinates, or `None` when the point sits exactly on
    /// the eye plane (`w == 0`). Points behind the camera come back with
    /// `ndc.z > 1` because the divide flips sign; callers test `ndc.z < 1.0`
    /// for in-front.
    pub fn transform_point(&self, p: Vec3) -> Option<Vec3> {
        let v = [p.x, p.y, p.z, 1.0];
        let mut out = [0.0; 4];
        for (r, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| self.rows[r][k] * v[k]).sum();
        }
        let w = out[3];
        if w == 0.0 {
            return None;
        }
        Some(Vec3::new(out[0] / w, out[1] / w, out[2] / w))
    }
}

/// World-to-camera matrix for a pose, roll included.
pub fn view_matrix(pose: &CameraPose) -> Mat4 {
    let look = Mat4::look_at(pose.position, pose.look_target, pose.up);
    // Camera roll by `roll_rad` about its local z shows up in the view
    // transform as the inverse rotation applied after look-at.
    Mat4::rotation_z(-pose.roll_rad).mul(&look)
}

/// Combined view-projection matrix at the engine's fixed field of view.
pub fn view_proj(pose: &CameraPose, aspect: f64) -> Mat4 {
    let proj = Mat4::perspective(FOV_Y_DEG, aspect, NEAR_PLANE, FAR_PLANE);
    proj.mul(&view_matrix(pose))
}
