/// Frustum: six clipping planes plus the eight corners of a camera volume.
///
/// Planes are stored as Vec4 (A, B, C, D) with the normal pointing inward:
/// a point P is inside when `dot(plane, P_homogeneous) >= 0` for all planes.
/// Matrices are expected in OpenGL clip convention (NDC z in [-1, 1]).

use glam::{Mat4, Vec3, Vec4};

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// NDC cube corners: near face then far face, counter-clockwise from bottom-left
const NDC_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract normalized planes from a view-projection matrix (Gribb & Hartmann).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row3 + row2
            Vec4::new(m[0][3] + m[0][2], m[1][3] + m[1][2], m[2][3] + m[2][2], m[3][3] + m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// World-space corners of the volume described by `vp`.
    ///
    /// Order: near face (bl, br, tr, tl), then far face in the same order.
    pub fn corners(vp: &Mat4) -> [Vec3; 8] {
        let inverse = vp.inverse();
        NDC_CORNERS.map(|ndc| inverse.project_point3(ndc))
    }

    /// Signed distance from `point` to a plane (positive = inside)
    pub fn distance_to_plane(&self, plane: usize, point: Vec3) -> f32 {
        let p = self.planes[plane];
        Vec3::new(p.x, p.y, p.z).dot(point) + p.w
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..6).all(|i| self.distance_to_plane(i, point) >= 0.0)
    }

    /// Conservative sphere test: never rejects a sphere that touches the volume
    /// through a face, may accept some that only graze an edge.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        (0..6).all(|i| self.distance_to_plane(i, center) >= -radius)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
