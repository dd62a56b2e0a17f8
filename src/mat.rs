//! 4x4 affine transform for mapping cloth space to world space.

use core::ops::Mul;

use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Column-major 4x4 matrix. `cols[c][r]` is row `r` of column `c`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4<F: Float> {
    pub cols: [[F; 4]; 4],
}

impl<F: Float> Mat4<F> {
    pub fn identity() -> Self {
        let (o, z) = (F::one(), F::zero());
        Mat4 {
            cols: [
                [o, z, z, z],
                [z, o, z, z],
                [z, z, o, z],
                [z, z, z, o],
            ],
        }
    }

    pub fn from_scale(s: Vec3<F>) -> Self {
        let mut m = Self::identity();
        m.cols[0][0] = s.x;
        m.cols[1][1] = s.y;
        m.cols[2][2] = s.z;
        m
    }

    pub fn from_translation(t: Vec3<F>) -> Self {
        let mut m = Self::identity();
        m.cols[3][0] = t.x;
        m.cols[3][1] = t.y;
        m.cols[3][2] = t.z;
        m
    }

    /// Transform a point (w = 1).
    pub fn transform_point(&self, p: Vec3<F>) -> Vec3<F> {
        let c = &self.cols;
        Vec3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Transform a direction (w = 0).
    pub fn transform_vector(&self, v: Vec3<F>) -> Vec3<F> {
        let c = &self.cols;
        Vec3::new(
            c[0][0] * v.x + c[1][0] * v.y + c[2][0] * v.z,
            c[0][1] * v.x + c[1][1] * v.y + c[2][1] * v.z,
            c[0][2] * v.x + c[1][2] * v.y + c[2][2] * v.z,
        )
    }

    /// Inverse assuming the bottom row is `(0, 0, 0, 1)`.
    ///
    /// Returns `None` when the linear part is singular.
    pub fn affine_inverse(&self) -> Option<Self> {
        let c = &self.cols;
        // a[r][k] = row r, column k of the linear part
        let a = |r: usize, k: usize| c[k][r];

        let c00 = a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1);
        let c01 = a(1, 2) * a(2, 0) - a(1, 0) * a(2, 2);
        let c02 = a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0);
        let det = a(0, 0) * c00 + a(0, 1) * c01 + a(0, 2) * c02;
        if det.is_near_zero(F::from_f32(1e-12)) || !det.is_finite() {
            return None;
        }
        let inv_det = F::one() / det;

        // inv[r][k] = cofactor[k][r] / det
        let inv = [
            [
                c00 * inv_det,
                (a(0, 2) * a(2, 1) - a(0, 1) * a(2, 2)) * inv_det,
                (a(0, 1) * a(1, 2) - a(0, 2) * a(1, 1)) * inv_det,
            ],
            [
                c01 * inv_det,
                (a(0, 0) * a(2, 2) - a(0, 2) * a(2, 0)) * inv_det,
                (a(0, 2) * a(1, 0) - a(0, 0) * a(1, 2)) * inv_det,
            ],
            [
                c02 * inv_det,
                (a(0, 1) * a(2, 0) - a(0, 0) * a(2, 1)) * inv_det,
                (a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0)) * inv_det,
            ],
        ];

        let t = Vec3::new(c[3][0], c[3][1], c[3][2]);
        let mut out = Self::identity();
        for r in 0..3 {
            for k in 0..3 {
                out.cols[k][r] = inv[r][k];
            }
            let row = Vec3::new(inv[r][0], inv[r][1], inv[r][2]);
            out.cols[3][r] = -row.dot(t);
        }
        Some(out)
    }
}

impl<F: Float> Default for Mat4<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Mat4<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[F::zero(); 4]; 4];
        for (k, col) in out.iter_mut().enumerate() {
            for (r, cell) in col.iter_mut().enumerate() {
                let mut sum = F::zero();
                for i in 0..4 {
                    sum = sum + self.cols[i][r] * rhs.cols[k][i];
                }
                *cell = sum;
            }
        }
        Mat4 { cols: out }
    }
}
