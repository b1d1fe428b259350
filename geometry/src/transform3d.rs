// pathfinder/geometry/src/transform3d.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 3D transforms that can be applied to paths.

use crate::vector::Vector4F;
use pathfinder_simd::default::F32x4;
use std::ops::Mul;

/// A 4x4 transform, optimized with SIMD.
///
/// In column-major order.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Transform4F {
    pub c0: F32x4,
    pub c1: F32x4,
    pub c2: F32x4,
    pub c3: F32x4,
}

impl Default for Transform4F {
    #[inline]
    fn default() -> Transform4F {
        Transform4F {
            c0: F32x4::new(1.0, 0.0, 0.0, 0.0),
            c1: F32x4::new(0.0, 1.0, 0.0, 0.0),
            c2: F32x4::new(0.0, 0.0, 1.0, 0.0),
            c3: F32x4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl Transform4F {
    #[inline]
    pub fn row_major(m00: f32, m01: f32, m02: f32, m03: f32,
                     m10: f32, m11: f32, m12: f32, m13: f32,
                     m20: f32, m21: f32, m22: f32, m23: f32,
                     m30: f32, m31: f32, m32: f32, m33: f32)
                     -> Transform4F {
        Transform4F {
            c0: F32x4::new(m00, m10, m20, m30),
            c1: F32x4::new(m01, m11, m21, m31),
            c2: F32x4::new(m02, m12, m22, m32),
            c3: F32x4::new(m03, m13, m23, m33),
        }
    }

    #[inline]
    pub fn from_scale(x: f32, y: f32, z: f32) -> Transform4F {
        Transform4F::row_major(  x, 0.0, 0.0, 0.0,
                               0.0,   y, 0.0, 0.0,
                               0.0, 0.0,   z, 0.0,
                               0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn from_translation(x: f32, y: f32, z: f32) -> Transform4F {
        Transform4F::row_major(1.0, 0.0, 0.0,   x,
                               0.0, 1.0, 0.0,   y,
                               0.0, 0.0, 1.0,   z,
                               0.0, 0.0, 0.0, 1.0)
    }

    /// The element at `row`, `column`.
    #[inline]
    pub fn m(&self, row: usize, column: usize) -> f32 {
        self.to_columns()[column][row]
    }

    /// The 2D scale and translation part: `(m00, m11, m03, m13)`.
    #[inline]
    pub fn scale_translation(&self) -> F32x4 {
        F32x4::new(self.c0[0], self.c1[1], self.c3[0], self.c3[1])
    }

    /// The 2D skew part: `(m10, m01)`.
    #[inline]
    pub fn skew(&self) -> F32x4 {
        F32x4::new(self.c0[1], self.c1[0], 0.0, 0.0)
    }

    #[inline]
    pub fn transform_point(&self, point: Vector4F) -> Vector4F {
        let term0 = self.c0 * F32x4::splat(point.x());
        let term1 = self.c1 * F32x4::splat(point.y());
        let term2 = self.c2 * F32x4::splat(point.z());
        let term3 = self.c3 * F32x4::splat(point.w());
        Vector4F(term0 + term1 + term2 + term3)
    }

    pub fn approx_eq(&self, other: &Transform4F, epsilon: f32) -> bool {
        let (a, b) = (self.to_columns(), other.to_columns());
        (0..4).all(|column| {
            (0..4).all(|row| (a[column][row] - b[column][row]).abs() <= epsilon)
        })
    }

    #[inline]
    pub fn to_columns(&self) -> [F32x4; 4] {
        [self.c0, self.c1, self.c2, self.c3]
    }
}

impl Mul<Transform4F> for Transform4F {
    type Output = Transform4F;

    /// Standard matrix product: `(self * other)` applies `other` first.
    #[inline]
    fn mul(self, other: Transform4F) -> Transform4F {
        return Transform4F {
            c0: mul_col(&self, other.c0),
            c1: mul_col(&self, other.c1),
            c2: mul_col(&self, other.c2),
            c3: mul_col(&self, other.c3),
        };

        fn mul_col(a: &Transform4F, b_col: F32x4) -> F32x4 {
            let (b0, b1) = (F32x4::splat(b_col[0]), F32x4::splat(b_col[1]));
            let (b2, b3) = (F32x4::splat(b_col[2]), F32x4::splat(b_col[3]));
            a.c0 * b0 + a.c1 * b1 + a.c2 * b2 + a.c3 * b3
        }
    }
}

#[cfg(test)]
mod test {
    use crate::transform3d::Transform4F;
    use crate::vector::Vector4F;

    #[test]
    fn test_mul_order() {
        let scale = Transform4F::from_scale(2.0, 3.0, 1.0);
        let translation = Transform4F::from_translation(5.0, 7.0, 0.0);
        // Translate first, then scale.
        let composed = scale * translation;
        let point = composed.transform_point(Vector4F::new(1.0, 1.0, 0.0, 1.0));
        assert!(point.approx_eq(&Vector4F::new(12.0, 24.0, 0.0, 1.0), 0.0001));
        // Scale first, then translate.
        let composed = translation * scale;
        let point = composed.transform_point(Vector4F::new(1.0, 1.0, 0.0, 1.0));
        assert!(point.approx_eq(&Vector4F::new(7.0, 10.0, 0.0, 1.0), 0.0001));
    }

    #[test]
    fn test_mul_identity() {
        let a = Transform4F::row_major(2.0, 1.0, 0.0, 4.0,
                                       0.5, 3.0, 0.0, 6.0,
                                       0.0, 0.0, 1.0, 0.0,
                                       0.0, 0.0, 0.0, 1.0);
        assert_eq!(a * Transform4F::default(), a);
        assert_eq!(Transform4F::default() * a, a);
    }

    #[test]
    fn test_affine_parts() {
        let a = Transform4F::row_major(2.0, 1.0, 0.0, 4.0,
                                       0.5, 3.0, 0.0, 6.0,
                                       0.0, 0.0, 1.0, 0.0,
                                       0.0, 0.0, 0.0, 1.0);
        let st = a.scale_translation();
        assert_eq!((st[0], st[1], st[2], st[3]), (2.0, 3.0, 4.0, 6.0));
        let skew = a.skew();
        assert_eq!((skew[0], skew[1]), (0.5, 1.0));
        assert_eq!(a.m(0, 3), 4.0);
        assert_eq!(a.m(1, 0), 0.5);
    }
}
