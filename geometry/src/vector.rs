// pathfinder/geometry/src/vector.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A SIMD-optimized vector type.

use pathfinder_simd::default::{F32x4, I32x4};
use std::ops::{Add, Mul, Sub};

/// 2D vectors with 32-bit floating point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2F(pub F32x4);

impl Vector2F {
    #[inline]
    pub fn new(x: f32, y: f32) -> Vector2F {
        Vector2F(F32x4::new(x, y, 0.0, 0.0))
    }

    #[inline]
    pub fn splat(value: f32) -> Vector2F {
        Vector2F::new(value, value)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn scale(&self, x: f32) -> Vector2F {
        Vector2F(self.0 * F32x4::splat(x))
    }

    #[inline]
    pub fn scale_xy(&self, factors: Vector2F) -> Vector2F {
        Vector2F(self.0 * factors.0)
    }

    /// Rounds each component up and converts to integers.
    #[inline]
    pub fn ceil_to_i32(&self) -> Vector2I {
        Vector2I::new(self.x().ceil() as i32, self.y().ceil() as i32)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x() == 0.0 && self.y() == 0.0
    }
}

impl Add<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn add(self, other: Vector2F) -> Vector2F {
        Vector2F(self.0 + other.0)
    }
}

impl Sub<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn sub(self, other: Vector2F) -> Vector2F {
        Vector2F(self.0 - other.0)
    }
}

impl Mul<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn mul(self, other: Vector2F) -> Vector2F {
        self.scale_xy(other)
    }
}

/// 2D vectors with 32-bit signed integer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2I(pub I32x4);

impl Vector2I {
    #[inline]
    pub fn new(x: i32, y: i32) -> Vector2I {
        Vector2I(I32x4::new(x, y, 0, 0))
    }

    #[inline]
    pub fn splat(value: i32) -> Vector2I {
        Vector2I::new(value, value)
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.x() * self.y()
    }

    #[inline]
    pub fn scale_xy(&self, factors: Vector2I) -> Vector2I {
        Vector2I::new(self.x() * factors.x(), self.y() * factors.y())
    }

    #[inline]
    pub fn to_f32(&self) -> Vector2F {
        Vector2F::new(self.x() as f32, self.y() as f32)
    }
}

impl Add<Vector2I> for Vector2I {
    type Output = Vector2I;
    #[inline]
    fn add(self, other: Vector2I) -> Vector2I {
        Vector2I::new(self.x() + other.x(), self.y() + other.y())
    }
}

impl Sub<Vector2I> for Vector2I {
    type Output = Vector2I;
    #[inline]
    fn sub(self, other: Vector2I) -> Vector2I {
        Vector2I::new(self.x() - other.x(), self.y() - other.y())
    }
}

/// 3D homogeneous points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector4F(pub F32x4);

impl Vector4F {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Vector4F {
        Vector4F(F32x4::new(x, y, z, w))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0[2]
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.0[3]
    }

    pub fn approx_eq(&self, other: &Vector4F, epsilon: f32) -> bool {
        (0..4).all(|index| (self.0[index] - other.0[index]).abs() <= epsilon)
    }
}

impl Default for Vector4F {
    #[inline]
    fn default() -> Vector4F {
        Vector4F::new(0.0, 0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod test {
    use crate::vector::{Vector2F, Vector2I};

    #[test]
    fn test_scale_and_ceil() {
        let size = Vector2I::new(100, 37);
        let scaled = size.to_f32().scale_xy(Vector2F::new(3.0, 1.0));
        assert_eq!(scaled.ceil_to_i32(), Vector2I::new(300, 37));
        assert_eq!(Vector2F::new(0.5, 1.25).ceil_to_i32(), Vector2I::new(1, 2));
    }

    #[test]
    fn test_integer_ops() {
        let a = Vector2I::new(4, 6);
        assert_eq!(a.scale_xy(Vector2I::new(3, 1)), Vector2I::new(12, 6));
        assert_eq!(a - Vector2I::splat(1), Vector2I::new(3, 5));
        assert_eq!(a.area(), 24);
    }
}
