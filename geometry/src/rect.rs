// pathfinder/geometry/src/rect.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D axis-aligned rectangles.

use crate::vector::{Vector2F, Vector2I};

/// A floating-point rectangle stored as its two extreme corners.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectF {
    origin: Vector2F,
    lower_right: Vector2F,
}

impl RectF {
    #[inline]
    pub fn new(origin: Vector2F, size: Vector2F) -> RectF {
        RectF { origin, lower_right: origin + size }
    }

    #[inline]
    pub fn from_points(origin: Vector2F, lower_right: Vector2F) -> RectF {
        RectF { origin, lower_right }
    }

    #[inline]
    pub fn origin(&self) -> Vector2F {
        self.origin
    }

    #[inline]
    pub fn lower_right(&self) -> Vector2F {
        self.lower_right
    }

    #[inline]
    pub fn size(&self) -> Vector2F {
        self.lower_right - self.origin
    }

    /// `[min_x, min_y, max_x, max_y]`, the layout shaders read bounds in.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.origin.x(), self.origin.y(), self.lower_right.x(), self.lower_right.y()]
    }
}

/// An integer rectangle, used for viewports and scissor boxes.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectI {
    origin: Vector2I,
    size: Vector2I,
}

impl RectI {
    #[inline]
    pub fn new(origin: Vector2I, size: Vector2I) -> RectI {
        RectI { origin, size }
    }

    /// A rectangle anchored at the origin.
    #[inline]
    pub fn from_size(size: Vector2I) -> RectI {
        RectI { origin: Vector2I::default(), size }
    }

    #[inline]
    pub fn origin(&self) -> Vector2I {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Vector2I {
        self.size
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y()
    }

    #[inline]
    pub fn lower_right(&self) -> Vector2I {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x() <= 0 || self.size.y() <= 0
    }
}

#[cfg(test)]
mod test {
    use crate::rect::{RectF, RectI};
    use crate::vector::{Vector2F, Vector2I};

    #[test]
    fn test_rect_f_layout() {
        let rect = RectF::new(Vector2F::new(1.0, 2.0), Vector2F::new(3.0, 4.0));
        assert_eq!(rect.to_array(), [1.0, 2.0, 4.0, 6.0]);
        assert_eq!(rect.size(), Vector2F::new(3.0, 4.0));
    }

    #[test]
    fn test_rect_i() {
        let rect = RectI::new(Vector2I::new(2, 3), Vector2I::new(10, 0));
        assert_eq!(rect.lower_right(), Vector2I::new(12, 3));
        assert!(rect.is_empty());
        assert!(!RectI::from_size(Vector2I::new(1, 1)).is_empty());
    }
}
