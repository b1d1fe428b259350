// pathfinder/geometry/src/range.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Half-open integer intervals.
//!
//! These address sub-ranges of packed vertex, index, and instance buffers, as well as runs of
//! object indices and 1-based path IDs.

use std::fmt::{self, Debug, Formatter};
use std::ops;

/// A half-open interval `[start, end)`. `end` is never less than `start`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    #[inline]
    pub fn new(start: u32, end: u32) -> Range {
        assert!(end >= start, "range end {} precedes start {}", end, start);
        Range { start, end }
    }

    /// The empty range at zero.
    #[inline]
    pub fn empty() -> Range {
        Range { start: 0, end: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value >= self.start && value < self.end
    }

    #[inline]
    pub fn to_std(&self) -> ops::Range<u32> {
        self.start..self.end
    }
}

impl From<ops::Range<u32>> for Range {
    #[inline]
    fn from(range: ops::Range<u32>) -> Range {
        Range::new(range.start, range.end)
    }
}

impl Debug for Range {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod test {
    use crate::range::Range;
    use quickcheck;

    #[test]
    fn test_empty_iff_bounds_coincide() {
        fn prop(start: u32, length: u16) -> bool {
            let start = start / 2;
            let range = Range::new(start, start + length as u32);
            range.is_empty() == (length == 0) && range.length() == length as u32
        }
        quickcheck::quickcheck(prop as fn(u32, u16) -> bool);
    }

    #[test]
    fn test_contains() {
        let range = Range::new(3, 5);
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert!(!Range::empty().contains(0));
    }

    #[test]
    fn test_from_std() {
        assert_eq!(Range::from(2..7), Range::new(2, 7));
        assert_eq!(Range::new(2, 7).to_std(), 2..7);
    }

    #[test]
    #[should_panic]
    fn test_reversed_bounds_are_rejected() {
        Range::new(4, 3);
    }
}
