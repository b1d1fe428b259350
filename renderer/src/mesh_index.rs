// pathfinder/renderer/src/mesh_index.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Maps runs of path IDs to the buffer indices those paths own.
//!
//! Each packed mesh carries one table per buffer, with entry `i` holding the index range owned
//! by path ID `i + 1`. Upstream tessellation may emit a table in ascending or descending buffer
//! order; the direction is fixed per table and is detected here from the data, so that every
//! caller gets an ascending half-open range back.

use pathfinder_geometry::range::Range;

/// Resolves the 1-based, end-exclusive `path_range` against `table`.
///
/// Path ranges that run past the end of the table clamp to the table's outer bound. Path ID 0
/// owns no geometry and is treated as path 1.
pub fn resolve_index_range(table: &[Range], path_range: Range) -> Range {
    let last = match table.last() {
        None => return Range::empty(),
        Some(last) => *last,
    };
    let descending = table[0].start > last.start;

    let (start, end) = (path_range.start.saturating_sub(1) as usize,
                        path_range.end.saturating_sub(1) as usize);

    let start_index = if start >= table.len() {
        last.end
    } else if !descending {
        table[start].start
    } else {
        table[start].end
    };

    if !descending {
        let end_index = if end >= table.len() { last.end } else { table[end].start };
        return Range::new(start_index, end_index.max(start_index));
    }

    // Descending: the first path owns the highest indices, so the bounds swap.
    if end <= start || start >= table.len() {
        return Range::new(start_index, start_index);
    }
    let end_index = table[end.min(table.len()) - 1].start;
    Range::new(end_index.min(start_index), start_index)
}

#[cfg(test)]
mod test {
    use super::resolve_index_range;
    use pathfinder_geometry::range::Range;
    use quickcheck;

    fn ranges(bounds: &[(u32, u32)]) -> Vec<Range> {
        bounds.iter().map(|&(start, end)| Range::new(start, end)).collect()
    }

    // Builds a contiguous table from per-path lengths, starting at `base`.
    fn contiguous_table(base: u32, lengths: &[u8]) -> Vec<Range> {
        let mut start = base;
        lengths.iter().map(|&length| {
            let range = Range::new(start, start + length as u32);
            start = range.end;
            range
        }).collect()
    }

    // Clamps a pair of arbitrary numbers to a valid 1-based path range for a table of `len`.
    fn path_range(len: usize, a: u8, b: u8) -> Range {
        let (a, b) = ((a as u32 % (len as u32 + 1)) + 1, (b as u32 % (len as u32 + 1)) + 1);
        Range::new(a.min(b), a.max(b))
    }

    // The hull of the entries for the covered paths.
    fn covered_hull(table: &[Range], path_range: Range) -> Option<Range> {
        let covered = &table[(path_range.start - 1) as usize..(path_range.end - 1) as usize];
        let start = covered.iter().map(|range| range.start).min()?;
        let end = covered.iter().map(|range| range.end).max()?;
        Some(Range::new(start, end))
    }

    #[test]
    fn test_example_table() {
        let table = ranges(&[(0, 2), (2, 5), (5, 9)]);
        assert_eq!(resolve_index_range(&table, Range::new(1, 3)), Range::new(0, 5));
        assert_eq!(resolve_index_range(&table, Range::new(1, 4)), Range::new(0, 9));
        assert_eq!(resolve_index_range(&table, Range::new(2, 3)), Range::new(2, 5));
        assert_eq!(resolve_index_range(&table, Range::new(3, 4)), Range::new(5, 9));
    }

    #[test]
    fn test_empty_table() {
        fn prop(start: u32, length: u16) -> bool {
            let path_range = Range::new(start / 2, start / 2 + length as u32);
            resolve_index_range(&[], path_range) == Range::empty()
        }
        quickcheck::quickcheck(prop as fn(u32, u16) -> bool);
    }

    #[test]
    fn test_ranges_past_the_end_clamp() {
        let table = ranges(&[(0, 2), (2, 5), (5, 9)]);
        assert_eq!(resolve_index_range(&table, Range::new(2, 10)), Range::new(2, 9));
        assert_eq!(resolve_index_range(&table, Range::new(7, 10)), Range::new(9, 9));
    }

    #[test]
    fn test_paths_without_geometry() {
        // Path 2 is a whitespace glyph.
        let table = ranges(&[(0, 6), (6, 6), (6, 12)]);
        let range = resolve_index_range(&table, Range::new(2, 3));
        assert!(range.is_empty());
        assert_eq!(range.start, 6);
    }

    #[test]
    fn test_ascending_law() {
        fn prop(lengths: Vec<u8>, a: u8, b: u8) -> bool {
            if lengths.is_empty() {
                return true;
            }
            let table = contiguous_table(0, &lengths);
            let path_range = path_range(table.len(), a, b);
            if path_range.start as usize > table.len() {
                return true;
            }
            let expected_end = if ((path_range.end - 1) as usize) < table.len() {
                table[(path_range.end - 1) as usize].start
            } else {
                table[table.len() - 1].end
            };
            let expected = Range::new(table[(path_range.start - 1) as usize].start, expected_end);
            resolve_index_range(&table, path_range) == expected
        }
        quickcheck::quickcheck(prop as fn(Vec<u8>, u8, u8) -> bool);
    }

    #[test]
    fn test_descending_examples() {
        // Same geometry as the ascending example, with path 1 stored last in the buffer.
        let table = ranges(&[(5, 9), (2, 5), (0, 2)]);
        assert_eq!(resolve_index_range(&table, Range::new(1, 2)), Range::new(5, 9));
        assert_eq!(resolve_index_range(&table, Range::new(1, 3)), Range::new(2, 9));
        assert_eq!(resolve_index_range(&table, Range::new(2, 4)), Range::new(0, 5));
        assert_eq!(resolve_index_range(&table, Range::new(1, 4)), Range::new(0, 9));
        assert_eq!(resolve_index_range(&table, Range::new(3, 4)), Range::new(0, 2));
    }

    #[test]
    fn test_descending_empty_and_overflowing_ranges() {
        let table = ranges(&[(5, 9), (2, 5), (0, 2)]);
        assert!(resolve_index_range(&table, Range::new(2, 2)).is_empty());
        assert!(resolve_index_range(&table, Range::new(4, 6)).is_empty());
        assert_eq!(resolve_index_range(&table, Range::new(2, 8)), Range::new(0, 5));
    }

    // Independently of the per-branch bound selection, a resolved range must be exactly the hull
    // of the entries of the covered paths, in both directions.
    #[test]
    fn test_resolved_range_is_covered_hull() {
        fn prop(lengths: Vec<u8>, base: u16, a: u8, b: u8, descending: bool) -> bool {
            // Direction is only detectable when the first and last entries differ.
            if lengths.len() < 2 || lengths[..lengths.len() - 1].iter().all(|&l| l == 0) {
                return true;
            }
            let mut table = contiguous_table(base as u32, &lengths);
            if descending {
                table.reverse();
            }
            let path_range = path_range(table.len(), a, b);
            let resolved = resolve_index_range(&table, path_range);
            match covered_hull(&table, path_range) {
                None => resolved.is_empty(),
                Some(hull) => resolved == hull,
            }
        }
        quickcheck::quickcheck(prop as fn(Vec<u8>, u16, u8, u8, bool) -> bool);
    }

    #[test]
    fn test_result_is_well_formed() {
        fn prop(bounds: Vec<(u16, u8)>, a: u8, b: u8) -> bool {
            let table: Vec<Range> = bounds.iter().map(|&(start, length)| {
                Range::new(start as u32, start as u32 + length as u32)
            }).collect();
            if table.is_empty() {
                return true;
            }
            let resolved = resolve_index_range(&table, path_range(table.len(), a, b));
            resolved.end >= resolved.start
        }
        quickcheck::quickcheck(prop as fn(Vec<(u16, u8)>, u8, u8) -> bool);
    }
}
