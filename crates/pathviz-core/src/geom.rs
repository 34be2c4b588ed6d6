//! Cell coordinates ([`Point`]) and grid extents ([`Range`]).
//!
//! Grid cells are addressed as `(row, col)` in the editor's vocabulary. A
//! [`Point`] stores the same coordinate in screen order: `x` is the column
//! and `y` is the row, so Y grows down.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer grid coordinate. `x` is the column, `y` is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point from column `x` and row `y`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from a `(row, col)` pair.
    #[inline]
    pub const fn at(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// The four cardinal neighbours in expansion order: up, right, down, left.
    ///
    /// Searches rely on this order to break ties between equal-cost
    /// expansions, so it must never change.
    ///
    /// Coordinates wrap at the `i32` limits. A wrapped neighbour lies outside
    /// every [`Range`], so bounds checks drop it.
    #[inline]
    pub const fn neighbors_4(self) -> [Point; 4] {
        [
            Self::at(self.y.wrapping_sub(1), self.x),
            Self::at(self.y, self.x.wrapping_add(1)),
            Self::at(self.y.wrapping_add(1), self.x),
            Self::at(self.y, self.x.wrapping_sub(1)),
        ]
    }
}

/// Row-major: rows first, then columns.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.y, self.x)
    }
}

/// Component-wise offset between two cells.
impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The extent of a grid: every cell from `(0, 0)` up to, but excluding,
/// `(rows, cols)`.
///
/// Cells are numbered row-major, which is how node tables and cell vectors
/// are indexed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    rows: i32,
    cols: i32,
}

impl Range {
    /// A `rows` x `cols` extent. Negative sizes are clamped to zero.
    #[inline]
    pub fn with_size(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(self) -> i32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn height(self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn len(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.rows).contains(&p.y) && (0..self.cols).contains(&p.x)
    }

    /// Row-major cell number of `p`, or `None` outside the extent.
    #[inline]
    pub fn index(self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.cols as usize + p.x as usize)
    }

    /// The cell numbered `idx`. Inverse of [`index`](Self::index) for
    /// `idx < len()`.
    #[inline]
    pub fn point(self, idx: usize) -> Point {
        let cols = self.cols.max(1) as usize;
        Point::at((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Every cell in row-major order.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Iterator over the cells of a [`Range`], see [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.range.len() {
            return None;
        }
        let p = self.range.point(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.range.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_mapping() {
        let p = Point::at(2, 5);
        assert_eq!(p, Point::new(5, 2));
        assert_eq!(p.row(), 2);
        assert_eq!(p.col(), 5);
    }

    #[test]
    fn neighbors_order_is_up_right_down_left() {
        let n = Point::at(3, 3).neighbors_4();
        assert_eq!(n[0], Point::at(2, 3));
        assert_eq!(n[1], Point::at(3, 4));
        assert_eq!(n[2], Point::at(4, 3));
        assert_eq!(n[3], Point::at(3, 2));
    }

    #[test]
    fn neighbors_at_i32_limits_fall_outside() {
        let r = Range::with_size(4, 4);
        for p in [
            Point::new(i32::MAX, i32::MIN),
            Point::new(i32::MIN, i32::MAX),
            Point::new(i32::MAX, i32::MAX),
            Point::new(i32::MIN, i32::MIN),
        ] {
            assert!(p.neighbors_4().iter().all(|&n| !r.contains(n)), "{p}");
        }
    }

    #[test]
    fn index_round_trip() {
        let r = Range::with_size(4, 7);
        assert_eq!(r.len(), 28);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.index(p), Some(i));
            assert_eq!(r.point(i), p);
        }
        assert_eq!(r.index(Point::at(4, 0)), None);
        assert_eq!(r.index(Point::at(0, -1)), None);
    }

    #[test]
    fn iter_is_row_major() {
        let pts: Vec<Point> = Range::with_size(2, 2).iter().collect();
        assert_eq!(
            pts,
            vec![Point::at(0, 0), Point::at(0, 1), Point::at(1, 0), Point::at(1, 1)]
        );
        assert_eq!(Range::with_size(3, 4).iter().len(), 12);
    }

    #[test]
    fn negative_sizes_clamp() {
        let r = Range::with_size(-2, 3);
        assert_eq!((r.height(), r.width()), (0, 3));
        assert!(!r.contains(Point::at(0, 0)));
    }

    #[test]
    fn ordering_and_display() {
        assert!(Point::at(0, 9) < Point::at(1, 0));
        assert_eq!(Point::at(1, 2).to_string(), "(row 1, col 2)");
        assert_eq!(Point::at(4, 1) - Point::at(3, 3), Point::new(-2, 1));
        assert_eq!(Range::with_size(3, 8).to_string(), "3x8");
    }

    #[test]
    fn empty_range() {
        let r = Range::with_size(0, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
