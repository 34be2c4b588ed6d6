//! The editable [`Grid`] and the read-only [`Snapshot`] a search runs on.
//!
//! A `Grid` owns one [`CellKind`] per cell and keeps at most one Start and
//! one End at all times. Searches never see the `Grid` itself: they receive a
//! [`Snapshot`] of its walls and endpoints taken when a run begins.

use std::fmt;

use rand::{Rng, RngExt};

use crate::cell::CellKind;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors produced by grid edits and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside the grid dimensions.
    OutOfBounds(Point),
    /// Negative dimensions were requested.
    InvalidDimensions { rows: i32, cols: i32 },
    /// A text row has a different width than the first row.
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not one of `.#SE` was found.
    InvalidGlyph { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is out of bounds"),
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
            Self::InconsistentRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "invalid cell glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size rectangular grid of [`CellKind`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<CellKind>,
    bounds: Range,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create an all-Empty grid. Negative dimensions are clamped to zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::with_size(rows, cols);
        Self {
            cells: vec![CellKind::Empty; bounds.len()],
            bounds,
            start: None,
            end: None,
        }
    }

    /// Discard every cell and return to the initial configuration (all
    /// Empty, no Start or End) with the new dimensions.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<(), GridError> {
        if rows < 0 || cols < 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        *self = Self::new(rows, cols);
        Ok(())
    }

    /// Reset every cell to Empty, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(CellKind::Empty);
        self.start = None;
        self.end = None;
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The kind of the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Set the kind of the cell at `p`.
    ///
    /// Placing Start (or End) moves it: the previous Start cell becomes
    /// Empty. Overwriting the current Start or End cell with another kind
    /// clears that endpoint.
    pub fn set_cell_kind(&mut self, p: Point, kind: CellKind) -> Result<(), GridError> {
        let i = self.bounds.index(p).ok_or(GridError::OutOfBounds(p))?;
        let prev = self.cells[i];
        if prev == kind {
            return Ok(());
        }
        match prev {
            CellKind::Start => self.start = None,
            CellKind::End => self.end = None,
            _ => {}
        }
        let displaced = match kind {
            CellKind::Start => self.start.replace(p),
            CellKind::End => self.end.replace(p),
            _ => None,
        };
        if let Some(old) = displaced {
            if let Some(oi) = self.bounds.index(old) {
                self.cells[oi] = CellKind::Empty;
            }
        }
        self.cells[i] = kind;
        Ok(())
    }

    /// Flip the cell at `p` between Empty and Wall, returning its new kind.
    ///
    /// Start and End cells are left untouched.
    pub fn toggle_wall(&mut self, p: Point) -> Result<CellKind, GridError> {
        let kind = self.kind(p).ok_or(GridError::OutOfBounds(p))?;
        let next = match kind {
            CellKind::Empty => CellKind::Wall,
            CellKind::Wall => CellKind::Empty,
            endpoint => {
                log::debug!("toggle_wall: keeping {endpoint} at {p}");
                return Ok(endpoint);
            }
        };
        self.set_cell_kind(p, next)?;
        Ok(next)
    }

    /// Turn every Wall back into Empty. Returns the number of walls removed.
    pub fn clear_walls(&mut self) -> usize {
        let mut removed = 0;
        for c in self.cells.iter_mut().filter(|c| **c == CellKind::Wall) {
            *c = CellKind::Empty;
            removed += 1;
        }
        removed
    }

    /// Turn each Empty cell into a Wall with probability `density`.
    ///
    /// `density` is clamped to `[0, 1]`. Endpoints are never covered.
    /// Returns the number of walls placed.
    pub fn scatter_walls<R: Rng>(&mut self, density: f64, rng: &mut R) -> usize {
        let density = if density.is_finite() {
            density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut placed = 0;
        for c in self.cells.iter_mut() {
            if *c == CellKind::Empty && rng.random_bool(density) {
                *c = CellKind::Wall;
                placed += 1;
            }
        }
        placed
    }

    /// Walkable 4-directional neighbours of `p`, in up, right, down, left
    /// order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.kind(n).is_some_and(CellKind::is_walkable))
    }

    /// Number of Wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellKind::Wall).count()
    }

    /// Capture the walls and endpoints for a search run.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bounds: self.bounds,
            walls: self.cells.iter().map(|c| !c.is_walkable()).collect(),
            start: self.start,
            end: self.end,
        }
    }

    /// Parse the text format written by this type's `Display` impl.
    ///
    /// One line per row using `.` (empty), `#` (wall), `S` (start) and
    /// `E` (end). Surrounding whitespace and blank lines are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Self::new(lines.len() as i32, cols as i32);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::InconsistentRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Point::at(row as i32, col as i32);
                let kind = CellKind::from_glyph(ch).ok_or(GridError::InvalidGlyph { ch, pos })?;
                grid.set_cell_kind(pos, kind)?;
            }
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let kind = self.kind(Point::at(row, col)).unwrap_or_default();
                write!(f, "{}", kind.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable copy of a grid's walls and endpoints, taken at run start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    bounds: Range,
    walls: Vec<bool>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Snapshot {
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.bounds.index(p).is_some_and(|i| !self.walls[i])
    }

    /// Walkable neighbours of `p` in up, right, down, left order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.is_walkable(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_grid_is_empty() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.kind(Point::at(2, 3)), Some(CellKind::Empty));
        assert_eq!(g.kind(Point::at(3, 0)), None);
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn set_out_of_bounds() {
        let mut g = Grid::new(2, 2);
        let p = Point::at(2, 0);
        assert_eq!(
            g.set_cell_kind(p, CellKind::Wall),
            Err(GridError::OutOfBounds(p))
        );
        assert_eq!(g.toggle_wall(Point::at(-1, 0)), Err(GridError::OutOfBounds(Point::at(-1, 0))));
    }

    #[test]
    fn start_moves() {
        let mut g = Grid::new(3, 3);
        g.set_cell_kind(Point::at(0, 0), CellKind::Start).unwrap();
        g.set_cell_kind(Point::at(1, 1), CellKind::Start).unwrap();
        assert_eq!(g.start(), Some(Point::at(1, 1)));
        assert_eq!(g.kind(Point::at(0, 0)), Some(CellKind::Empty));
        assert_eq!(g.kind(Point::at(1, 1)), Some(CellKind::Start));
    }

    #[test]
    fn start_over_end_clears_end() {
        let mut g = Grid::new(3, 3);
        g.set_cell_kind(Point::at(0, 0), CellKind::Start).unwrap();
        g.set_cell_kind(Point::at(2, 2), CellKind::End).unwrap();
        g.set_cell_kind(Point::at(2, 2), CellKind::Start).unwrap();
        assert_eq!(g.start(), Some(Point::at(2, 2)));
        assert_eq!(g.end(), None);
        assert_eq!(g.kind(Point::at(0, 0)), Some(CellKind::Empty));
    }

    #[test]
    fn wall_over_endpoint_clears_it() {
        let mut g = Grid::new(2, 2);
        g.set_cell_kind(Point::at(0, 0), CellKind::End).unwrap();
        g.set_cell_kind(Point::at(0, 0), CellKind::Wall).unwrap();
        assert_eq!(g.end(), None);
    }

    #[test]
    fn toggle_wall_flips_and_keeps_endpoints() {
        let mut g = Grid::new(2, 2);
        let p = Point::at(0, 1);
        assert_eq!(g.toggle_wall(p), Ok(CellKind::Wall));
        assert_eq!(g.toggle_wall(p), Ok(CellKind::Empty));

        g.set_cell_kind(Point::at(1, 1), CellKind::Start).unwrap();
        assert_eq!(g.toggle_wall(Point::at(1, 1)), Ok(CellKind::Start));
        assert_eq!(g.start(), Some(Point::at(1, 1)));
    }

    #[test]
    fn neighbors_of_far_points_are_empty() {
        let g = Grid::new(3, 3);
        assert_eq!(g.neighbors(Point::new(i32::MAX, i32::MIN)).count(), 0);
        assert_eq!(g.snapshot().neighbors(Point::new(i32::MIN, i32::MAX)).count(), 0);
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let g = Grid::from_ascii(
            "\
            ...
            .#.
            ...",
        )
        .unwrap();
        let n: Vec<Point> = g.neighbors(Point::at(0, 1)).collect();
        // up is out of bounds, down is a wall
        assert_eq!(n, vec![Point::at(0, 2), Point::at(0, 0)]);

        let n: Vec<Point> = g.neighbors(Point::at(2, 2)).collect();
        assert_eq!(n, vec![Point::at(1, 2), Point::at(2, 1)]);
    }

    #[test]
    fn resize_clears_everything() {
        let mut g = Grid::from_ascii("S#E").unwrap();
        g.resize(4, 5).unwrap();
        assert_eq!(g.rows(), 4);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.wall_count(), 0);
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert_eq!(
            g.resize(-1, 3),
            Err(GridError::InvalidDimensions { rows: -1, cols: 3 })
        );
    }

    #[test]
    fn clear_walls_keeps_endpoints() {
        let mut g = Grid::from_ascii("S##E").unwrap();
        assert_eq!(g.clear_walls(), 2);
        assert_eq!(g.to_string(), "S..E\n");
    }

    #[test]
    fn scatter_walls_respects_density_and_endpoints() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = Grid::new(10, 10);
        g.set_cell_kind(Point::at(0, 0), CellKind::Start).unwrap();
        g.set_cell_kind(Point::at(9, 9), CellKind::End).unwrap();

        assert_eq!(g.scatter_walls(0.0, &mut rng), 0);
        let placed = g.scatter_walls(1.0, &mut rng);
        assert_eq!(placed, 98);
        assert_eq!(g.start(), Some(Point::at(0, 0)));
        assert_eq!(g.end(), Some(Point::at(9, 9)));
        assert_eq!(g.scatter_walls(f64::NAN, &mut rng), 0);
    }

    #[test]
    fn ascii_round_trip() {
        let text = "S.#\n.#.\n..E\n";
        let g = Grid::from_ascii(text).unwrap();
        assert_eq!(g.start(), Some(Point::at(0, 0)));
        assert_eq!(g.end(), Some(Point::at(2, 2)));
        assert_eq!(g.wall_count(), 2);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn ascii_errors() {
        assert_eq!(
            Grid::from_ascii("..\n..."),
            Err(GridError::InconsistentRow {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            Grid::from_ascii(".x"),
            Err(GridError::InvalidGlyph {
                ch: 'x',
                pos: Point::at(0, 1)
            })
        );
    }

    #[test]
    fn snapshot_is_detached() {
        let mut g = Grid::from_ascii("S.E").unwrap();
        let snap = g.snapshot();
        g.toggle_wall(Point::at(0, 1)).unwrap();
        assert!(snap.is_walkable(Point::at(0, 1)));
        assert!(!g.snapshot().is_walkable(Point::at(0, 1)));
        assert_eq!(snap.start(), Some(Point::at(0, 0)));
        assert_eq!(snap.end(), Some(Point::at(0, 2)));
        assert!(!snap.is_walkable(Point::at(1, 0)));
    }
}
