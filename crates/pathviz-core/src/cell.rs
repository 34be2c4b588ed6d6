//! The [`CellKind`] type: the editable state of one grid cell.

use std::fmt;

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

impl CellKind {
    /// Whether a search may step onto a cell of this kind.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Whether this kind is one of the two run endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }

    /// ASCII glyph used by [`Grid`](crate::Grid)'s text format.
    pub const fn glyph(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Start => 'S',
            CellKind::End => 'E',
        }
    }

    /// Inverse of [`glyph`](CellKind::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Wall),
            'S' => Some(CellKind::Start),
            'E' => Some(CellKind::End),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Empty => "empty",
            CellKind::Wall => "wall",
            CellKind::Start => "start",
            CellKind::End => "end",
        };
        f.write_str(name)
    }
}
