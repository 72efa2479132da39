use smallvec::SmallVec;
use std::convert::From;

use crate::units::ColumnsCount;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub col: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    /// Maps a one dimensional row major index back to a coordinate for a
    /// grid `width` columns wide.
    #[inline]
    pub fn from_row_major_index(index: usize, width: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(columns) = width;
        let row = index / columns;
        let col = index % columns;

        GridCoordinate::new(row as u32, col as u32)
    }

    /// The coordinate one step away in `dir`, or None where that is not
    /// representable (stepping above the first row or left of the first
    /// column). Whether the result lies within some particular grid is the
    /// grid's concern, not the coordinate's.
    pub fn offset(self, dir: Direction) -> Option<GridCoordinate> {
        let GridCoordinate { row, col } = self;
        match dir {
            Direction::Top => {
                if row > 0 {
                    Some(GridCoordinate::new(row - 1, col))
                } else {
                    None
                }
            }
            Direction::Right => Some(GridCoordinate::new(row, col + 1)),
            Direction::Bottom => Some(GridCoordinate::new(row + 1, col)),
            Direction::Left => {
                if col > 0 {
                    Some(GridCoordinate::new(row, col - 1))
                } else {
                    None
                }
            }
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_col_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// The canonical enumeration order. Candidate sets are always built in
    /// this order.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }
}

/// One grid position: whether the carving walk has visited it and which of
/// its four walls have been opened. Flags only ever go from closed to open.
/// All mutation funnels through the `Grid`, the accessors here are read only.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    coord: GridCoordinate,
    visited: bool,
    top_open: bool,
    right_open: bool,
    bottom_open: bool,
    left_open: bool,
}

impl Cell {
    pub(crate) fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            visited: false,
            top_open: false,
            right_open: false,
            bottom_open: false,
            left_open: false,
        }
    }

    #[inline]
    pub fn coord(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.coord.row
    }

    #[inline]
    pub fn col(&self) -> u32 {
        self.coord.col
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn top_open(&self) -> bool {
        self.top_open
    }

    #[inline]
    pub fn right_open(&self) -> bool {
        self.right_open
    }

    #[inline]
    pub fn bottom_open(&self) -> bool {
        self.bottom_open
    }

    #[inline]
    pub fn left_open(&self) -> bool {
        self.left_open
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        match dir {
            Direction::Top => self.top_open,
            Direction::Right => self.right_open,
            Direction::Bottom => self.bottom_open,
            Direction::Left => self.left_open,
        }
    }

    pub(crate) fn open(&mut self, dir: Direction) {
        match dir {
            Direction::Top => self.top_open = true,
            Direction::Right => self.right_open = true,
            Direction::Bottom => self.bottom_open = true,
            Direction::Left => self.left_open = true,
        }
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }
}
