use rand::Rng;
use std::fmt;

use crate::cells::{Cell, CoordinateSmallVec, Direction, GridCoordinate};
use crate::units::{ColumnsCount, RowsCount};

/// The two ways grid access can fail. Everything else is total once a grid
/// exists.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    InvalidDimensions { rows: usize, columns: usize },
    OutOfBounds { coordinate: GridCoordinate },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::InvalidDimensions { rows, columns } => {
                write!(
                    f,
                    "invalid grid dimensions {}x{}, rows and columns must both be positive",
                    rows, columns
                )
            }
            GridError::OutOfBounds { coordinate } => {
                write!(
                    f,
                    "coordinate ({}, {}) is outside the grid",
                    coordinate.row, coordinate.col
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A fixed size rectangular grid owning one `Cell` per position, stored row
/// major. Wall and visitation state changes only through `carve` and
/// `mark_visited`, which is what makes the bidirectional wall invariant
/// unbreakable from outside: a wall opening is always recorded on both of
/// the cells it joins.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl Grid {
    /// Creates a grid of unvisited, fully walled cells.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid, GridError> {
        let (RowsCount(row_count), ColumnsCount(column_count)) = (rows, columns);
        if row_count == 0 || column_count == 0 {
            return Err(GridError::InvalidDimensions {
                rows: row_count,
                columns: column_count,
            });
        }

        let cells_count = row_count * column_count;
        let mut cells = Vec::with_capacity(cells_count);
        for index in 0..cells_count {
            cells.push(Cell::new(GridCoordinate::from_row_major_index(index, columns)));
        }

        Ok(Grid { cells, rows, columns })
    }

    #[inline]
    pub fn size(&self) -> usize {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        rows * columns
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// The cell at `coord`.
    pub fn cell(&self, coord: GridCoordinate) -> Result<&Cell, GridError> {
        self.grid_coordinate_to_index(coord)
            .map(|index| &self.cells[index])
            .ok_or(GridError::OutOfBounds { coordinate: coord })
    }

    /// Is the coordinate within the grid's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        (coord.row as usize) < rows && (coord.col as usize) < columns
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// 0..grid.size(). Returns None if the coordinate is outside the grid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let ColumnsCount(columns) = self.columns;
            Some(coord.row as usize * columns + coord.col as usize)
        } else {
            None
        }
    }

    /// True iff the position one step in `dir` from `coord` lies within the
    /// grid. Pure bounds query, no wall or visitation state involved.
    pub fn neighbour_exists(&self, coord: GridCoordinate, dir: Direction) -> bool {
        self.neighbour_at_direction(coord, dir).is_some()
    }

    pub fn neighbour_at_direction(
        &self,
        coord: GridCoordinate,
        dir: Direction,
    ) -> Option<GridCoordinate> {
        coord.offset(dir).filter(|&c| self.is_valid_coordinate(c))
    }

    /// Is the wall on side `dir` of the cell at `coord` carved open? An
    /// invalid coordinate is simply a closed wall, which is the convenient
    /// answer for display code probing past the boundary.
    pub fn is_open(&self, coord: GridCoordinate, dir: Direction) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_open(dir))
    }

    /// Neighbouring coordinates reachable from `coord` through an open wall,
    /// in the fixed Top, Right, Bottom, Left order. Empty for an invalid
    /// coordinate or a fully walled cell.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .filter(|&&dir| self.is_open(coord, dir))
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Opens the wall between `coord` and its neighbour one step in `dir`,
    /// recording the opening on both cells and marking the neighbour
    /// visited. Both sides change within this one call, so the bidirectional
    /// wall invariant holds at every return. Opening is monotonic, carving
    /// an already open wall changes nothing.
    ///
    /// Returns the neighbour's coordinate so a walk can advance through the
    /// fresh opening. Fails with `OutOfBounds` when `coord` is invalid or
    /// there is no neighbour on that side.
    pub fn carve(&mut self, coord: GridCoordinate, dir: Direction) -> Result<GridCoordinate, GridError> {
        let neighbour_coord = self
            .neighbour_at_direction(coord, dir)
            .ok_or(GridError::OutOfBounds { coordinate: coord })?;
        let cell_index = self
            .grid_coordinate_to_index(coord)
            .ok_or(GridError::OutOfBounds { coordinate: coord })?;
        let neighbour_index = self
            .grid_coordinate_to_index(neighbour_coord)
            .ok_or(GridError::OutOfBounds { coordinate: neighbour_coord })?;

        self.cells[cell_index].open(dir);
        let neighbour = &mut self.cells[neighbour_index];
        neighbour.open(dir.opposite());
        neighbour.mark_visited();

        Ok(neighbour_coord)
    }

    /// Marks the cell at `coord` visited. The generator calls this once for
    /// the start of the walk, every other cell is marked by `carve`.
    pub fn mark_visited(&mut self, coord: GridCoordinate) -> Result<(), GridError> {
        let cell_index = self
            .grid_coordinate_to_index(coord)
            .ok_or(GridError::OutOfBounds { coordinate: coord })?;
        self.cells[cell_index].mark_visited();
        Ok(())
    }

    /// A uniformly random coordinate within the grid.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        GridCoordinate::from_row_major_index(index, self.columns)
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: self.size(),
            row_width: self.columns,
        }
    }

    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            current_row: 0,
            rows: self.rows,
            row_width: self.columns,
        }
    }

    /// Every carved opening in the grid as a pair of joined coordinates.
    /// Each opening is reported once, from the cell on its top or left side.
    pub fn passages(&self) -> Passages {
        Passages {
            grid: self,
            cell_iter: self.iter(),
            pending: None,
        }
    }

    /// Number of carved openings in the whole grid.
    pub fn passages_count(&self) -> usize {
        self.passages().count()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    row_width: ColumnsCount,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.row_width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

// Taking an iterator from a &Grid directly, useful when the grid is held by
// value and `for coord in &grid` reads better than `grid.iter()`.
impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_row: usize,
    rows: RowsCount,
    row_width: ColumnsCount,
}

impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let (RowsCount(rows), ColumnsCount(width)) = (self.rows, self.row_width);
        if self.current_row < rows {
            let coords = (0..width)
                .map(|col| GridCoordinate::new(self.current_row as u32, col as u32))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let RowsCount(rows) = self.rows;
        let lower_bound = rows - self.current_row;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for BatchIter {} // default impl using size_hint()

#[derive(Debug, Clone)]
pub struct Passages<'a> {
    grid: &'a Grid,
    cell_iter: CellIter,
    pending: Option<(GridCoordinate, GridCoordinate)>,
}

impl<'a> Iterator for Passages<'a> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pair) = self.pending.take() {
            return Some(pair);
        }

        // Openings to the right and below belong to this cell; the matching
        // left/top flags on the neighbours are the same openings seen from
        // the other side.
        while let Some(coord) = self.cell_iter.next() {
            let right = if self.grid.is_open(coord, Direction::Right) {
                self.grid
                    .neighbour_at_direction(coord, Direction::Right)
                    .map(|neighbour| (coord, neighbour))
            } else {
                None
            };
            let bottom = if self.grid.is_open(coord, Direction::Bottom) {
                self.grid
                    .neighbour_at_direction(coord, Direction::Bottom)
                    .map(|neighbour| (coord, neighbour))
            } else {
                None
            };

            match (right, bottom) {
                (Some(right_pair), Some(bottom_pair)) => {
                    self.pending = Some(bottom_pair);
                    return Some(right_pair);
                }
                (Some(right_pair), None) => return Some(right_pair),
                (None, Some(bottom_pair)) => return Some(bottom_pair),
                (None, None) => {}
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use std::u32;

    use super::*;

    fn small_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("grid dimensions should be valid")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    // SmallVec really ruins the syntax ergonomics, hence this macro
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => {
            assert_eq!(&*$x, &*$y)
        };
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(RowsCount(0), ColumnsCount(5)),
            Err(GridError::InvalidDimensions { rows: 0, columns: 5 })
        );
        assert_eq!(
            Grid::new(RowsCount(5), ColumnsCount(0)),
            Err(GridError::InvalidDimensions { rows: 5, columns: 0 })
        );
        assert_eq!(
            Grid::new(RowsCount(0), ColumnsCount(0)),
            Err(GridError::InvalidDimensions { rows: 0, columns: 0 })
        );
    }

    #[test]
    fn fresh_grids_are_unvisited_and_fully_walled() {
        let g = small_grid(3, 4);
        for coord in g.iter() {
            let cell = g.cell(coord).unwrap();
            assert_eq!(cell.coord(), coord);
            assert!(!cell.visited());
            assert!(!cell.top_open());
            assert!(!cell.right_open());
            assert!(!cell.bottom_open());
            assert!(!cell.left_open());
        }
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn grid_size() {
        let g = small_grid(10, 10);
        assert_eq!(g.size(), 100);
        let g = small_grid(3, 7);
        assert_eq!(g.size(), 21);
    }

    #[test]
    fn grid_rows_and_columns() {
        let g = small_grid(4, 9);
        assert_eq!(g.rows(), RowsCount(4));
        assert_eq!(g.columns(), ColumnsCount(9));
    }

    #[test]
    fn cell_access_out_of_the_grid_fails() {
        let g = small_grid(3, 3);
        let check_out_of_bounds = |coord: GridCoordinate| {
            assert_eq!(g.cell(coord), Err(GridError::OutOfBounds { coordinate: coord }));
        };
        check_out_of_bounds(GridCoordinate::new(3, 0));
        check_out_of_bounds(GridCoordinate::new(0, 3));
        check_out_of_bounds(GridCoordinate::new(3, 3));
        check_out_of_bounds(GridCoordinate::new(u32::MAX, 0));
        check_out_of_bounds(GridCoordinate::new(u32::MAX, u32::MAX));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let gc = |row, col| GridCoordinate::new(row, col);
        let coords = &[
            gc(0, 0), gc(0, 1), gc(0, 2),
            gc(1, 0), gc(1, 1), gc(1, 2),
            gc(2, 0), gc(2, 1), gc(2, 2),
        ];
        let indices: Vec<Option<usize>> = coords
            .iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let gc = |row, col| GridCoordinate::new(row, col);
        let check_neighbour = |coord, dir: Direction, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), Direction::Top, None);
        check_neighbour(gc(0, 0), Direction::Right, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), Direction::Bottom, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), Direction::Left, None);

        check_neighbour(gc(1, 1), Direction::Top, Some(gc(0, 1)));
        check_neighbour(gc(1, 1), Direction::Right, None);
        check_neighbour(gc(1, 1), Direction::Bottom, None);
        check_neighbour(gc(1, 1), Direction::Left, Some(gc(1, 0)));
    }

    #[test]
    fn neighbour_existence_matches_the_grid_extent() {
        let g = small_grid(2, 3);
        let gc = |row, col| GridCoordinate::new(row, col);

        assert!(!g.neighbour_exists(gc(0, 0), Direction::Top));
        assert!(!g.neighbour_exists(gc(0, 0), Direction::Left));
        assert!(g.neighbour_exists(gc(0, 0), Direction::Right));
        assert!(g.neighbour_exists(gc(0, 0), Direction::Bottom));

        assert!(g.neighbour_exists(gc(1, 2), Direction::Top));
        assert!(g.neighbour_exists(gc(1, 2), Direction::Left));
        assert!(!g.neighbour_exists(gc(1, 2), Direction::Right));
        assert!(!g.neighbour_exists(gc(1, 2), Direction::Bottom));

        assert!(g.neighbour_exists(gc(0, 1), Direction::Right));
        assert!(g.neighbour_exists(gc(0, 1), Direction::Left));
        assert!(!g.neighbour_exists(gc(0, 1), Direction::Top));
    }

    #[test]
    fn random_cell() {
        let g = small_grid(4, 4);
        let cells_count = 4 * 4;
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(coord.row < cells_count);
            assert!(coord.col < cells_count);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(2, 2);
        assert_eq!(
            g.iter().collect::<Vec<GridCoordinate>>(),
            &[
                GridCoordinate::new(0, 0),
                GridCoordinate::new(0, 1),
                GridCoordinate::new(1, 0),
                GridCoordinate::new(1, 1)
            ]
        );
        assert_eq!(g.iter().len(), 4);
    }

    #[test]
    fn row_iter() {
        let g = small_grid(2, 2);
        assert_eq!(
            g.iter_row().collect::<Vec<Vec<GridCoordinate>>>(),
            &[
                &[GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)],
                &[GridCoordinate::new(1, 0), GridCoordinate::new(1, 1)]
            ]
        );
    }

    #[test]
    fn carving_cells() {
        let mut g = small_grid(2, 2);
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(0, 1);

        let carved_to = g.carve(a, Direction::Right).expect("carve failed");
        assert_eq!(carved_to, b);

        let a_cell = g.cell(a).unwrap();
        let b_cell = g.cell(b).unwrap();
        assert!(a_cell.right_open());
        assert!(b_cell.left_open());

        // The neighbour joins the walk, the carved-from side is only marked
        // when it is the walk's start cell.
        assert!(b_cell.visited());
        assert!(!a_cell.visited());

        // No other walls moved.
        assert!(!a_cell.top_open() && !a_cell.bottom_open() && !a_cell.left_open());
        assert!(!b_cell.top_open() && !b_cell.bottom_open() && !b_cell.right_open());
        assert_eq!(g.passages_count(), 1);
    }

    #[test]
    fn carving_is_monotonic() {
        let mut g = small_grid(2, 2);
        let a = GridCoordinate::new(0, 0);
        g.carve(a, Direction::Right).expect("carve failed");
        g.carve(a, Direction::Right).expect("carve failed");
        assert!(g.is_open(a, Direction::Right));
        assert_eq!(g.passages_count(), 1);
    }

    #[test]
    fn carving_to_nowhere_fails() {
        let mut g = small_grid(2, 2);
        let corner = GridCoordinate::new(0, 0);
        assert_eq!(
            g.carve(corner, Direction::Top),
            Err(GridError::OutOfBounds { coordinate: corner })
        );
        assert_eq!(
            g.carve(corner, Direction::Left),
            Err(GridError::OutOfBounds { coordinate: corner })
        );

        let outside = GridCoordinate::new(5, 5);
        assert_eq!(
            g.carve(outside, Direction::Top),
            Err(GridError::OutOfBounds { coordinate: outside })
        );

        // A failed carve changes nothing.
        for coord in g.iter() {
            let cell = g.cell(coord).unwrap();
            assert!(!cell.visited());
            assert!(!cell.top_open() && !cell.right_open() && !cell.bottom_open() && !cell.left_open());
        }
    }

    #[test]
    fn carved_walls_are_symmetric() {
        let mut g = small_grid(3, 3);
        let gc = |row, col| GridCoordinate::new(row, col);
        g.carve(gc(1, 1), Direction::Top).expect("carve failed");
        g.carve(gc(1, 1), Direction::Right).expect("carve failed");
        g.carve(gc(1, 1), Direction::Bottom).expect("carve failed");
        g.carve(gc(1, 1), Direction::Left).expect("carve failed");

        for coord in g.iter() {
            for &dir in Direction::ALL.iter() {
                if let Some(neighbour) = g.neighbour_at_direction(coord, dir) {
                    assert_eq!(g.is_open(coord, dir), g.is_open(neighbour, dir.opposite()));
                }
            }
        }
        assert_eq!(g.passages_count(), 4);
    }

    #[test]
    fn is_open_tolerates_invalid_coordinates() {
        let g = small_grid(2, 2);
        let outside = GridCoordinate::new(9, 9);
        for &dir in Direction::ALL.iter() {
            assert!(!g.is_open(outside, dir));
        }
    }

    #[test]
    fn open_neighbours_follow_carved_walls() {
        let mut g = small_grid(3, 3);
        let centre = GridCoordinate::new(1, 1);
        assert_smallvec_eq!(g.open_neighbours(centre), &[]);

        g.carve(centre, Direction::Right).expect("carve failed");
        g.carve(centre, Direction::Bottom).expect("carve failed");

        let expected = [GridCoordinate::new(1, 2), GridCoordinate::new(2, 1)];
        assert_smallvec_eq!(g.open_neighbours(centre), &expected);
        assert_smallvec_eq!(g.open_neighbours(GridCoordinate::new(9, 9)), &[]);
    }

    #[test]
    fn marking_visited() {
        let mut g = small_grid(2, 2);
        let a = GridCoordinate::new(1, 0);
        g.mark_visited(a).expect("mark_visited failed");
        assert!(g.cell(a).unwrap().visited());

        let outside = GridCoordinate::new(2, 0);
        assert_eq!(
            g.mark_visited(outside),
            Err(GridError::OutOfBounds { coordinate: outside })
        );
    }

    #[test]
    fn passages_report_each_opening_once() {
        let mut g = small_grid(2, 2);
        let gc = |row, col| GridCoordinate::new(row, col);
        g.carve(gc(0, 0), Direction::Right).expect("carve failed");
        g.carve(gc(0, 0), Direction::Bottom).expect("carve failed");
        g.carve(gc(1, 0), Direction::Right).expect("carve failed");

        let passages: Vec<(GridCoordinate, GridCoordinate)> =
            g.passages().sorted().collect::<Vec<_>>();
        assert_eq!(
            passages,
            vec![
                (gc(0, 0), gc(0, 1)),
                (gc(0, 0), gc(1, 0)),
                (gc(1, 0), gc(1, 1)),
            ]
        );
        assert_eq!(g.passages_count(), 3);
    }
}
