use rand::Rng;

use crate::cells::{Direction, DirectionSmallVec, GridCoordinate};
use crate::grid::{Grid, GridError};

/// The directions from `coord` whose neighbouring cell exists and has not
/// been visited yet, in the fixed Top, Right, Bottom, Left enumeration
/// order. Empty at a dead end. Asking about a coordinate outside the grid
/// also yields nothing. No side effects.
pub fn unvisited_directions(grid: &Grid, coord: GridCoordinate) -> DirectionSmallVec {
    if !grid.is_valid_coordinate(coord) {
        return DirectionSmallVec::new();
    }

    Direction::ALL
        .iter()
        .cloned()
        .filter(|&dir| {
            grid.neighbour_at_direction(coord, dir)
                .and_then(|neighbour| grid.cell(neighbour).ok())
                .map_or(false, |cell| !cell.visited())
        })
        .collect()
}

/// Apply the recursive backtracker maze generation algorithm to the grid.
///
/// A randomised depth first walk: from the current cell pick one unvisited
/// neighbour uniformly at random, carve the wall between them and advance
/// into it. When the current cell has no unvisited neighbours the walk backs
/// up to the most recently carved cell that still has some and resumes
/// there. The backtracking state is an explicit stack of coordinates rather
/// than the call stack, so deep grids cannot overflow, and a cell is only
/// abandoned once all of its neighbours are visited, which guarantees every
/// cell joins the maze. The carved openings then form a spanning tree of the
/// grid: `size - 1` openings, all cells connected, no cycles, the "perfect
/// maze" shape with exactly one route between any two cells.
///
/// Marks the start cell visited as its first action, so callers never touch
/// grid state directly. The caller supplies the random source; generation is
/// deterministic given the stream it produces.
pub fn recursive_backtracker<R: Rng>(
    grid: &mut Grid,
    start: GridCoordinate,
    rng: &mut R,
) -> Result<(), GridError> {
    grid.mark_visited(start)?;

    let mut stack = vec![start];
    while let Some(&current) = stack.last() {
        let candidates = unvisited_directions(grid, current);

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let dir = candidates[rng.gen_range(0..candidates.len())];
        let neighbour = grid.carve(current, dir)?;
        stack.push(neighbour);
    }

    Ok(())
}
