use crate::cells::Cell;
use crate::grid::Grid;
use crate::units::TileIndex;

/// Tile sheet frame for a cell's wall pattern.
///
/// Unvisited cells draw as frame 0 whatever their flags say, as do visited
/// cells with every wall still intact. The other fifteen open-wall
/// combinations each have a frame of their own. The numbering is the sprite
/// sheet convention the render layer was drawn against, so it must be
/// reproduced exactly.
pub fn tile_index(cell: &Cell) -> TileIndex {
    if !cell.visited() {
        return TileIndex(0);
    }

    let pattern = (
        cell.top_open(),
        cell.right_open(),
        cell.bottom_open(),
        cell.left_open(),
    );
    let index = match pattern {
        (false, false, false, false) => 0,
        (true, false, false, false) => 1,
        (true, true, false, false) => 2,
        (true, true, true, false) => 3,
        (false, true, false, false) => 4,
        (false, true, true, false) => 5,
        (false, true, true, true) => 6,
        (false, false, true, false) => 7,
        (false, false, true, true) => 8,
        (true, false, true, true) => 9,
        (false, false, false, true) => 10,
        (true, false, false, true) => 11,
        (true, true, false, true) => 12,
        (true, true, true, true) => 13,
        (true, false, true, false) => 14,
        (false, true, false, true) => 15,
    };

    TileIndex(index)
}

/// Row major tile frame for every cell in the grid, ready to hand to a tile
/// map renderer.
pub fn tile_indices(grid: &Grid) -> Vec<TileIndex> {
    grid.iter()
        .map(|coord| {
            let cell = grid
                .cell(coord)
                .expect("Cell iterator should give valid coordinates");
            tile_index(cell)
        })
        .collect()
}
