#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

/// Which frame of a tile sheet draws a cell's wall pattern.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct TileIndex(pub u8);
