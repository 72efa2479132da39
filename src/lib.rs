//! **tilemaze** is a maze generation, tile mapping and route finding library.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod tiles;
pub mod units;
