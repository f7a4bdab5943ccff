//! Spatial storage: the dense cell grid and the tile partition over it.

pub mod grid;
pub mod tiles;

pub use grid::CellGrid;
pub use tiles::{Tile, TileGrid};
