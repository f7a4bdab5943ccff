//! Tile system - fixed-size tile partition with per-tile pixel caches.
//!
//! Every tile owns a persistent ABGR buffer, one pixel per grid cell.
//! Redraw cost per frame is O(dirty cells + visible tiles) instead of
//! O(grid area): turmite steps touch O(1) cells per tick, so a frame
//! usually refreshes a handful of pixels across one or two tiles.

use crate::domain::rules::state_color;
use crate::spatial::grid::CellGrid;

/// Default tile edge in cells (64x64 keeps the buffer at 16 KiB).
pub const DEFAULT_TILE_SIZE: u32 = 64;

mod dirty;
mod refresh;

/// One tile: a rectangular sub-region of the grid plus its pixel cache.
///
/// Dirty model: either `fully_dirty` (redraw every pixel) or a partial
/// set of local cell indices (bitset + insertion-ordered list). Full
/// subsumes partial; a partial set growing past half the tile is
/// promoted to a full redraw.
pub struct Tile {
    /// Grid-space origin of this tile.
    pub x: u32,
    pub y: u32,
    /// Actual dimensions. Edge tiles clamp to the grid bounds, so all
    /// pixel arithmetic must use these, never the nominal tile size.
    pub w: u32,
    pub h: u32,
    /// ABGR pixel cache, row-major `w * h`, tightly packed.
    pub pixels: Vec<u32>,
    fully_dirty: bool,
    dirty_bits: Vec<u64>,
    dirty_cells: Vec<u32>,
}

impl Tile {
    fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        let cells = (w as usize) * (h as usize);
        Self {
            x,
            y,
            w,
            h,
            pixels: vec![crate::domain::rules::BG_COLOR; cells],
            // Start fully dirty so the first update populates the cache.
            fully_dirty: true,
            dirty_bits: vec![0u64; (cells + 63) / 64],
            dirty_cells: Vec::new(),
        }
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        !self.fully_dirty && self.dirty_cells.is_empty()
    }
}

/// Manages the tile partition over a cell grid.
pub struct TileGrid {
    tile_size: u32,
    tiles_x: u32,
    tiles_y: u32,
    // Grid extent, for rejecting marks in the gap between the grid
    // edge and the tile footprint on non-multiple grids.
    grid_w: u32,
    grid_h: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Partition a `grid_width` x `grid_height` grid into tiles.
    /// A `tile_size` of 0 is clamped to 1.
    pub fn new(grid_width: u32, grid_height: u32, tile_size: u32) -> Self {
        let tile_size = tile_size.max(1);
        let tiles_x = (grid_width + tile_size - 1) / tile_size;
        let tiles_y = (grid_height + tile_size - 1) / tile_size;

        let mut tiles = Vec::with_capacity((tiles_x * tiles_y) as usize);
        for ty in 0..tiles_y {
            for tx in 0..tiles_x {
                let x = tx * tile_size;
                let y = ty * tile_size;
                let w = (x + tile_size).min(grid_width) - x;
                let h = (y + tile_size).min(grid_height) - y;
                tiles.push(Tile::new(x, y, w, h));
            }
        }

        Self {
            tile_size,
            tiles_x,
            tiles_y,
            grid_w: grid_width,
            grid_h: grid_height,
            tiles,
        }
    }

    // === Tile indexing ===

    #[inline]
    pub fn tile_size(&self) -> u32 { self.tile_size }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.tiles_x, self.tiles_y)
    }

    #[inline]
    pub fn total_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Tile index owning a grid coordinate.
    #[inline]
    pub fn tile_index(&self, gx: u32, gy: u32) -> usize {
        let tx = gx / self.tile_size;
        let ty = gy / self.tile_size;
        (ty * self.tiles_x + tx) as usize
    }

    #[inline]
    pub fn tile(&self, idx: usize) -> &Tile {
        &self.tiles[idx]
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, idx: usize) -> &mut Tile {
        &mut self.tiles[idx]
    }

    /// Number of tiles currently carrying any dirty state.
    pub fn dirty_tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_clean()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_tiles_clamp_to_grid_bounds() {
        // 100x70 grid with 32px tiles: 4x3 tiles, right column 4 wide,
        // bottom row 6 tall.
        let tiles = TileGrid::new(100, 70, 32);
        assert_eq!(tiles.dimensions(), (4, 3));

        let right = tiles.tile(3);
        assert_eq!((right.x, right.w), (96, 4));
        let bottom = tiles.tile(8);
        assert_eq!((bottom.y, bottom.h), (64, 6));

        let corner = tiles.tile(11);
        assert_eq!((corner.w, corner.h), (4, 6));
        assert_eq!(corner.pixels.len(), 24);
    }

    #[test]
    fn tile_index_locates_owner() {
        let tiles = TileGrid::new(100, 100, 32);
        assert_eq!(tiles.tile_index(0, 0), 0);
        assert_eq!(tiles.tile_index(31, 31), 0);
        assert_eq!(tiles.tile_index(32, 0), 1);
        assert_eq!(tiles.tile_index(99, 99), 15);
    }

    #[test]
    fn zero_tile_size_is_clamped() {
        let tiles = TileGrid::new(8, 8, 0);
        assert_eq!(tiles.tile_size(), 1);
        assert_eq!(tiles.total_tiles(), 64);
    }
}
