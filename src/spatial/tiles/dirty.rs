use super::*;

impl TileGrid {
    // === BitSet helpers ===

    #[inline(always)]
    fn set_bit(bits: &mut [u64], idx: usize) -> bool {
        let word = idx >> 6; // idx / 64
        let bit = idx & 63; // idx % 64
        let mask = 1u64 << bit;
        let was_set = bits[word] & mask != 0;
        bits[word] |= mask;
        !was_set
    }

    // === Dirty marking ===

    /// Record a grid cell as needing a pixel refresh in its owning
    /// tile. No-op when the tile is already fully dirty (full subsumes
    /// partial) or the coordinate is out of range.
    pub fn mark_cell(&mut self, gx: u32, gy: u32) {
        // Checked against the grid extent, not the tile footprint: on
        // non-multiple grids the edge tiles are clamped, so gap
        // coordinates would index past the tile's cell count.
        if gx >= self.grid_w || gy >= self.grid_h {
            return;
        }
        let tx = gx / self.tile_size;
        let ty = gy / self.tile_size;
        let idx = (ty * self.tiles_x + tx) as usize;
        let tile = &mut self.tiles[idx];
        if tile.fully_dirty {
            return;
        }

        let local = (gy - tile.y) * tile.w + (gx - tile.x);
        if Self::set_bit(&mut tile.dirty_bits, local as usize) {
            tile.dirty_cells.push(local);
        }

        // Past half the tile a full redraw is cheaper than chasing
        // individual cells.
        if tile.dirty_cells.len() * 2 > (tile.w as usize) * (tile.h as usize) {
            Self::promote_to_full(tile);
        }
    }

    /// Force a full redraw of one tile, discarding its partial set.
    pub fn mark_tile_fully_dirty(&mut self, idx: usize) {
        if idx < self.tiles.len() {
            Self::promote_to_full(&mut self.tiles[idx]);
        }
    }

    /// Force a full redraw of every tile (world reset, rule change).
    pub fn mark_all_dirty(&mut self) {
        for tile in &mut self.tiles {
            Self::promote_to_full(tile);
        }
    }

    fn promote_to_full(tile: &mut Tile) {
        tile.fully_dirty = true;
        tile.dirty_bits.fill(0);
        tile.dirty_cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_cell_dedupes_via_bitset() {
        let mut tiles = TileGrid::new(64, 64, 32);
        // Tiles start fully dirty; settle them first.
        let grid = CellGrid::new(64, 64);
        tiles.update_all(&grid);

        tiles.mark_cell(5, 7);
        tiles.mark_cell(5, 7);
        tiles.mark_cell(5, 7);
        assert_eq!(tiles.tile(0).dirty_cells.len(), 1);
    }

    #[test]
    fn full_subsumes_partial() {
        let mut tiles = TileGrid::new(64, 64, 32);
        let grid = CellGrid::new(64, 64);
        tiles.update_all(&grid);

        tiles.mark_cell(1, 1);
        tiles.mark_tile_fully_dirty(0);
        assert!(tiles.tile(0).fully_dirty);
        assert!(tiles.tile(0).dirty_cells.is_empty());

        // Further cell marks are no-ops while fully dirty.
        tiles.mark_cell(2, 2);
        assert!(tiles.tile(0).dirty_cells.is_empty());
    }

    #[test]
    fn oversized_partial_set_promotes_to_full() {
        let mut tiles = TileGrid::new(4, 4, 4);
        let grid = CellGrid::new(4, 4);
        tiles.update_all(&grid);

        // 16-cell tile: the 9th distinct mark crosses the half mark.
        for i in 0..9u32 {
            tiles.mark_cell(i % 4, i / 4);
        }
        assert!(tiles.tile(0).fully_dirty);
    }

    #[test]
    fn out_of_range_mark_is_a_no_op() {
        let mut tiles = TileGrid::new(64, 64, 32);
        tiles.mark_cell(64, 0);
        tiles.mark_cell(0, 1000);
    }

    #[test]
    fn marks_in_the_edge_tile_gap_are_rejected() {
        // 100x100 grid, 32px tiles: the tile footprint runs to 128.
        // Coordinates in the gap [100, 128) own a clamped edge tile
        // but lie outside the grid - they must be dropped, not mapped
        // to a bogus local index.
        let grid = CellGrid::new(100, 100);
        let mut tiles = TileGrid::new(100, 100, 32);
        tiles.update_all(&grid);

        tiles.mark_cell(127, 99);
        tiles.mark_cell(100, 50);
        tiles.mark_cell(127, 127);
        assert_eq!(tiles.dirty_tile_count(), 0);
        tiles.update_all(&grid);

        // Same gap on a grid smaller than a single tile.
        let grid = CellGrid::new(100, 100);
        let mut tiles = TileGrid::new(100, 100, 64);
        tiles.update_all(&grid);
        tiles.mark_cell(127, 127);
        assert_eq!(tiles.dirty_tile_count(), 0);

        // In-range cells right at the edge still mark normally.
        tiles.mark_cell(99, 99);
        assert_eq!(tiles.dirty_tile_count(), 1);
    }
}
