use super::*;

impl TileGrid {
    /// Lazily refresh one tile's pixel cache from the grid.
    ///
    /// Fully dirty: recompute every pixel. Partially dirty: recompute
    /// only the recorded cells. Clean: no-op. Returns the number of
    /// pixels recomputed, and clears both dirty representations, after
    /// which the cache exactly matches current grid state.
    pub fn update(&mut self, idx: usize, grid: &CellGrid) -> u32 {
        let tile = &mut self.tiles[idx];

        if tile.fully_dirty {
            let grid_width = grid.width() as usize;
            let states = grid.states();
            let w = tile.w as usize;

            let mut buf_idx = 0usize;
            for j in 0..tile.h as usize {
                let row = ((tile.y as usize) + j) * grid_width + tile.x as usize;
                for i in 0..w {
                    tile.pixels[buf_idx + i] = state_color(states[row + i]);
                }
                buf_idx += w;
            }

            tile.fully_dirty = false;
            let refreshed = (tile.w * tile.h) as u32;
            return refreshed;
        }

        if tile.dirty_cells.is_empty() {
            return 0;
        }

        let refreshed = tile.dirty_cells.len() as u32;
        for k in 0..tile.dirty_cells.len() {
            let local = tile.dirty_cells[k];
            let gx = tile.x + local % tile.w;
            let gy = tile.y + local / tile.w;
            tile.pixels[local as usize] = state_color(grid.get(gx, gy));
        }
        tile.dirty_cells.clear();
        tile.dirty_bits.fill(0);
        refreshed
    }

    /// Refresh every tile. Used on reset and by tests; the per-frame
    /// path only updates visible tiles right before compositing.
    pub fn update_all(&mut self, grid: &CellGrid) -> u32 {
        let mut refreshed = 0u32;
        for idx in 0..self.tiles.len() {
            refreshed = refreshed.saturating_add(self.update(idx, grid));
        }
        refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::BG_COLOR;

    /// From-scratch pixel recompute, for comparing against the
    /// incremental path.
    fn reference_pixels(tile: &Tile, grid: &CellGrid) -> Vec<u32> {
        let mut out = Vec::with_capacity((tile.w * tile.h) as usize);
        for j in 0..tile.h {
            for i in 0..tile.w {
                out.push(state_color(grid.get(tile.x + i, tile.y + j)));
            }
        }
        out
    }

    #[test]
    fn full_refresh_matches_reference() {
        let mut grid = CellGrid::new(100, 100);
        for i in 0..100u32 {
            grid.set(i % 100, (i * 7) % 100, (i % 3) as u8);
        }
        let mut tiles = TileGrid::new(100, 100, 32);
        tiles.update_all(&grid);

        for idx in 0..tiles.total_tiles() {
            let tile = tiles.tile(idx);
            assert_eq!(tile.pixels, reference_pixels(tile, &grid), "tile {idx}");
        }
    }

    #[test]
    fn partial_refresh_matches_reference() {
        let mut grid = CellGrid::new(64, 64);
        let mut tiles = TileGrid::new(64, 64, 32);
        tiles.update_all(&grid);

        grid.set(10, 10, 1);
        grid.set(33, 40, 2);
        tiles.mark_cell(10, 10);
        tiles.mark_cell(33, 40);
        tiles.update_all(&grid);

        for idx in 0..tiles.total_tiles() {
            let tile = tiles.tile(idx);
            assert_eq!(tile.pixels, reference_pixels(tile, &grid), "tile {idx}");
        }
    }

    #[test]
    fn clean_tile_update_is_a_no_op() {
        let grid = CellGrid::new(64, 64);
        let mut tiles = TileGrid::new(64, 64, 32);
        assert!(tiles.update_all(&grid) > 0);
        assert_eq!(tiles.update_all(&grid), 0);
    }

    #[test]
    fn unmarked_cells_stay_stale_until_marked() {
        let mut grid = CellGrid::new(64, 64);
        let mut tiles = TileGrid::new(64, 64, 32);
        tiles.update_all(&grid);

        // Mutate without marking: the cache intentionally lags.
        grid.set(5, 5, 1);
        tiles.update_all(&grid);
        assert_eq!(tiles.tile(0).pixels[5 * 32 + 5], BG_COLOR);

        tiles.mark_cell(5, 5);
        tiles.update_all(&grid);
        assert_eq!(tiles.tile(0).pixels[5 * 32 + 5], state_color(1));
    }

    #[test]
    fn edge_tile_refresh_uses_actual_dims() {
        let mut grid = CellGrid::new(40, 40);
        grid.set(39, 39, 1);
        let mut tiles = TileGrid::new(40, 40, 32);
        tiles.update_all(&grid);

        let corner_idx = tiles.tile_index(39, 39);
        let corner = tiles.tile(corner_idx);
        assert_eq!((corner.w, corner.h), (8, 8));
        assert_eq!(corner.pixels[7 * 8 + 7], state_color(1));
    }
}
