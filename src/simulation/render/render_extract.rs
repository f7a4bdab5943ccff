use super::WorldCore;

/// Cull tiles against the viewport. Every visible tile is composited
/// each frame (the host clears its canvas); dirtiness only gates the
/// pixel refresh inside `tile_pixels_ptr`.
pub(super) fn collect_visible_tiles(world: &mut WorldCore) -> usize {
    world.visible_list.clear();
    let total = world.tiles.total_tiles();

    for idx in 0..total {
        let tile = world.tiles.tile(idx);
        if world.viewport.is_rect_visible(tile.x, tile.y, tile.w, tile.h) {
            world.visible_list.push(idx as u32);
        }
    }

    world.visible_list.len()
}

/// Lazy refresh immediately before compositing: recompute only what
/// the dirty tracking recorded, then hand the host the buffer pointer.
pub(super) fn tile_pixels_ptr(world: &mut WorldCore, tile_idx: usize) -> *const u32 {
    if tile_idx >= world.tiles.total_tiles() {
        // Degrade to the first tile's buffer rather than faulting.
        return world.tiles.tile(0).pixels.as_ptr();
    }

    let refreshed = world.tiles.update(tile_idx, &world.grid);
    if world.perf_enabled {
        world.frame_stats.refreshed_pixels = world
            .frame_stats
            .refreshed_pixels
            .saturating_add(refreshed);
    }

    world.tiles.tile(tile_idx).pixels.as_ptr()
}

/// Tile's screen-space bounding box under the viewport transform.
pub(super) fn tile_screen_rect(world: &WorldCore, tile_idx: usize) -> (f64, f64, f64, f64) {
    if tile_idx >= world.tiles.total_tiles() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let tile = world.tiles.tile(tile_idx);
    let (sx, sy) = world.viewport.to_screen(tile.x as f64, tile.y as f64);
    let s = world.viewport.scale();
    (sx, sy, tile.w as f64 * s, tile.h as f64 * s)
}
