use wasm_bindgen::prelude::*;

use crate::domain::turmite::BoundaryMode;

use super::perf_stats::FrameStats;
use super::{StepMode, WorldCore};

/// Largest step rate the UI slider can request.
const SLIDER_MAX_STEPS: f64 = 1_000_000.0;

/// Logarithmic slider mapping: slider position in `[0, 1]` to steps
/// per frame in `[1, 10^6]`. Pure conversion for the UI boundary -
/// the core never stores a slider position.
#[wasm_bindgen]
pub fn slider_to_steps(value: f64) -> u32 {
    let v = value.clamp(0.0, 1.0);
    10f64.powf(v * SLIDER_MAX_STEPS.log10()).round() as u32
}

/// Inverse of `slider_to_steps`.
#[wasm_bindgen]
pub fn steps_to_slider(steps: u32) -> f64 {
    let s = (steps.max(1) as f64).min(SLIDER_MAX_STEPS);
    s.log10() / SLIDER_MAX_STEPS.log10()
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given grid dimensions, tile size and
    /// display size. Starts with one classic ant at the grid center.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, tile_size: u32, display_w: f64, display_h: f64) -> Self {
        Self {
            core: WorldCore::new(width, height, tile_size, display_w, display_h),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn agent_count(&self) -> usize { self.core.agent_count() }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.core.tick_count() }

    /// Backlog of requested-but-unexecuted simulation ticks.
    #[wasm_bindgen(getter)]
    pub fn pending_steps(&self) -> u64 { self.core.pending_steps() }

    /// Ticks executed in the last drained frame.
    #[wasm_bindgen(getter)]
    pub fn ticks_last_frame(&self) -> u64 { self.core.ticks_last_frame() }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool { self.core.is_halted() }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.core.is_running() }

    // === Configuration surface ===

    pub fn set_running(&mut self, running: bool) {
        self.core.set_running(running);
    }

    /// `true` = parallel (simultaneous) stepping, `false` = sequential.
    pub fn set_parallel_step_mode(&mut self, parallel: bool) {
        self.core.set_step_mode(if parallel {
            StepMode::Parallel
        } else {
            StepMode::Sequential
        });
    }

    /// `true` = halt when an agent would leave the grid, `false` = wrap.
    pub fn set_halt_on_exit(&mut self, halt: bool) {
        self.core.set_boundary_mode(if halt {
            BoundaryMode::Halt
        } else {
            BoundaryMode::Wrap
        });
    }

    pub fn set_steps_per_frame(&mut self, n: u32) {
        self.core.set_steps_per_frame(n as u64);
    }

    pub fn set_unlimited(&mut self, enabled: bool) {
        self.core.set_unlimited(enabled);
    }

    /// Apply the whole configuration surface as one JSON document.
    pub fn apply_config(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .apply_config_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_frame_stats(&self) -> FrameStats {
        self.core.get_frame_stats()
    }

    // === Commands ===

    /// Zero the grid, mark all tiles fully dirty, stop running.
    pub fn reset_world(&mut self) {
        self.core.reset_world();
    }

    /// Flip a single cell's state (0 <-> 1) for direct user editing.
    pub fn toggle_cell(&mut self, gx: u32, gy: u32) -> bool {
        self.core.toggle_cell(gx, gy)
    }

    /// Add an agent; out-of-range positions wrap, the rule string is
    /// sanitized. Returns the new agent's id.
    pub fn add_agent(&mut self, x: i32, y: i32, rule: String) -> u32 {
        self.core.add_agent(x as i64, y as i64, &rule)
    }

    pub fn remove_agent(&mut self, id: u32) -> bool {
        self.core.remove_agent(id)
    }

    /// Synchronously execute `n` ticks regardless of running state.
    pub fn step_once(&mut self, n: u32) -> u32 {
        self.core.step_once(n as u64) as u32
    }

    /// Per-frame entry point: accrue the requested rate while running,
    /// then drain under the wall-clock budget. Returns ticks executed.
    pub fn frame(&mut self, budget_ms: f64) -> u64 {
        self.core.frame(budget_ms)
    }

    pub fn request_steps(&mut self, n: u32) {
        self.core.request_steps(n as u64);
    }

    pub fn reset_backlog(&mut self) {
        self.core.reset_backlog();
    }

    // === Agent queries ===

    /// All agents as a JSON array (id, position, heading, rule).
    pub fn agents_json(&self) -> String {
        self.core.agents_json()
    }

    pub fn agent_x(&self, index: usize) -> i32 {
        self.core.agent_position(index).map(|p| p.0 as i32).unwrap_or(-1)
    }

    pub fn agent_y(&self, index: usize) -> i32 {
        self.core.agent_position(index).map(|p| p.1 as i32).unwrap_or(-1)
    }

    // === Viewport ===

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 { self.core.zoom() }

    pub fn set_display_size(&mut self, w: f64, h: f64) {
        self.core.set_display_size(w, h);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.core.set_zoom(zoom);
    }

    /// Wheel-style zoom about the pointer position.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, mx: f64, my: f64) {
        self.core.zoom_by_wheel(delta_y, mx, my);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.core.pan(dx, dy);
    }

    pub fn center_view(&mut self) {
        self.core.center_view();
    }

    /// Grid cell x under a screen point (floored; may be off-grid).
    pub fn cell_at_x(&self, sx: f64, sy: f64) -> f64 {
        self.core.screen_to_cell(sx, sy).0 as f64
    }

    pub fn cell_at_y(&self, sx: f64, sy: f64) -> f64 {
        self.core.screen_to_cell(sx, sy).1 as f64
    }

    pub fn grid_screen_x(&self, gx: f64, gy: f64) -> f64 {
        self.core.grid_to_screen(gx, gy).0
    }

    pub fn grid_screen_y(&self, gx: f64, gy: f64) -> f64 {
        self.core.grid_to_screen(gx, gy).1
    }

    /// Screen pixels per grid cell at the current zoom (for agent
    /// markers and the grid border drawn on top by the host).
    pub fn cell_screen_size(&self) -> f64 {
        self.core.viewport().scale()
    }

    // === Rendering API ===

    /// Cull tiles against the viewport; fills the visible list.
    /// Returns the visible tile count.
    pub fn collect_visible_tiles(&mut self) -> usize {
        self.core.collect_visible_tiles()
    }

    /// Get pointer to the visible tile index list.
    pub fn visible_list_ptr(&self) -> *const u32 {
        self.core.visible_list_ptr()
    }

    pub fn visible_count(&self) -> usize {
        self.core.visible_count()
    }

    /// Lazily refresh a tile, then get its pixel buffer pointer
    /// (ABGR, tightly packed tile_width * tile_height, for blitting).
    pub fn tile_pixels_ptr(&mut self, tile_idx: usize) -> *const u32 {
        self.core.tile_pixels_ptr(tile_idx)
    }

    pub fn tile_width(&self, tile_idx: usize) -> u32 {
        self.core.tile_width(tile_idx)
    }

    pub fn tile_height(&self, tile_idx: usize) -> u32 {
        self.core.tile_height(tile_idx)
    }

    /// Tile's screen-space X for compositing.
    pub fn tile_screen_x(&self, tile_idx: usize) -> f64 {
        self.core.tile_screen_x(tile_idx)
    }

    pub fn tile_screen_y(&self, tile_idx: usize) -> f64 {
        self.core.tile_screen_y(tile_idx)
    }

    pub fn tile_screen_w(&self, tile_idx: usize) -> f64 {
        self.core.tile_screen_w(tile_idx)
    }

    pub fn tile_screen_h(&self, tile_idx: usize) -> f64 {
        self.core.tile_screen_h(tile_idx)
    }

    pub fn total_tiles(&self) -> usize {
        self.core.total_tiles()
    }

    /// Tiles currently carrying dirty state (diagnostics).
    pub fn dirty_tiles(&self) -> usize {
        self.core.dirty_tiles()
    }
}
