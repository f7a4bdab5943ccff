//! World - turmite simulation orchestration.
//!
//! Refactored for SOLID principles:
//! - Single Responsibility: World only orchestrates, delegates to
//!   the grid, tile, agent and viewport modules
//! - Open/Closed: new turn rules need no changes here
//!
//! Cell storage is in spatial/grid.rs, dirty tracking and pixel
//! caches in spatial/tiles/, the step rule in domain/turmite.rs,
//! the screen transform in view/viewport.rs.

use serde::{Deserialize, Serialize};

use crate::domain::turmite::{BoundaryMode, StepPlan, Turmite};
use crate::spatial::grid::CellGrid;
use crate::spatial::tiles::TileGrid;
use crate::view::viewport::Viewport;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "step/scheduler.rs"]
mod scheduler;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{slider_to_steps, steps_to_slider, World};
pub use perf_stats::FrameStats;

use perf_timer::PerfTimer;

/// How agents within one tick observe each other's writes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    /// First-come-first-served: each agent's read and write complete
    /// before the next agent runs (deterministic given agent order).
    Sequential,
    /// Simultaneous: all agents read the pre-tick grid, then all
    /// commit (deterministic regardless of agent order).
    Parallel,
}

/// Requested simulation throughput per displayed frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepsPerFrame {
    Count(u64),
    /// No backlog accounting: drain until the frame budget expires.
    Unlimited,
}

/// The simulation world
pub struct WorldCore {
    grid: CellGrid,
    tiles: TileGrid,
    viewport: Viewport,
    agents: Vec<Turmite>,
    next_agent_id: u32,

    // Settings
    running: bool,
    step_mode: StepMode,
    boundary_mode: BoundaryMode,
    steps_per_frame: StepsPerFrame,

    // State
    pending_steps: u64,
    ticks_last_frame: u64,
    tick_count: u64,
    /// Latched by Halt boundary mode when an agent would leave the
    /// grid; cleared only by reset.
    halted: bool,
    plan_buffer: Vec<StepPlan>,

    // Render scratch
    visible_list: Vec<u32>,

    // Perf metrics
    perf_enabled: bool,
    frame_stats: FrameStats,
}

impl WorldCore {
    /// Create a new world with given grid dimensions, tile size and
    /// display size, seeded with one classic ant at the grid center.
    pub fn new(width: u32, height: u32, tile_size: u32, display_w: f64, display_h: f64) -> Self {
        init::create_world_core(width, height, tile_size, display_w, display_h)
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn agent_count(&self) -> usize { self.agents.len() }

    pub fn tick_count(&self) -> u64 { self.tick_count }

    pub fn pending_steps(&self) -> u64 { self.pending_steps }

    pub fn ticks_last_frame(&self) -> u64 { self.ticks_last_frame }

    pub fn is_halted(&self) -> bool { self.halted }

    // === Settings ===

    pub fn set_running(&mut self, running: bool) {
        settings::set_running(self, running);
    }

    pub fn is_running(&self) -> bool {
        self.running && !self.halted
    }

    pub fn set_step_mode(&mut self, mode: StepMode) {
        settings::set_step_mode(self, mode);
    }

    pub fn step_mode(&self) -> StepMode { self.step_mode }

    pub fn set_boundary_mode(&mut self, mode: BoundaryMode) {
        settings::set_boundary_mode(self, mode);
    }

    pub fn boundary_mode(&self) -> BoundaryMode { self.boundary_mode }

    /// Set requested steps per frame (clamped to at least 1).
    /// Configuration changes drop the queued backlog.
    pub fn set_steps_per_frame(&mut self, n: u64) {
        settings::set_steps_per_frame(self, n);
    }

    pub fn set_unlimited(&mut self, enabled: bool) {
        settings::set_unlimited(self, enabled);
    }

    pub fn steps_per_frame(&self) -> StepsPerFrame { self.steps_per_frame }

    /// Apply the whole configuration surface as one JSON document.
    pub fn apply_config_json(&mut self, json: &str) -> Result<(), String> {
        settings::apply_config_json(self, json)
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_frame_stats(&self) -> FrameStats {
        self.frame_stats.clone()
    }

    // === Commands ===

    /// Zero the grid, mark all tiles fully dirty, stop running.
    /// Agents return to the grid center, heading up.
    pub fn reset_world(&mut self) {
        commands::reset_world(self);
    }

    /// Flip a single cell's state (0 <-> 1) and mark its tile dirty.
    pub fn toggle_cell(&mut self, gx: u32, gy: u32) -> bool {
        commands::toggle_cell(self, gx, gy)
    }

    /// Add an agent; position wraps into bounds, the rule string is
    /// sanitized. Returns the new agent's id.
    pub fn add_agent(&mut self, x: i64, y: i64, rule: &str) -> u32 {
        commands::add_agent(self, x, y, rule)
    }

    /// Remove an agent by id.
    pub fn remove_agent(&mut self, id: u32) -> bool {
        commands::remove_agent(self, id)
    }

    /// Synchronously execute `n` ticks regardless of running state.
    /// Returns ticks actually executed (fewer if the world halts).
    pub fn step_once(&mut self, n: u64) -> u64 {
        commands::step_once(self, n)
    }

    // === Scheduling ===

    /// Queue `n` simulation ticks for later draining.
    pub fn request_steps(&mut self, n: u64) {
        scheduler::request_steps(self, n);
    }

    /// Drop the unexecuted backlog.
    pub fn reset_backlog(&mut self) {
        scheduler::reset_backlog(self);
    }

    /// Per-frame entry point: accrue the requested step rate (when
    /// running), then drain under the wall-clock budget. Returns
    /// ticks executed this frame.
    pub fn frame(&mut self, budget_ms: f64) -> u64 {
        step::frame(self, budget_ms)
    }

    // === Agent queries (for UI listing and editing) ===

    pub fn agent_id(&self, index: usize) -> Option<u32> {
        self.agents.get(index).map(|a| a.id)
    }

    pub fn agent_position(&self, index: usize) -> Option<(u32, u32)> {
        self.agents.get(index).map(|a| (a.x, a.y))
    }

    pub fn agent_heading(&self, index: usize) -> Option<u8> {
        self.agents.get(index).map(|a| a.heading)
    }

    pub fn agent_rule(&self, index: usize) -> Option<String> {
        self.agents.get(index).map(|a| a.rule.as_str().to_string())
    }

    /// All agents as a JSON array (id, position, heading, rule).
    pub fn agents_json(&self) -> String {
        settings::agents_json(self)
    }

    // === Viewport ===

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn set_display_size(&mut self, w: f64, h: f64) {
        self.viewport.set_display_size(w, h);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn zoom_at(&mut self, factor: f64, focal_x: f64, focal_y: f64) {
        self.viewport.apply_zoom(factor, focal_x, focal_y);
    }

    pub fn zoom_by_wheel(&mut self, delta_y: f64, mx: f64, my: f64) {
        self.viewport.zoom_by_wheel(delta_y, mx, my);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy, self.grid.width(), self.grid.height());
    }

    pub fn center_view(&mut self) {
        self.viewport.center_on_grid(self.grid.width(), self.grid.height());
    }

    /// Grid coordinates under a screen point (floored; may be outside
    /// the grid - callers bounds-check before toggling).
    pub fn screen_to_cell(&self, sx: f64, sy: f64) -> (i64, i64) {
        self.viewport.cell_at(sx, sy)
    }

    pub fn grid_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
        self.viewport.to_screen(gx, gy)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // === Rendering API ===

    /// Cull tiles against the viewport; fills the visible list read
    /// via `visible_list_ptr`. Returns the visible tile count.
    pub fn collect_visible_tiles(&mut self) -> usize {
        render_extract::collect_visible_tiles(self)
    }

    pub fn visible_list_ptr(&self) -> *const u32 {
        self.visible_list.as_ptr()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_list.len()
    }

    /// Lazily refresh a tile, then return its pixel buffer pointer
    /// (ABGR, tightly packed `tile_w * tile_h`, for host blitting).
    pub fn tile_pixels_ptr(&mut self, tile_idx: usize) -> *const u32 {
        render_extract::tile_pixels_ptr(self, tile_idx)
    }

    pub fn tile_width(&self, tile_idx: usize) -> u32 {
        if tile_idx >= self.tiles.total_tiles() {
            return 0;
        }
        self.tiles.tile(tile_idx).w
    }

    pub fn tile_height(&self, tile_idx: usize) -> u32 {
        if tile_idx >= self.tiles.total_tiles() {
            return 0;
        }
        self.tiles.tile(tile_idx).h
    }

    /// Tile's screen-space rect for compositing.
    pub fn tile_screen_x(&self, tile_idx: usize) -> f64 {
        render_extract::tile_screen_rect(self, tile_idx).0
    }

    pub fn tile_screen_y(&self, tile_idx: usize) -> f64 {
        render_extract::tile_screen_rect(self, tile_idx).1
    }

    pub fn tile_screen_w(&self, tile_idx: usize) -> f64 {
        render_extract::tile_screen_rect(self, tile_idx).2
    }

    pub fn tile_screen_h(&self, tile_idx: usize) -> f64 {
        render_extract::tile_screen_rect(self, tile_idx).3
    }

    pub fn total_tiles(&self) -> usize {
        self.tiles.total_tiles()
    }

    pub fn dirty_tiles(&self) -> usize {
        self.tiles.dirty_tile_count()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

// Private simulation methods
impl WorldCore {
    /// Advance every live agent once in the configured step mode and
    /// mark both touched cells' tiles dirty.
    fn tick_once(&mut self) {
        step::tick_once(self);
    }
}
