use crate::domain::rules::TurnRule;
use crate::domain::turmite::{BoundaryMode, Turmite};
use crate::spatial::grid::CellGrid;
use crate::spatial::tiles::TileGrid;
use crate::view::viewport::Viewport;

use super::perf_stats::FrameStats;
use super::{StepMode, StepsPerFrame, WorldCore};

/// Cell edge in screen pixels at zoom 1.
const CELL_SIZE: f64 = 1.0;

pub(super) fn create_world_core(
    width: u32,
    height: u32,
    tile_size: u32,
    display_w: f64,
    display_h: f64,
) -> WorldCore {
    // A zero-sized grid has no valid agent position and would divide
    // by zero when wrapping coordinates.
    let width = width.max(1);
    let height = height.max(1);
    let grid = CellGrid::new(width, height);
    let tiles = TileGrid::new(width, height, tile_size);
    let mut viewport = Viewport::new(CELL_SIZE, display_w, display_h);
    viewport.center_on_grid(width, height);

    // Default agent: classic Langton's Ant at the grid center, heading up.
    let ant = Turmite::new(1, width / 2, height / 2, TurnRule::classic_ant());

    WorldCore {
        grid,
        tiles,
        viewport,
        agents: vec![ant],
        next_agent_id: 2,

        running: false,
        step_mode: StepMode::Sequential,
        boundary_mode: BoundaryMode::Wrap,
        steps_per_frame: StepsPerFrame::Count(1),

        pending_steps: 0,
        ticks_last_frame: 0,
        tick_count: 0,
        halted: false,
        plan_buffer: Vec::new(),

        visible_list: Vec::with_capacity(256),

        perf_enabled: false,
        frame_stats: FrameStats::default(),
    }
}
