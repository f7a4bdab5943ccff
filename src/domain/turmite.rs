//! Turmite - one agent: position, heading, turn rule.
//!
//! Two step modes share one outcome computation:
//! - `step` (sequential): read, turn, write, move - atomic per agent,
//!   so the next agent in the batch observes this agent's write.
//! - `prepare_step` + `apply_step` (parallel): every agent's plan is
//!   computed against the unmodified pre-tick grid, then all plans
//!   are committed. The split must never be interleaved per-agent.

use serde::{Deserialize, Serialize};

use crate::spatial::grid::{CellGrid, CellState};

use super::rules::{Turn, TurnRule};

/// Heading deltas indexed by heading: 0 = up, 1 = right, 2 = down, 3 = left.
/// Origin is top-left, y grows downward.
const HEADING_DELTAS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// What happens when a move would leave the grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Toroidal wrap: reappear at the opposite edge (default).
    Wrap,
    /// The agent stays put and the simulation halts.
    Halt,
}

impl Default for BoundaryMode {
    fn default() -> Self {
        BoundaryMode::Wrap
    }
}

/// Outcome of a sequential step: both cells whose owning tiles need
/// a redraw (the written cell and the marker's new cell).
#[derive(Clone, Copy, Debug)]
pub struct StepResult {
    pub old_x: u32,
    pub old_y: u32,
    pub x: u32,
    pub y: u32,
    /// Halt-mode only: the move would have left the grid.
    pub exited: bool,
}

/// A prepared-but-uncommitted step (parallel mode).
#[derive(Clone, Copy, Debug)]
pub struct StepPlan {
    pub cell_index: usize,
    pub new_cell: CellState,
    pub new_x: u32,
    pub new_y: u32,
    pub new_heading: u8,
    pub exited: bool,
}

/// One agent on the grid.
pub struct Turmite {
    pub id: u32,
    pub x: u32,
    pub y: u32,
    /// 0 = up, 1 = right, 2 = down, 3 = left
    pub heading: u8,
    pub rule: TurnRule,
}

impl Turmite {
    pub fn new(id: u32, x: u32, y: u32, rule: TurnRule) -> Self {
        Self {
            id,
            x,
            y,
            heading: 0,
            rule,
        }
    }

    #[inline]
    fn turned_heading(&self, turn: Turn) -> u8 {
        match turn {
            Turn::Right => (self.heading + 1) % 4,
            Turn::Left => (self.heading + 3) % 4,
        }
    }

    /// Destination of a move in `heading` from the current position.
    /// Returns `None` when the move leaves the grid in Halt mode.
    #[inline]
    fn destination(&self, heading: u8, grid: &CellGrid, boundary: BoundaryMode) -> Option<(u32, u32)> {
        let (dx, dy) = HEADING_DELTAS[(heading & 3) as usize];
        let nx = self.x as i64 + dx;
        let ny = self.y as i64 + dy;
        match boundary {
            BoundaryMode::Wrap => Some((
                CellGrid::wrap(nx, grid.width()),
                CellGrid::wrap(ny, grid.height()),
            )),
            BoundaryMode::Halt => {
                if nx < 0 || ny < 0 || nx >= grid.width() as i64 || ny >= grid.height() as i64 {
                    None
                } else {
                    Some((nx as u32, ny as u32))
                }
            }
        }
    }

    /// Sequential step: cause and effect complete before the next
    /// agent runs. Returns pre- and post-move coordinates so the
    /// caller can mark both cells' owning tiles dirty.
    pub fn step(&mut self, grid: &mut CellGrid, boundary: BoundaryMode) -> StepResult {
        let (old_x, old_y) = (self.x, self.y);
        let cell = grid.get(self.x, self.y);

        let new_heading = self.turned_heading(self.rule.turn_for(cell));
        grid.set(self.x, self.y, self.rule.next_state(cell));
        self.heading = new_heading;

        match self.destination(new_heading, grid, boundary) {
            Some((nx, ny)) => {
                self.x = nx;
                self.y = ny;
                StepResult {
                    old_x,
                    old_y,
                    x: nx,
                    y: ny,
                    exited: false,
                }
            }
            None => StepResult {
                old_x,
                old_y,
                x: old_x,
                y: old_y,
                exited: true,
            },
        }
    }

    /// Pure computation of the same outcome as `step`, without
    /// mutating the grid or the agent. Parallel mode prepares every
    /// agent against the same pre-tick grid snapshot.
    pub fn prepare_step(&self, grid: &CellGrid, boundary: BoundaryMode) -> StepPlan {
        let cell = grid.get(self.x, self.y);
        let new_heading = self.turned_heading(self.rule.turn_for(cell));

        let (new_x, new_y, exited) = match self.destination(new_heading, grid, boundary) {
            Some((nx, ny)) => (nx, ny, false),
            None => (self.x, self.y, true),
        };

        StepPlan {
            cell_index: grid.index(self.x, self.y),
            new_cell: self.rule.next_state(cell),
            new_x,
            new_y,
            new_heading,
            exited,
        }
    }

    /// Commit a previously prepared plan. Only valid after *all*
    /// agents' plans for this tick have been prepared.
    pub fn apply_step(&mut self, plan: &StepPlan, grid: &mut CellGrid) -> StepResult {
        let (old_x, old_y) = (self.x, self.y);
        grid.set_by_index(plan.cell_index, plan.new_cell);
        self.heading = plan.new_heading;
        self.x = plan.new_x;
        self.y = plan.new_y;
        StepResult {
            old_x,
            old_y,
            x: plan.new_x,
            y: plan.new_y,
            exited: plan.exited,
        }
    }
}
