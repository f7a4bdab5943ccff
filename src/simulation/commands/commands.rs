use crate::domain::rules::TurnRule;
use crate::domain::turmite::Turmite;
use crate::spatial::grid::CellGrid;

use super::WorldCore;

pub(super) fn reset_world(world: &mut WorldCore) {
    world.grid.clear();
    world.tiles.mark_all_dirty();
    world.running = false;
    world.halted = false;
    world.pending_steps = 0;
    world.ticks_last_frame = 0;
    world.tick_count = 0;

    // Agents survive a reset but return to the center, heading up.
    let cx = world.grid.width() / 2;
    let cy = world.grid.height() / 2;
    for agent in &mut world.agents {
        agent.x = cx;
        agent.y = cy;
        agent.heading = 0;
    }
}

pub(super) fn toggle_cell(world: &mut WorldCore, gx: u32, gy: u32) -> bool {
    if !world.grid.in_bounds(gx as i32, gy as i32) {
        return false;
    }
    world.grid.toggle(gx, gy);
    world.tiles.mark_cell(gx, gy);
    true
}

pub(super) fn add_agent(world: &mut WorldCore, x: i64, y: i64, rule: &str) -> u32 {
    // Positions wrap into bounds, rule strings are sanitized: there
    // is no rejection path here.
    let x = CellGrid::wrap(x, world.grid.width());
    let y = CellGrid::wrap(y, world.grid.height());
    let id = world.next_agent_id;
    world.next_agent_id += 1;

    world.agents.push(Turmite::new(id, x, y, TurnRule::parse(rule)));
    world.tiles.mark_cell(x, y);
    id
}

pub(super) fn remove_agent(world: &mut WorldCore, id: u32) -> bool {
    match world.agents.iter().position(|a| a.id == id) {
        Some(i) => {
            let agent = world.agents.remove(i);
            // The marker's cell needs a repaint.
            world.tiles.mark_cell(agent.x, agent.y);
            true
        }
        None => false,
    }
}

pub(super) fn step_once(world: &mut WorldCore, n: u64) -> u64 {
    let mut ticks = 0u64;
    while ticks < n && !world.halted {
        world.tick_once();
        ticks += 1;
    }
    ticks
}
