use super::{scheduler, PerfTimer, StepsPerFrame, WorldCore};

/// Per-frame entry point. Accrues the requested step rate while
/// running, then drains under `budget_ms`. The running flag is only
/// observed here, at the frame boundary - an in-progress drain always
/// completes its budget slice.
pub(super) fn frame(world: &mut WorldCore, budget_ms: f64) -> u64 {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.frame_stats.reset();
    }
    let frame_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let running = world.running && !world.halted;

    let ticks = match world.steps_per_frame {
        StepsPerFrame::Count(rate) => {
            if running {
                scheduler::request_steps(world, rate);
            }
            // A paused world still drains whatever is already queued,
            // so requested throughput is eventually honored.
            scheduler::drain(world, budget_ms)
        }
        StepsPerFrame::Unlimited => {
            if running {
                scheduler::drain_unlimited(world, budget_ms)
            } else {
                0
            }
        }
    };

    world.ticks_last_frame = ticks;

    if perf_on {
        world.frame_stats.ticks = ticks;
        world.frame_stats.pending_steps = world.pending_steps;
        world.frame_stats.dirty_tiles = world.tiles.dirty_tile_count() as u32;
        world.frame_stats.agent_count = world.agents.len() as u32;
        if let Some(start) = frame_start {
            world.frame_stats.frame_ms = start.elapsed_ms();
        }
    }

    ticks
}

/// One simulation tick: every live agent advances once.
///
/// Sequential mode interleaves each agent's read and write; parallel
/// mode strictly prepares every plan against the pre-tick grid before
/// committing any of them. Interleaving prepare and apply across
/// agents would break the order-independence guarantee.
pub(super) fn tick_once(world: &mut WorldCore) {
    let boundary = world.boundary_mode;

    match world.step_mode {
        super::StepMode::Sequential => {
            for i in 0..world.agents.len() {
                let r = world.agents[i].step(&mut world.grid, boundary);
                world.tiles.mark_cell(r.old_x, r.old_y);
                world.tiles.mark_cell(r.x, r.y);
                if r.exited {
                    world.halted = true;
                }
            }
        }
        super::StepMode::Parallel => {
            world.plan_buffer.clear();
            for i in 0..world.agents.len() {
                let plan = world.agents[i].prepare_step(&world.grid, boundary);
                world.plan_buffer.push(plan);
            }
            for i in 0..world.agents.len() {
                let plan = world.plan_buffer[i];
                let r = world.agents[i].apply_step(&plan, &mut world.grid);
                world.tiles.mark_cell(r.old_x, r.old_y);
                world.tiles.mark_cell(r.x, r.y);
                if r.exited {
                    world.halted = true;
                }
            }
        }
    }

    world.tick_count += 1;
}
