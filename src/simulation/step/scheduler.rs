//! Step scheduler - backlog accounting and budget-limited draining.
//!
//! Requested step rates can exceed what one display frame can execute
//! by orders of magnitude (1 to beyond 10^6 per frame). Draining under
//! a wall-clock budget bounds per-frame latency; the unexecuted
//! remainder stays queued and is honored across subsequent frames.

use super::{PerfTimer, StepsPerFrame, WorldCore};

/// Ticks between wall-clock reads; keeps the clock off the hot path.
const TIME_CHECK_STRIDE: u64 = 256;

pub(super) fn request_steps(world: &mut WorldCore, n: u64) {
    if let StepsPerFrame::Unlimited = world.steps_per_frame {
        // Unlimited mode does no backlog accounting.
        return;
    }
    world.pending_steps = world.pending_steps.saturating_add(n);
}

/// Drop the unexecuted backlog. The only way queued steps are ever
/// discarded (configuration changes call this).
pub(super) fn reset_backlog(world: &mut WorldCore) {
    world.pending_steps = 0;
}

/// Drain the backlog under a wall-clock budget. Returns ticks executed.
pub(super) fn drain(world: &mut WorldCore, budget_ms: f64) -> u64 {
    let timer = PerfTimer::start();
    drain_with_clock(world, budget_ms, move || timer.elapsed_ms())
}

/// Clock-injected drain: `elapsed_ms` reports wall-clock time since
/// the drain began. Split out so tests can drive a deterministic clock.
pub(super) fn drain_with_clock(
    world: &mut WorldCore,
    budget_ms: f64,
    mut elapsed_ms: impl FnMut() -> f64,
) -> u64 {
    let mut ticks = 0u64;
    while world.pending_steps > 0 && !world.halted {
        world.tick_once();
        world.pending_steps -= 1;
        ticks += 1;
        if ticks % TIME_CHECK_STRIDE == 0 && elapsed_ms() > budget_ms {
            break;
        }
    }
    ticks
}

/// Unlimited mode: no backlog, drain continuously until the budget
/// expires. Returns ticks completed (display/diagnostic feedback).
pub(super) fn drain_unlimited(world: &mut WorldCore, budget_ms: f64) -> u64 {
    let timer = PerfTimer::start();
    drain_unlimited_with_clock(world, budget_ms, move || timer.elapsed_ms())
}

pub(super) fn drain_unlimited_with_clock(
    world: &mut WorldCore,
    budget_ms: f64,
    mut elapsed_ms: impl FnMut() -> f64,
) -> u64 {
    let mut ticks = 0u64;
    while !world.halted {
        world.tick_once();
        ticks += 1;
        if ticks % TIME_CHECK_STRIDE == 0 && elapsed_ms() > budget_ms {
            break;
        }
    }
    ticks
}
