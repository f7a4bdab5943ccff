use serde::{Deserialize, Serialize};

use crate::domain::turmite::BoundaryMode;

use super::{StepMode, StepsPerFrame, WorldCore};

pub(super) fn set_running(world: &mut WorldCore, running: bool) {
    world.running = running;
}

pub(super) fn set_step_mode(world: &mut WorldCore, mode: StepMode) {
    world.step_mode = mode;
}

pub(super) fn set_boundary_mode(world: &mut WorldCore, mode: BoundaryMode) {
    world.boundary_mode = mode;
}

pub(super) fn set_steps_per_frame(world: &mut WorldCore, n: u64) {
    // Out-of-bounds config is clamped, never rejected.
    world.steps_per_frame = StepsPerFrame::Count(n.max(1));
    super::scheduler::reset_backlog(world);
}

pub(super) fn set_unlimited(world: &mut WorldCore, enabled: bool) {
    if enabled {
        world.steps_per_frame = StepsPerFrame::Unlimited;
    } else if let StepsPerFrame::Unlimited = world.steps_per_frame {
        world.steps_per_frame = StepsPerFrame::Count(1);
    }
    super::scheduler::reset_backlog(world);
}

/// One-document form of the configuration surface. Absent fields keep
/// their current value; `steps_per_frame` accepts a count or the
/// string `"unlimited"`; `agent_rules`, when present, replaces the
/// agent set with fresh center-spawned agents carrying those rules.
#[derive(Deserialize)]
struct EngineConfig {
    running: Option<bool>,
    steps_per_frame: Option<StepsPerFrameCfg>,
    step_mode: Option<StepMode>,
    boundary_mode: Option<BoundaryMode>,
    agent_rules: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepsPerFrameCfg {
    Count(u64),
    Word(String),
}

pub(super) fn apply_config_json(world: &mut WorldCore, json: &str) -> Result<(), String> {
    let config: EngineConfig =
        serde_json::from_str(json).map_err(|e| format!("invalid engine config: {e}"))?;

    if let Some(running) = config.running {
        set_running(world, running);
    }
    match config.steps_per_frame {
        Some(StepsPerFrameCfg::Count(n)) => set_steps_per_frame(world, n),
        Some(StepsPerFrameCfg::Word(w)) if w.eq_ignore_ascii_case("unlimited") => {
            set_unlimited(world, true);
        }
        // Unrecognized sentinel: keep the current setting.
        Some(StepsPerFrameCfg::Word(_)) | None => {}
    }
    if let Some(mode) = config.step_mode {
        set_step_mode(world, mode);
    }
    if let Some(mode) = config.boundary_mode {
        set_boundary_mode(world, mode);
    }
    if let Some(rules) = config.agent_rules {
        world.agents.clear();
        let cx = world.grid.width() as i64 / 2;
        let cy = world.grid.height() as i64 / 2;
        for rule in &rules {
            super::commands::add_agent(world, cx, cy, rule);
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct AgentInfo<'a> {
    id: u32,
    x: u32,
    y: u32,
    heading: u8,
    rule: &'a str,
}

pub(super) fn agents_json(world: &WorldCore) -> String {
    let list: Vec<AgentInfo<'_>> = world
        .agents
        .iter()
        .map(|a| AgentInfo {
            id: a.id,
            x: a.x,
            y: a.y,
            heading: a.heading,
            rule: a.rule.as_str(),
        })
        .collect();
    serde_json::to_string(&list).unwrap_or_else(|_| "[]".to_string())
}
