//! Domain logic: turn rules and the turmite agents that follow them.

pub mod rules;
pub mod turmite;

pub use rules::{state_color, Turn, TurnRule, BG_COLOR};
pub use turmite::{BoundaryMode, StepPlan, StepResult, Turmite};
