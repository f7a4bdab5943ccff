//! Turmite Engine - simulation and tiled incremental rendering for
//! generalized Langton's Ants on large toroidal grids.
//!
//! Architecture:
//! - spatial/     - Cell grid + tile partition with dirty tracking
//! - domain/      - Turn rules and turmite agents
//! - view/        - Viewport transform (pan/zoom/culling)
//! - simulation/  - Orchestration, scheduling, wasm facade

pub mod domain;
pub mod simulation;
pub mod spatial;
pub mod view;

// Re-exports for internal and host-side paths
pub use domain::rules;
pub use domain::turmite;
pub use spatial::grid;
pub use spatial::tiles;
pub use view::viewport;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🐜 Turmite WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use simulation::{slider_to_steps, steps_to_slider, FrameStats, StepMode, StepsPerFrame, World};
pub use simulation::WorldCore;
pub use domain::turmite::BoundaryMode;
