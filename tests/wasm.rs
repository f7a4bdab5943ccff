//! Browser smoke test for the wasm facade.

#![cfg(target_arch = "wasm32")]

use turmite_engine::{slider_to_steps, World};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn world_steps_and_exposes_tile_buffers() {
    let mut world = World::new(400, 400, 64, 800.0, 600.0);
    assert_eq!(world.width(), 400);
    assert_eq!(world.agent_count(), 1);

    world.set_steps_per_frame(100);
    world.set_running(true);
    let ticks = world.frame(8.0);
    assert_eq!(ticks, 100);

    let visible = world.collect_visible_tiles();
    assert!(visible > 0);
    assert!(!world.tile_pixels_ptr(0).is_null());
}

#[wasm_bindgen_test]
fn slider_mapping_is_monotonic() {
    assert_eq!(slider_to_steps(0.0), 1);
    assert_eq!(slider_to_steps(1.0), 1_000_000);
    assert!(slider_to_steps(0.5) > slider_to_steps(0.25));
}
