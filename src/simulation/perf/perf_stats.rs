use wasm_bindgen::prelude::*;

/// Per-frame perf snapshot, read by the host for diagnostics overlays.
/// All zeros while perf collection is disabled.
#[wasm_bindgen]
#[derive(Clone)]
pub struct FrameStats {
    pub(super) frame_ms: f64,
    pub(super) ticks: u64,
    pub(super) pending_steps: u64,
    pub(super) dirty_tiles: u32,
    pub(super) refreshed_pixels: u32,
    pub(super) agent_count: u32,
}

#[wasm_bindgen]
impl FrameStats {
    #[wasm_bindgen(getter)]
    pub fn frame_ms(&self) -> f64 { self.frame_ms }

    /// Ticks executed in the last drained frame ("unlimited" feedback).
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u64 { self.ticks }

    /// Backlog still queued after the last drain.
    #[wasm_bindgen(getter)]
    pub fn pending_steps(&self) -> u64 { self.pending_steps }

    #[wasm_bindgen(getter)]
    pub fn dirty_tiles(&self) -> u32 { self.dirty_tiles }

    /// Pixels recomputed by lazy tile refreshes since the frame began.
    #[wasm_bindgen(getter)]
    pub fn refreshed_pixels(&self) -> u32 { self.refreshed_pixels }

    #[wasm_bindgen(getter)]
    pub fn agent_count(&self) -> u32 { self.agent_count }
}

impl FrameStats {
    pub(crate) fn reset(&mut self) {
        *self = FrameStats::default();
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        FrameStats {
            frame_ms: 0.0,
            ticks: 0,
            pending_steps: 0,
            dirty_tiles: 0,
            refreshed_pixels: 0,
            agent_count: 0,
        }
    }
}
