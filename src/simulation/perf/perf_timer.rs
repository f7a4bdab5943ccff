//! Wall-clock source shared by the frame budget and perf metrics.
//!
//! `Instant` does not exist on wasm32, so time is carried as f64
//! milliseconds on both targets and only the clock read is cfg-split.

#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start_ms: f64,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        PerfTimer { start_ms: now_ms() }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        now_ms() - self.start_ms
    }
}
