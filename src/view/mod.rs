//! View transform between grid space and screen space.

pub mod viewport;

pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};
