//! Viewport - pan offset + zoom, affine mapping grid cells -> screen pixels.
//!
//! `screen = grid * cell_size * zoom + offset`, per axis. Zoom requests
//! outside the limits are clamped, never rejected; pan is accepted and
//! then clamped so the grid cannot be dragged entirely off-screen.

pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 16.0;

/// Wheel delta -> zoom factor rate (factor = 1 - delta_y * RATE).
const WHEEL_ZOOM_RATE: f64 = 0.0015;

/// At least this many pixels of grid stay visible after a pan clamp.
const MIN_VISIBLE_PX: f64 = 32.0;

pub struct Viewport {
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
    cell_size: f64,
    display_w: f64,
    display_h: f64,
}

impl Viewport {
    pub fn new(cell_size: f64, display_w: f64, display_h: f64) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            cell_size: cell_size.max(f64::EPSILON),
            display_w,
            display_h,
        }
    }

    // === Accessors ===
    #[inline]
    pub fn zoom(&self) -> f64 { self.zoom }

    #[inline]
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    #[inline]
    pub fn display_size(&self) -> (f64, f64) {
        (self.display_w, self.display_h)
    }

    /// Screen pixels per grid cell at the current zoom.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.cell_size * self.zoom
    }

    pub fn set_display_size(&mut self, w: f64, h: f64) {
        self.display_w = w.max(1.0);
        self.display_h = h.max(1.0);
    }

    // === Transform ===

    #[inline]
    pub fn to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
        let s = self.scale();
        (gx * s + self.offset_x, gy * s + self.offset_y)
    }

    #[inline]
    pub fn to_grid(&self, sx: f64, sy: f64) -> (f64, f64) {
        let s = self.scale();
        ((sx - self.offset_x) / s, (sy - self.offset_y) / s)
    }

    /// Integer cell under a screen point (may be outside the grid).
    #[inline]
    pub fn cell_at(&self, sx: f64, sy: f64) -> (i64, i64) {
        let (gx, gy) = self.to_grid(sx, sy);
        (gx.floor() as i64, gy.floor() as i64)
    }

    // === Zoom ===

    /// Rescale zoom by `factor`, clamped to `[MIN_ZOOM, MAX_ZOOM]`,
    /// keeping the focal screen point visually stationary.
    pub fn apply_zoom(&mut self, factor: f64, focal_x: f64, focal_y: f64) {
        let old = self.zoom;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = self.zoom / old;
        self.offset_x -= (focal_x - self.offset_x) * (ratio - 1.0);
        self.offset_y -= (focal_y - self.offset_y) * (ratio - 1.0);
    }

    /// Wheel-style zoom at the pointer position.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, mx: f64, my: f64) {
        self.apply_zoom(1.0 - delta_y * WHEEL_ZOOM_RATE, mx, my);
    }

    /// Set an absolute zoom level, focal point at the display center.
    pub fn set_zoom(&mut self, zoom: f64) {
        let target = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.zoom > 0.0 {
            let factor = target / self.zoom;
            self.apply_zoom(factor, self.display_w / 2.0, self.display_h / 2.0);
        }
    }

    // === Pan ===

    /// Add screen-space deltas to the offset, then clamp so at least a
    /// sliver of the grid stays on screen.
    pub fn pan(&mut self, dx: f64, dy: f64, grid_w: u32, grid_h: u32) {
        self.offset_x += dx;
        self.offset_y += dy;
        self.clamp_offset(grid_w, grid_h);
    }

    fn clamp_offset(&mut self, grid_w: u32, grid_h: u32) {
        let s = self.scale();
        let extent_x = grid_w as f64 * s;
        let extent_y = grid_h as f64 * s;
        let vis_x = MIN_VISIBLE_PX.min(extent_x);
        let vis_y = MIN_VISIBLE_PX.min(extent_y);

        self.offset_x = self.offset_x.clamp(vis_x - extent_x, self.display_w - vis_x);
        self.offset_y = self.offset_y.clamp(vis_y - extent_y, self.display_h - vis_y);
    }

    /// Center the grid in the display (initial placement).
    pub fn center_on_grid(&mut self, grid_w: u32, grid_h: u32) {
        let s = self.scale();
        self.offset_x = (self.display_w - grid_w as f64 * s) / 2.0;
        self.offset_y = (self.display_h - grid_h as f64 * s) / 2.0;
    }

    // === Culling ===

    /// Does a grid-space rectangle intersect the visible display area?
    pub fn is_rect_visible(&self, gx: u32, gy: u32, w: u32, h: u32) -> bool {
        let (px, py) = self.to_screen(gx as f64, gy as f64);
        let pw = w as f64 * self.scale();
        let ph = h as f64 * self.scale();
        !(px + pw < 0.0 || px > self.display_w || py + ph < 0.0 || py > self.display_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_screen_and_to_grid_are_inverse() {
        let mut vp = Viewport::new(1.0, 800.0, 600.0);
        vp.apply_zoom(3.7, 120.0, 45.0);
        vp.pan(13.0, -8.0, 400, 400);

        let (sx, sy) = vp.to_screen(123.0, 77.0);
        let (gx, gy) = vp.to_grid(sx, sy);
        assert!((gx - 123.0).abs() < 1e-9);
        assert!((gy - 77.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_keeps_focal_point_stationary() {
        let mut vp = Viewport::new(1.0, 800.0, 600.0);
        vp.center_on_grid(400, 400);

        let (fx, fy) = (321.0, 210.0);
        let before = vp.to_grid(fx, fy);
        vp.apply_zoom(2.5, fx, fy);
        let after = vp.to_grid(fx, fy);

        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped_not_rejected() {
        let mut vp = Viewport::new(1.0, 800.0, 600.0);
        vp.apply_zoom(1000.0, 0.0, 0.0);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        vp.apply_zoom(1e-9, 0.0, 0.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn pan_cannot_drag_grid_fully_off_screen() {
        let mut vp = Viewport::new(1.0, 800.0, 600.0);
        vp.center_on_grid(400, 400);
        vp.pan(1e6, 1e6, 400, 400);

        // Some part of the grid must still intersect the display.
        assert!(vp.is_rect_visible(0, 0, 400, 400));

        vp.pan(-1e7, -1e7, 400, 400);
        assert!(vp.is_rect_visible(0, 0, 400, 400));
    }

    #[test]
    fn offscreen_rects_are_culled() {
        let mut vp = Viewport::new(1.0, 800.0, 600.0);
        vp.center_on_grid(400, 400);
        assert!(vp.is_rect_visible(100, 100, 32, 32));
        assert!(!vp.is_rect_visible(5000, 5000, 32, 32));
    }
}
