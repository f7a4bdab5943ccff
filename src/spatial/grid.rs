//! CellGrid - flat dense array of per-cell discrete state
//!
//! Instead of: Vec<Vec<u8>>   // Bad: one allocation per row, poor cache
//! We have:    states[]       // Good: one linear array, row-major

/// Cell state. State cardinality is defined by the acting agent's
/// turn rule; the grid itself only guarantees `state < rule_len`
/// holds for whichever rule last touched the cell.
pub type CellState = u8;

/// Dense row-major grid of cell states.
pub struct CellGrid {
    width: u32,
    height: u32,
    size: usize,
    states: Vec<CellState>,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            states: vec![0; size],
        }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx as u32) % self.width;
        let y = (idx as u32) / self.width;
        (x, y)
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Euclidean wrap of a coordinate onto `[0, dim)`.
    ///
    /// Callers apply this before every grid access so motion off one
    /// edge reappears at the opposite edge (toroidal boundary).
    #[inline]
    pub fn wrap(v: i64, dim: u32) -> u32 {
        let d = dim as i64;
        (((v % d) + d) % d) as u32
    }

    // === Cell access ===

    /// Read a cell's state. Out-of-range reads degrade to 0.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> CellState {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.states[self.index(x, y)]
    }

    /// Write a cell's state. Out-of-range writes are a no-op.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, state: CellState) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.states[idx] = state;
    }

    #[inline]
    pub fn set_by_index(&mut self, idx: usize, state: CellState) {
        if idx < self.size {
            self.states[idx] = state;
        }
    }

    /// Flip a cell between 0 and 1 (direct user editing).
    /// Any non-zero state toggles back to 0.
    pub fn toggle(&mut self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        self.states[idx] = if self.states[idx] == 0 { 1 } else { 0 };
        true
    }

    /// Zero every cell (explicit clear command).
    pub fn clear(&mut self) {
        self.states.fill(0);
    }

    pub fn states(&self) -> &[CellState] {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_indexing() {
        let grid = CellGrid::new(7, 5);
        assert_eq!(grid.index(3, 2), 3 + 2 * 7);
        assert_eq!(grid.coords(3 + 2 * 7), (3, 2));
    }

    #[test]
    fn out_of_range_access_degrades() {
        let mut grid = CellGrid::new(4, 4);
        grid.set(10, 0, 3); // no-op
        assert_eq!(grid.get(10, 0), 0);
        assert!(!grid.toggle(0, 10));
    }

    #[test]
    fn wrap_is_euclidean() {
        assert_eq!(CellGrid::wrap(-1, 400), 399);
        assert_eq!(CellGrid::wrap(400, 400), 0);
        assert_eq!(CellGrid::wrap(-801, 400), 399);
        assert_eq!(CellGrid::wrap(17, 400), 17);
    }

    #[test]
    fn toggle_flips_any_nonzero_to_zero() {
        let mut grid = CellGrid::new(4, 4);
        grid.set(1, 1, 5);
        assert!(grid.toggle(1, 1));
        assert_eq!(grid.get(1, 1), 0);
        assert!(grid.toggle(1, 1));
        assert_eq!(grid.get(1, 1), 1);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut grid = CellGrid::new(8, 8);
        grid.set(3, 3, 2);
        grid.set(7, 7, 1);
        grid.clear();
        assert!(grid.states().iter().all(|&s| s == 0));
    }
}
