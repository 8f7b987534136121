use crate::grid::*;

pub fn linear_interpolation(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    y1 + ((x - x1) * (y2 - y1) / (x2 - x1))
}

/// Fixed boundary values: four corners, edges linearly interpolated
/// between their end corners by cell index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundaryProfile {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl Default for BoundaryProfile {
    fn default() -> Self {
        BoundaryProfile {
            top_left: 10.0,
            top_right: 20.0,
            bottom_right: 30.0,
            bottom_left: 20.0,
        }
    }
}

impl BoundaryProfile {
    pub fn new(
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    ) -> Self {
        BoundaryProfile {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Boundary value at `(row, col)`, `None` for interior cells.
    pub fn value(&self, row: usize, col: usize, size: usize) -> Option<f64> {
        let last = size.checked_sub(1)?;
        let edge = |k: usize, y1: f64, y2: f64| {
            linear_interpolation(k as f64, 0.0, y1, last as f64, y2)
        };
        let v = match (row, col) {
            (0, 0) => self.top_left,
            (0, c) if c == last => self.top_right,
            (r, 0) if r == last => self.bottom_left,
            (r, c) if r == last && c == last => self.bottom_right,
            (0, c) => edge(c, self.top_left, self.top_right),
            (r, c) if r == last => edge(c, self.bottom_left, self.bottom_right),
            (r, 0) => edge(r, self.top_left, self.bottom_left),
            (r, c) if c == last => edge(r, self.top_right, self.bottom_right),
            _ => return None,
        };
        Some(v)
    }

    /// Zero the interior and write the boundary ring.
    pub fn apply(&self, grid: &mut Grid, chunk_size: usize) {
        let size = grid.size();
        grid.par_set_values(
            |row, col| self.value(row, col, size).unwrap_or(0.0),
            chunk_size,
        );
    }

    /// Check that the boundary ring of `grid` matches exactly.
    pub fn matches(&self, grid: &Grid) -> bool {
        let size = grid.size();
        grid.boundary_iter()
            .all(|(row, col, v)| self.value(row, col, size) == Some(v))
    }
}
