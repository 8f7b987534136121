//! Square, row-major `f64` grids and the previous/current pair the
//! relaxation solver alternates between.

mod pair;

pub use pair::*;

use crate::error::*;
use crate::par_slice;
use crate::util::*;
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    buffer: Vec<f64>,
}

impl Grid {
    /// Allocate a zeroed `size × size` grid.
    pub fn try_new(size: usize) -> SolverResult<Self> {
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| SolverError::invalid("size", size, "cell count overflows"))?;
        let buffer = try_zeroed(cells)?;
        Ok(Grid { size, buffer })
    }

    /// Build a grid from row-major values, e.g. a loaded dump.
    pub fn from_rows(rows: &[Vec<f64>]) -> SolverResult<Self> {
        let size = rows.len();
        let mut grid = Grid::try_new(size)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(SolverError::DimensionMismatch {
                    operand: "grid row",
                    expected: size,
                    found: row.len(),
                });
            }
            grid.row_mut(r).copy_from_slice(row);
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    #[track_caller]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.buffer[coord_to_linear(row, col, self.size)]
    }

    #[track_caller]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let index = coord_to_linear(row, col, self.size);
        self.buffer[index] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.size;
        &self.buffer[start..start + self.size]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.size;
        &mut self.buffer[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.buffer.chunks(self.size.max(1))
    }

    pub fn fill(&mut self, value: f64, chunk_size: usize) {
        par_slice::set_value(&mut self.buffer, value, chunk_size);
    }

    /// Copy other grid into self, shapes must match.
    pub fn copy_from(&mut self, other: &Grid, chunk_size: usize) {
        debug_assert_eq!(self.size, other.size);
        par_slice::copy(&other.buffer, &mut self.buffer, chunk_size);
    }

    /// Set every cell from a function of its `(row, col)` coordinate.
    pub fn par_set_values<F: Fn(usize, usize) -> f64 + Send + Sync>(
        &mut self,
        f: F,
        chunk_size: usize,
    ) {
        let size = self.size;
        let chunk_size = chunk_size.max(1);
        self.buffer
            .par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(i, chunk): (usize, &mut [f64])| {
                let offset = i * chunk_size;
                for (l, value) in chunk.iter_mut().enumerate() {
                    let (row, col) = linear_to_coord(offset + l, size);
                    *value = f(row, col);
                }
            });
    }

    /// Iterate over `(row, col, value)` of the boundary ring.
    pub fn boundary_iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let size = self.size;
        self.buffer
            .iter()
            .enumerate()
            .map(move |(l, v)| {
                let (row, col) = linear_to_coord(l, size);
                (row, col, *v)
            })
            .filter(move |(row, col, _)| is_boundary(*row, *col, size))
    }

    /// Max absolute difference between two grids over interior cells.
    /// Serial reference for the backend reduction in `stencil::compute_error`.
    pub fn interior_max_abs_diff(&self, other: &Grid) -> f64 {
        debug_assert_eq!(self.size, other.size);
        let mut result: f64 = 0.0;
        for row in interior_range(self.size) {
            for col in interior_range(self.size) {
                let d = (self.get(row, col) - other.get(row, col)).abs();
                result = result.max(d);
            }
        }
        result
    }
}
