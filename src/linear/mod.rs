//! Dense row-major matrices, matrix-vector products and the simple
//! iteration solver, distributed by row over an `ExecutionBackend`.

mod bench;
mod simple_iteration;

pub use bench::*;
pub use simple_iteration::*;

use crate::backend::*;
use crate::error::*;
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    pub fn try_new(rows: usize, cols: usize) -> SolverResult<Self> {
        let cells = rows.checked_mul(cols).ok_or_else(|| {
            SolverError::invalid("rows * cols", rows, "cell count overflows")
        })?;
        let data = try_zeroed(cells)?;
        Ok(DenseMatrix { rows, cols, data })
    }

    /// Fill from `f(row, col)`, rows in parallel.
    pub fn from_fn<F: Fn(usize, usize) -> f64 + Send + Sync>(
        rows: usize,
        cols: usize,
        f: F,
    ) -> SolverResult<Self> {
        let mut m = DenseMatrix::try_new(rows, cols)?;
        if cols > 0 {
            m.data
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(i, row): (usize, &mut [f64])| {
                    for (j, v) in row.iter_mut().enumerate() {
                        *v = f(i, j);
                    }
                });
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn to_nalgebra(&self) -> nalgebra::DMatrix<f64> {
        nalgebra::DMatrix::from_row_slice(self.rows, self.cols, &self.data)
    }
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn check_len(
    operand: &'static str,
    expected: usize,
    found: usize,
) -> SolverResult<()> {
    if expected != found {
        return Err(SolverError::DimensionMismatch {
            operand,
            expected,
            found,
        });
    }
    Ok(())
}

/// `y = A x`, one task unit per output row.
pub fn matvec<B: ExecutionBackend>(
    backend: &B,
    a: &DenseMatrix,
    x: &[f64],
    y: &mut [f64],
) -> SolverResult<()> {
    profiling::scope!("linear::matvec");
    check_len("x", a.cols(), x.len())?;
    check_len("y", a.rows(), y.len())?;
    backend.for_each_row(y, 1, |i, out: &mut [f64]| {
        out[0] = dot(a.row(i), x);
    });
    Ok(())
}
