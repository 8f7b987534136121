use super::*;
use crate::util::timed;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedupReport {
    pub serial: Duration,
    pub parallel: Duration,
}

impl SpeedupReport {
    pub fn speedup(&self) -> f64 {
        let parallel = self.parallel.as_secs_f64();
        if parallel > 0.0 {
            self.serial.as_secs_f64() / parallel
        } else {
            f64::INFINITY
        }
    }
}

impl std::fmt::Display for SpeedupReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        writeln!(f, "parallel time = {:.6} s", self.parallel.as_secs_f64())?;
        writeln!(f, "serial time = {:.6} s", self.serial.as_secs_f64())?;
        write!(f, "speedup = {:.3}", self.speedup())
    }
}

/// `A[i][j] = j`, `x[j] = j`, so every entry of `A x` is the sum of squares
/// `0² + .. + (cols-1)²`.
pub fn course_matvec(
    rows: usize,
    cols: usize,
) -> SolverResult<(DenseMatrix, Vec<f64>)> {
    let a = DenseMatrix::from_fn(rows, cols, |_, j| j as f64)?;
    let x = (0..cols).map(|j| j as f64).collect();
    Ok((a, x))
}

/// 2 on the diagonal, 1 elsewhere, right hand side `n + 1`.
/// The solution is all ones.
pub fn course_system(n: usize) -> SolverResult<(DenseMatrix, Vec<f64>)> {
    let a = DenseMatrix::from_fn(n, n, |i, j| if i == j { 2.0 } else { 1.0 })?;
    let b = vec![n as f64 + 1.0; n];
    Ok((a, b))
}

/// Time `y = A x` serially and with `backend`, checking both agree.
pub fn matvec_speedup<B: ExecutionBackend>(
    backend: &B,
    a: &DenseMatrix,
    x: &[f64],
) -> SolverResult<(Vec<f64>, SpeedupReport)> {
    let mut parallel_y = try_zeroed(a.rows())?;
    let (parallel_result, parallel) =
        timed(|| matvec(backend, a, x, &mut parallel_y));
    parallel_result?;

    let mut serial_y = try_zeroed(a.rows())?;
    let (serial_result, serial) =
        timed(|| matvec(&SerialBackend, a, x, &mut serial_y));
    serial_result?;

    debug_assert_eq!(serial_y, parallel_y);
    Ok((parallel_y, SpeedupReport { serial, parallel }))
}
