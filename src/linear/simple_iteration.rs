use super::*;
use crate::solver::{ConvergenceState, SolveOutcome};

/// Richardson iteration `x <- x - tau (A x - b)`, stopped once the
/// residual relative to `b` falls below `epsilon`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimpleIteration {
    pub tau: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for SimpleIteration {
    fn default() -> Self {
        SimpleIteration {
            tau: 1e-4,
            epsilon: 1e-5,
            max_iterations: 100_000,
        }
    }
}

impl SimpleIteration {
    pub fn new(tau: f64, epsilon: f64, max_iterations: usize) -> Self {
        SimpleIteration {
            tau,
            epsilon,
            max_iterations,
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !(self.tau.is_finite() && self.tau > 0.0) {
            return Err(SolverError::invalid("tau", self.tau, "must be positive"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SolverError::invalid(
                "epsilon",
                self.epsilon,
                "must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::invalid(
                "max_iterations",
                self.max_iterations,
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Solve `A x = b` starting from the values already in `x`.
    /// The reported error is the relative residual `|Ax - b| / |b|`
    /// of the last accepted iterate.
    pub fn solve<B: ExecutionBackend>(
        &self,
        backend: &B,
        a: &DenseMatrix,
        b: &[f64],
        x: &mut [f64],
    ) -> SolverResult<SolveOutcome> {
        profiling::scope!("SimpleIteration::solve");
        self.validate()?;
        check_len("A (square)", a.rows(), a.cols())?;
        check_len("b", a.rows(), b.len())?;
        check_len("x", a.cols(), x.len())?;

        let n = a.rows();
        let b_norm = backend.sum_reduce(0..n, |i| b[i] * b[i]).sqrt();
        let scale = if b_norm > 0.0 { b_norm } else { 1.0 };
        let mut residual = try_zeroed(n)?;
        let mut state = ConvergenceState {
            iteration: 0,
            error: f64::INFINITY,
        };

        loop {
            {
                let x: &[f64] = x;
                backend.for_each_row(&mut residual, 1, |i, r: &mut [f64]| {
                    r[0] = dot(a.row(i), x) - b[i];
                });
            }
            let r = &residual;
            let norm = backend.sum_reduce(0..n, |i| r[i] * r[i]).sqrt();
            state.error = norm / scale;
            log::trace!("simple iteration {}: residual = {:.6e}", state.iteration, state.error);

            if state.error < self.epsilon {
                return Ok(SolveOutcome::Converged(state));
            }
            if state.iteration >= self.max_iterations {
                log::warn!(
                    "simple iteration: no convergence after {} iterations, residual {:.6e}",
                    state.iteration,
                    state.error
                );
                return Ok(SolveOutcome::Exhausted(state));
            }

            let tau = self.tau;
            backend.for_each_row(x, 1, |i, xi: &mut [f64]| {
                xi[0] -= tau * r[i];
            });
            state.iteration += 1;
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn course_system_converges_to_ones() {
        let n = 100;
        let (a, b) = course_system(n).unwrap();
        let solver = SimpleIteration::new(0.01, 1e-5, 1000);
        for backend in [
            Backend::Serial(SerialBackend),
            Backend::Rayon(RayonBackend::new(7)),
            Backend::Banded(BandedBackend::new(3)),
        ] {
            let mut x = vec![0.0; n];
            let outcome = solver.solve(&backend, &a, &b, &mut x).unwrap();
            assert!(outcome.is_converged(), "{outcome}");
            assert!(outcome.error() < 1e-5);
            for v in &x {
                assert_approx_eq!(f64, *v, 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn matches_direct_solve() {
        let n = 12;
        let a = DenseMatrix::from_fn(n, n, |i, j| {
            if i == j {
                4.0
            } else if i.abs_diff(j) == 1 {
                -1.0
            } else {
                0.0
            }
        })
        .unwrap();
        let b: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
        let mut x = vec![0.0; n];
        let outcome = SimpleIteration::new(0.15, 1e-12, 10_000)
            .solve(&SerialBackend, &a, &b, &mut x)
            .unwrap();
        assert!(outcome.is_converged());

        let direct = a
            .to_nalgebra()
            .lu()
            .solve(&nalgebra::DVector::from_column_slice(&b))
            .unwrap();
        for (xi, di) in x.iter().zip(direct.iter()) {
            assert_approx_eq!(f64, *xi, *di, epsilon = 1e-9);
        }
    }

    #[test]
    fn exhaustion_is_reported() {
        let (a, b) = course_system(10).unwrap();
        let mut x = vec![0.0; 10];
        let outcome = SimpleIteration::new(1e-4, 1e-12, 3)
            .solve(&SerialBackend, &a, &b, &mut x)
            .unwrap();
        assert!(!outcome.is_converged());
        assert_eq!(outcome.iteration(), 3);
    }

    #[test]
    fn rejects_bad_input() {
        let (a, b) = course_system(4).unwrap();
        let mut x = vec![0.0; 4];
        assert!(SimpleIteration::new(0.0, 1e-5, 10)
            .solve(&SerialBackend, &a, &b, &mut x)
            .is_err());
        assert!(SimpleIteration::new(0.1, 1e-5, 0)
            .solve(&SerialBackend, &a, &b, &mut x)
            .is_err());
        let mut short = vec![0.0; 3];
        assert!(matches!(
            SimpleIteration::default().solve(&SerialBackend, &a, &b, &mut short),
            Err(SolverError::DimensionMismatch { operand: "x", .. })
        ));
        let rect = DenseMatrix::try_new(4, 3).unwrap();
        assert!(SimpleIteration::default()
            .solve(&SerialBackend, &rect, &b, &mut x)
            .is_err());
    }
}
