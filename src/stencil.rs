//! The five point Laplace relaxation kernel and its convergence measure,
//! written once against `ExecutionBackend`.

use crate::backend::*;
use crate::grid::*;
use crate::util::*;

pub const NEIGHBOR_WEIGHT: f64 = 0.25;

#[inline]
fn relax_cell(input: &[f64], index: usize, size: usize) -> f64 {
    NEIGHBOR_WEIGHT
        * (input[index + 1]
            + input[index - 1]
            + input[index - size]
            + input[index + size])
}

/// One sweep: every interior cell of `current` becomes the average of its
/// four neighbors in `previous`. Boundary cells of `current` are not written.
pub fn iterate<B: ExecutionBackend>(
    backend: &B,
    previous: &Grid,
    current: &mut Grid,
) {
    profiling::scope!("stencil::iterate");
    debug_assert_eq!(previous.size(), current.size());
    let size = current.size();
    if interior_range(size).is_empty() {
        return;
    }
    let input = previous.buffer();
    let interior_rows = &mut current.buffer_mut()[size..size * (size - 1)];
    backend.for_each_row(interior_rows, size, |r, row: &mut [f64]| {
        let base = (r + 1) * size;
        for col in interior_range(size) {
            row[col] = relax_cell(input, base + col, size);
        }
    });
}

/// Max absolute cell-wise change over interior cells.
pub fn compute_error<B: ExecutionBackend>(
    backend: &B,
    previous: &Grid,
    current: &Grid,
) -> f64 {
    profiling::scope!("stencil::compute_error");
    debug_assert_eq!(previous.size(), current.size());
    let size = current.size();
    let a = previous.buffer();
    let b = current.buffer();
    backend.max_reduce(interior_range(size), |row| {
        let base = row * size;
        interior_range(size)
            .map(|col| (b[base + col] - a[base + col]).abs())
            .fold(0.0, f64::max)
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::boundary::*;
    use float_cmp::assert_approx_eq;
    use rand::prelude::*;

    fn random_grid(size: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::try_new(size).unwrap();
        for v in grid.buffer_mut() {
            *v = rng.gen_range(-50.0..50.0);
        }
        grid
    }

    #[test]
    fn constant_field_is_fixed_point() {
        let size = 9;
        let mut previous = Grid::try_new(size).unwrap();
        previous.fill(3.0, 10);
        let mut current = Grid::try_new(size).unwrap();
        iterate(&SerialBackend, &previous, &mut current);
        for row in interior_range(size) {
            for col in interior_range(size) {
                assert_approx_eq!(f64, current.get(row, col), 3.0);
            }
        }
        // Boundary of current untouched
        assert_eq!(current.get(0, 4), 0.0);
        assert_eq!(current.get(8, 8), 0.0);
        assert_eq!(compute_error(&SerialBackend, &previous, &current), 0.0);
    }

    #[test]
    fn first_sweep_of_size_5() {
        let size = 5;
        let profile = BoundaryProfile::default();
        let mut previous = Grid::try_new(size).unwrap();
        let mut current = Grid::try_new(size).unwrap();
        profile.apply(&mut previous, 4);
        profile.apply(&mut current, 4);

        iterate(&SerialBackend, &previous, &mut current);
        // (1, 1) neighbors: right 0, left 12.5, up 12.5, down 0
        assert_approx_eq!(f64, current.get(1, 1), 6.25);
        // (2, 2) has no boundary neighbors
        assert_eq!(current.get(2, 2), 0.0);
        // (3, 3) neighbors: right 27.5, left 0, up 0, down 27.5
        assert_approx_eq!(f64, current.get(3, 3), 13.75);

        let error = compute_error(&SerialBackend, &previous, &current);
        assert_approx_eq!(f64, error, 13.75);
        assert!(profile.matches(&current));
    }

    #[test]
    fn parallel_sweep_is_bit_identical() {
        let size = 67;
        let previous = random_grid(size, 7);
        let mut serial = Grid::try_new(size).unwrap();
        iterate(&SerialBackend, &previous, &mut serial);

        let backends = [
            Backend::Rayon(RayonBackend::new(1)),
            Backend::Rayon(RayonBackend::new(5)),
            Backend::Banded(BandedBackend::new(3)),
            Backend::Banded(BandedBackend::new(16)),
        ];
        for backend in backends {
            let mut parallel = Grid::try_new(size).unwrap();
            iterate(&backend, &previous, &mut parallel);
            assert_eq!(serial, parallel, "backend {}", backend);
            assert_eq!(
                compute_error(&SerialBackend, &previous, &serial),
                compute_error(&backend, &previous, &parallel),
            );
        }
    }

    #[test]
    fn error_matches_reference() {
        let a = random_grid(31, 1);
        let b = random_grid(31, 2);
        let expected = a.interior_max_abs_diff(&b);
        assert_eq!(compute_error(&SerialBackend, &a, &b), expected);
        assert_eq!(
            compute_error(&BandedBackend::new(4), &a, &b),
            expected
        );
    }

    #[test]
    fn degenerate_grids_do_nothing() {
        for size in [0, 1, 2] {
            let previous = Grid::try_new(size).unwrap();
            let mut current = Grid::try_new(size).unwrap();
            iterate(&SerialBackend, &previous, &mut current);
            assert_eq!(compute_error(&SerialBackend, &previous, &current), 0.0);
        }
    }
}
