use relax2d::backend::*;
use relax2d::linear::*;

use float_cmp::assert_approx_eq;
use rand::prelude::*;

#[test]
fn matvec_matches_nalgebra() {
    let mut rng = rand::thread_rng();
    let rows = 57;
    let cols = 31;
    let values: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let a = DenseMatrix::from_fn(rows, cols, |i, j| values[i * cols + j]).unwrap();
    let x: Vec<f64> = (0..cols).map(|_| rng.gen_range(-1.0..1.0)).collect();

    let expected = a.to_nalgebra() * nalgebra::DVector::from_column_slice(&x);
    for backend in [
        Backend::Serial(SerialBackend),
        Backend::Rayon(RayonBackend::new(5)),
        Backend::Banded(BandedBackend::new(4)),
    ] {
        let mut y = vec![0.0; rows];
        matvec(&backend, &a, &x, &mut y).unwrap();
        for i in 0..rows {
            assert_approx_eq!(f64, y[i], expected[i], epsilon = 1e-12);
        }
    }
}

#[test]
fn course_matvec_sums_squares() {
    let (a, x) = course_matvec(6, 100).unwrap();
    let (y, report) = matvec_speedup(&BandedBackend::new(3), &a, &x).unwrap();
    let sum_of_squares = (0..100).map(|j| (j * j) as f64).sum::<f64>();
    assert!(y.iter().all(|v| *v == sum_of_squares));
    assert!(report.speedup() >= 0.0);
}

#[test]
fn simple_iteration_on_course_system() {
    let n = 200;
    let (a, b) = course_system(n).unwrap();
    let mut x = vec![0.0; n];
    let outcome = SimpleIteration::new(4e-3, 1e-10, 100_000)
        .solve(&RayonBackend::new(16), &a, &b, &mut x)
        .unwrap();
    assert!(outcome.is_converged());
    for v in x {
        assert_approx_eq!(f64, v, 1.0, epsilon = 1e-6);
    }
}
