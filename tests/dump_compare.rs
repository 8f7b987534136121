use relax2d::backend::*;
use relax2d::dump::*;
use relax2d::solver::*;

use float_cmp::assert_approx_eq;

fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("relax2d_{}_{}", std::process::id(), name));
    path
}

#[test]
fn saved_dumps_compare() {
    let params = SolverParameters::new(11, 1e-4, 2000).with_check_interval(10);
    let mut serial = StencilSolver::new(params.clone(), SerialBackend).unwrap();
    let mut banded = StencilSolver::new(params, BandedBackend::new(4)).unwrap();
    serial.solve();
    banded.solve();

    let left = temp_path("serial.txt");
    let right = temp_path("banded.txt");
    save_dump(serial.result(), &left, DEFAULT_FIELD_WIDTH).unwrap();
    save_dump(banded.result(), &right, DEFAULT_FIELD_WIDTH).unwrap();

    let a = load_dump(&left).unwrap();
    let b = load_dump(&right).unwrap();
    assert_eq!(a.len(), 11);
    assert!(a.iter().all(|row| row.len() == 11));
    assert_eq!(compare_dumps(&a, &b), Comparison::Identical);

    // Four decimals survive the trip.
    assert_approx_eq!(f64, a[0][0], 10.0);
    assert_approx_eq!(
        f64,
        a[5][5],
        serial.result().get(5, 5),
        epsilon = 5e-5
    );

    std::fs::remove_file(&left).unwrap();
    std::fs::remove_file(&right).unwrap();
}

#[test]
fn different_runs_are_reported() {
    let short = SolverParameters::new(7, 0.0, 3);
    let long = SolverParameters::new(7, 0.0, 30);
    let mut a = StencilSolver::new(short, SerialBackend).unwrap();
    let mut b = StencilSolver::new(long, SerialBackend).unwrap();
    a.solve();
    b.solve();

    let mut left = Vec::new();
    let mut right = Vec::new();
    write_dump(a.result(), &mut left, 10).unwrap();
    write_dump(b.result(), &mut right, 10).unwrap();
    let left = read_dump(left.as_slice()).unwrap();
    let right = read_dump(right.as_slice()).unwrap();

    let comparison = compare_dumps(&left, &right);
    assert!(!comparison.is_identical());
    assert!(matches!(comparison, Comparison::ValueMismatch { row: 1, .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_dump(&temp_path("does_not_exist.txt"));
    assert!(matches!(result, Err(relax2d::error::DumpError::Io(_))));
}
