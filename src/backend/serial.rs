use super::*;

/// Single threaded reference backend, rows in ascending order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SerialBackend;

impl ExecutionBackend for SerialBackend {
    fn for_each_row<F>(&self, buffer: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        debug_assert!(row_len > 0);
        for (r, row) in buffer.chunks_mut(row_len).enumerate() {
            f(r, row);
        }
    }

    fn max_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        rows.map(f).fold(0.0, f64::max)
    }

    fn sum_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        rows.map(f).sum()
    }
}
