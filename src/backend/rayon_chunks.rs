use super::*;
use rayon::prelude::*;

/// Work stealing over groups of `rows_per_task` rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayonBackend {
    rows_per_task: usize,
}

impl RayonBackend {
    pub fn new(rows_per_task: usize) -> Self {
        RayonBackend {
            rows_per_task: rows_per_task.max(1),
        }
    }

    pub fn rows_per_task(&self) -> usize {
        self.rows_per_task
    }
}

impl Default for RayonBackend {
    fn default() -> Self {
        RayonBackend::new(8)
    }
}

impl ExecutionBackend for RayonBackend {
    fn for_each_row<F>(&self, buffer: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        debug_assert!(row_len > 0);
        let rows_per_task = self.rows_per_task;
        buffer
            .par_chunks_mut(row_len * rows_per_task)
            .enumerate()
            .for_each(|(i, chunk): (usize, &mut [f64])| {
                profiling::scope!("rayon_backend: task");
                let offset = i * rows_per_task;
                for (r, row) in chunk.chunks_mut(row_len).enumerate() {
                    f(offset + r, row);
                }
            });
    }

    fn max_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        rows.into_par_iter()
            .with_min_len(self.rows_per_task)
            .map(&f)
            .reduce(|| 0.0, f64::max)
    }

    fn sum_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        rows.into_par_iter()
            .with_min_len(self.rows_per_task)
            .map(&f)
            .sum()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::sync::Mutex;

    #[test]
    fn reductions_accept_sync_only_closures() {
        // A held MutexGuard is Sync but not Send.
        let values = Mutex::new((0..100).map(|i| i as f64).collect::<Vec<f64>>());
        let backend = RayonBackend::new(7);

        let guard = values.lock().unwrap();
        let max = backend.max_reduce(0..100, move |i| guard[i]);
        assert_eq!(max, 99.0);

        let guard = values.lock().unwrap();
        let sum = backend.sum_reduce(0..100, move |i| guard[i]);
        assert_approx_eq!(f64, sum, 4950.0);
    }
}
