use super::*;
use crate::util::*;

/// One spawned task per contiguous band of rows, inside a `rayon::scope`.
/// With `bands` equal to the thread count this is the classic static
/// row partition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BandedBackend {
    bands: usize,
}

impl BandedBackend {
    pub fn new(bands: usize) -> Self {
        BandedBackend {
            bands: bands.max(1),
        }
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Per band partial results, in band order.
    fn partials<F>(&self, rows: Range<usize>, f: F) -> Vec<Vec<f64>>
    where
        F: Fn(usize) -> f64 + Sync,
    {
        let bands = bands(rows, self.bands);
        let mut partial: Vec<Vec<f64>> = vec![Vec::new(); bands.len()];
        let f = &f;
        rayon::scope(|s| {
            for (band, slot) in bands.into_iter().zip(partial.iter_mut()) {
                s.spawn(move |_| {
                    profiling::scope!("banded_backend: reduce band");
                    *slot = band.map(f).collect();
                });
            }
        });
        partial
    }
}

impl ExecutionBackend for BandedBackend {
    fn for_each_row<F>(&self, buffer: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        debug_assert!(row_len > 0);
        let rows = buffer.len() / row_len;
        let band_rows = band_len(rows, self.bands);
        let f = &f;
        rayon::scope(|s| {
            for (b, band) in buffer.chunks_mut(band_rows * row_len).enumerate() {
                s.spawn(move |_| {
                    profiling::scope!("banded_backend: band");
                    let offset = b * band_rows;
                    for (r, row) in band.chunks_mut(row_len).enumerate() {
                        f(offset + r, row);
                    }
                });
            }
        });
    }

    fn max_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        self.partials(rows, f)
            .iter()
            .flatten()
            .fold(0.0, |a, b| a.max(*b))
    }

    fn sum_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        self.partials(rows, f)
            .iter()
            .map(|band| band.iter().sum::<f64>())
            .sum()
    }
}
