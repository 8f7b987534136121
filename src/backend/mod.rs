//! Execution strategies for row-parallel kernels.
//!
//! Kernels describe work per row: a mutable row slice to fill,
//! or a scalar to fold with `max`. A backend decides how rows are
//! grouped into tasks. Every backend hands each row to the kernel
//! exactly once, so results that only depend on the row index are
//! identical across backends and task counts.

mod banded;
mod rayon_chunks;
mod serial;

pub use banded::*;
pub use rayon_chunks::*;
pub use serial::*;

use clap::ValueEnum;
use std::ops::Range;

pub trait ExecutionBackend: Sync {
    /// Call `f(row_index, row)` for each `row_len` wide row of `buffer`.
    /// `row_index` is relative to the start of `buffer`.
    fn for_each_row<F>(&self, buffer: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync;

    /// Fold `f(row_index)` over `rows` with `f64::max`, starting from zero.
    fn max_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync;

    /// Fold `f(row_index)` over `rows` with `+`.
    fn sum_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync;
}

/// Backend families selectable from the command line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum BackendKind {
    /// Single thread, rows in order
    Serial,

    /// Rayon work stealing over chunks of rows
    #[default]
    Rayon,

    /// One rayon task per contiguous band of rows
    Banded,
}

/// Runtime selectable backend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Backend {
    Serial(SerialBackend),
    Rayon(RayonBackend),
    Banded(BandedBackend),
}

impl Backend {
    /// `chunk_size` is rows per task for `Rayon`,
    /// `threads` is the band count for `Banded`.
    pub fn from_kind(kind: BackendKind, chunk_size: usize, threads: usize) -> Self {
        match kind {
            BackendKind::Serial => Backend::Serial(SerialBackend),
            BackendKind::Rayon => Backend::Rayon(RayonBackend::new(chunk_size)),
            BackendKind::Banded => Backend::Banded(BandedBackend::new(threads)),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        match self {
            Backend::Serial(_) => write!(f, "serial"),
            Backend::Rayon(b) => write!(f, "rayon({} rows/task)", b.rows_per_task()),
            Backend::Banded(b) => write!(f, "banded({} bands)", b.bands()),
        }
    }
}

impl ExecutionBackend for Backend {
    fn for_each_row<F>(&self, buffer: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        match self {
            Backend::Serial(b) => b.for_each_row(buffer, row_len, f),
            Backend::Rayon(b) => b.for_each_row(buffer, row_len, f),
            Backend::Banded(b) => b.for_each_row(buffer, row_len, f),
        }
    }

    fn max_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        match self {
            Backend::Serial(b) => b.max_reduce(rows, f),
            Backend::Rayon(b) => b.max_reduce(rows, f),
            Backend::Banded(b) => b.max_reduce(rows, f),
        }
    }

    fn sum_reduce<F>(&self, rows: Range<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync,
    {
        match self {
            Backend::Serial(b) => b.sum_reduce(rows, f),
            Backend::Rayon(b) => b.sum_reduce(rows, f),
            Backend::Banded(b) => b.sum_reduce(rows, f),
        }
    }
}
