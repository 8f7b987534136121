use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

/// Failures that stop a solve before it starts.
/// Running out of iterations is not an error, see `SolveOutcome`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("invalid configuration: {parameter} = {value} ({reason})")]
    InvalidConfiguration {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("out of memory: could not allocate {cells} cells")]
    OutOfMemory { cells: usize },

    #[error("dimension mismatch for {operand}: expected {expected}, found {found}")]
    DimensionMismatch {
        operand: &'static str,
        expected: usize,
        found: usize,
    },
}

impl SolverError {
    pub fn invalid<V: std::fmt::Display>(
        parameter: &'static str,
        value: V,
        reason: &'static str,
    ) -> Self {
        SolverError::InvalidConfiguration {
            parameter,
            value: value.to_string(),
            reason,
        }
    }
}

pub type DumpResult<T> = Result<T, DumpError>;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: could not parse `{token}` as a number")]
    Parse { line: usize, token: String },
}

/// Allocate a zeroed buffer, reporting allocation failure instead of aborting.
pub fn try_zeroed(cells: usize) -> SolverResult<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_| SolverError::OutOfMemory { cells })?;
    buffer.resize(cells, 0.0);
    Ok(buffer)
}
