use crate::boundary::BoundaryProfile;
use crate::error::*;
use clap::ValueEnum;

/// How the read/write roles change between sweeps.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SwapStrategy {
    /// Flip which buffer is current, no data moves.
    #[default]
    RoleFlip,
    /// Copy current into previous after each sweep.
    CopyBack,
}

/// Which grid `StencilSolver::result` hands back once the loop stops.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputSelection {
    /// Grid written by the last sweep.
    #[default]
    Latest,
    /// Grid the last sweep read from, one sweep behind.
    Preceding,
}

/// Solver configuration.
/// These are all the parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParameters {
    /// Grid side length, including the boundary ring.
    pub size: usize,

    /// Stop once the max cell change is at or below this.
    pub accuracy: f64,

    /// Hard ceiling on sweeps.
    pub max_iterations: usize,

    /// Evaluate the error every this many sweeps.
    pub check_interval: usize,

    /// Corner values for the boundary ring.
    pub boundary: BoundaryProfile,

    pub swap_strategy: SwapStrategy,

    pub output_selection: OutputSelection,

    /// Some multithreaded operations on whole buffers are chunked with this size
    pub chunk_size: usize,
}

impl std::default::Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            size: 128,
            accuracy: 1e-6,
            max_iterations: 1_000_000,
            check_interval: 100,
            boundary: BoundaryProfile::default(),
            swap_strategy: SwapStrategy::RoleFlip,
            output_selection: OutputSelection::Latest,
            chunk_size: 1000,
        }
    }
}

impl SolverParameters {
    pub fn new(size: usize, accuracy: f64, max_iterations: usize) -> Self {
        SolverParameters {
            size,
            accuracy,
            max_iterations,
            ..Default::default()
        }
    }

    pub fn with_check_interval(mut self, check_interval: usize) -> Self {
        self.check_interval = check_interval;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryProfile) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_swap_strategy(mut self, swap_strategy: SwapStrategy) -> Self {
        self.swap_strategy = swap_strategy;
        self
    }

    pub fn with_output_selection(
        mut self,
        output_selection: OutputSelection,
    ) -> Self {
        self.output_selection = output_selection;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.size < 3 {
            return Err(SolverError::invalid(
                "size",
                self.size,
                "at least 3 is needed for an interior",
            ));
        }
        if !(self.accuracy.is_finite() && self.accuracy >= 0.0) {
            return Err(SolverError::invalid(
                "accuracy",
                self.accuracy,
                "must be finite and not negative",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::invalid(
                "max_iterations",
                self.max_iterations,
                "must be positive",
            ));
        }
        if self.check_interval == 0 {
            return Err(SolverError::invalid(
                "check_interval",
                self.check_interval,
                "must be positive",
            ));
        }
        let b = &self.boundary;
        let corners = [b.top_left, b.top_right, b.bottom_right, b.bottom_left];
        if let Some(c) = corners.iter().find(|c| !c.is_finite()) {
            return Err(SolverError::invalid(
                "boundary",
                c,
                "corner values must be finite",
            ));
        }
        Ok(())
    }
}
