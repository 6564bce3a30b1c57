use std::error::Error;
use std::fmt;
use std::time::Instant;

use crate::complex::{escaped, step, C};
use crate::coord::{MapError, Viewport};
use crate::field::IterationField;
use crate::stats::PassStats;

pub mod pool;
pub mod seq;

pub use pool::{PooledBackend, DEFAULT_BATCH_SIZE};
pub use seq::SequentialBackend;

/// Iteration cap; the only accuracy-vs-cost tunable at the set boundary.
pub const MAX_ITERATION: u32 = 255;

#[derive(Debug, Clone)]
pub enum GenerateError {
    Map(MapError),
    Allocation { needed: usize },
    BackendUnavailable,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(e) => write!(f, "{}", e),
            Self::Allocation { needed } => {
                write!(f, "failed to allocate buffer for {} pixels", needed)
            }
            Self::BackendUnavailable => write!(f, "parallel backend unavailable"),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for GenerateError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

/// Which of (z₀, c) comes from the pixel sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractalKind {
    Mandelbrot,
    Julia(C<f64>),
}

impl FractalKind {
    /// Splits a sample point into the (z₀, c) pair for the evaluator.
    pub fn cell(&self, sample: C<f64>) -> (C<f64>, C<f64>) {
        match self {
            Self::Mandelbrot => (sample, sample),
            Self::Julia(c) => (sample, *c),
        }
    }
}

/// Bounded escape-time loop for one sample point. Total: returns in at
/// most `max_iter` steps, with the count in `[0, max_iter]`.
pub fn escape_count(start: C<f64>, c: C<f64>, max_iter: u32) -> u32 {
    let mut n = start;
    for i in 0..max_iter {
        n = step(n, c);
        if escaped(n) {
            return i;
        }
    }
    max_iter
}

/// An execution strategy for one generation pass. Implementations run the
/// same deterministic per-pixel computation, so their outputs are
/// bit-identical for identical inputs.
pub trait Backend {
    fn run(
        &self,
        samples: &[C<f64>],
        kind: FractalKind,
        max_iter: u32,
    ) -> Result<Vec<u32>, GenerateError>;
}

/// Evaluates one batch of samples into a fresh count buffer. Shared by
/// both backends so the per-pixel computation exists exactly once.
pub(crate) fn solve_batch(
    samples: &[C<f64>],
    kind: FractalKind,
    max_iter: u32,
) -> Result<Vec<u32>, GenerateError> {
    let mut counts = Vec::new();
    counts
        .try_reserve_exact(samples.len())
        .map_err(|_| GenerateError::Allocation {
            needed: samples.len(),
        })?;
    for &sample in samples {
        let (z, c) = kind.cell(sample);
        counts.push(escape_count(z, c, max_iter));
    }
    Ok(counts)
}

/// Drives a backend over every pixel of a grid and produces the completed
/// field plus the pass statistics.
pub struct Generator {
    backend: Box<dyn Backend>,
    max_iter: u32,
}

impl Generator {
    pub fn new(backend: Box<dyn Backend>, max_iter: u32) -> Self {
        Self { backend, max_iter }
    }

    pub fn sequential() -> Self {
        Self::new(Box::new(SequentialBackend), MAX_ITERATION)
    }

    /// Worker-pool generator sized to the physical core count. Falls back
    /// to the sequential path when the pool cannot be brought up; that is
    /// a recovered condition, not a failure.
    pub fn pooled() -> Self {
        match PooledBackend::with_physical_cores() {
            Ok(pool) => Self::new(Box::new(pool), MAX_ITERATION),
            Err(e) => {
                log::warn!("{}, falling back to sequential evaluation", e);
                Self::sequential()
            }
        }
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// One full generation pass. The Julia sample grid is always taken
    /// through the unzoomed base viewport; only the fixed constant tracks
    /// the zoomed view. On error no field is produced, so the caller's
    /// previous field stays valid.
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        viewport: &Viewport,
        kind: FractalKind,
    ) -> Result<(IterationField, PassStats), GenerateError> {
        viewport.validate(width, height)?;
        let grid_view = match kind {
            FractalKind::Mandelbrot => *viewport,
            FractalKind::Julia(_) => viewport.base(),
        };

        let started = Instant::now();
        let samples = grid_view.sample_grid(width, height)?;
        let counts = self.backend.run(&samples, kind, self.max_iter)?;
        let total_iterations = counts.iter().map(|&n| n as u64).sum();

        let field = IterationField::from_counts(width, height, self.max_iter, counts);
        let stats = PassStats::new(total_iterations, started.elapsed());
        Ok((field, stats))
    }
}
