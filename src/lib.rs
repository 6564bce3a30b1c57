pub mod bench;
mod complex;
pub mod coord;
pub mod explorer;
pub mod field;
pub mod output;
pub mod painter;
pub mod solver;
pub mod stats;

pub use complex::{c, ci, cr, C};
pub use coord::{MapError, Pixel, Viewport};
pub use explorer::{Explorer, Mode, ViewEvent};
pub use field::IterationField;
pub use solver::{
    escape_count, Backend, FractalKind, GenerateError, Generator, PooledBackend,
    SequentialBackend, DEFAULT_BATCH_SIZE, MAX_ITERATION,
};
pub use stats::{PassStats, StatsCollector, StatsSnapshot};

/// Interactive startup: worker pool sized to the machine, sequential
/// fallback when the pool cannot be brought up, initial pass already run.
pub fn explorer(width: usize, height: usize) -> Result<Explorer, GenerateError> {
    Explorer::new(width, height, Generator::pooled())
}
