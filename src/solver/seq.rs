use crate::complex::C;
use crate::solver::{solve_batch, Backend, FractalKind, GenerateError};

/// Runs the whole pass as one row-major loop on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBackend;

impl Backend for SequentialBackend {
    fn run(
        &self,
        samples: &[C<f64>],
        kind: FractalKind,
        max_iter: u32,
    ) -> Result<Vec<u32>, GenerateError> {
        solve_batch(samples, kind, max_iter)
    }
}
