use std::sync::mpsc;
use std::thread;

use crate::complex::C;
use crate::solver::{solve_batch, Backend, FractalKind, GenerateError};

/// Pixels dispatched to a worker per unit of work. Batches are independent;
/// no batch observes another's result.
pub const DEFAULT_BATCH_SIZE: usize = 256;

struct Job {
    n: usize,
    samples: Vec<C<f64>>,
    kind: FractalKind,
    max_iter: u32,
}

struct BatchResult {
    n: usize,
    counts: Result<Vec<u32>, GenerateError>,
}

struct Worker {
    tx: mpsc::Sender<Job>,
}

impl Worker {
    fn spawn(results: mpsc::Sender<BatchResult>) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        thread::spawn(move || loop {
            let job = match rx.recv() {
                Ok(job) => job,
                Err(_) => return,
            };
            let counts = solve_batch(&job.samples, job.kind, job.max_iter);
            if results.send(BatchResult { n: job.n, counts }).is_err() {
                return;
            }
        });
        Self { tx }
    }
}

/// Fixed worker pool over mpsc channels. The sample grid is split into
/// fixed-size batches, dealt round-robin to the workers, and the results
/// are written back by batch index, so completion order does not matter
/// and the output is bit-identical to the sequential path.
pub struct PooledBackend {
    workers: Vec<Worker>,
    batch_size: usize,
    results_rx: mpsc::Receiver<BatchResult>,
}

impl PooledBackend {
    pub fn new(workers: usize, batch_size: usize) -> Result<Self, GenerateError> {
        if workers == 0 || batch_size == 0 {
            return Err(GenerateError::BackendUnavailable);
        }
        let (results_tx, results_rx) = mpsc::channel();
        let workers = (0..workers)
            .map(|_| Worker::spawn(results_tx.clone()))
            .collect();
        Ok(Self {
            workers,
            batch_size,
            results_rx,
        })
    }

    pub fn with_physical_cores() -> Result<Self, GenerateError> {
        Self::new(num_cpus::get_physical(), DEFAULT_BATCH_SIZE)
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }
}

impl Backend for PooledBackend {
    fn run(
        &self,
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
        counts.resize(samples.len(), 0);

        let mut dispatched = 0;
        for (n, chunk) in samples.chunks(self.batch_size).enumerate() {
            let worker = &self.workers[n % self.workers.len()];
            let job = Job {
                n,
                samples: chunk.to_vec(),
                kind,
                max_iter,
            };
            worker.tx.send(job).expect("worker thread terminated");
            dispatched += 1;
        }

        // Wait for every batch before the field is considered valid. A
        // failed batch aborts the pass; the partial buffer never escapes.
        let mut first_error = None;
        for _ in 0..dispatched {
            let result = self.results_rx.recv().expect("worker thread terminated");
            match result.counts {
                Ok(batch) => {
                    let start = result.n * self.batch_size;
                    counts[start..start + batch.len()].copy_from_slice(&batch);
                }
                Err(e) => first_error = Some(e),
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(counts),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::Viewport;
    use crate::solver::{SequentialBackend, MAX_ITERATION};

    #[test]
    fn test_zero_workers_is_unavailable() {
        assert!(matches!(
            PooledBackend::new(0, DEFAULT_BATCH_SIZE),
            Err(GenerateError::BackendUnavailable)
        ));
        assert!(matches!(
            PooledBackend::new(4, 0),
            Err(GenerateError::BackendUnavailable)
        ));
    }

    #[test]
    fn test_matches_sequential_bit_for_bit() {
        let viewport = Viewport::new(3.0, -0.6, 0.05, 3.3);
        let samples = viewport.sample_grid(64, 48).unwrap();

        let expected = SequentialBackend
            .run(&samples, FractalKind::Mandelbrot, MAX_ITERATION)
            .unwrap();

        // Odd batch size so the last batch is ragged, and more batches
        // than workers so the round-robin wraps.
        let pool = PooledBackend::new(3, 100).unwrap();
        let counts = pool
            .run(&samples, FractalKind::Mandelbrot, MAX_ITERATION)
            .unwrap();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_single_worker_single_batch() {
        let viewport = Viewport::default();
        let samples = viewport.sample_grid(4, 4).unwrap();
        let pool = PooledBackend::new(1, 1024).unwrap();
        let counts = pool
            .run(&samples, FractalKind::Mandelbrot, MAX_ITERATION)
            .unwrap();
        let expected = SequentialBackend
            .run(&samples, FractalKind::Mandelbrot, MAX_ITERATION)
            .unwrap();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_empty_grid() {
        let pool = PooledBackend::new(2, 16).unwrap();
        let counts = pool
            .run(&[], FractalKind::Mandelbrot, MAX_ITERATION)
            .unwrap();
        assert!(counts.is_empty());
    }
}
