use std::time::Duration;

/// Work done by a single generation pass. Returned alongside the field
/// rather than accumulated in shared state, so passes stay composable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub total_iterations: u64,
    pub elapsed: Duration,
}

impl PassStats {
    pub fn new(total_iterations: u64, elapsed: Duration) -> Self {
        Self {
            total_iterations,
            elapsed,
        }
    }

    /// Average cost of one escape-time iteration. `None` when the pass did
    /// no iteration work (e.g. every pixel escaped immediately), so there
    /// is never a division by zero.
    pub fn ns_per_iteration(&self) -> Option<f64> {
        if self.total_iterations == 0 {
            return None;
        }
        Some(self.elapsed.as_nanos() as f64 / self.total_iterations as f64)
    }

    /// Throughput in iterations per nanosecond; `None` for a zero-length
    /// pass.
    pub fn iterations_per_ns(&self) -> Option<f64> {
        let ns = self.elapsed.as_nanos();
        if ns == 0 {
            return None;
        }
        Some(self.total_iterations as f64 / ns as f64)
    }
}

/// Running totals across passes, for on-screen diagnostics.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    passes: u64,
    total_iterations: u64,
    elapsed: Duration,
    last: Option<PassStats>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub passes: u64,
    pub total_iterations: u64,
    pub elapsed_ns: u128,
    pub iterations_per_ns: Option<f64>,
    pub last_pass: Option<PassStats>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pass: PassStats) {
        self.passes += 1;
        self.total_iterations += pass.total_iterations;
        self.elapsed += pass.elapsed;
        self.last = Some(pass);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let elapsed_ns = self.elapsed.as_nanos();
        let iterations_per_ns = if elapsed_ns == 0 {
            None
        } else {
            Some(self.total_iterations as f64 / elapsed_ns as f64)
        };
        StatsSnapshot {
            passes: self.passes,
            total_iterations: self.total_iterations,
            elapsed_ns,
            iterations_per_ns,
            last_pass: self.last,
        }
    }
}
