use std::fmt;
use std::io::{stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct Benchmark {
    name: String,
    runs: usize,
    f: Rc<dyn Fn()>,
}

impl Benchmark {
    pub fn new<F: Fn() + 'static>(name: &str, runs: usize, f: F) -> Self {
        Self {
            name: name.to_string(),
            runs,
            f: Rc::new(f),
        }
    }

    pub fn once<F: Fn() + 'static>(name: &str, f: F) -> Self {
        Self::new(name, 1, f)
    }

    fn time(&self) -> Timing {
        let start = Instant::now();
        for _ in 0..self.runs {
            (self.f)();
        }
        Timing {
            name: self.name.clone(),
            runs: self.runs,
            total: start.elapsed(),
        }
    }
}

pub struct Timing {
    pub name: String,
    pub runs: usize,
    pub total: Duration,
}

impl Timing {
    pub fn per_call(&self) -> Duration {
        self.total.div_f64(self.runs as f64)
    }
}

/// Picks a readable unit by magnitude.
fn scaled(d: &Duration) -> String {
    let ns = d.as_nanos();
    if ns < 10_000 {
        format!("{}ns", ns)
    } else if ns < 10_000_000 {
        format!("{}µs", d.as_micros())
    } else if ns < 10_000_000_000 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{}s", d.as_secs())
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {: <30} {: >8}   {: >8}",
            self.name,
            scaled(&self.total),
            scaled(&self.per_call()),
        )
    }
}

pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    timings: Vec<Timing>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: &[Benchmark]) -> Self {
        Self {
            benches: benches.to_vec(),
            timings: vec![],
        }
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            self.timings.push(bench.time());
            print!(".");
            stdout().flush().unwrap();
        }
        println!();
    }

    pub fn show(&self) {
        println!("  {: <30} {: >8}   {: >8}", "benchmark", "total", "per_call");
        for timing in &self.timings {
            println!("{}", timing);
        }
    }

    pub fn report(&mut self, name: &str) {
        print!("Benchmark: {}", name);
        self.run();
        self.show();
    }
}
