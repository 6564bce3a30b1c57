use julibrot::bench::{Benchmark, BenchmarkReport};
use julibrot::{
    Backend, FractalKind, PooledBackend, SequentialBackend, Viewport, DEFAULT_BATCH_SIZE,
    MAX_ITERATION,
};

static HEIGHT: usize = 500;
static REPEATS: usize = 10;

fn b_backend<B>(name: &str, backend: B, height: usize) -> Benchmark
where
    B: Backend + 'static,
{
    let width: usize = 3 * height / 2;
    let samples = Viewport::default().sample_grid(width, height).unwrap();
    let f = move || {
        backend
            .run(&samples, FractalKind::Mandelbrot, MAX_ITERATION)
            .unwrap();
    };
    Benchmark::new(&format!("field-{}-{}", name, height), REPEATS, f)
}

fn pool(n: usize) -> PooledBackend {
    PooledBackend::new(n, DEFAULT_BATCH_SIZE).unwrap()
}

fn main() {
    BenchmarkReport::with_benches(&[
        b_backend("seq", SequentialBackend, HEIGHT),
        b_backend("pool2", pool(2), HEIGHT),
        b_backend("pool4", pool(4), HEIGHT),
        b_backend("pool8", pool(8), HEIGHT),
        b_backend("pool16", pool(16), HEIGHT),
    ])
    .report("solver");
}
