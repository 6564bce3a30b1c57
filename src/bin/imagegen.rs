use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::exit;

use structopt::StructOpt;

use julibrot::painter::{Greyscale, Painter};
use julibrot::{
    c, output, FractalKind, Generator, PooledBackend, Viewport, C, DEFAULT_BATCH_SIZE,
    MAX_ITERATION,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "julibrot-imagegen", about = "Render an escape-time field to a file")]
struct Opt {
    #[structopt(short, long, default_value = "800")]
    width: usize,

    #[structopt(short, long, default_value = "800")]
    height: usize,

    #[structopt(short, long, default_value = "1.0")]
    zoom: f64,

    #[structopt(long, default_value = "-0.8")]
    shift_x: f64,

    #[structopt(long, default_value = "0.0")]
    shift_y: f64,

    #[structopt(long, default_value = "3.3")]
    range: f64,

    /// Julia constant as "re,im"; renders the Mandelbrot set when absent.
    #[structopt(short, long)]
    julia: Option<String>,

    /// Worker threads; 0 forces the sequential path, default is the
    /// physical core count.
    #[structopt(short, long)]
    threads: Option<usize>,

    /// Output path; ".pgm" writes the plain-text P2 format, anything else
    /// is encoded by the image crate.
    #[structopt(short, long, default_value = "out.png", parse(from_os_str))]
    output: PathBuf,
}

fn parse_complex(s: &str) -> Option<C<f64>> {
    let (re, im) = s.split_once(',')?;
    Some(c(re.trim().parse().ok()?, im.trim().parse().ok()?))
}

fn build_generator(threads: Option<usize>) -> Generator {
    match threads {
        Some(0) => Generator::sequential(),
        Some(n) => match PooledBackend::new(n, DEFAULT_BATCH_SIZE) {
            Ok(pool) => Generator::new(Box::new(pool), MAX_ITERATION),
            Err(e) => {
                log::warn!("{}, falling back to sequential evaluation", e);
                Generator::sequential()
            }
        },
        None => Generator::pooled(),
    }
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let kind = match &opt.julia {
        Some(s) => match parse_complex(s) {
            Some(fixed) => FractalKind::Julia(fixed),
            None => {
                eprintln!("invalid julia constant {:?}, expected \"re,im\"", s);
                exit(2);
            }
        },
        None => FractalKind::Mandelbrot,
    };

    let viewport = Viewport::new(opt.zoom, opt.shift_x, opt.shift_y, opt.range);
    let generator = build_generator(opt.threads);

    let (field, stats) = match generator.generate(opt.width, opt.height, &viewport, kind) {
        Ok(done) => done,
        Err(e) => {
            eprintln!("generation failed: {}", e);
            exit(1);
        }
    };

    let per_iter = stats
        .ns_per_iteration()
        .map(|ns| format!("{:.2}", ns))
        .unwrap_or_else(|| "-".to_string());
    log::info!(
        "pass complete: {} iterations in {:?} ({} ns/iteration)",
        stats.total_iterations,
        stats.elapsed,
        per_iter
    );

    if opt.output.extension().map_or(false, |ext| ext == "pgm") {
        let file = File::create(&opt.output).expect("failed to create output file");
        let mut w = BufWriter::new(file);
        output::write_pgm(&mut w, &field, 255).expect("failed to write image");
    } else {
        let img = Greyscale.paint(&field);
        img.save(&opt.output).expect("failed to save image");
    }
}
