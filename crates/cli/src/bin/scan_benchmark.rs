//! Compares the ring and naive bounding-box scanners.
//!
//! Two inputs are timed: a random bitmap with about half the pixels opaque,
//! where the ring walk stops after a few rings, and a small sprite in the
//! middle of a transparent canvas, where it has to walk most of the margin.

use std::time::{Duration, Instant};

use clap::Parser;

use alphacrop_core::scanning::domain::boundary_scanner::BoundaryScanner;
use alphacrop_core::scanning::infrastructure::scanner_factory::{create_scanner, ScanStrategy};
use alphacrop_core::shared::raster::Raster;

#[derive(Parser)]
#[command(name = "scan-benchmark")]
struct Args {
    #[arg(default_value_t = 1920)]
    width: u32,

    #[arg(default_value_t = 1080)]
    height: u32,

    #[arg(default_value_t = 20)]
    iterations: u32,
}

/// Linear congruential generator so runs are reproducible.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }
}

fn half_opaque(width: u32, height: u32, seed: u64) -> Raster {
    let mut rng = SimpleRng::new(seed);
    let mut raster = Raster::transparent(width, height);
    for y in 0..height {
        for x in 0..width {
            if rng.next() >> 63 == 1 {
                raster.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
    }
    raster
}

fn centered_sprite(width: u32, height: u32) -> Raster {
    let mut raster = Raster::transparent(width, height);
    if width == 0 || height == 0 {
        return raster;
    }
    let (sw, sh) = ((width / 8).max(1), (height / 8).max(1));
    let (x0, y0) = ((width - sw) / 2, (height - sh) / 2);
    for y in y0..y0 + sh {
        for x in x0..x0 + sw {
            raster.set_pixel(x, y, [255, 0, 0, 255]);
        }
    }
    raster
}

fn time_scanner(scanner: &dyn BoundaryScanner, raster: &Raster, iterations: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(scanner.find_bounding_box(raster, 0));
    }
    start.elapsed()
}

fn run_case(name: &str, raster: &Raster, iterations: u32) {
    let ring = create_scanner(ScanStrategy::Ring);
    let naive = create_scanner(ScanStrategy::Naive);

    let ring_box = ring.find_bounding_box(raster, 0);
    let naive_box = naive.find_bounding_box(raster, 0);
    if ring_box != naive_box {
        eprintln!("Mismatch on {name}: ring {ring_box:?} vs naive {naive_box:?}");
    }

    let ring_time = time_scanner(ring.as_ref(), raster, iterations);
    let naive_time = time_scanner(naive.as_ref(), raster, iterations);
    let per_iter = |d: Duration| d.as_secs_f64() * 1000.0 / iterations as f64;

    println!("{name}:");
    println!("  ring : {:.3} ms per scan", per_iter(ring_time));
    println!("  naive: {:.3} ms per scan", per_iter(naive_time));
    if ring_time.as_secs_f64() > 0.0 {
        println!(
            "  speedup: {:.1}x",
            naive_time.as_secs_f64() / ring_time.as_secs_f64()
        );
    }
    println!();
}

fn main() {
    let args = Args::parse();
    let iterations = args.iterations.max(1);

    println!("Bounding-Box Scan Benchmark");
    println!("═══════════════════════════");
    println!(
        "Benchmarking: {}x{} raster, {} iterations",
        args.width, args.height, iterations
    );
    println!();

    run_case(
        "Half-opaque noise",
        &half_opaque(args.width, args.height, 42),
        iterations,
    );
    run_case(
        "Centered sprite",
        &centered_sprite(args.width, args.height),
        iterations,
    );
}
