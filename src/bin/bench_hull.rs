//! Benchmark planar-hull: sequential scan vs the distributed pipeline.
//!
//! Run with: cargo run --release --features bench --bin bench_hull
//!
//! Usage:
//!   bench_hull                  Run default size (1m)
//!   bench_hull 100k 1m 10m      Run multiple sizes
//!   bench_hull -w 8             Use 8 workers for the distributed run
//!   bench_hull -n 10            Run 10 iterations (for profiling)
//!   bench_hull --validate       Check convexity/containment of every hull
//!
//! For per-phase coordinator timing, build with `--features bench,timing` and
//! run with `RUST_LOG=debug`.

use clap::Parser;
use log::{info, warn};
use planar_hull::validation::validate;
use planar_hull::{compute_sequential, compute_with, HullConfig, Point};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::time::Instant;

/// Points generated per independently seeded block.
const GEN_BLOCK: usize = 1 << 16;

fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = if s.ends_with('m') {
        (&s[..s.len() - 1], 1_000_000)
    } else if s.ends_with('k') {
        (&s[..s.len() - 1], 1_000)
    } else {
        (s.as_str(), 1)
    };

    num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("Invalid number '{}': {}", s, e))
}

#[derive(Parser)]
#[command(name = "bench_hull")]
#[command(about = "Benchmark planar-hull at various scales")]
struct Args {
    /// Point counts to benchmark (e.g., 100k, 1m, 10M)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of workers for the distributed run
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Orientation tolerance
    #[arg(long, default_value_t = planar_hull::DEFAULT_EPSILON)]
    epsilon: f64,

    /// Validate every hull against its input (slow for large hulls)
    #[arg(long)]
    validate: bool,

    /// Number of iterations to run (useful for profiling)
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: usize,
}

fn fill_block(block: &mut [Point], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for p in block {
        // Uniform in a disk of radius 1000.
        let r = 1000.0 * rng.gen_range(0.0f64..1.0).sqrt();
        let theta = rng.gen_range(0.0..std::f64::consts::TAU);
        *p = Point::new(r * theta.cos(), r * theta.sin());
    }
}

fn generate_points(n: usize, seed: u64) -> Vec<Point> {
    let mut points = vec![Point::default(); n];

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_chunks_mut(GEN_BLOCK)
            .enumerate()
            .for_each(|(i, block)| fill_block(block, seed.wrapping_add(i as u64)));
    }
    #[cfg(not(feature = "parallel"))]
    {
        points
            .chunks_mut(GEN_BLOCK)
            .enumerate()
            .for_each(|(i, block)| fill_block(block, seed.wrapping_add(i as u64)));
    }

    points
}

fn format_rate(count: usize, ms: f64) -> String {
    if ms <= 0.0 {
        return "N/A".to_string();
    }
    let per_sec = count as f64 / (ms / 1000.0);
    if per_sec >= 1_000_000.0 {
        format!("{:.2}M/s", per_sec / 1_000_000.0)
    } else if per_sec >= 1_000.0 {
        format!("{:.1}k/s", per_sec / 1000.0)
    } else {
        format!("{:.0}/s", per_sec)
    }
}

fn format_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        format!("{}", n)
    }
}

struct BenchResult {
    n: usize,
    seq_ms: f64,
    dist_ms: f64,
    hull_len: usize,
    merge_candidates: usize,
    agree: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let sizes = if args.sizes.is_empty() {
        vec![1_000_000]
    } else {
        args.sizes.clone()
    };

    println!("planar-hull benchmark");
    println!("  workers = {}", args.workers);
    println!("  epsilon = {}", args.epsilon);
    println!("  seed = {}", args.seed);

    let config = HullConfig::default()
        .with_epsilon(args.epsilon)
        .with_workers(args.workers);

    let mut results: Vec<BenchResult> = Vec::new();

    for &n in &sizes {
        println!("\n{}", "=".repeat(60));
        println!("n = {}", format_num(n));
        println!("{}", "=".repeat(60));

        let t0 = Instant::now();
        let points = generate_points(n, args.seed);
        info!(
            "generated {} points in {:.1}ms",
            n,
            t0.elapsed().as_secs_f64() * 1000.0
        );

        let mut seq_times = Vec::with_capacity(args.repeat.max(1));
        let mut dist_times = Vec::with_capacity(args.repeat.max(1));
        let mut last = None;

        for iter in 0..args.repeat.max(1) {
            if args.repeat > 1 {
                print!("  Iteration {}/{}... ", iter + 1, args.repeat);
                let _ = io::stdout().flush();
            }

            let t = Instant::now();
            let seq = compute_sequential(&points, args.epsilon);
            seq_times.push(t.elapsed().as_secs_f64() * 1000.0);

            let t = Instant::now();
            let dist = match compute_with(&points, config) {
                Ok(output) => output,
                Err(e) => {
                    eprintln!("distributed run failed for n={}: {}", n, e);
                    std::process::exit(1);
                }
            };
            dist_times.push(t.elapsed().as_secs_f64() * 1000.0);

            if args.repeat > 1 {
                println!(
                    "seq {:.1}ms, dist {:.1}ms",
                    seq_times[iter], dist_times[iter]
                );
            }
            last = Some((seq, dist));
        }

        let Some((seq, dist)) = last else {
            continue;
        };
        let avg = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
        let result = BenchResult {
            n,
            seq_ms: avg(&seq_times),
            dist_ms: avg(&dist_times),
            hull_len: dist.hull.len(),
            merge_candidates: dist.diagnostics.merge_candidates,
            agree: seq == dist.hull,
        };

        println!("\nResults:");
        println!(
            "  Sequential:    {:>8.1}ms ({})",
            result.seq_ms,
            format_rate(n, result.seq_ms)
        );
        println!(
            "  Distributed:   {:>8.1}ms ({})",
            result.dist_ms,
            format_rate(n, result.dist_ms)
        );
        println!("  Hull vertices: {:>8}", result.hull_len);
        println!(
            "  Merge input:   {:>8} (partials {:?})",
            format_num(result.merge_candidates),
            dist.diagnostics.partial_sizes
        );
        println!(
            "  Agreement:     {:>8}",
            if result.agree { "yes" } else { "NO" }
        );
        if !result.agree {
            warn!(
                "sequential ({} vertices) and distributed ({} vertices) hulls differ",
                seq.len(),
                dist.hull.len()
            );
        }

        if args.validate {
            let report = validate(&points, &dist.hull, args.epsilon);
            println!("  Validation:    {}", report.summary());
        }

        results.push(result);
    }

    if results.len() > 1 {
        println!("\n\n{}", "=".repeat(60));
        println!("SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "{:>10} | {:>10} | {:>10} | {:>8} | {:>5}",
            "n", "seq", "dist", "hull", "agree"
        );
        println!("{:-<10}-+-{:-<10}-+-{:-<10}-+-{:-<8}-+-{:-<5}", "", "", "", "", "");

        for r in &results {
            println!(
                "{:>10} | {:>8.1}ms | {:>8.1}ms | {:>8} | {:>5}",
                format_num(r.n),
                r.seq_ms,
                r.dist_ms,
                r.hull_len,
                r.agree
            );
        }
    }

    println!("\nBenchmark complete.");
}
