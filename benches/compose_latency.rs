use criterion::Criterion;
use std::time::Instant;

use liquidfx::{BackdropConfig, Composer, Viewport};

// Consolidated benchmark suite for liquidfx. Run with:
//    cargo bench

fn hero_config() -> BackdropConfig {
    BackdropConfig {
        heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
        sub_label: Some("Interactive UI Component".to_string()),
        tagline: Some("Scroll to explore".to_string()),
        ..Default::default()
    }
}

/// Bench: full composition, layout through PNG encoding
fn bench_compose(c: &mut Criterion) {
    let config = hero_config();
    let mut composer = Composer::new();

    c.bench_function("compose_1280x800", |b| {
        b.iter(|| {
            composer
                .compose(
                    &config,
                    Viewport {
                        width: 1280,
                        height: 800,
                        dpr: 1.0,
                    },
                )
                .unwrap();
        })
    });

    c.bench_function("compose_1280x800_dpr2", |b| {
        b.iter(|| {
            composer
                .compose(
                    &config,
                    Viewport {
                        width: 1280,
                        height: 800,
                        dpr: 2.0,
                    },
                )
                .unwrap();
        })
    });
}

/// Bench: raster only, to separate paint cost from PNG codec cost
fn bench_render_only(c: &mut Criterion) {
    let config = hero_config();
    let mut composer = Composer::new();
    let vp = Viewport {
        width: 1280,
        height: 800,
        dpr: 1.0,
    };

    c.bench_function("render_1280x800", |b| {
        b.iter(|| {
            composer.render(&config, vp).unwrap();
        })
    });
}

/// Micro-benchmark: composition latency percentiles (p50/p95/p99).
///
/// Printed in addition to Criterion's reports. Configure iterations with
/// `BENCH_ITERATIONS`.
fn bench_latency_percentiles() {
    let iterations: usize = std::env::var("BENCH_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let warmup = 2usize;

    let config = hero_config();
    let mut composer = Composer::new();
    let vp = Viewport {
        width: 1280,
        height: 800,
        dpr: 1.0,
    };

    for _ in 0..warmup {
        composer.compose(&config, vp).expect("warmup failed");
    }

    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let t0 = Instant::now();
        composer.compose(&config, vp).expect("compose failed");
        samples.push(t0.elapsed().as_millis() as u64);
    }

    samples.sort_unstable();
    let p50 = percentile(&samples, 50.0);
    let p95 = percentile(&samples, 95.0);
    let p99 = percentile(&samples, 99.0);

    println!("[compose_latency] samples={:?}", samples);
    println!("[compose_latency] p50={}ms p95={}ms p99={}ms", p50, p95, p99);
}

fn percentile(samples: &[u64], pct: f64) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let n = samples.len();
    let rank = ((pct / 100.0) * (n as f64)).ceil() as usize;
    let idx = if rank == 0 {
        0
    } else {
        rank.saturating_sub(1).min(n - 1)
    };
    samples[idx]
}

// Run benches manually so the percentile output lands on the console next to
// Criterion's reports
fn main() {
    let mut c = Criterion::default();

    bench_compose(&mut c);
    bench_render_only(&mut c);

    // Finalize criterion reports (writes reports into target/criterion)
    c.final_summary();

    bench_latency_percentiles();
}
