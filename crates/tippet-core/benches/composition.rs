//! Benchmarks for n-port composition
//!
//! Measures the composer across port counts and frequency sizes, with and
//! without parallel sub-measurements.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use std::f64::consts::PI;
use tippet_core::frequency::{Frequency, FrequencyUnit, SweepType};
use tippet_core::source::{NetworkSource, SyntheticSource};
use tippet_core::{compose, ComposeOptions, Network};

/// Random device plus one reflective load per port
fn create_setup(nfreq: usize, nports: usize) -> (Network, Vec<Network>) {
    let freq = Frequency::new(75.0, 110.0, nfreq, FrequencyUnit::GHz, SweepType::Linear);
    let mut src = SyntheticSource::new(freq, 0);
    let dut = src.random(nports).unwrap();
    let loads = (0..nports)
        .map(|k| {
            let phase = 2.0 * PI * k as f64 / nports as f64;
            src.load(Complex64::from_polar(0.6, phase)).unwrap()
        })
        .collect();
    (dut, loads)
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let opts = ComposeOptions::default().with_parallel(false);

    for nfreq in [10, 100, 500].iter() {
        for nports in [3, 4, 8].iter() {
            let (dut, loads) = create_setup(*nfreq, *nports);
            let id = BenchmarkId::new(format!("{}ports", nports), nfreq);

            group.bench_with_input(id, nfreq, |b, _| {
                b.iter(|| black_box(compose(&dut, &loads, &opts).unwrap()))
            });
        }
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_compose_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_parallel");
    let opts = ComposeOptions::default().with_parallel(true);

    for nports in [4, 8, 12].iter() {
        let (dut, loads) = create_setup(500, *nports);
        let id = BenchmarkId::from_parameter(nports);

        group.bench_with_input(id, nports, |b, _| {
            b.iter(|| black_box(compose(&dut, &loads, &opts).unwrap()))
        });
    }

    group.finish();
}

fn bench_renormalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("renormalize");

    for nfreq in [100, 1000].iter() {
        for nports in [2, 4, 8].iter() {
            let (dut, _) = create_setup(*nfreq, *nports);
            let id = BenchmarkId::new(format!("{}ports", nports), nfreq);

            group.bench_with_input(id, nfreq, |b, _| {
                b.iter(|| black_box(dut.renormalize(Complex64::new(75.0, 5.0)).unwrap()))
            });
        }
    }

    group.finish();
}

#[cfg(feature = "parallel")]
criterion_group!(
    benches,
    bench_compose,
    bench_compose_parallel,
    bench_renormalize,
);
#[cfg(not(feature = "parallel"))]
criterion_group!(benches, bench_compose, bench_renormalize);
criterion_main!(benches);
