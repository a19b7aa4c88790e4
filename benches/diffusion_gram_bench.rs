use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use graphdiffusion::kernel::DiffusionKernel;
use graphdiffusion::spectrum::FactorSpectrum;
use graphdiffusion::states::StateBatch;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use std::hint::black_box;
use std::time::Duration;

/// Path graph on `n` vertices: the Laplacian is diagonalised by the DCT-II.
fn path_spectrum(n: usize) -> FactorSpectrum {
    let frequencies: Vec<f64> = (0..n)
        .map(|k| 2.0 - 2.0 * (PI * k as f64 / n as f64).cos())
        .collect();
    let basis: Vec<Vec<f64>> = (0..n)
        .map(|v| {
            (0..n)
                .map(|k| {
                    let c = if k == 0 { (1.0 / n as f64).sqrt() } else { (2.0 / n as f64).sqrt() };
                    c * (PI * k as f64 * (v as f64 + 0.5) / n as f64).cos()
                })
                .collect()
        })
        .collect();
    FactorSpectrum::from_rows(frequencies, basis).unwrap()
}

fn random_states(sizes: &[usize], nrows: usize, seed: u64) -> StateBatch {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (0..nrows)
        .map(|_| sizes.iter().map(|&n| rng.random_range(0..n)).collect())
        .collect();
    StateBatch::from_rows(rows).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("diffusion_gram");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(20);

    // 24 factors of 50 vertices, as in a typical combinatorial BO problem
    let sizes = vec![50usize; 24];
    let kernel = DiffusionKernel::new(sizes.iter().map(|&n| path_spectrum(n)).collect()).unwrap();

    for &n in &[10usize, 100, 400] {
        let x = random_states(&sizes, n, 42);
        group.bench_with_input(BenchmarkId::new("full_self", n), &x, |b, x| {
            b.iter(|| black_box(kernel.gram(black_box(x), None).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("diagonal", n), &x, |b, x| {
            b.iter(|| black_box(kernel.diag(black_box(x)).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
