use std::{hint::black_box, time::Duration};

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use finrel::{
  galois::verify_galois_chain,
  residual::{left_residual, right_residual},
  strategy::{RelFactory, Strategy},
  verify_opts::VerifyOptions,
  FinMap, Finite,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn residuals(c: &mut Criterion) {
  let mut group = c.benchmark_group("residuals");
  group.measurement_time(Duration::from_secs(10));

  for strategy in Strategy::ALL {
    let factory = RelFactory::new(strategy);
    let mut rng = StdRng::seed_from_u64(5150);
    let (a, b, c) = (Finite::range(48), Finite::range(64), Finite::range(40));
    let r = factory.random(&a, &b, 0.3, &mut rng).unwrap();
    let s = factory.random(&a, &c, 0.6, &mut rng).unwrap();
    let t = factory.random(&b, &c, 0.3, &mut rng).unwrap();

    group.bench_function(format!("{strategy} left residual"), |bench| {
      bench.iter(|| black_box(left_residual(&r, &s).unwrap()))
    });
    group.bench_function(format!("{strategy} right residual"), |bench| {
      bench.iter(|| black_box(right_residual(&s, &t).unwrap()))
    });
  }

  group.finish();
}

fn galois(c: &mut Criterion) {
  let mut group = c.benchmark_group("galois chain");
  group.measurement_time(Duration::from_secs(20));

  let mut rng = StdRng::seed_from_u64(90210);
  for (n, m) in [(6, 6), (8, 8), (10, 8)] {
    let (a, b) = (Finite::range(n), Finite::range(m));
    let table = (0..n).map(|_| rng.random_range(0..m)).collect();
    let f = FinMap::from_indices(&a, &b, table).unwrap();
    group.throughput(Throughput::Elements(1 << (n + m)));
    group.bench_function(format!("{n} to {m}"), |bench| {
      bench.iter(|| black_box(verify_galois_chain(&f, &VerifyOptions::default()).unwrap()))
    });
  }

  group.finish();
}

criterion_group!(residual_benches, residuals, galois);
criterion_main!(residual_benches);
