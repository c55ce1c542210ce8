//! Runs every law check over randomly generated carriers, relations and
//! functions.

use algebra::{lattice::Lattice, order::PartialOrder};
use rand::Rng;
use relation::{
  error::{RelError, RelResult},
  FinMap, Finite, Subset,
};
use tracing::{debug, warn};

use crate::{
  allegory, equipment, galois, hoare,
  metrics::Metrics,
  residual,
  strategy::{RelFactory, Strategy},
  verify_opts::VerifyOptions,
};

/// Shape of the random instances the suite generates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuiteOptions {
  pub trials: u32,
  /// Carriers have between 1 and `max_carrier` elements.
  pub max_carrier: usize,
  pub density: f64,
  pub verify: VerifyOptions,
}

impl SuiteOptions {
  pub fn with_trials(&self, trials: u32) -> Self {
    Self { trials, ..*self }
  }

  pub fn with_max_carrier(&self, max_carrier: usize) -> Self {
    Self {
      max_carrier,
      ..*self
    }
  }

  pub fn with_density(&self, density: f64) -> Self {
    Self { density, ..*self }
  }

  fn validate(&self) -> RelResult {
    if self.max_carrier == 0 {
      return Err(RelError::InvalidParameter {
        name: "max_carrier",
        value: self.max_carrier.to_string(),
      });
    }
    if !(0.0..=1.0).contains(&self.density) {
      return Err(RelError::InvalidParameter {
        name: "density",
        value: self.density.to_string(),
      });
    }
    Ok(())
  }
}

impl Default for SuiteOptions {
  fn default() -> Self {
    Self {
      trials: 32,
      max_carrier: 6,
      density: 0.4,
      verify: VerifyOptions::default(),
    }
  }
}

fn check(metrics: &mut Metrics, law: &str, holds: bool) {
  if !metrics.record(holds) {
    warn!(law, "law check failed");
  }
}

fn random_map<R: Rng>(
  dom: &Finite<usize>,
  cod: &Finite<usize>,
  rng: &mut R,
) -> RelResult<FinMap<usize, usize>> {
  let table = (0..dom.len()).map(|_| rng.random_range(0..cod.len())).collect();
  FinMap::from_indices(dom, cod, table)
}

fn random_subset<R: Rng>(carrier: &Finite<usize>, rng: &mut R) -> Subset<usize> {
  Subset::by(carrier, |_| rng.random_bool(0.5))
}

/// One round of every law over fresh random carriers of the given sizes.
fn run_trial<R: Rng>(
  factory: &RelFactory,
  opts: &SuiteOptions,
  rng: &mut R,
  metrics: &mut Metrics,
) -> RelResult {
  let carrier = |rng: &mut R| Finite::range(rng.random_range(1..=opts.max_carrier));
  let (a, b, c) = (carrier(rng), carrier(rng), carrier(rng));
  let random = |dom: &Finite<usize>, cod: &Finite<usize>, rng: &mut R| {
    factory.random(dom, cod, opts.density, rng)
  };

  let r = random(&a, &b, rng)?;
  let r2 = random(&a, &b, rng)?;
  let s = random(&b, &c, rng)?;
  let t = random(&a, &c, rng)?;
  let u = random(&c, &a, rng)?;

  check(metrics, "converse involution", allegory::dagger_involutive(&r));
  check(
    metrics,
    "associativity",
    r.compose(&s)?.compose(&u)? == r.compose(&s.compose(&u)?)?,
  );
  check(metrics, "meet commutes", r.meet(&r2)? == r2.meet(&r)?);
  check(metrics, "join commutes", r.join(&r2)? == r2.join(&r)?);
  check(metrics, "join is an upper bound", r.leq(&Lattice::join(&r, &r2)?)?);
  check(metrics, "meet is a lower bound", PartialOrder::leq(&r.meet(&r2)?, &r)?);
  check(metrics, "absorption", r.join(&r.meet(&r2)?)? == r);
  check(metrics, "left modular law", allegory::modular_left(&r, &s, &t)?);
  check(metrics, "right modular law", allegory::modular_right(&r, &s, &t)?);
  check(
    metrics,
    "converse reverses composition",
    allegory::converse_reverses_composition(&r, &s)?,
  );
  check(
    metrics,
    "converse is monotone",
    allegory::converse_monotone(&r.meet(&r2)?, &r)?,
  );

  let x = random(&b, &c, rng)?;
  let y = random(&a, &b, rng)?;
  check(metrics, "left residual adjunction", residual::adjunction_left_holds(&r, &x, &t)?);
  check(metrics, "right residual adjunction", residual::adjunction_right_holds(&y, &s, &t)?);

  let f = random_map(&a, &b, rng)?;
  let g = random_map(&b, &c, rng)?;
  check(metrics, "unit", equipment::unit_holds(factory, &f)?);
  check(metrics, "counit", equipment::counit_holds(factory, &f)?);
  // f°;r2;g contains (f(a), g(b)) for every pair (a, b) of r2.
  let pushed = equipment::conjoint(factory, &f)
    .compose(&r2)?
    .compose(&equipment::companion(factory, &g))?;
  check(metrics, "pushed square", equipment::square_holds(&f, &r2, &g, &pushed)?);
  let along_g = r2.compose(&equipment::companion(factory, &g))?;
  check(
    metrics,
    "square along companions",
    equipment::square_holds(&FinMap::identity(&a), &r2, &g, &along_g)?,
  );

  if a.len() + b.len() <= opts.verify.max_exhaustive_bits {
    let report = galois::verify_galois_chain(&f, &opts.verify)?;
    metrics.pairs_scanned += report.pairs_checked;
    check(metrics, "galois chain", report.holds());
  }

  let prog = random(&a, &a, rng)?;
  let pre = random_subset(&a, rng);
  let post = random_subset(&a, rng);
  check(metrics, "wp/sp adjunction", hoare::wp_sp_adjoint(&pre, &prog, &post)?);
  let verdict = hoare::hoare_holds(&pre, &prog, &post)?;
  check(
    metrics,
    "hoare agrees with sp",
    verdict.holds() == hoare::sp(&pre, &prog)?.leq(&post)?,
  );

  let other = RelFactory::new(match factory.strategy() {
    Strategy::Dense => Strategy::Bit,
    Strategy::Bit => Strategy::Dense,
  });
  let (r_other, s_other) = (other.adopt(&r), other.adopt(&s));
  check(
    metrics,
    "backends agree",
    r_other.compose(&s_other)?.to_pairs() == r.compose(&s)?.to_pairs()
      && r_other.converse().to_pairs() == r.converse().to_pairs()
      && r_other.meet(&other.adopt(&r2))?.to_pairs() == r.meet(&r2)?.to_pairs(),
  );

  Ok(())
}

/// Runs `opts.trials` rounds of the law suite, building every relation with
/// `factory`. Fails up front if `opts` asks for empty carriers or a density
/// outside `[0, 1]`.
pub fn run_suite<R: Rng>(
  factory: &RelFactory,
  opts: &SuiteOptions,
  rng: &mut R,
) -> RelResult<Metrics> {
  opts.validate()?;
  let mut metrics = Metrics::new();
  for trial in 0..opts.trials {
    let mut trial_metrics = Metrics::new();
    run_trial(factory, opts, rng, &mut trial_metrics)?;
    debug!(trial, failed = trial_metrics.checks_failed, "trial finished");
    metrics += trial_metrics;
  }
  Ok(metrics)
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};
  use rstest::rstest;

  use super::*;

  #[rstest]
  fn test_suite_passes(
    #[values(Strategy::Dense, Strategy::Bit)] strategy: Strategy,
    #[values(1, 0xdead_beef)] seed: u64,
  ) {
    let mut rng = StdRng::seed_from_u64(seed);
    let opts = SuiteOptions::default().with_trials(8);
    let metrics = run_suite(&RelFactory::new(strategy), &opts, &mut rng).unwrap();
    assert!(metrics.all_passed(), "{metrics:?}");
    assert!(metrics.checks_run >= 8 * 20);
    assert!(metrics.pairs_scanned > 0);
  }

  #[test]
  fn test_galois_skipped_past_limit() {
    let mut rng = StdRng::seed_from_u64(3);
    let opts = SuiteOptions {
      verify: VerifyOptions::default().with_max_exhaustive_bits(1),
      ..SuiteOptions::default().with_trials(2)
    };
    let metrics = run_suite(&RelFactory::default(), &opts, &mut rng).unwrap();
    assert_eq!(metrics.pairs_scanned, 0);
    assert!(metrics.all_passed());
  }

  #[test]
  fn test_rejects_empty_carriers() {
    let mut rng = StdRng::seed_from_u64(3);
    let opts = SuiteOptions::default().with_max_carrier(0);
    assert_eq!(
      run_suite(&RelFactory::default(), &opts, &mut rng),
      Err(RelError::InvalidParameter { name: "max_carrier", value: "0".to_owned() })
    );
  }

  #[rstest]
  fn test_rejects_bad_density(#[values(-0.5, 2.0, f64::NAN)] density: f64) {
    let mut rng = StdRng::seed_from_u64(3);
    let opts = SuiteOptions::default().with_trials(0).with_density(density);
    assert!(matches!(
      run_suite(&RelFactory::bit(), &opts, &mut rng),
      Err(RelError::InvalidParameter { name: "density", .. })
    ));
  }

  #[test]
  fn test_single_element_carriers() {
    let mut rng = StdRng::seed_from_u64(5);
    let opts = SuiteOptions::default().with_trials(4).with_max_carrier(1);
    assert!(run_suite(&RelFactory::dense(), &opts, &mut rng).unwrap().all_passed());
  }
}
