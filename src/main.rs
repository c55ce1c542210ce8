use std::{process::ExitCode, time::Instant};

use finrel::{
  strategy::{RelFactory, Strategy},
  suite::{run_suite, SuiteOptions},
  RelError, RelResult,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};

const DEFAULT_SEED: u64 = 0x5eed;

/// `finrel [dense|bit] [seed]`
fn parse_args(mut args: impl Iterator<Item = String>) -> RelResult<(Strategy, u64)> {
  let strategy = match args.next() {
    Some(arg) => arg.parse()?,
    None => Strategy::default(),
  };
  let seed = match args.next() {
    Some(arg) => arg
      .parse()
      .map_err(|_| RelError::InvalidParameter { name: "seed", value: arg })?,
    None => DEFAULT_SEED,
  };
  Ok((strategy, seed))
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  let (strategy, seed) = match parse_args(std::env::args().skip(1)) {
    Ok(args) => args,
    Err(err) => {
      error!("{err}");
      return ExitCode::FAILURE;
    }
  };

  let factory = RelFactory::new(strategy);
  let opts = SuiteOptions::default();
  let mut rng = StdRng::seed_from_u64(seed);
  info!(%strategy, seed, trials = opts.trials, "running law suite");

  let start = Instant::now();
  let metrics = match run_suite(&factory, &opts, &mut rng) {
    Ok(metrics) => metrics,
    Err(err) => {
      error!("{err}");
      return ExitCode::FAILURE;
    }
  };
  let end = Instant::now();

  println!(
    "{} checks run, {} failed, {} subset pairs scanned",
    metrics.checks_run, metrics.checks_failed, metrics.pairs_scanned
  );
  println!(
    "{:?}, {:.0} checks/sec",
    end - start,
    metrics.checks_run as f64 / (end - start).as_secs_f64()
  );

  if metrics.all_passed() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}
