/// Counters collected while checking laws.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
  pub checks_run: u64,
  pub checks_failed: u64,
  /// Element or subset pairs inspected by exhaustive checks.
  pub pairs_scanned: u64,
}

impl Metrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Counts one check, and returns `holds` back.
  pub fn record(&mut self, holds: bool) -> bool {
    self.checks_run += 1;
    if !holds {
      self.checks_failed += 1;
    }
    holds
  }

  pub fn all_passed(&self) -> bool {
    self.checks_failed == 0
  }
}

impl std::ops::Add for Metrics {
  type Output = Self;

  fn add(self, rhs: Self) -> Self::Output {
    Self {
      checks_run: self.checks_run + rhs.checks_run,
      checks_failed: self.checks_failed + rhs.checks_failed,
      pairs_scanned: self.pairs_scanned + rhs.pairs_scanned,
    }
  }
}

impl std::ops::AddAssign for Metrics {
  fn add_assign(&mut self, rhs: Self) {
    *self = self.clone() + rhs;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_record_and_sum() {
    let mut first = Metrics::new();
    assert!(first.record(true));
    assert!(!first.record(false));
    first.pairs_scanned = 10;

    let mut total = Metrics {
      checks_run: 3,
      ..Metrics::default()
    };
    total += first;
    assert_eq!(
      total,
      Metrics {
        checks_run: 5,
        checks_failed: 1,
        pairs_scanned: 10,
      }
    );
    assert!(!total.all_passed());
  }
}
