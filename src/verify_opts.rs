/// Limits for the checks that enumerate every subset of a carrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyOptions {
  /// Exhaustive checks over carriers `A` and `B` are refused when
  /// `|A| + |B|` exceeds this.
  pub max_exhaustive_bits: usize,
  /// Stop at the first failing pair instead of scanning everything.
  pub stop_at_first_failure: bool,
}

impl VerifyOptions {
  pub fn with_max_exhaustive_bits(&self, max_exhaustive_bits: usize) -> Self {
    Self {
      max_exhaustive_bits,
      ..*self
    }
  }

  pub fn with_stop_at_first_failure(&self, stop_at_first_failure: bool) -> Self {
    Self {
      stop_at_first_failure,
      ..*self
    }
  }
}

impl Default for VerifyOptions {
  fn default() -> Self {
    Self {
      max_exhaustive_bits: 20,
      stop_at_first_failure: false,
    }
  }
}
