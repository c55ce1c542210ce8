use std::fmt::{Debug, Display};

/// A pair that is related on the left-hand side of a failed inclusion
/// `R ≤ S` but not on the right-hand side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionWitness<A, B> {
  pub a: A,
  pub b: B,
}

impl<A: Debug, B: Debug> Display for InclusionWitness<A, B> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "({:?}, {:?}) is related on the left but not on the right",
      self.a, self.b
    )
  }
}
