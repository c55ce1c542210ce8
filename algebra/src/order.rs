use std::convert::Infallible;

/// A partially ordered set.
///
/// Comparison is fallible: elements built over incompatible carriers have no
/// meaningful order, and implementors report that through `Error` instead of
/// answering `false`.
pub trait PartialOrder {
  type Error;

  /// Returns true if `self` is below or equal to `other`.
  fn leq(&self, other: &Self) -> Result<bool, Self::Error>;

  /// Returns true if `self` and `other` are below each other.
  fn equiv(&self, other: &Self) -> Result<bool, Self::Error> {
    Ok(self.leq(other)? && other.leq(self)?)
  }
}

impl PartialOrder for bool {
  type Error = Infallible;

  fn leq(&self, other: &Self) -> Result<bool, Self::Error> {
    Ok(!*self || *other)
  }
}
