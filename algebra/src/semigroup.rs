/// An algebraic semigroup whose operation may be undefined for some pairs of
/// elements (e.g. composition of relations whose carriers don't line up).
pub trait Semigroup: Sized {
  type Error;

  /// The associative operation of the semigroup.
  fn op(&self, other: &Self) -> Result<Self, Self::Error>;
}
