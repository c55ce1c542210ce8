use crate::order::PartialOrder;

/// A lattice: a partial order with binary meets and joins.
pub trait Lattice: PartialOrder + Sized {
  /// Greatest lower bound of `self` and `other`.
  fn meet(&self, other: &Self) -> Result<Self, Self::Error>;

  /// Least upper bound of `self` and `other`.
  fn join(&self, other: &Self) -> Result<Self, Self::Error>;
}

/// A lattice with a least and a greatest element.
///
/// Elements of the lattices in this workspace live over some finite carrier,
/// so producing `top` or `bottom` needs a description of that carrier, which
/// is the `Shape`.
pub trait BoundedLattice: Lattice {
  type Shape;

  fn bottom(shape: &Self::Shape) -> Self;

  fn top(shape: &Self::Shape) -> Self;
}

/// Joins every element of `items`. An empty iterator yields `bottom`.
pub fn sup<L, I>(shape: &L::Shape, items: I) -> Result<L, L::Error>
where
  L: BoundedLattice,
  I: IntoIterator<Item = L>,
{
  items
    .into_iter()
    .try_fold(L::bottom(shape), |acc, item| acc.join(&item))
}

/// Meets every element of `items`. An empty iterator yields `top`.
pub fn inf<L, I>(shape: &L::Shape, items: I) -> Result<L, L::Error>
where
  L: BoundedLattice,
  I: IntoIterator<Item = L>,
{
  items
    .into_iter()
    .try_fold(L::top(shape), |acc, item| acc.meet(&item))
}

impl Lattice for bool {
  fn meet(&self, other: &Self) -> Result<Self, Self::Error> {
    Ok(*self && *other)
  }

  fn join(&self, other: &Self) -> Result<Self, Self::Error> {
    Ok(*self || *other)
  }
}

impl BoundedLattice for bool {
  type Shape = ();

  fn bottom(_shape: &()) -> Self {
    false
  }

  fn top(_shape: &()) -> Self {
    true
  }
}
