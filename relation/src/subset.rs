use std::{borrow::Borrow, fmt::Debug};

use algebra::{
  lattice::{BoundedLattice, Lattice},
  order::PartialOrder,
};

use crate::{
  error::{RelError, RelResult},
  Finite,
};

/// The largest carrier `Subset::enumerate` will walk. Each extra element
/// doubles the number of subsets.
pub const MAX_ENUMERABLE: usize = 63;

/// A set of elements of a carrier, stored as a membership mask.
pub struct Subset<T> {
  carrier: Finite<T>,
  mask: Vec<bool>,
}

impl<T> Subset<T> {
  pub fn empty(carrier: &Finite<T>) -> Self {
    Self {
      carrier: carrier.clone(),
      mask: vec![false; carrier.len()],
    }
  }

  pub fn all(carrier: &Finite<T>) -> Self {
    Self {
      carrier: carrier.clone(),
      mask: vec![true; carrier.len()],
    }
  }

  /// The subset containing exactly `elements`. Fails if any element is not in
  /// `carrier`.
  pub fn from<I>(carrier: &Finite<T>, elements: I) -> RelResult<Self>
  where
    I: IntoIterator,
    I::Item: Borrow<T>,
  {
    let mut subset = Self::empty(carrier);
    for idx in carrier.require_indices("Subset::from", elements)? {
      subset.mask[idx] = true;
    }
    Ok(subset)
  }

  pub fn singleton(carrier: &Finite<T>, x: &T) -> RelResult<Self> {
    Self::from(carrier, [x])
  }

  /// The subset of elements satisfying `pred`.
  pub fn by(carrier: &Finite<T>, mut pred: impl FnMut(&T) -> bool) -> Self {
    Self {
      carrier: carrier.clone(),
      mask: carrier.iter().map(|x| pred(x)).collect(),
    }
  }

  pub fn from_mask(carrier: &Finite<T>, mask: Vec<bool>) -> RelResult<Self> {
    if mask.len() != carrier.len() {
      return Err(RelError::DimensionMismatch {
        op: "Subset::from_mask",
        rows: 1,
        cols: carrier.len(),
        found_rows: 1,
        found_cols: mask.len(),
      });
    }
    Ok(Self {
      carrier: carrier.clone(),
      mask,
    })
  }

  /// Lazily yields all `2^n` subsets of `carrier`, in binary counting order
  /// over the carrier indices (bit `i` of the counter selects element `i`).
  pub fn enumerate(carrier: &Finite<T>) -> RelResult<impl Iterator<Item = Self> + '_> {
    let n = carrier.len();
    if n > MAX_ENUMERABLE {
      return Err(RelError::TooLarge {
        bits: n,
        limit: MAX_ENUMERABLE,
      });
    }

    Ok((0..1u64 << n).map(move |bits| Self {
      carrier: carrier.clone(),
      mask: (0..n).map(|idx| (bits >> idx) & 1 == 1).collect(),
    }))
  }

  pub fn carrier(&self) -> &Finite<T> {
    &self.carrier
  }

  pub fn mask(&self) -> &[bool] {
    &self.mask
  }

  pub fn contains(&self, x: &T) -> bool {
    self
      .carrier
      .index_of(x)
      .is_some_and(|idx| self.mask[idx])
  }

  pub fn contains_index(&self, idx: usize) -> bool {
    self.mask.get(idx).copied().unwrap_or(false)
  }

  /// Carrier indices of the members, in ascending order.
  pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
    self
      .mask
      .iter()
      .enumerate()
      .filter_map(|(idx, &member)| member.then_some(idx))
  }

  /// The members, in carrier order.
  pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
    self
      .carrier
      .iter()
      .zip(self.mask.iter())
      .filter_map(|(x, &member)| member.then_some(x))
  }

  pub fn to_vec(&self) -> Vec<T>
  where
    T: Clone,
  {
    self.iter().cloned().collect()
  }

  pub fn len(&self) -> usize {
    self.mask.iter().filter(|&&member| member).count()
  }

  pub fn is_empty(&self) -> bool {
    !self.mask.iter().any(|&member| member)
  }

  /// Subset inclusion. Subsets of different carriers can't be compared.
  pub fn leq(&self, other: &Self) -> RelResult<bool> {
    self.carrier.ensure_same("Subset::leq", &other.carrier)?;
    Ok(
      self
        .mask
        .iter()
        .zip(other.mask.iter())
        .all(|(&a, &b)| !a || b),
    )
  }

  pub fn meet(&self, other: &Self) -> RelResult<Self> {
    self.zip_with("Subset::meet", other, |a, b| a && b)
  }

  pub fn join(&self, other: &Self) -> RelResult<Self> {
    self.zip_with("Subset::join", other, |a, b| a || b)
  }

  pub fn difference(&self, other: &Self) -> RelResult<Self> {
    self.zip_with("Subset::difference", other, |a, b| a && !b)
  }

  pub fn complement(&self) -> Self {
    Self {
      carrier: self.carrier.clone(),
      mask: self.mask.iter().map(|&member| !member).collect(),
    }
  }

  fn zip_with(
    &self,
    op: &'static str,
    other: &Self,
    f: impl Fn(bool, bool) -> bool,
  ) -> RelResult<Self> {
    self.carrier.ensure_same(op, &other.carrier)?;
    Ok(Self {
      carrier: self.carrier.clone(),
      mask: self
        .mask
        .iter()
        .zip(other.mask.iter())
        .map(|(&a, &b)| f(a, b))
        .collect(),
    })
  }
}

impl<T> Clone for Subset<T> {
  fn clone(&self) -> Self {
    Self {
      carrier: self.carrier.clone(),
      mask: self.mask.clone(),
    }
  }
}

impl<T> PartialEq for Subset<T> {
  fn eq(&self, other: &Self) -> bool {
    self.carrier == other.carrier && self.mask == other.mask
  }
}

impl<T> Eq for Subset<T> {}

impl<T: Debug> Debug for Subset<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl<T> PartialOrder for Subset<T> {
  type Error = RelError;

  fn leq(&self, other: &Self) -> RelResult<bool> {
    Subset::leq(self, other)
  }
}

impl<T> Lattice for Subset<T> {
  fn meet(&self, other: &Self) -> RelResult<Self> {
    Subset::meet(self, other)
  }

  fn join(&self, other: &Self) -> RelResult<Self> {
    Subset::join(self, other)
  }
}

impl<T> BoundedLattice for Subset<T> {
  type Shape = Finite<T>;

  fn bottom(shape: &Finite<T>) -> Self {
    Self::empty(shape)
  }

  fn top(shape: &Finite<T>) -> Self {
    Self::all(shape)
  }
}
