use std::{
  borrow::Borrow,
  fmt::{Debug, Display},
  sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
  },
};

use tracing::trace;

use crate::error::{RelError, RelResult};

/// Identifies one carrier construction. Clones of a `Finite` share the tag,
/// independently constructed carriers never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarrierTag(u64);

impl CarrierTag {
  fn fresh() -> Self {
    static NEXT_TAG: AtomicU64 = AtomicU64::new(0);
    Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
  }

  pub const fn id(&self) -> u64 {
    self.0
  }
}

impl Display for CarrierTag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "carrier#{}", self.0)
  }
}

type EqFn<T> = dyn Fn(&T, &T) -> bool + Send + Sync;

struct Carrier<T> {
  tag: CarrierTag,
  elements: Vec<T>,
  eq: Box<EqFn<T>>,
}

/// A finite, deduplicated, indexed enumeration of elements.
///
/// Every element is assigned the index of its first occurrence in the
/// iterator the carrier was built from. A `Finite` is never mutated after
/// construction and is cheap to clone.
pub struct Finite<T> {
  inner: Arc<Carrier<T>>,
}

impl<T> Finite<T> {
  /// Builds a carrier, comparing elements with `PartialEq`.
  pub fn new<I>(elements: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: PartialEq + 'static,
  {
    Self::with_eq(elements, |a: &T, b: &T| a == b)
  }

  /// Builds a carrier with a caller-supplied equality. Elements equal to an
  /// earlier element are dropped.
  pub fn with_eq<I, F>(elements: I, eq: F) -> Self
  where
    I: IntoIterator<Item = T>,
    F: Fn(&T, &T) -> bool + Send + Sync + 'static,
  {
    let mut unique: Vec<T> = Vec::new();
    for element in elements {
      if !unique.iter().any(|seen| eq(seen, &element)) {
        unique.push(element);
      }
    }

    let tag = CarrierTag::fresh();
    trace!(%tag, size = unique.len(), "new carrier");

    Self {
      inner: Arc::new(Carrier {
        tag,
        elements: unique,
        eq: Box::new(eq),
      }),
    }
  }

  pub fn tag(&self) -> CarrierTag {
    self.inner.tag
  }

  pub fn len(&self) -> usize {
    self.inner.elements.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.elements.is_empty()
  }

  pub fn elements(&self) -> &[T] {
    &self.inner.elements
  }

  pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
    self.inner.elements.iter()
  }

  pub fn get(&self, idx: usize) -> Option<&T> {
    self.inner.elements.get(idx)
  }

  /// Returns the index of `x`, or `None` if `x` is not in the carrier.
  pub fn index_of(&self, x: &T) -> Option<usize> {
    self
      .inner
      .elements
      .iter()
      .position(|element| (self.inner.eq)(element, x))
  }

  pub fn has(&self, x: &T) -> bool {
    self.index_of(x).is_some()
  }

  /// True if both handles refer to the same carrier construction.
  pub fn same_carrier(&self, other: &Self) -> bool {
    self.tag() == other.tag()
  }

  /// Fails with `RelError::CarrierMismatch`, naming `op`, unless `other` is
  /// this very carrier.
  pub fn ensure_same(&self, op: &'static str, other: &Self) -> RelResult {
    if self.same_carrier(other) {
      Ok(())
    } else {
      Err(RelError::CarrierMismatch {
        op,
        left: self.tag(),
        right: other.tag(),
      })
    }
  }

  pub fn require_index(&self, op: &'static str, x: &T) -> RelResult<usize> {
    self.index_of(x).ok_or(RelError::OutOfCarrier {
      op,
      carrier: self.tag(),
    })
  }

  /// Looks up the indices of every element of `xs`, failing on the first
  /// element outside the carrier.
  pub fn require_indices<I>(&self, op: &'static str, xs: I) -> RelResult<Vec<usize>>
  where
    I: IntoIterator,
    I::Item: Borrow<T>,
  {
    xs.into_iter()
      .map(|x| self.require_index(op, x.borrow()))
      .collect()
  }
}

impl Finite<usize> {
  /// The carrier `{0, 1, ..., n - 1}`.
  pub fn range(n: usize) -> Self {
    Self::new(0..n)
  }
}

impl<T> Clone for Finite<T> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

/// Carriers are equal only if they are the same construction.
impl<T> PartialEq for Finite<T> {
  fn eq(&self, other: &Self) -> bool {
    self.same_carrier(other)
  }
}

impl<T> Eq for Finite<T> {}

impl<T: Debug> Debug for Finite<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.tag())?;
    f.debug_list().entries(self.iter()).finish()
  }
}
