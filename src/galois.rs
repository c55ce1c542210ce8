//! The three subset maps induced by a function `f : A → B`, and exhaustive
//! verification that they form the chain of adjunctions `∃f ⊣ f* ⊣ ∀f`.

use itertools::Itertools;
use relation::{
  error::{RelError, RelResult},
  FinMap, Subset,
};
use tracing::{debug, warn};

use crate::verify_opts::VerifyOptions;

/// `∃f(P) = {f(a) | a ∈ P}`.
pub fn exists_along<A, B>(f: &FinMap<A, B>, p: &Subset<A>) -> RelResult<Subset<B>> {
  f.source().ensure_same("exists_along", p.carrier())?;
  let mut mask = vec![false; f.target().len()];
  for idx in p.indices() {
    mask[f.apply_index(idx)] = true;
  }
  Subset::from_mask(f.target(), mask)
}

/// `f*(Q) = {a | f(a) ∈ Q}`.
pub fn preimage_sub<A, B>(f: &FinMap<A, B>, q: &Subset<B>) -> RelResult<Subset<A>> {
  f.target().ensure_same("preimage_sub", q.carrier())?;
  let mask = f.table().iter().map(|&b| q.contains_index(b)).collect();
  Subset::from_mask(f.source(), mask)
}

/// `∀f(P) = {b | every a with f(a) = b is in P}`. Elements of `B` outside
/// the image of `f` are always included.
pub fn forall_along<A, B>(f: &FinMap<A, B>, p: &Subset<A>) -> RelResult<Subset<B>> {
  f.source().ensure_same("forall_along", p.carrier())?;
  let mut mask = vec![true; f.target().len()];
  for (a, &b) in f.table().iter().enumerate() {
    if !p.contains_index(a) {
      mask[b] = false;
    }
  }
  Subset::from_mask(f.target(), mask)
}

/// Outcome of `verify_galois_chain`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaloisReport {
  /// `∃f(P) ≤ Q ⇔ P ≤ f*(Q)` held for every pair checked.
  pub exists_preimage: bool,
  /// `f*(Q) ≤ P ⇔ Q ≤ ∀f(P)` held for every pair checked.
  pub preimage_forall: bool,
  pub pairs_checked: u64,
}

impl GaloisReport {
  pub fn holds(&self) -> bool {
    self.exists_preimage && self.preimage_forall
  }
}

/// Checks both adjunctions over every pair `(P, Q)` of subsets of the
/// domain and codomain of `f`.
///
/// There are `2^(|A| + |B|)` such pairs, so this refuses with
/// `RelError::TooLarge` when `|A| + |B|` exceeds
/// `opts.max_exhaustive_bits`.
pub fn verify_galois_chain<A, B>(f: &FinMap<A, B>, opts: &VerifyOptions) -> RelResult<GaloisReport> {
  let bits = f.source().len() + f.target().len();
  if bits > opts.max_exhaustive_bits {
    return Err(RelError::TooLarge {
      bits,
      limit: opts.max_exhaustive_bits,
    });
  }

  let qs = Subset::enumerate(f.target())?.collect_vec();
  let preimages = qs
    .iter()
    .map(|q| preimage_sub(f, q))
    .collect::<RelResult<Vec<_>>>()?;

  let mut report = GaloisReport {
    exists_preimage: true,
    preimage_forall: true,
    pairs_checked: 0,
  };
  for p in Subset::enumerate(f.source())? {
    let image = exists_along(f, &p)?;
    let universal = forall_along(f, &p)?;
    for (q, pre) in qs.iter().zip(&preimages) {
      report.pairs_checked += 1;
      if image.leq(q)? != p.leq(pre)? {
        warn!(p = ?p.mask(), q = ?q.mask(), "∃f ⊣ f* failed");
        report.exists_preimage = false;
      }
      if pre.leq(&p)? != q.leq(&universal)? {
        warn!(p = ?p.mask(), q = ?q.mask(), "f* ⊣ ∀f failed");
        report.preimage_forall = false;
      }
      if opts.stop_at_first_failure && !report.holds() {
        return Ok(report);
      }
    }
  }

  debug!(pairs = report.pairs_checked, holds = report.holds(), "galois chain checked");
  Ok(report)
}

#[cfg(test)]
mod tests {
  use googletest::{expect_that, gtest, prelude::*};
  use relation::Finite;

  use super::*;

  fn halve() -> FinMap<usize, usize> {
    let a = Finite::range(6);
    let b = Finite::range(4);
    FinMap::new(&a, &b, |&n| n / 2).unwrap()
  }

  #[gtest]
  fn test_subset_maps() {
    let f = halve();
    let p = Subset::from(f.source(), [0usize, 1, 2]).unwrap();
    expect_that!(exists_along(&f, &p).unwrap().to_vec(), elements_are![&0, &1]);
    // 3 is outside the image. 1 and 2 have preimages outside `p`.
    expect_that!(forall_along(&f, &p).unwrap().to_vec(), elements_are![&0, &3]);

    let q = Subset::from(f.target(), [1usize, 3]).unwrap();
    expect_that!(preimage_sub(&f, &q).unwrap().to_vec(), elements_are![&2, &3]);
  }

  #[gtest]
  fn test_chain_holds() {
    let report = verify_galois_chain(&halve(), &VerifyOptions::default()).unwrap();
    expect_true!(report.exists_preimage);
    expect_true!(report.preimage_forall);
    expect_that!(report.pairs_checked, eq(1 << 10));
  }

  #[test]
  fn test_empty_domain() {
    let a = Finite::<usize>::range(0);
    let b = Finite::new(['x', 'y']);
    let f = FinMap::new(&a, &b, |_| 'x').unwrap();
    let report = verify_galois_chain(&f, &VerifyOptions::default()).unwrap();
    assert!(report.holds());
    assert_eq!(report.pairs_checked, 4);
    assert_eq!(
      forall_along(&f, &Subset::empty(&a)).unwrap(),
      Subset::all(&b)
    );
  }

  #[test]
  fn test_too_large() {
    let f = halve();
    let opts = VerifyOptions::default().with_max_exhaustive_bits(9);
    assert_eq!(
      verify_galois_chain(&f, &opts),
      Err(RelError::TooLarge { bits: 10, limit: 9 })
    );
  }

  #[test]
  fn test_carrier_mismatch() {
    let f = halve();
    let foreign = Subset::all(&Finite::range(6));
    assert!(matches!(
      exists_along(&f, &foreign),
      Err(RelError::CarrierMismatch { op: "exists_along", .. })
    ));
    assert!(preimage_sub(&f, &Subset::all(f.source())).is_err());
  }
}
