use std::fmt::Debug;

use crate::{
  error::{RelError, RelResult},
  Finite,
};

/// A total function between two carriers, tabulated by index: `table[i]` is
/// the codomain index of the image of domain element `i`.
pub struct FinMap<A, B> {
  dom: Finite<A>,
  cod: Finite<B>,
  table: Vec<usize>,
}

impl<A, B> FinMap<A, B> {
  /// Tabulates `f` over `dom`. Fails if some `f(a)` is not in `cod`.
  pub fn new(dom: &Finite<A>, cod: &Finite<B>, f: impl Fn(&A) -> B) -> RelResult<Self> {
    let table = dom
      .iter()
      .map(|a| cod.require_index("FinMap::new", &f(a)))
      .collect::<RelResult<Vec<_>>>()?;
    Ok(Self {
      dom: dom.clone(),
      cod: cod.clone(),
      table,
    })
  }

  pub fn from_indices(dom: &Finite<A>, cod: &Finite<B>, table: Vec<usize>) -> RelResult<Self> {
    if table.len() != dom.len() {
      return Err(RelError::DimensionMismatch {
        op: "FinMap::from_indices",
        rows: dom.len(),
        cols: 1,
        found_rows: table.len(),
        found_cols: 1,
      });
    }
    if table.iter().any(|&idx| idx >= cod.len()) {
      return Err(RelError::OutOfCarrier {
        op: "FinMap::from_indices",
        carrier: cod.tag(),
      });
    }
    Ok(Self {
      dom: dom.clone(),
      cod: cod.clone(),
      table,
    })
  }

  pub fn source(&self) -> &Finite<A> {
    &self.dom
  }

  pub fn target(&self) -> &Finite<B> {
    &self.cod
  }

  pub fn table(&self) -> &[usize] {
    &self.table
  }

  pub fn apply_index(&self, idx: usize) -> usize {
    self.table[idx]
  }

  /// Returns `f(a)`, or `None` if `a` is not in the domain.
  pub fn apply(&self, a: &A) -> Option<&B> {
    self
      .dom
      .index_of(a)
      .and_then(|idx| self.cod.get(self.table[idx]))
  }

  /// Diagrammatic composition: first `self`, then `other`.
  pub fn then<C>(&self, other: &FinMap<B, C>) -> RelResult<FinMap<A, C>> {
    self.cod.ensure_same("FinMap::then", &other.dom)?;
    Ok(FinMap {
      dom: self.dom.clone(),
      cod: other.cod.clone(),
      table: self.table.iter().map(|&idx| other.table[idx]).collect(),
    })
  }
}

impl<T> FinMap<T, T> {
  pub fn identity(carrier: &Finite<T>) -> Self {
    Self {
      dom: carrier.clone(),
      cod: carrier.clone(),
      table: (0..carrier.len()).collect(),
    }
  }
}

impl<A, B> Clone for FinMap<A, B> {
  fn clone(&self) -> Self {
    Self {
      dom: self.dom.clone(),
      cod: self.cod.clone(),
      table: self.table.clone(),
    }
  }
}

impl<A: Debug, B: Debug> Debug for FinMap<A, B> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_map()
      .entries(
        self
          .dom
          .iter()
          .zip(self.table.iter().map(|&idx| &self.cod.elements()[idx])),
      )
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_and_apply() {
    let dom = Finite::range(6);
    let cod = Finite::new([0usize, 1, 2]);
    let f = FinMap::new(&dom, &cod, |&x| x % 3).unwrap();
    assert_eq!(f.table(), &[0, 1, 2, 0, 1, 2]);
    assert_eq!(f.apply(&4), Some(&1));
    assert_eq!(f.apply(&9), None);
  }

  #[test]
  fn test_new_outside_codomain() {
    let dom = Finite::range(4);
    let cod = Finite::range(2);
    assert!(matches!(
      FinMap::new(&dom, &cod, |&x| x),
      Err(RelError::OutOfCarrier { .. })
    ));
  }

  #[test]
  fn test_then() {
    let a = Finite::range(4);
    let b = Finite::range(4);
    let c = Finite::new([false, true]);
    let succ = FinMap::new(&a, &b, |&x| (x + 1) % 4).unwrap();
    let odd = FinMap::new(&b, &c, |&x| x % 2 == 1).unwrap();
    let composed = succ.then(&odd).unwrap();
    assert_eq!(composed.apply(&0), Some(&true));
    assert_eq!(composed.apply(&1), Some(&false));

    let lookalike = Finite::range(4);
    let g = FinMap::new(&lookalike, &b, |&x| x).unwrap();
    assert!(succ.then(&g).is_err());
  }

  #[test]
  fn test_from_indices() {
    let a = Finite::range(3);
    let b = Finite::range(2);
    assert!(FinMap::from_indices(&a, &b, vec![0, 1]).is_err());
    assert!(FinMap::from_indices(&a, &b, vec![0, 1, 2]).is_err());
    let f = FinMap::from_indices(&a, &b, vec![1, 1, 0]).unwrap();
    assert_eq!(f.apply(&0), Some(&1));
  }

  #[test]
  fn test_identity() {
    let a = Finite::new(["x", "y"]);
    let id = FinMap::identity(&a);
    assert_eq!(id.apply(&"y"), Some(&"y"));
  }
}
