use std::{borrow::Borrow, fmt::Debug};

use algebra::{
  lattice::{BoundedLattice, Lattice},
  monoid::Monoid,
  order::PartialOrder,
  semigroup::Semigroup,
};
use itertools::Itertools;

use crate::{
  error::{RelError, RelResult},
  matrix::{BoolMatrix, DefaultMatrix},
  DenseMatrix, FinMap, Finite, InclusionWitness, Subset,
};

/// A relation between two finite carriers, stored as a `|A| x |B|` boolean
/// matrix in the backend `M`.
///
/// Relations are immutable: every operation returns a fresh relation. Binary
/// operations check that the carriers involved are the same constructions and
/// fail with `RelError::CarrierMismatch` otherwise.
pub struct Relation<A, B, M = DenseMatrix> {
  dom: Finite<A>,
  cod: Finite<B>,
  matrix: M,
}

pub type DenseRel<A, B> = Relation<A, B, DenseMatrix>;

impl<A, B, M: DefaultMatrix> Relation<A, B, M> {
  pub fn empty(dom: &Finite<A>, cod: &Finite<B>) -> Self {
    Self {
      dom: dom.clone(),
      cod: cod.clone(),
      matrix: M::zeros(dom.len(), cod.len()),
    }
  }

  /// The relation relating every element of `dom` to every element of `cod`.
  pub fn full(dom: &Finite<A>, cod: &Finite<B>) -> Self {
    Self::empty(dom, cod).complement()
  }

  pub fn from_fn(dom: &Finite<A>, cod: &Finite<B>, mut pred: impl FnMut(&A, &B) -> bool) -> Self {
    let matrix = M::from_fn(dom.len(), cod.len(), |i, j| {
      pred(&dom.elements()[i], &cod.elements()[j])
    });
    Self {
      dom: dom.clone(),
      cod: cod.clone(),
      matrix,
    }
  }

  /// Builds a relation from explicit pairs. Fails if either side of a pair is
  /// not in its carrier.
  pub fn from_pairs<I, X, Y>(dom: &Finite<A>, cod: &Finite<B>, pairs: I) -> RelResult<Self>
  where
    I: IntoIterator<Item = (X, Y)>,
    X: Borrow<A>,
    Y: Borrow<B>,
  {
    Self::empty(dom, cod).with_pairs(pairs)
  }

  /// The graph `{(a, f(a))}` of a function. Fails if some `f(a)` is not in
  /// `cod`.
  pub fn graph(dom: &Finite<A>, cod: &Finite<B>, f: impl Fn(&A) -> B) -> RelResult<Self> {
    Ok(Self::from_map(&FinMap::new(dom, cod, f)?))
  }

  pub fn from_map(f: &FinMap<A, B>) -> Self {
    let mut matrix = M::zeros(f.source().len(), f.target().len());
    for (i, &j) in f.table().iter().enumerate() {
      matrix.set(i, j, true);
    }
    Self {
      dom: f.source().clone(),
      cod: f.target().clone(),
      matrix,
    }
  }
}

impl<T, M: DefaultMatrix> Relation<T, T, M> {
  pub fn identity(carrier: &Finite<T>) -> Self {
    Self {
      dom: carrier.clone(),
      cod: carrier.clone(),
      matrix: M::identity(carrier.len()),
    }
  }
}

impl<A, B, M: BoolMatrix> Relation<A, B, M> {
  /// Wraps an existing matrix. Fails unless its shape is `|dom| x |cod|`.
  pub fn from_parts(dom: &Finite<A>, cod: &Finite<B>, matrix: M) -> RelResult<Self> {
    if matrix.rows() != dom.len() || matrix.cols() != cod.len() {
      return Err(RelError::DimensionMismatch {
        op: "Relation::from_parts",
        rows: dom.len(),
        cols: cod.len(),
        found_rows: matrix.rows(),
        found_cols: matrix.cols(),
      });
    }
    Ok(Self {
      dom: dom.clone(),
      cod: cod.clone(),
      matrix,
    })
  }

  /// Builds a relation between arbitrary carriers, by index, in the same
  /// backend as `self`.
  pub fn build_like<C, D>(
    &self,
    dom: &Finite<C>,
    cod: &Finite<D>,
    f: impl FnMut(usize, usize) -> bool,
  ) -> Relation<C, D, M> {
    Relation {
      dom: dom.clone(),
      cod: cod.clone(),
      matrix: self.matrix.from_fn_like(dom.len(), cod.len(), f),
    }
  }

  /// Returns a copy of `self` with `pairs` added.
  pub fn with_pairs<I, X, Y>(&self, pairs: I) -> RelResult<Self>
  where
    I: IntoIterator<Item = (X, Y)>,
    X: Borrow<A>,
    Y: Borrow<B>,
  {
    let mut matrix = self.matrix.clone();
    for (a, b) in pairs {
      let i = self.dom.require_index("Relation::from_pairs", a.borrow())?;
      let j = self.cod.require_index("Relation::from_pairs", b.borrow())?;
      matrix.set(i, j, true);
    }
    Ok(Self {
      dom: self.dom.clone(),
      cod: self.cod.clone(),
      matrix,
    })
  }

  /// An empty relation stored in the same backend as `backend`, whatever
  /// the shape of `backend` itself.
  pub fn empty_in(dom: &Finite<A>, cod: &Finite<B>, backend: &M) -> Self {
    Self {
      dom: dom.clone(),
      cod: cod.clone(),
      matrix: backend.zeros_like(dom.len(), cod.len()),
    }
  }

  /// Copies the relation into another backend. No information is lost.
  pub fn to_backend<N: DefaultMatrix>(&self) -> Relation<A, B, N> {
    Relation {
      dom: self.dom.clone(),
      cod: self.cod.clone(),
      matrix: N::convert(&self.matrix),
    }
  }

  pub fn source(&self) -> &Finite<A> {
    &self.dom
  }

  pub fn target(&self) -> &Finite<B> {
    &self.cod
  }

  pub fn matrix(&self) -> &M {
    &self.matrix
  }

  pub fn has(&self, a: &A, b: &B) -> bool {
    match (self.dom.index_of(a), self.cod.index_of(b)) {
      (Some(i), Some(j)) => self.matrix.get(i, j),
      _ => false,
    }
  }

  pub fn has_index(&self, i: usize, j: usize) -> bool {
    self.matrix.get(i, j)
  }

  pub fn len(&self) -> usize {
    self.matrix.count_ones()
  }

  pub fn is_empty(&self) -> bool {
    (0..self.dom.len()).all(|row| self.matrix.row_ones(row).next().is_none())
  }

  pub fn converse(&self) -> Relation<B, A, M> {
    Relation {
      dom: self.cod.clone(),
      cod: self.dom.clone(),
      matrix: self.matrix.transpose(),
    }
  }

  fn ensure_same_shape(&self, op: &'static str, other: &Self) -> RelResult {
    self.dom.ensure_same(op, &other.dom)?;
    self.cod.ensure_same(op, &other.cod)
  }

  fn with_matrix(&self, matrix: M) -> Self {
    Self {
      dom: self.dom.clone(),
      cod: self.cod.clone(),
      matrix,
    }
  }

  /// Inclusion: every pair of `self` is a pair of `other`.
  pub fn leq(&self, other: &Self) -> RelResult<bool> {
    self.ensure_same_shape("Relation::leq", other)?;
    Ok(self.matrix.is_subset_of(&other.matrix))
  }

  pub fn meet(&self, other: &Self) -> RelResult<Self> {
    self.ensure_same_shape("Relation::meet", other)?;
    Ok(self.with_matrix(self.matrix.and(&other.matrix)))
  }

  pub fn join(&self, other: &Self) -> RelResult<Self> {
    self.ensure_same_shape("Relation::join", other)?;
    Ok(self.with_matrix(self.matrix.or(&other.matrix)))
  }

  pub fn difference(&self, other: &Self) -> RelResult<Self> {
    self.ensure_same_shape("Relation::difference", other)?;
    Ok(self.with_matrix(self.matrix.and_not(&other.matrix)))
  }

  pub fn complement(&self) -> Self {
    self.with_matrix(self.matrix.not())
  }

  /// Relational composition `self ; other`: `a` is related to `c` iff some
  /// `b` has `a self b` and `b other c`.
  pub fn compose<C>(&self, other: &Relation<B, C, M>) -> RelResult<Relation<A, C, M>> {
    self.cod.ensure_same("Relation::compose", &other.dom)?;
    Ok(Relation {
      dom: self.dom.clone(),
      cod: other.cod.clone(),
      matrix: self.matrix.product(&other.matrix),
    })
  }

  /// The codomain elements related to at least one of `xs`, in codomain
  /// order. Fails if some element of `xs` is not in the domain.
  pub fn image<I>(&self, xs: I) -> RelResult<Vec<B>>
  where
    I: IntoIterator,
    I::Item: Borrow<A>,
    B: Clone,
  {
    let subset = Subset::from(&self.dom, xs)?;
    Ok(self.image_of(&subset)?.to_vec())
  }

  pub fn image_of(&self, xs: &Subset<A>) -> RelResult<Subset<B>> {
    self.dom.ensure_same("Relation::image_of", xs.carrier())?;
    Subset::from_mask(&self.cod, self.matrix.or_rows(xs.mask()))
  }

  /// The domain elements related to at least one member of `ys`.
  pub fn preimage_of(&self, ys: &Subset<B>) -> RelResult<Subset<A>> {
    self.cod.ensure_same("Relation::preimage_of", ys.carrier())?;
    let mask = (0..self.dom.len())
      .map(|row| self.matrix.row_ones(row).any(|col| ys.contains_index(col)))
      .collect();
    Subset::from_mask(&self.dom, mask)
  }

  /// At most one related element per domain element.
  pub fn is_functional(&self) -> bool {
    (0..self.dom.len()).all(|row| self.matrix.row_ones(row).nth(1).is_none())
  }

  /// At least one related element per domain element.
  pub fn is_total(&self) -> bool {
    (0..self.dom.len()).all(|row| self.matrix.row_ones(row).next().is_some())
  }

  pub fn is_injective(&self) -> bool {
    self.converse().is_functional()
  }

  pub fn is_surjective(&self) -> bool {
    self.converse().is_total()
  }

  /// Domain elements with at least one related element.
  pub fn domain(&self) -> Vec<A>
  where
    A: Clone,
  {
    self
      .dom
      .iter()
      .enumerate()
      .filter(|&(row, _)| self.matrix.row_ones(row).next().is_some())
      .map(|(_, a)| a.clone())
      .collect()
  }

  /// Codomain elements related to at least one domain element.
  pub fn range(&self) -> Vec<B>
  where
    B: Clone,
  {
    let reached = self.matrix.or_rows(&vec![true; self.dom.len()]);
    self
      .cod
      .iter()
      .zip(reached)
      .filter_map(|(b, reached)| reached.then(|| b.clone()))
      .collect()
  }

  /// Index pairs of the relation, in row-major order.
  pub fn index_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..self.dom.len()).flat_map(move |row| self.matrix.row_ones(row).map(move |col| (row, col)))
  }

  pub fn pairs(&self) -> impl Iterator<Item = (&A, &B)> + '_ {
    self
      .index_pairs()
      .map(|(i, j)| (&self.dom.elements()[i], &self.cod.elements()[j]))
  }

  /// Materializes the relation as a list of pairs, in row-major order.
  pub fn to_pairs(&self) -> Vec<(A, B)>
  where
    A: Clone,
    B: Clone,
  {
    self
      .pairs()
      .map(|(a, b)| (a.clone(), b.clone()))
      .collect_vec()
  }

  /// Returns the first pair (row-major) of `self` that is missing from
  /// `other`, or `None` if `self ≤ other`.
  pub fn inclusion_witness(&self, other: &Self) -> RelResult<Option<InclusionWitness<A, B>>>
  where
    A: Clone,
    B: Clone,
  {
    self.ensure_same_shape("Relation::inclusion_witness", other)?;
    Ok(
      self
        .index_pairs()
        .find(|&(i, j)| !other.matrix.get(i, j))
        .map(|(i, j)| InclusionWitness {
          a: self.dom.elements()[i].clone(),
          b: self.cod.elements()[j].clone(),
        }),
    )
  }
}

impl<T, M: BoolMatrix> Relation<T, T, M> {
  /// The identity on the domain, in the same backend as `self`.
  pub fn identity_like(&self) -> Self {
    self.build_like(&self.dom, &self.dom, |i, j| i == j)
  }

  fn ensure_endo(&self, op: &'static str) -> RelResult {
    self.dom.ensure_same(op, &self.cod)
  }

  /// `self` composed with itself `n` times. `power(0)` is the identity.
  pub fn power(&self, n: u32) -> RelResult<Self> {
    self.ensure_endo("Relation::power")?;
    let mut result = self.identity_like().matrix;
    let mut base = self.matrix.clone();
    let mut n = n;
    while n > 0 {
      if n & 1 == 1 {
        result = result.product(&base);
      }
      n >>= 1;
      if n > 0 {
        base = base.product(&base);
      }
    }
    Ok(self.with_matrix(result))
  }

  /// Transitive closure.
  pub fn plus(&self) -> RelResult<Self> {
    self.ensure_endo("Relation::plus")?;
    let mut closure = self.matrix.clone();
    loop {
      let next = closure.or(&closure.product(&self.matrix));
      if next == closure {
        return Ok(self.with_matrix(closure));
      }
      closure = next;
    }
  }

  /// Reflexive-transitive closure.
  pub fn star(&self) -> RelResult<Self> {
    let plus = self.plus()?;
    Ok(plus.with_matrix(plus.matrix.or(&self.identity_like().matrix)))
  }

  pub fn is_reflexive(&self) -> bool {
    self.identity_like().matrix.is_subset_of(&self.matrix)
  }

  pub fn is_symmetric(&self) -> bool {
    self.matrix == self.matrix.transpose()
  }

  pub fn is_transitive(&self) -> bool {
    self.matrix.product(&self.matrix).is_subset_of(&self.matrix)
  }
}

impl<A, B, M: Clone> Clone for Relation<A, B, M> {
  fn clone(&self) -> Self {
    Self {
      dom: self.dom.clone(),
      cod: self.cod.clone(),
      matrix: self.matrix.clone(),
    }
  }
}

/// Structural equality: same carriers and the same pairs.
impl<A, B, M: PartialEq> PartialEq for Relation<A, B, M> {
  fn eq(&self, other: &Self) -> bool {
    self.dom == other.dom && self.cod == other.cod && self.matrix == other.matrix
  }
}

impl<A: Debug, B: Debug, M: BoolMatrix> Debug for Relation<A, B, M> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} -> {} ", self.dom.tag(), self.cod.tag())?;
    f.debug_set().entries(self.pairs()).finish()
  }
}

impl<A, B, M: BoolMatrix> PartialOrder for Relation<A, B, M> {
  type Error = RelError;

  fn leq(&self, other: &Self) -> RelResult<bool> {
    Relation::leq(self, other)
  }
}

impl<A, B, M: BoolMatrix> Lattice for Relation<A, B, M> {
  fn meet(&self, other: &Self) -> RelResult<Self> {
    Relation::meet(self, other)
  }

  fn join(&self, other: &Self) -> RelResult<Self> {
    Relation::join(self, other)
  }
}

impl<A, B, M: DefaultMatrix> BoundedLattice for Relation<A, B, M> {
  type Shape = (Finite<A>, Finite<B>);

  fn bottom((dom, cod): &Self::Shape) -> Self {
    Self::empty(dom, cod)
  }

  fn top((dom, cod): &Self::Shape) -> Self {
    Self::full(dom, cod)
  }
}

impl<T, M: BoolMatrix> Semigroup for Relation<T, T, M> {
  type Error = RelError;

  fn op(&self, other: &Self) -> RelResult<Self> {
    self.compose(other)
  }
}

impl<T, M: DefaultMatrix> Monoid for Relation<T, T, M> {
  type Shape = Finite<T>;

  fn identity(shape: &Finite<T>) -> Self {
    Relation::identity(shape)
  }
}
