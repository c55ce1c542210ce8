use std::{borrow::Borrow, fmt::Display, str::FromStr};

use itertools::Either;
use rand::{distr::Bernoulli, Rng};
use relation::{
  error::{RelError, RelResult},
  BoolMatrix, DefaultMatrix, DenseMatrix, DenseRel, FinMap, Finite, Relation,
};
use relation_bits::{BitMatrix, BitRel};
use tracing::debug;

/// Which matrix backend a `RelFactory` builds relations in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
  /// One `bool` per entry.
  #[default]
  Dense,
  /// Rows packed into 64-bit words.
  Bit,
}

impl Strategy {
  pub const ALL: [Strategy; 2] = [Strategy::Dense, Strategy::Bit];

  pub fn name(&self) -> &'static str {
    match self {
      Strategy::Dense => "dense",
      Strategy::Bit => "bit",
    }
  }
}

impl Display for Strategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for Strategy {
  type Err = RelError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "dense" => Ok(Strategy::Dense),
      "bit" | "bits" => Ok(Strategy::Bit),
      _ => Err(RelError::InvalidStrategy(s.to_owned())),
    }
  }
}

/// A matrix in whichever backend was chosen when it was built.
///
/// Operations between two matrices of different backends convert the right
/// operand into the backend of the left one.
#[derive(Clone, Debug)]
pub enum AnyMatrix {
  Dense(DenseMatrix),
  Bit(BitMatrix),
}

/// A relation built by a `RelFactory`.
pub type Rel<A, B> = Relation<A, B, AnyMatrix>;

impl AnyMatrix {
  pub fn zeros(strategy: Strategy, rows: usize, cols: usize) -> Self {
    match strategy {
      Strategy::Dense => AnyMatrix::Dense(DenseMatrix::zeros(rows, cols)),
      Strategy::Bit => AnyMatrix::Bit(BitMatrix::zeros(rows, cols)),
    }
  }

  pub fn strategy(&self) -> Strategy {
    match self {
      AnyMatrix::Dense(_) => Strategy::Dense,
      AnyMatrix::Bit(_) => Strategy::Bit,
    }
  }

  /// Copies the matrix into the backend for `strategy`.
  pub fn with_strategy(&self, strategy: Strategy) -> Self {
    match (self, strategy) {
      (AnyMatrix::Dense(_), Strategy::Dense) | (AnyMatrix::Bit(_), Strategy::Bit) => self.clone(),
      (_, Strategy::Dense) => AnyMatrix::Dense(DenseMatrix::convert(self)),
      (_, Strategy::Bit) => AnyMatrix::Bit(BitMatrix::convert(self)),
    }
  }

  fn zip_with(
    &self,
    other: &Self,
    dense: impl FnOnce(&DenseMatrix, &DenseMatrix) -> DenseMatrix,
    bit: impl FnOnce(&BitMatrix, &BitMatrix) -> BitMatrix,
  ) -> Self {
    match (self, other) {
      (AnyMatrix::Dense(a), AnyMatrix::Dense(b)) => AnyMatrix::Dense(dense(a, b)),
      (AnyMatrix::Dense(a), AnyMatrix::Bit(b)) => AnyMatrix::Dense(dense(a, &a.adopt(b))),
      (AnyMatrix::Bit(a), AnyMatrix::Bit(b)) => AnyMatrix::Bit(bit(a, b)),
      (AnyMatrix::Bit(a), AnyMatrix::Dense(b)) => AnyMatrix::Bit(bit(a, &a.adopt(b))),
    }
  }
}

impl From<DenseMatrix> for AnyMatrix {
  fn from(matrix: DenseMatrix) -> Self {
    AnyMatrix::Dense(matrix)
  }
}

impl From<BitMatrix> for AnyMatrix {
  fn from(matrix: BitMatrix) -> Self {
    AnyMatrix::Bit(matrix)
  }
}

/// Entry-wise equality, regardless of backend.
impl PartialEq for AnyMatrix {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (AnyMatrix::Dense(a), AnyMatrix::Dense(b)) => a == b,
      (AnyMatrix::Bit(a), AnyMatrix::Bit(b)) => a == b,
      (AnyMatrix::Dense(a), AnyMatrix::Bit(b)) | (AnyMatrix::Bit(b), AnyMatrix::Dense(a)) => {
        *a == DenseMatrix::convert(b)
      }
    }
  }
}

impl Eq for AnyMatrix {}

impl BoolMatrix for AnyMatrix {
  fn rows(&self) -> usize {
    match self {
      AnyMatrix::Dense(m) => m.rows(),
      AnyMatrix::Bit(m) => m.rows(),
    }
  }

  fn cols(&self) -> usize {
    match self {
      AnyMatrix::Dense(m) => m.cols(),
      AnyMatrix::Bit(m) => m.cols(),
    }
  }

  fn get(&self, row: usize, col: usize) -> bool {
    match self {
      AnyMatrix::Dense(m) => m.get(row, col),
      AnyMatrix::Bit(m) => m.get(row, col),
    }
  }

  fn set(&mut self, row: usize, col: usize, value: bool) {
    match self {
      AnyMatrix::Dense(m) => m.set(row, col, value),
      AnyMatrix::Bit(m) => m.set(row, col, value),
    }
  }

  fn zeros_like(&self, rows: usize, cols: usize) -> Self {
    Self::zeros(self.strategy(), rows, cols)
  }

  fn transpose(&self) -> Self {
    match self {
      AnyMatrix::Dense(m) => AnyMatrix::Dense(m.transpose()),
      AnyMatrix::Bit(m) => AnyMatrix::Bit(m.transpose()),
    }
  }

  fn and(&self, other: &Self) -> Self {
    self.zip_with(other, DenseMatrix::and, BitMatrix::and)
  }

  fn or(&self, other: &Self) -> Self {
    self.zip_with(other, DenseMatrix::or, BitMatrix::or)
  }

  fn and_not(&self, other: &Self) -> Self {
    self.zip_with(other, DenseMatrix::and_not, BitMatrix::and_not)
  }

  fn not(&self) -> Self {
    match self {
      AnyMatrix::Dense(m) => AnyMatrix::Dense(m.not()),
      AnyMatrix::Bit(m) => AnyMatrix::Bit(m.not()),
    }
  }

  fn is_subset_of(&self, other: &Self) -> bool {
    match (self, other) {
      (AnyMatrix::Dense(a), AnyMatrix::Dense(b)) => a.is_subset_of(b),
      (AnyMatrix::Dense(a), AnyMatrix::Bit(b)) => a.is_subset_of(&a.adopt(b)),
      (AnyMatrix::Bit(a), AnyMatrix::Bit(b)) => a.is_subset_of(b),
      (AnyMatrix::Bit(a), AnyMatrix::Dense(b)) => a.is_subset_of(&a.adopt(b)),
    }
  }

  fn product(&self, other: &Self) -> Self {
    self.zip_with(other, DenseMatrix::product, BitMatrix::product)
  }

  fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
    match self {
      AnyMatrix::Dense(m) => Either::Left(m.row_ones(row)),
      AnyMatrix::Bit(m) => Either::Right(m.row_ones(row)),
    }
  }

  fn row_count(&self, row: usize) -> usize {
    match self {
      AnyMatrix::Dense(m) => m.row_count(row),
      AnyMatrix::Bit(m) => m.row_count(row),
    }
  }

  fn count_ones(&self) -> usize {
    match self {
      AnyMatrix::Dense(m) => m.count_ones(),
      AnyMatrix::Bit(m) => m.count_ones(),
    }
  }

  fn or_rows(&self, rows: &[bool]) -> Vec<bool> {
    match self {
      AnyMatrix::Dense(m) => m.or_rows(rows),
      AnyMatrix::Bit(m) => m.or_rows(rows),
    }
  }
}

/// Builds relations in a fixed backend, so call sites never name one.
///
/// The strategy is fixed when the factory is created. Relations that already
/// exist keep their backend no matter which factory they are later combined
/// with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelFactory {
  strategy: Strategy,
}

impl RelFactory {
  pub const fn new(strategy: Strategy) -> Self {
    Self { strategy }
  }

  pub const fn dense() -> Self {
    Self::new(Strategy::Dense)
  }

  pub const fn bit() -> Self {
    Self::new(Strategy::Bit)
  }

  pub fn strategy(&self) -> Strategy {
    self.strategy
  }

  /// An empty relation in this factory's backend. All constructors start here.
  fn blank<A, B>(&self, dom: &Finite<A>, cod: &Finite<B>) -> Rel<A, B> {
    Relation::empty_in(dom, cod, &AnyMatrix::zeros(self.strategy, 0, 0))
  }

  pub fn empty<A, B>(&self, dom: &Finite<A>, cod: &Finite<B>) -> Rel<A, B> {
    debug!(strategy = %self.strategy, rows = dom.len(), cols = cod.len(), "empty relation");
    self.blank(dom, cod)
  }

  pub fn full<A, B>(&self, dom: &Finite<A>, cod: &Finite<B>) -> Rel<A, B> {
    debug!(strategy = %self.strategy, rows = dom.len(), cols = cod.len(), "full relation");
    self.blank(dom, cod).complement()
  }

  pub fn identity<T>(&self, carrier: &Finite<T>) -> Rel<T, T> {
    debug!(strategy = %self.strategy, size = carrier.len(), "identity relation");
    self.blank(carrier, carrier).identity_like()
  }

  pub fn from_fn<A, B>(
    &self,
    dom: &Finite<A>,
    cod: &Finite<B>,
    mut pred: impl FnMut(&A, &B) -> bool,
  ) -> Rel<A, B> {
    debug!(strategy = %self.strategy, rows = dom.len(), cols = cod.len(), "tabulated relation");
    self.blank(dom, cod).build_like(dom, cod, |i, j| {
      pred(&dom.elements()[i], &cod.elements()[j])
    })
  }

  /// Fails if either side of a pair is not in its carrier.
  pub fn from_pairs<A, B, I, X, Y>(
    &self,
    dom: &Finite<A>,
    cod: &Finite<B>,
    pairs: I,
  ) -> RelResult<Rel<A, B>>
  where
    I: IntoIterator<Item = (X, Y)>,
    X: Borrow<A>,
    Y: Borrow<B>,
  {
    debug!(strategy = %self.strategy, rows = dom.len(), cols = cod.len(), "relation from pairs");
    self.blank(dom, cod).with_pairs(pairs)
  }

  /// The graph `{(a, f(a))}` of `f`. Fails if some `f(a)` is not in `cod`.
  pub fn graph<A, B>(
    &self,
    dom: &Finite<A>,
    cod: &Finite<B>,
    f: impl Fn(&A) -> B,
  ) -> RelResult<Rel<A, B>> {
    Ok(self.from_map(&FinMap::new(dom, cod, f)?))
  }

  pub fn from_map<A, B>(&self, f: &FinMap<A, B>) -> Rel<A, B> {
    let (dom, cod) = (f.source(), f.target());
    debug!(strategy = %self.strategy, rows = dom.len(), cols = cod.len(), "graph relation");
    self.blank(dom, cod).build_like(dom, cod, |i, j| f.apply_index(i) == j)
  }

  /// Copies a relation from any backend into this factory's backend.
  pub fn adopt<A, B, M: BoolMatrix>(&self, rel: &Relation<A, B, M>) -> Rel<A, B> {
    let (dom, cod) = (rel.source(), rel.target());
    self.blank(dom, cod).build_like(dom, cod, |i, j| rel.has_index(i, j))
  }

  /// A relation whose entries are each set independently with probability
  /// `density`. Fails unless `density` lies in `[0, 1]`.
  pub fn random<A, B, R: Rng>(
    &self,
    dom: &Finite<A>,
    cod: &Finite<B>,
    density: f64,
    rng: &mut R,
  ) -> RelResult<Rel<A, B>> {
    let coin = Bernoulli::new(density).map_err(|_| RelError::InvalidParameter {
      name: "density",
      value: density.to_string(),
    })?;
    Ok(self.from_fn(dom, cod, |_, _| rng.sample(coin)))
  }
}

/// Copies any relation into the dense backend.
pub fn to_dense<A, B, M: BoolMatrix>(rel: &Relation<A, B, M>) -> DenseRel<A, B> {
  rel.to_backend()
}

/// Copies any relation into the bit-packed backend.
pub fn to_bits<A, B, M: BoolMatrix>(rel: &Relation<A, B, M>) -> BitRel<A, B> {
  rel.to_backend()
}
