use std::fmt::Debug;

/// A boolean matrix backend for relations.
///
/// Implementations differ only in representation and speed: any sequence of
/// operations must produce matrices with the same set bits regardless of the
/// backend that ran them.
pub trait BoolMatrix: Clone + Debug + PartialEq {
  fn rows(&self) -> usize;

  fn cols(&self) -> usize;

  fn get(&self, row: usize, col: usize) -> bool;

  /// Sets a single entry. Only used while a matrix is being built, all
  /// algebra returns fresh matrices.
  fn set(&mut self, row: usize, col: usize, value: bool);

  /// Returns an all-false matrix of the given shape, using the same backend
  /// as `self`.
  fn zeros_like(&self, rows: usize, cols: usize) -> Self;

  fn transpose(&self) -> Self;

  /// Pointwise AND. Both operands must have the same shape.
  fn and(&self, other: &Self) -> Self;

  /// Pointwise OR. Both operands must have the same shape.
  fn or(&self, other: &Self) -> Self;

  /// Pointwise `self AND NOT other`.
  fn and_not(&self, other: &Self) -> Self;

  /// Pointwise NOT.
  fn not(&self) -> Self;

  /// True if every set entry of `self` is set in `other`.
  fn is_subset_of(&self, other: &Self) -> bool;

  /// Boolean matrix product: entry `(i, k)` is set iff some `j` has both
  /// `self[i][j]` and `other[j][k]` set.
  fn product(&self, other: &Self) -> Self;

  /// Column indices of the set entries of `row`, ascending.
  fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_;

  fn row_count(&self, row: usize) -> usize {
    self.row_ones(row).count()
  }

  fn count_ones(&self) -> usize {
    (0..self.rows()).map(|row| self.row_count(row)).sum()
  }

  /// ORs together every row `i` with `rows[i]` set, returning the result as
  /// a column mask.
  fn or_rows(&self, rows: &[bool]) -> Vec<bool> {
    debug_assert_eq!(rows.len(), self.rows());
    let mut reached = vec![false; self.cols()];
    for row in (0..self.rows()).filter(|&row| rows[row]) {
      for col in self.row_ones(row) {
        reached[col] = true;
      }
    }
    reached
  }

  /// Builds a matrix of the same backend as `self` from an entry predicate.
  fn from_fn_like(&self, rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
    let mut matrix = self.zeros_like(rows, cols);
    for row in 0..rows {
      for col in 0..cols {
        if f(row, col) {
          matrix.set(row, col, true);
        }
      }
    }
    matrix
  }

  /// Copies `other`, possibly from a different backend, into the backend of
  /// `self`.
  fn adopt<N: BoolMatrix>(&self, other: &N) -> Self {
    let mut matrix = self.zeros_like(other.rows(), other.cols());
    for row in 0..other.rows() {
      for col in other.row_ones(row) {
        matrix.set(row, col, true);
      }
    }
    matrix
  }
}

/// A backend that can be built without an existing matrix to copy the
/// backend choice from.
pub trait DefaultMatrix: BoolMatrix {
  fn zeros(rows: usize, cols: usize) -> Self;

  fn identity(n: usize) -> Self {
    let mut matrix = Self::zeros(n, n);
    for idx in 0..n {
      matrix.set(idx, idx, true);
    }
    matrix
  }

  fn from_fn(rows: usize, cols: usize, f: impl FnMut(usize, usize) -> bool) -> Self {
    Self::zeros(rows, cols).from_fn_like(rows, cols, f)
  }

  /// Converts any backend into this one.
  fn convert<N: BoolMatrix>(other: &N) -> Self {
    Self::zeros(0, 0).adopt(other)
  }
}
