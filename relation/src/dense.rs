use crate::matrix::{BoolMatrix, DefaultMatrix};

/// A relation matrix stored as one `bool` per entry, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseMatrix {
  rows: usize,
  cols: usize,
  cells: Vec<bool>,
}

impl DenseMatrix {
  fn row(&self, row: usize) -> &[bool] {
    &self.cells[row * self.cols..(row + 1) * self.cols]
  }

  fn zip_with(&self, other: &Self, f: impl Fn(bool, bool) -> bool) -> Self {
    debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
    Self {
      rows: self.rows,
      cols: self.cols,
      cells: self
        .cells
        .iter()
        .zip(other.cells.iter())
        .map(|(&a, &b)| f(a, b))
        .collect(),
    }
  }
}

impl BoolMatrix for DenseMatrix {
  fn rows(&self) -> usize {
    self.rows
  }

  fn cols(&self) -> usize {
    self.cols
  }

  fn get(&self, row: usize, col: usize) -> bool {
    debug_assert!(row < self.rows && col < self.cols);
    self.cells[row * self.cols + col]
  }

  fn set(&mut self, row: usize, col: usize, value: bool) {
    debug_assert!(row < self.rows && col < self.cols);
    self.cells[row * self.cols + col] = value;
  }

  fn zeros_like(&self, rows: usize, cols: usize) -> Self {
    Self::zeros(rows, cols)
  }

  fn transpose(&self) -> Self {
    Self::from_fn(self.cols, self.rows, |row, col| self.get(col, row))
  }

  fn and(&self, other: &Self) -> Self {
    self.zip_with(other, |a, b| a && b)
  }

  fn or(&self, other: &Self) -> Self {
    self.zip_with(other, |a, b| a || b)
  }

  fn and_not(&self, other: &Self) -> Self {
    self.zip_with(other, |a, b| a && !b)
  }

  fn not(&self) -> Self {
    Self {
      rows: self.rows,
      cols: self.cols,
      cells: self.cells.iter().map(|&cell| !cell).collect(),
    }
  }

  fn is_subset_of(&self, other: &Self) -> bool {
    debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
    self
      .cells
      .iter()
      .zip(other.cells.iter())
      .all(|(&a, &b)| !a || b)
  }

  fn product(&self, other: &Self) -> Self {
    debug_assert_eq!(self.cols, other.rows);
    // Stops scanning a cell as soon as one witness is found.
    Self::from_fn(self.rows, other.cols, |i, k| {
      (0..self.cols).any(|j| self.get(i, j) && other.get(j, k))
    })
  }

  fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
    self
      .row(row)
      .iter()
      .enumerate()
      .filter_map(|(col, &cell)| cell.then_some(col))
  }
}

impl DefaultMatrix for DenseMatrix {
  fn zeros(rows: usize, cols: usize) -> Self {
    Self {
      rows,
      cols,
      cells: vec![false; rows * cols],
    }
  }
}

#[cfg(test)]
mod tests {
  use googletest::{expect_that, gtest, prelude::*};
  use rstest::rstest;

  use super::*;

  fn from_rows(rows: &[&[u8]]) -> DenseMatrix {
    let cols = rows.first().map_or(0, |row| row.len());
    DenseMatrix::from_fn(rows.len(), cols, |i, j| rows[i][j] == 1)
  }

  #[gtest]
  fn test_row_ones() {
    let m = from_rows(&[&[1, 0, 1], &[0, 0, 0]]);
    expect_that!(m.row_ones(0).collect::<Vec<_>>(), elements_are![&0, &2]);
    expect_that!(m.row_ones(1).collect::<Vec<_>>(), empty());
    assert_eq!(m.count_ones(), 2);
  }

  #[test]
  fn test_transpose() {
    let m = from_rows(&[&[1, 1, 0], &[0, 0, 1]]);
    assert_eq!(m.transpose(), from_rows(&[&[1, 0], &[1, 0], &[0, 1]]));
    assert_eq!(m.transpose().transpose(), m);
  }

  #[test]
  fn test_product() {
    let a = from_rows(&[&[1, 0], &[0, 1], &[0, 0]]);
    let b = from_rows(&[&[0, 1, 1], &[1, 0, 0]]);
    assert_eq!(
      a.product(&b),
      from_rows(&[&[0, 1, 1], &[1, 0, 0], &[0, 0, 0]])
    );
  }

  #[test]
  fn test_pointwise() {
    let a = from_rows(&[&[1, 1], &[0, 0]]);
    let b = from_rows(&[&[0, 1], &[1, 0]]);
    assert_eq!(a.and(&b), from_rows(&[&[0, 1], &[0, 0]]));
    assert_eq!(a.or(&b), from_rows(&[&[1, 1], &[1, 0]]));
    assert_eq!(a.and_not(&b), from_rows(&[&[1, 0], &[0, 0]]));
    assert_eq!(a.not(), from_rows(&[&[0, 0], &[1, 1]]));
    assert!(a.and(&b).is_subset_of(&a));
    assert!(!a.is_subset_of(&b));
  }

  #[test]
  fn test_or_rows() {
    let m = from_rows(&[&[1, 0, 0], &[0, 1, 0], &[0, 1, 1]]);
    assert_eq!(m.or_rows(&[true, true, false]), vec![true, true, false]);
    assert_eq!(m.or_rows(&[false, false, false]), vec![false; 3]);
  }

  #[rstest]
  fn test_identity_is_a_unit(#[values(0, 1, 2, 5)] n: usize, #[values(0, 3)] cols: usize) {
    let id = DenseMatrix::identity(n);
    assert_eq!(id.count_ones(), n);
    assert_eq!(id.transpose(), id);
    let m = DenseMatrix::from_fn(n, cols, |i, j| (i + j) % 2 == 0);
    assert_eq!(id.product(&m), m);
    assert_eq!(m.transpose().product(&id), m.transpose());
  }

  #[test]
  fn test_empty_shapes() {
    let m = DenseMatrix::zeros(0, 3);
    assert_eq!(m.transpose(), DenseMatrix::zeros(3, 0));
    assert_eq!(DenseMatrix::zeros(2, 0).product(&m), DenseMatrix::zeros(2, 3));
  }
}
