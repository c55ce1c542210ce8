use relation::{BoolMatrix, DefaultMatrix, Relation};

use crate::SetBits;

const WORD_BITS: usize = u64::BITS as usize;

/// A relation matrix stored with each row packed into `u64` words, bit `j % 64`
/// of word `j / 64` holding entry `j`.
///
/// Bits past `cols` in the last word of each row are always zero, so rows can
/// be compared and counted word by word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
  rows: usize,
  cols: usize,
  words_per_row: usize,
  words: Vec<u64>,
}

pub type BitRel<A, B> = Relation<A, B, BitMatrix>;

impl BitMatrix {
  /// The packed words of `row`.
  pub fn row_words(&self, row: usize) -> &[u64] {
    debug_assert!(row < self.rows);
    &self.words[row * self.words_per_row..(row + 1) * self.words_per_row]
  }

  fn locate(&self, row: usize, col: usize) -> (usize, u64) {
    debug_assert!(row < self.rows && col < self.cols);
    (
      row * self.words_per_row + col / WORD_BITS,
      1 << (col % WORD_BITS),
    )
  }

  /// Mask of the bits of the last word of a row that hold entries.
  fn tail_mask(&self) -> u64 {
    match self.cols % WORD_BITS {
      0 => u64::MAX,
      used => (1 << used) - 1,
    }
  }

  fn clear_tails(&mut self) {
    if self.words_per_row == 0 {
      return;
    }
    let tail_mask = self.tail_mask();
    for row in 0..self.rows {
      self.words[(row + 1) * self.words_per_row - 1] &= tail_mask;
    }
  }

  fn zip_words(&self, other: &Self, f: impl Fn(u64, u64) -> u64) -> Self {
    debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
    Self {
      words: self
        .words
        .iter()
        .zip(other.words.iter())
        .map(|(&a, &b)| f(a, b))
        .collect(),
      ..*self
    }
  }
}

impl BoolMatrix for BitMatrix {
  fn rows(&self) -> usize {
    self.rows
  }

  fn cols(&self) -> usize {
    self.cols
  }

  fn get(&self, row: usize, col: usize) -> bool {
    let (word, bit) = self.locate(row, col);
    self.words[word] & bit != 0
  }

  fn set(&mut self, row: usize, col: usize, value: bool) {
    let (word, bit) = self.locate(row, col);
    if value {
      self.words[word] |= bit;
    } else {
      self.words[word] &= !bit;
    }
  }

  fn zeros_like(&self, rows: usize, cols: usize) -> Self {
    Self::zeros(rows, cols)
  }

  fn transpose(&self) -> Self {
    let mut transposed = Self::zeros(self.cols, self.rows);
    for row in 0..self.rows {
      for col in self.row_ones(row) {
        transposed.set(col, row, true);
      }
    }
    transposed
  }

  fn and(&self, other: &Self) -> Self {
    self.zip_words(other, |a, b| a & b)
  }

  fn or(&self, other: &Self) -> Self {
    self.zip_words(other, |a, b| a | b)
  }

  fn and_not(&self, other: &Self) -> Self {
    self.zip_words(other, |a, b| a & !b)
  }

  fn not(&self) -> Self {
    let mut negated = Self {
      words: self.words.iter().map(|&word| !word).collect(),
      ..*self
    };
    negated.clear_tails();
    negated
  }

  fn is_subset_of(&self, other: &Self) -> bool {
    debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
    self
      .words
      .iter()
      .zip(other.words.iter())
      .all(|(&a, &b)| a & !b == 0)
  }

  fn product(&self, other: &Self) -> Self {
    debug_assert_eq!(self.cols, other.rows);
    // Rows of `columns` are the columns of `other`, packed over the same index
    // space as the rows of `self`, so a cell is one AND per word.
    let columns = other.transpose();
    let mut result = Self::zeros(self.rows, other.cols);
    for i in 0..self.rows {
      let lhs = self.row_words(i);
      if lhs.iter().all(|&word| word == 0) {
        continue;
      }
      for k in 0..other.cols {
        if lhs
          .iter()
          .zip(columns.row_words(k))
          .any(|(&a, &b)| a & b != 0)
        {
          result.set(i, k, true);
        }
      }
    }
    result
  }

  fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
    SetBits::new(self.row_words(row))
  }

  fn row_count(&self, row: usize) -> usize {
    self
      .row_words(row)
      .iter()
      .map(|word| word.count_ones() as usize)
      .sum()
  }

  fn count_ones(&self) -> usize {
    self.words.iter().map(|word| word.count_ones() as usize).sum()
  }

  fn or_rows(&self, rows: &[bool]) -> Vec<bool> {
    debug_assert_eq!(rows.len(), self.rows);
    let mut reached = vec![0u64; self.words_per_row];
    for row in (0..self.rows).filter(|&row| rows[row]) {
      for (acc, &word) in reached.iter_mut().zip(self.row_words(row)) {
        *acc |= word;
      }
    }
    (0..self.cols)
      .map(|col| (reached[col / WORD_BITS] >> (col % WORD_BITS)) & 1 == 1)
      .collect()
  }
}

impl DefaultMatrix for BitMatrix {
  fn zeros(rows: usize, cols: usize) -> Self {
    let words_per_row = cols.div_ceil(WORD_BITS);
    Self {
      rows,
      cols,
      words_per_row,
      words: vec![0; rows * words_per_row],
    }
  }
}
