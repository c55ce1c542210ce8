//! Small fixtures shared by unit and integration tests.

use crate::{matrix::DefaultMatrix, DenseMatrix, Finite, Relation};

/// `A = {0, 1, 2, 3}`, `B = {x, y, z}` and a relation between them which is
/// total but not functional.
pub struct Abxyz<M = DenseMatrix> {
  pub a: Finite<usize>,
  pub b: Finite<char>,
  pub r: Relation<usize, char, M>,
}

pub const ABXYZ_PAIRS: [(usize, char); 6] = [
  (0, 'x'),
  (0, 'y'),
  (1, 'y'),
  (2, 'y'),
  (2, 'z'),
  (3, 'z'),
];

pub fn abxyz() -> Abxyz {
  abxyz_in()
}

/// The same fixture, in any backend.
pub fn abxyz_in<M: DefaultMatrix>() -> Abxyz<M> {
  let a = Finite::range(4);
  let b = Finite::new(['x', 'y', 'z']);
  let r = match Relation::from_pairs(&a, &b, ABXYZ_PAIRS) {
    Ok(r) => r,
    Err(err) => unreachable!("{err}"),
  };
  Abxyz { a, b, r }
}
