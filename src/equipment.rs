//! Companions and conjoints of functions, viewed as relations.
//!
//! Composition is diagrammatic throughout: `R ; S` relates `a` to `c` when
//! some `b` has `a R b` and `b S c`.

use relation::{error::RelResult, BoolMatrix, FinMap, InclusionWitness, Relation};
use tracing::debug;

use crate::strategy::{Rel, RelFactory};

/// The graph `{(a, f(a))}` of `f`.
pub fn companion<A, B>(factory: &RelFactory, f: &FinMap<A, B>) -> Rel<A, B> {
  factory.from_map(f)
}

/// The converse of the companion, `{(f(a), a)}`.
pub fn conjoint<A, B>(factory: &RelFactory, f: &FinMap<A, B>) -> Rel<B, A> {
  companion(factory, f).converse()
}

/// `id_A ≤ companion ; conjoint`. Holds exactly when `f` is total, which a
/// `FinMap` always is.
pub fn unit_holds<A, B>(factory: &RelFactory, f: &FinMap<A, B>) -> RelResult<bool> {
  let comp = companion(factory, f);
  let holds = factory
    .identity(f.source())
    .leq(&comp.compose(&comp.converse())?)?;
  if !holds {
    debug!(carrier = %f.source().tag(), "unit inclusion failed");
  }
  Ok(holds)
}

/// `conjoint ; companion ≤ id_B`. Holds exactly when the graph of `f` is
/// single-valued.
pub fn counit_holds<A, B>(factory: &RelFactory, f: &FinMap<A, B>) -> RelResult<bool> {
  let comp = companion(factory, f);
  let holds = comp
    .converse()
    .compose(&comp)?
    .leq(&factory.identity(f.target()))?;
  if !holds {
    debug!(carrier = %f.target().tag(), "counit inclusion failed");
  }
  Ok(holds)
}

/// The first pair `(a, b)` of `r`, in row-major order, whose image
/// `(f(a), g(b))` is missing from `r1`.
///
/// ```text
///   A --r--> B
///   |        |
///   f        g
///   v        v
///   A1 -r1-> B1
/// ```
pub fn square_witness<A, B, A1, B1, M, N>(
  f: &FinMap<A, A1>,
  r: &Relation<A, B, M>,
  g: &FinMap<B, B1>,
  r1: &Relation<A1, B1, N>,
) -> RelResult<Option<InclusionWitness<A, B>>>
where
  A: Clone,
  B: Clone,
  M: BoolMatrix,
  N: BoolMatrix,
{
  f.source().ensure_same("square", r.source())?;
  g.source().ensure_same("square", r.target())?;
  f.target().ensure_same("square", r1.source())?;
  g.target().ensure_same("square", r1.target())?;

  let witness = r
    .index_pairs()
    .find(|&(i, j)| !r1.has_index(f.apply_index(i), g.apply_index(j)))
    .map(|(i, j)| InclusionWitness {
      a: r.source().elements()[i].clone(),
      b: r.target().elements()[j].clone(),
    });
  Ok(witness)
}

/// Whether `f` and `g` carry every pair of `r` into `r1`.
pub fn square_holds<A, B, A1, B1, M, N>(
  f: &FinMap<A, A1>,
  r: &Relation<A, B, M>,
  g: &FinMap<B, B1>,
  r1: &Relation<A1, B1, N>,
) -> RelResult<bool>
where
  A: Clone,
  B: Clone,
  M: BoolMatrix,
  N: BoolMatrix,
{
  Ok(square_witness(f, r, g, r1)?.is_none())
}
