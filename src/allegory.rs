//! Laws of relations under converse, meet and composition.

use relation::{error::RelResult, BoolMatrix, Relation};
use tracing::debug;

/// `(R°)° = R`.
pub fn dagger_involutive<A, B, M: BoolMatrix>(r: &Relation<A, B, M>) -> bool {
  r.converse().converse() == *r
}

/// `(R;S) ∩ T ≤ R;(S ∩ R°;T)`.
pub fn modular_left<A, B, C, M: BoolMatrix>(
  r: &Relation<A, B, M>,
  s: &Relation<B, C, M>,
  t: &Relation<A, C, M>,
) -> RelResult<bool> {
  let lhs = r.compose(s)?.meet(t)?;
  let rhs = r.compose(&s.meet(&r.converse().compose(t)?)?)?;
  let holds = lhs.leq(&rhs)?;
  if !holds {
    debug!("left modular law failed");
  }
  Ok(holds)
}

/// `(R;S) ∩ T ≤ (R ∩ T;S°);S`.
pub fn modular_right<A, B, C, M: BoolMatrix>(
  r: &Relation<A, B, M>,
  s: &Relation<B, C, M>,
  t: &Relation<A, C, M>,
) -> RelResult<bool> {
  let lhs = r.compose(s)?.meet(t)?;
  let rhs = r.meet(&t.compose(&s.converse())?)?.compose(s)?;
  let holds = lhs.leq(&rhs)?;
  if !holds {
    debug!("right modular law failed");
  }
  Ok(holds)
}

/// Functional and total: every element of the domain is related to exactly
/// one element of the codomain.
pub fn is_map<A, B, M: BoolMatrix>(r: &Relation<A, B, M>) -> bool {
  r.is_functional() && r.is_total()
}

/// `(R;S)° = S°;R°`.
pub fn converse_reverses_composition<A, B, C, M: BoolMatrix>(
  r: &Relation<A, B, M>,
  s: &Relation<B, C, M>,
) -> RelResult<bool> {
  Ok(r.compose(s)?.converse() == s.converse().compose(&r.converse())?)
}

/// `R ≤ S` implies `R° ≤ S°`.
pub fn converse_monotone<A, B, M: BoolMatrix>(
  r: &Relation<A, B, M>,
  s: &Relation<A, B, M>,
) -> RelResult<bool> {
  Ok(!r.leq(s)? || r.converse().leq(&s.converse())?)
}
