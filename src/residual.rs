//! Residuals of composition: the largest solutions of `R;X ≤ S` and
//! `Y;R ≤ S`.

use relation::{error::RelResult, BoolMatrix, Relation};
use tracing::debug;

/// `R\S : B → C`, relating `b` to `c` when every `a` with `a R b` also has
/// `a S c`.
pub fn left_residual<A, B, C, M: BoolMatrix>(
  r: &Relation<A, B, M>,
  s: &Relation<A, C, M>,
) -> RelResult<Relation<B, C, M>> {
  r.source().ensure_same("left_residual", s.source())?;
  let (rm, sm) = (r.matrix(), s.matrix());
  let n_dom = r.source().len();
  Ok(r.build_like(r.target(), s.target(), |b, c| {
    (0..n_dom).all(|a| !rm.get(a, b) || sm.get(a, c))
  }))
}

/// `S/R : A → B`, relating `a` to `b` when every `c` with `b R c` also has
/// `a S c`.
pub fn right_residual<A, B, C, M: BoolMatrix>(
  s: &Relation<A, C, M>,
  r: &Relation<B, C, M>,
) -> RelResult<Relation<A, B, M>> {
  s.target().ensure_same("right_residual", r.target())?;
  let (sm, rm) = (s.matrix(), r.matrix());
  Ok(s.build_like(s.source(), r.source(), |a, b| {
    rm.row_ones(b).all(|c| sm.get(a, c))
  }))
}

/// `R;X ≤ S` exactly when `X ≤ R\S`.
pub fn adjunction_left_holds<A, B, C, M: BoolMatrix>(
  r: &Relation<A, B, M>,
  x: &Relation<B, C, M>,
  s: &Relation<A, C, M>,
) -> RelResult<bool> {
  let holds = r.compose(x)?.leq(s)? == x.leq(&left_residual(r, s)?)?;
  if !holds {
    debug!("left residual adjunction failed");
  }
  Ok(holds)
}

/// `Y;R ≤ S` exactly when `Y ≤ S/R`.
pub fn adjunction_right_holds<A, B, C, M: BoolMatrix>(
  y: &Relation<A, B, M>,
  r: &Relation<B, C, M>,
  s: &Relation<A, C, M>,
) -> RelResult<bool> {
  let holds = y.compose(r)?.leq(s)? == y.leq(&right_residual(s, r)?)?;
  if !holds {
    debug!("right residual adjunction failed");
  }
  Ok(holds)
}
