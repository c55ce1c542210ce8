//! Predicate transformers over relational programs, and Hoare triples.
//!
//! A program from states `S` to states `T` is a relation; `s prog s'` means
//! that running from `s` may end in `s'`.

use relation::{error::RelResult, BoolMatrix, Finite, Relation, Subset};
use tracing::debug;

use crate::strategy::{Rel, RelFactory};

/// A run of the program that starts in the precondition and ends outside the
/// postcondition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterexample<S, T> {
  pub s: S,
  pub s_prime: T,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict<S, T> {
  Holds,
  Violated(Counterexample<S, T>),
}

impl<S, T> Verdict<S, T> {
  pub fn holds(&self) -> bool {
    matches!(self, Verdict::Holds)
  }

  pub fn counterexample(&self) -> Option<&Counterexample<S, T>> {
    match self {
      Verdict::Holds => None,
      Verdict::Violated(counterexample) => Some(counterexample),
    }
  }
}

/// Weakest precondition: the states from which every run ends in `post`.
/// States with no run at all are included.
pub fn wp<S, T, M: BoolMatrix>(prog: &Relation<S, T, M>, post: &Subset<T>) -> RelResult<Subset<S>> {
  prog.target().ensure_same("wp", post.carrier())?;
  // `s` qualifies when the image of `{s}` lies inside `post`.
  let mask = (0..prog.source().len())
    .map(|s| prog.matrix().row_ones(s).all(|t| post.contains_index(t)))
    .collect();
  Subset::from_mask(prog.source(), mask)
}

/// Strongest postcondition: every state some run from `pre` can end in.
pub fn sp<S, T, M: BoolMatrix>(pre: &Subset<S>, prog: &Relation<S, T, M>) -> RelResult<Subset<T>> {
  prog.image_of(pre)
}

/// Checks the triple `{pre} prog {post}`.
///
/// On failure, the counterexample ends in the first violating state in
/// carrier order, and starts from the first state of `pre` that reaches it.
pub fn hoare_holds<S, T, M>(
  pre: &Subset<S>,
  prog: &Relation<S, T, M>,
  post: &Subset<T>,
) -> RelResult<Verdict<S, T>>
where
  S: Clone,
  T: Clone,
  M: BoolMatrix,
{
  prog.target().ensure_same("hoare_holds", post.carrier())?;
  let reached = sp(pre, prog)?;

  let violation = reached
    .indices()
    .filter(|&t| !post.contains_index(t))
    .find_map(|t| {
      pre
        .indices()
        .find(|&s| prog.has_index(s, t))
        .map(|s| (s, t))
    });

  Ok(match violation {
    None => Verdict::Holds,
    Some((s, t)) => {
      debug!(s, s_prime = t, "hoare triple violated");
      Verdict::Violated(Counterexample {
        s: prog.source().elements()[s].clone(),
        s_prime: prog.target().elements()[t].clone(),
      })
    }
  })
}

/// Runs `progs` one after another. No programs at all is the identity on
/// `states`.
pub fn seq<'a, S: 'a>(
  factory: &RelFactory,
  states: &Finite<S>,
  progs: impl IntoIterator<Item = &'a Rel<S, S>>,
) -> RelResult<Rel<S, S>> {
  progs
    .into_iter()
    .try_fold(factory.identity(states), |acc, prog| acc.compose(prog))
}

/// `sp(pre) ≤ post` exactly when `pre ≤ wp(post)`.
pub fn wp_sp_adjoint<S, T, M: BoolMatrix>(
  pre: &Subset<S>,
  prog: &Relation<S, T, M>,
  post: &Subset<T>,
) -> RelResult<bool> {
  let holds = sp(pre, prog)?.leq(post)? == pre.leq(&wp(prog, post)?)?;
  if !holds {
    debug!("wp/sp adjunction failed");
  }
  Ok(holds)
}
