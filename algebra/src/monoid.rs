use crate::semigroup::Semigroup;

/// An algebraic monoid.
pub trait Monoid: Semigroup {
  /// Whatever is needed to build the identity, e.g. the carrier of an
  /// endorelation.
  type Shape;

  /// The identity element of the monoid.
  fn identity(shape: &Self::Shape) -> Self;
}

/// Combines `items` left to right. An empty iterator yields the identity.
pub fn concat<M, I>(shape: &M::Shape, items: I) -> Result<M, M::Error>
where
  M: Monoid,
  I: IntoIterator<Item = M>,
{
  items
    .into_iter()
    .try_fold(M::identity(shape), |acc, item| acc.op(&item))
}

/// Computes `x` combined with itself `n` times, by repeated squaring.
pub fn power<M: Monoid + Clone>(shape: &M::Shape, x: &M, mut n: u32) -> Result<M, M::Error> {
  let mut result = M::identity(shape);
  let mut base = x.clone();
  while n > 0 {
    if n & 1 == 1 {
      result = result.op(&base)?;
    }
    n >>= 1;
    if n > 0 {
      base = base.op(&base)?;
    }
  }
  Ok(result)
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use super::*;

  /// Strings under concatenation.
  #[derive(Clone, Debug, PartialEq, Eq)]
  struct Word(String);

  impl Semigroup for Word {
    type Error = Infallible;

    fn op(&self, other: &Self) -> Result<Self, Self::Error> {
      Ok(Word(format!("{}{}", self.0, other.0)))
    }
  }

  impl Monoid for Word {
    type Shape = ();

    fn identity(_shape: &()) -> Self {
      Word(String::new())
    }
  }

  /// Only words of equal length can be combined.
  #[derive(Clone, Debug, PartialEq, Eq)]
  struct Sized2(usize);

  impl Semigroup for Sized2 {
    type Error = (usize, usize);

    fn op(&self, other: &Self) -> Result<Self, Self::Error> {
      if self.0 == other.0 {
        Ok(self.clone())
      } else {
        Err((self.0, other.0))
      }
    }
  }

  impl Monoid for Sized2 {
    type Shape = usize;

    fn identity(shape: &usize) -> Self {
      Sized2(*shape)
    }
  }

  #[test]
  fn test_concat() {
    let words = ["ab", "c", "", "de"].map(|w| Word(w.to_owned()));
    assert_eq!(concat(&(), words), Ok(Word("abcde".to_owned())));
    assert_eq!(concat::<Word, _>(&(), []), Ok(Word(String::new())));
  }

  #[test]
  fn test_power() {
    let w = Word("xy".to_owned());
    assert_eq!(power(&(), &w, 0), Ok(Word(String::new())));
    assert_eq!(power(&(), &w, 1), Ok(w.clone()));
    assert_eq!(power(&(), &w, 5), Ok(Word("xy".repeat(5))));
  }

  #[test]
  fn test_concat_propagates_error() {
    assert_eq!(concat(&3, [Sized2(3), Sized2(4)]), Err((3, 4)));
  }
}
