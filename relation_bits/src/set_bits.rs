use num_traits::PrimInt;

/// Positions of the set bits in a slice of words, counted from bit 0 of the
/// first word. Bit `b` of word `w` is reported as `w * width + b`.
pub struct SetBits<'a, W> {
  words: &'a [W],
  /// Offset of the lowest bit of `current`.
  base: usize,
  /// The word being drained. Bits already reported have been cleared.
  current: W,
}

impl<'a, W: PrimInt> SetBits<'a, W> {
  pub fn new(words: &'a [W]) -> Self {
    Self {
      words,
      // Backs up one word so the first call to `next` loads `words[0]`.
      base: 0usize.wrapping_sub(Self::width()),
      current: W::zero(),
    }
  }

  fn width() -> usize {
    W::zero().count_zeros() as usize
  }
}

impl<W: PrimInt> Iterator for SetBits<'_, W> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    while self.current.is_zero() {
      let (&word, rest) = self.words.split_first()?;
      self.words = rest;
      self.base = self.base.wrapping_add(Self::width());
      self.current = word;
    }
    let offset = self.base + self.current.trailing_zeros() as usize;
    self.current = self.current & (self.current - W::one());
    Some(offset)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.current.count_ones() as usize;
    (remaining, Some(remaining + self.words.len() * Self::width()))
  }
}
