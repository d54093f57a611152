use std::fmt::{self, Debug, Formatter};
use crate::bnf::TermId;

type BitBlock = u64;

const BLOCK_NBITS: usize = std::mem::size_of::<BitBlock>() * 8;

/// Set of terminals, one bit per terminal id.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct TokenSet {
  slice: Box<[BitBlock]>,
}

impl TokenSet {
  pub(crate) fn new(num_tokens: usize) -> Self {
    let len = (num_tokens + BLOCK_NBITS - 1) / BLOCK_NBITS;
    Self {
      slice: vec![0; len].into_boxed_slice(),
    }
  }

  #[cfg(test)]
  pub(crate) fn from_token(num_tokens: usize, token: TermId) -> Self {
    let mut s = Self::new(num_tokens);
    s.insert(token);
    s
  }

  pub(crate) fn clear(&mut self) {
    for x in self.slice.iter_mut() {
      *x = 0;
    }
  }

  /// Returns whether the token was absent.
  pub(crate) fn insert(&mut self, token: TermId) -> bool {
    let (block, mask) = Self::locate(token);
    let old = self.slice[block];
    self.slice[block] |= mask;
    old != self.slice[block]
  }

  pub(crate) fn contains(&self, token: TermId) -> bool {
    let (block, mask) = Self::locate(token);
    self.slice.get(block).map_or(false, |b| b & mask != 0)
  }

  /// Returns whether the set has changed.
  pub(crate) fn union_with(&mut self, other: &TokenSet) -> bool {
    let mut changed = false;
    for (x, y) in self.slice.iter_mut().zip(other.slice.iter()) {
      let old = *x;
      *x |= *y;
      changed |= old != *x;
    }
    changed
  }

  pub(crate) fn len(&self) -> usize {
    self.slice.iter().map(|b| b.count_ones() as usize).sum()
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.slice.iter().all(|&b| b == 0)
  }

  pub(crate) fn iter(&self) -> Iter<'_> {
    Iter {
      slice: &self.slice,
      bit: 0,
      index: 0,
    }
  }

  fn locate(token: TermId) -> (usize, BitBlock) {
    let token = token.0 as usize;
    (token / BLOCK_NBITS, 1 << (token % BLOCK_NBITS))
  }
}

pub(crate) struct Iter<'a> {
  slice: &'a [BitBlock],
  bit: usize,
  index: usize,
}

impl<'a> Iterator for Iter<'a> {
  type Item = TermId;

  fn next(&mut self) -> Option<TermId> {
    while self.index < self.slice.len() {
      if self.bit < BLOCK_NBITS {
        let bit = (self.slice[self.index] & !((1 << self.bit) - 1))
          .trailing_zeros() as usize;
        if bit < BLOCK_NBITS {
          self.bit = bit + 1;
          return Some(TermId((self.index * BLOCK_NBITS + bit) as u32));
        }
      }

      self.index += 1;
      self.bit = 0;
    }
    None
  }
}

impl Debug for TokenSet {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter().map(|t| t.0)).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::TokenSet;
  use crate::bnf::TermId;
  use pretty_assertions::assert_eq;

  #[test]
  fn insert() {
    let mut set = TokenSet::new(70);

    assert!(set.insert(TermId(7)));
    assert!(set.insert(TermId(3)));
    assert!(!set.insert(TermId(7)));
    assert!(set.insert(TermId(69)));

    let vec = set.iter().map(|t| t.0).collect::<Vec<_>>();

    assert_eq!(vec, vec![3, 7, 69]);
    assert_eq!(set.len(), 3);
    assert!(set.contains(TermId(69)));
    assert!(!set.contains(TermId(4)));
  }

  #[test]
  fn union_reports_change() {
    let mut a = TokenSet::from_token(10, TermId(1));
    let b = TokenSet::from_token(10, TermId(2));

    assert!(a.union_with(&b));
    assert!(!a.union_with(&b));
    assert_eq!(a.iter().map(|t| t.0).collect::<Vec<_>>(), vec![1, 2]);

    a.clear();
    assert!(a.is_empty());
  }
}
