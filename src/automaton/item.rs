use std::collections::BTreeMap;
use crate::bnf::*;
use super::token_set::TokenSet;

/// An item without its lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Core {
  pub(crate) prod: ProdId,
  pub(crate) dot: usize,
}

/// A dotted production with one lookahead terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
  pub(crate) core: Core,
  pub(crate) lookahead: TermId,
}

impl Core {
  pub(crate) fn start(prod: ProdId) -> Self {
    Core {
      prod,
      dot: 0,
    }
  }

  pub(crate) fn advance(self) -> Self {
    Core {
      dot: self.dot + 1,
      ..self
    }
  }

  /// Symbols after the dot.
  pub(crate) fn rest<'a>(&self, bnf: &'a Bnf) -> &'a [Symbol] {
    &bnf.prod(self.prod).symbols[self.dot..]
  }

  pub(crate) fn next_symbol(&self, bnf: &Bnf) -> Option<Symbol> {
    self.rest(bnf).first().copied()
  }

  pub(crate) fn is_complete(&self, bnf: &Bnf) -> bool {
    self.rest(bnf).is_empty()
  }

  pub fn production(&self) -> usize {
    self.prod.0 as usize
  }

  pub fn dot(&self) -> usize {
    self.dot
  }
}

impl Item {
  pub fn core(&self) -> Core {
    self.core
  }

  /// Index of the lookahead in [`Grammar::terminals`](crate::Grammar::terminals).
  pub fn lookahead(&self) -> usize {
    self.lookahead.0 as usize
  }
}

/// A set of items, stored as lookahead sets keyed by core. Equality is set
/// equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ItemSet {
  items: BTreeMap<Core, TokenSet>,
  num_terms: usize,
}

impl ItemSet {
  pub(crate) fn new(num_terms: usize) -> Self {
    ItemSet {
      items: BTreeMap::new(),
      num_terms,
    }
  }

  /// Returns whether the item is new.
  pub(crate) fn insert(&mut self, core: Core, lookahead: TermId) -> bool {
    let num_terms = self.num_terms;
    self.items.entry(core)
      .or_insert_with(|| TokenSet::new(num_terms))
      .insert(lookahead)
  }

  /// Returns whether any item is new.
  pub(crate) fn insert_all(&mut self, core: Core, lookaheads: &TokenSet) -> bool {
    if lookaheads.is_empty() {
      return false;
    }
    let num_terms = self.num_terms;
    self.items.entry(core)
      .or_insert_with(|| TokenSet::new(num_terms))
      .union_with(lookaheads)
  }

  /// Returns whether any item is new.
  pub(crate) fn union_with(&mut self, other: &ItemSet) -> bool {
    let mut changed = false;
    for (&core, lookaheads) in &other.items {
      changed |= self.insert_all(core, lookaheads);
    }
    changed
  }

  pub(crate) fn lookaheads(&self, core: &Core) -> Option<&TokenSet> {
    self.items.get(core)
  }

  pub(crate) fn entries(&self) -> impl Iterator<Item = (&Core, &TokenSet)> {
    self.items.iter()
  }

  pub(crate) fn core_key(&self) -> Vec<Core> {
    self.items.keys().copied().collect()
  }

  /// Number of items, i.e. (core, lookahead) pairs.
  pub fn len(&self) -> usize {
    self.items.values().map(TokenSet::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.items.values().all(TokenSet::is_empty)
  }

  pub fn cores(&self) -> impl Iterator<Item = Core> + '_ {
    self.items.keys().copied()
  }

  /// Items ordered by production, dot and lookahead.
  pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
    self.items.iter().flat_map(|(&core, lookaheads)| {
      lookaheads.iter().map(move |lookahead| Item { core, lookahead })
    })
  }

  pub fn contains(&self, item: &Item) -> bool {
    self.items.get(&item.core)
      .map_or(false, |lookaheads| lookaheads.contains(item.lookahead))
  }
}

impl std::fmt::Debug for ItemSet {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_map().entries(self.items.iter()).finish()
  }
}
