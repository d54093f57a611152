use crate::bnf::*;
use crate::config::LookaheadMode;
use super::item::{Core, ItemSet};
use super::sets::FirstSets;
use super::token_set::TokenSet;

/// Closes item sets over a grammar.
pub(crate) struct Closure<'a> {
  pub(crate) bnf: &'a Bnf,
  /// `None` in `LookaheadMode::Inherited`.
  first: Option<FirstSets>,
}

impl<'a> Closure<'a> {
  pub(crate) fn new(bnf: &'a Bnf, mode: LookaheadMode) -> Self {
    let first = match mode {
      LookaheadMode::Inherited => None,
      LookaheadMode::First => Some(FirstSets::new(bnf)),
    };
    Closure {
      bnf,
      first,
    }
  }

  /// Adds `B -> ·γ` for every item with the dot before `B`, until nothing
  /// changes. A core is revisited whenever its lookahead set grows.
  pub(crate) fn closure(&self, mut set: ItemSet) -> ItemSet {
    let mut pending = set.cores().collect::<Vec<_>>();
    let mut buf = TokenSet::new(self.bnf.num_terms());

    while let Some(core) = pending.pop() {
      let rest = core.rest(self.bnf);
      let nonterm = match rest.first() {
        Some(Symbol::Nonterm(id)) => *id,
        _ => continue,
      };
      let inherited = match set.lookaheads(&core) {
        Some(lookaheads) => lookaheads,
        None => continue,
      };

      buf.clear();
      match &self.first {
        None => {
          buf.union_with(inherited);
        }
        Some(first) => first.first_of(&mut buf, &rest[1..], inherited),
      }

      for &prod in &self.bnf.nonterms[nonterm.0 as usize].prods {
        let added = Core::start(prod);
        if set.insert_all(added, &buf) {
          pending.push(added);
        }
      }
    }

    set
  }
}
