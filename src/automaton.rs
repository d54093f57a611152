//! The shift/goto automaton and its construction.

use std::fmt::{self, Display, Formatter};
use log::debug;
use crate::bnf::*;
use crate::config::{Config, Limits, LookaheadMode};
use crate::error::{Resource, Result};
use crate::grammar::Grammar;

mod closure;
mod collection;
mod item;
mod sets;
mod token_set;
mod transition;

pub use item::{Core, Item, ItemSet};

pub type StateId = usize;

/// States of the canonical collection with their shift and goto tables.
/// Never changes once built.
#[derive(Debug, Clone)]
pub struct Automaton {
  grammar: Grammar,
  states: Vec<ItemSet>,
  /// state -> terminal -> target
  shift: Vec<Vec<Option<StateId>>>,
  /// state -> nonterminal -> target
  goto: Vec<Vec<Option<StateId>>>,
  lookahead: LookaheadMode,
  limits: Limits,
}

impl Automaton {
  pub(crate) fn new(grammar: Grammar, config: &Config) -> Result<Self> {
    let order = grammar.bnf.symbols();
    Self::with_order(grammar, config, &order)
  }

  pub(crate) fn with_order(
    grammar: Grammar,
    config: &Config,
    order: &[Symbol],
  ) -> Result<Self> {
    let bnf = &grammar.bnf;
    config.limits.check(Resource::Productions, grammar.production_count())?;
    config.limits.check(Resource::Terminals, bnf.num_terms())?;
    let collection = collection::gen_states(bnf, config, order)?;

    let num_states = collection.states.len();
    let mut shift = vec![vec![None; bnf.num_terms()]; num_states];
    let mut goto = vec![vec![None; bnf.num_nonterms()]; num_states];
    let mut states = Vec::with_capacity(num_states);

    for (ix, (_, state)) in collection.states.into_iter().enumerate() {
      for (symbol, target) in state.transitions {
        let target = Some(target);
        match symbol {
          Symbol::Term(id) => shift[ix][id.0 as usize] = target,
          Symbol::Nonterm(id) => goto[ix][id.0 as usize] = target,
        }
      }
      states.push(state.items);
    }
    debug!("built {} states", states.len());

    Ok(Automaton {
      grammar,
      states,
      shift,
      goto,
      lookahead: config.lookahead,
      limits: config.limits,
    })
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn states(&self) -> &[ItemSet] {
    &self.states
  }

  pub fn start_state(&self) -> StateId {
    0
  }

  pub fn lookahead_mode(&self) -> LookaheadMode {
    self.lookahead
  }

  pub fn limits(&self) -> &Limits {
    &self.limits
  }

  /// Shift entry for `terminal`, by name.
  pub fn shift(&self, state: StateId, terminal: &str) -> Option<StateId> {
    let id = self.grammar.bnf.term_id(terminal)?;
    self.shift_on(state, id)
  }

  /// Goto entry for `nonterminal`, by name.
  pub fn goto(&self, state: StateId, nonterminal: &str) -> Option<StateId> {
    let id = self.grammar.bnf.nonterm_id(nonterminal)?;
    self.goto_on(state, id)
  }

  pub(crate) fn shift_on(&self, state: StateId, term: TermId) -> Option<StateId> {
    *self.shift.get(state)?.get(term.0 as usize)?
  }

  pub(crate) fn goto_on(&self, state: StateId, nonterm: NontermId) -> Option<StateId> {
    *self.goto.get(state)?.get(nonterm.0 as usize)?
  }

  /// Whether `state` holds `S' -> S·` with the end-of-input lookahead.
  pub fn is_accepting(&self, state: StateId) -> bool {
    let item = Item {
      core: Core {
        prod: ProdId::AUGMENTED,
        dot: 1,
      },
      lookahead: TermId::END,
    };
    self.states.get(state).map_or(false, |items| items.contains(&item))
  }

  /// The completed item `state` reduces by when `lookahead` is next: the
  /// lowest production whose lookaheads admit it. Lookaheads are not
  /// consulted in `LookaheadMode::Inherited`.
  pub(crate) fn completed(&self, state: StateId, lookahead: TermId) -> Option<ProdId> {
    let bnf = &self.grammar.bnf;
    self.states.get(state)?.entries()
      .filter(|(core, _)| core.prod != ProdId::AUGMENTED && core.is_complete(bnf))
      .find(|(_, lookaheads)| match self.lookahead {
        LookaheadMode::Inherited => true,
        LookaheadMode::First => lookaheads.contains(lookahead),
      })
      .map(|(core, _)| core.prod)
  }

  /// Renders one item as `A -> α · β, a`.
  pub fn describe(&self, item: &Item) -> String {
    let bnf = &self.grammar.bnf;
    let prod = bnf.prod(item.core.prod);
    let mut parts = vec![];
    for (i, &sym) in prod.symbols.iter().enumerate() {
      if i == item.core.dot {
        parts.push("·");
      }
      parts.push(bnf.symbol_name(sym));
    }
    if item.core.dot == prod.symbols.len() {
      parts.push("·");
    }
    format!("{} -> {}, {}",
      bnf.nonterm_name(prod.nonterm_id),
      parts.join(" "),
      bnf.term_name(item.lookahead))
  }
}

impl Display for Automaton {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for (i, state) in self.states.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      write!(f, "I{}:", i)?;
      for item in state.items() {
        write!(f, "\n  {}", self.describe(&item))?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;
  use crate::grammar::Grammar;
  use crate::recognizer::recognize_str;
  use quickcheck::quickcheck;
  use pretty_assertions::assert_eq;

  const EXPR: &str = "E->E+T|T\nT->T*F|F\nF->(E)|a";

  fn grammar(text: &str) -> Grammar {
    text.parse().unwrap()
  }

  fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut last = vec![String::new()];
    for _ in 0..max_len {
      last = last.iter()
        .flat_map(|s| alphabet.iter().map(move |c| format!("{}{}", s, c)))
        .collect();
      all.extend(last.iter().cloned());
    }
    all
  }

  fn sorted_states(automaton: &Automaton) -> Vec<Vec<String>> {
    let mut states = automaton.states().iter()
      .map(|s| s.items().map(|item| automaton.describe(&item)).collect())
      .collect::<Vec<Vec<String>>>();
    states.sort();
    states
  }

  #[test]
  fn tables() {
    let automaton = Automaton::new(grammar("S->a"), &Config::default()).unwrap();
    assert_eq!(automaton.states().len(), 3);
    assert_eq!(automaton.shift(0, "a"), Some(1));
    assert_eq!(automaton.shift(0, "b"), None);
    assert_eq!(automaton.shift(1, "a"), None);
    assert_eq!(automaton.goto(0, "S"), Some(2));
    assert_eq!(automaton.goto(1, "S"), None);
    assert!(automaton.is_accepting(2));
    assert!(!automaton.is_accepting(0));
    assert!(!automaton.is_accepting(7));
  }

  #[test]
  fn grammar_limits_apply_when_building() {
    let g = grammar("S->a|b|c");
    let exact = Config::new().limits(Limits {
      max_productions: 3,
      max_terminals: 4,
      ..Limits::default()
    });
    assert!(Automaton::new(g.clone(), &exact).is_ok());

    let few_productions = Config::new().limits(Limits {
      max_productions: 2,
      ..Limits::default()
    });
    assert_eq!(Automaton::new(g.clone(), &few_productions).err(),
      Some(Error::CapacityExceeded { resource: Resource::Productions, limit: 2 }));

    let few_terminals = Config::new().limits(Limits {
      max_terminals: 3,
      ..Limits::default()
    });
    assert_eq!(Automaton::new(g, &few_terminals).err(),
      Some(Error::CapacityExceeded { resource: Resource::Terminals, limit: 3 }));
  }

  #[test]
  fn describe_items() {
    let automaton = Automaton::new(grammar("S->aS|#"), &Config::default()).unwrap();
    let listing = automaton.states()[0].items()
      .map(|item| automaton.describe(&item))
      .collect::<Vec<_>>();
    assert_eq!(listing, vec!["S' -> · S, $", "S -> · a S, $", "S -> ·, $"]);
  }

  #[test]
  fn completed_item_selection() {
    let config = Config::new().lookahead(LookaheadMode::First);
    let automaton = Automaton::new(grammar("S->Ab\nA->a"), &config).unwrap();
    let after_a = automaton.shift(0, "a").unwrap();
    let b = automaton.grammar.bnf.term_id("b").unwrap();

    assert_eq!(automaton.completed(after_a, b), Some(ProdId(2)));
    assert_eq!(automaton.completed(after_a, TermId::END), None);
    assert_eq!(automaton.completed(0, b), None);
  }

  #[test]
  fn automaton_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Automaton>();
  }

  fn order_independent(keys: Vec<u32>, mode: LookaheadMode) -> bool {
    let config = Config::new().lookahead(mode);
    let g = grammar(EXPR);
    let mut order = g.bnf.symbols().into_iter()
      .enumerate()
      .map(|(i, sym)| (keys.get(i).copied().unwrap_or(0), sym))
      .collect::<Vec<_>>();
    order.sort_by_key(|&(key, _)| key);
    let order = order.into_iter().map(|(_, sym)| sym).collect::<Vec<_>>();

    let default = Automaton::new(g.clone(), &config).unwrap();
    let permuted = Automaton::with_order(g, &config, &order).unwrap();

    default.states().len() == permuted.states().len() &&
      sorted_states(&default) == sorted_states(&permuted) &&
      strings(&['a', '+', '*', '(', ')'], 3).iter().all(|s| {
        recognize_str(&default, s).is_accepted() ==
          recognize_str(&permuted, s).is_accepted()
      })
  }

  quickcheck! {
    fn discovery_order_does_not_matter_inherited(keys: Vec<u32>) -> bool {
      order_independent(keys, LookaheadMode::Inherited)
    }

    fn discovery_order_does_not_matter_first(keys: Vec<u32>) -> bool {
      order_independent(keys, LookaheadMode::First)
    }
  }
}
