use std::collections::VecDeque;
use indexmap::IndexMap;
use log::{debug, trace};
use crate::bnf::*;
use crate::config::Config;
use crate::error::{Resource, Result};
use super::closure::Closure;
use super::item::{Core, ItemSet};
use super::transition::transition;

pub(super) struct States {
  pub(super) states: IndexMap<StateKey, State>,
}

pub(super) struct State {
  pub(super) items: ItemSet,
  /// symbol -> index of target state
  pub(super) transitions: IndexMap<Symbol, usize>,
}

/// Cores of a state's items. States with equal keys are merged.
type StateKey = Vec<Core>;

/// Builds the canonical collection, trying symbols in `order` from every
/// state. Fails as soon as a limit in `config` would be exceeded.
pub(super) fn gen_states(
  bnf: &Bnf,
  config: &Config,
  order: &[Symbol],
) -> Result<States> {
  let limits = &config.limits;
  let closure = Closure::new(bnf, config.lookahead);

  let mut seed = ItemSet::new(bnf.num_terms());
  seed.insert(Core::start(ProdId::AUGMENTED), TermId::END);
  let initial = closure.closure(seed);
  limits.check(Resource::ItemsPerState, initial.len())?;

  let mut states = IndexMap::new();
  states.insert(initial.core_key(), State::new(initial));
  limits.check(Resource::States, states.len())?;

  let mut queue = VecDeque::from([0]);
  let mut queued = vec![true];

  while let Some(ix) = queue.pop_front() {
    queued[ix] = false;

    for &symbol in order {
      let target = transition(&closure, &states[ix].items, symbol);
      if target.is_empty() {
        continue;
      }
      limits.check(Resource::ItemsPerState, target.len())?;

      let target_ix = match states.get_index_of(&target.core_key()) {
        Some(t) => {
          let existing = &mut states[t].items;
          if existing.union_with(&target) {
            limits.check(Resource::ItemsPerState, existing.len())?;
            debug!("state {} gained lookaheads from state {} on {}",
              t, ix, bnf.symbol_name(symbol));
            if !queued[t] {
              queued[t] = true;
              queue.push_back(t);
            }
          }
          t
        }
        None => {
          let t = states.len();
          limits.check(Resource::States, t + 1)?;
          debug!("state {} from state {} on {} ({} items)",
            t, ix, bnf.symbol_name(symbol), target.len());
          states.insert(target.core_key(), State::new(target));
          queued.push(true);
          queue.push_back(t);
          t
        }
      };

      trace!("{} --{}--> {}", ix, bnf.symbol_name(symbol), target_ix);
      states[ix].transitions.insert(symbol, target_ix);
    }
  }

  Ok(States {
    states,
  })
}

impl State {
  fn new(items: ItemSet) -> Self {
    State {
      items,
      transitions: IndexMap::new(),
    }
  }
}
