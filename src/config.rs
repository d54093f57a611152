//! Construction settings.

use crate::error::{Error, Resource, Result};

/// Production and terminal ids are `u32`, whatever the limits say.
const MAX_IDS: usize = u32::MAX as usize;

/// Capacity ceilings checked while a grammar is loaded, while its automaton
/// is built and while input is recognized.
///
/// The defaults are small: 26 productions, 25 terminals (the end-of-input
/// terminal included), 50 states and 40 items per state. Use
/// [`Limits::unbounded`] to lift them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
  pub max_productions: usize,
  pub max_terminals: usize,
  pub max_states: usize,
  pub max_items_per_state: usize,
  /// States the recognizer may push by completing items between two
  /// shifts.
  pub max_stack_depth: usize,
}

impl Default for Limits {
  fn default() -> Self {
    Limits {
      max_productions: 26,
      max_terminals: 25,
      max_states: 50,
      max_items_per_state: 40,
      max_stack_depth: 100,
    }
  }
}

impl Limits {
  pub fn unbounded() -> Self {
    Limits {
      max_productions: usize::MAX,
      max_terminals: usize::MAX,
      max_states: usize::MAX,
      max_items_per_state: usize::MAX,
      max_stack_depth: usize::MAX,
    }
  }

  pub(crate) fn check(
    &self,
    resource: Resource,
    count: usize,
  ) -> Result<()> {
    let limit = match resource {
      Resource::Productions => self.max_productions.min(MAX_IDS),
      Resource::Terminals => self.max_terminals.min(MAX_IDS),
      Resource::States => self.max_states,
      Resource::ItemsPerState => self.max_items_per_state,
    };
    if count > limit {
      Err(Error::CapacityExceeded { resource, limit })
    } else {
      Ok(())
    }
  }
}

/// How closure assigns lookaheads to the items it adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookaheadMode {
  /// Added items copy the lookahead of the item that introduced them. Every
  /// lookahead is then the end-of-input terminal, so the automaton is an
  /// LR(0) automaton whose items carry labels, and the recognizer does not
  /// consult lookaheads when it completes an item.
  #[default]
  Inherited,
  /// Added items get `FIRST(β a)` as in LR(1) closure; merging by core then
  /// yields LALR(1) lookaheads.
  First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
  pub limits: Limits,
  pub lookahead: LookaheadMode,
}

impl Config {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn limits(mut self, limits: Limits) -> Self {
    self.limits = limits;
    self
  }

  pub fn lookahead(mut self, mode: LookaheadMode) -> Self {
    self.lookahead = mode;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn check_is_inclusive() {
    let limits = Limits {
      max_states: 3,
      ..Limits::default()
    };
    assert_eq!(limits.check(Resource::States, 3), Ok(()));
    assert_eq!(
      limits.check(Resource::States, 4),
      Err(Error::CapacityExceeded { resource: Resource::States, limit: 3 }));
  }

  #[test]
  #[cfg(target_pointer_width = "64")]
  fn unbounded_still_fits_ids() {
    let limits = Limits::unbounded();
    assert_eq!(limits.check(Resource::Productions, MAX_IDS), Ok(()));
    assert_eq!(
      limits.check(Resource::Terminals, MAX_IDS + 1),
      Err(Error::CapacityExceeded { resource: Resource::Terminals, limit: MAX_IDS }));
    assert_eq!(limits.check(Resource::States, MAX_IDS + 1), Ok(()));
  }

  #[test]
  fn builder() {
    let config = Config::new()
      .lookahead(LookaheadMode::First)
      .limits(Limits::unbounded());
    assert_eq!(config.lookahead, LookaheadMode::First);
    assert_eq!(config.limits.max_states, usize::MAX);
  }
}
