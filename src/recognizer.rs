//! Recognizes input with a built [`Automaton`].
//!
//! The walk shifts on the shift table. When no shift applies it completes an
//! item of the current state: the states for the item's right side are
//! popped and the goto entry for its left side is followed. Input is
//! accepted when it is exhausted in a state holding `S' -> S·, $`.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use log::trace;
use crate::automaton::{Automaton, StateId};
use crate::bnf::TermId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
  Accepted,
  Rejected(Rejection),
}

/// Why input was rejected. `position` counts input symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
  /// The symbol is not a terminal of the grammar.
  UnknownSymbol {
    position: usize,
    symbol: String,
  },
  NoTransition {
    position: usize,
    state: StateId,
  },
  /// Input ended in a state that neither accepts nor completes an item.
  UnexpectedEnd {
    state: StateId,
  },
  /// Completing items returned to an earlier stack without consuming input.
  Cycle {
    position: usize,
  },
  /// Completions grew the stack by more than `Limits::max_stack_depth`
  /// states without consuming input.
  DepthExceeded {
    position: usize,
  },
}

impl Recognition {
  pub fn is_accepted(&self) -> bool {
    matches!(self, Recognition::Accepted)
  }
}

impl Display for Rejection {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Rejection::UnknownSymbol { position, symbol } => {
        write!(f, "unknown symbol `{}` at {}", symbol, position)
      }
      Rejection::NoTransition { position, state } => {
        write!(f, "no transition from state {} at {}", state, position)
      }
      Rejection::UnexpectedEnd { state } => {
        write!(f, "unexpected end of input in state {}", state)
      }
      Rejection::Cycle { position } => {
        write!(f, "cycle of completions at {}", position)
      }
      Rejection::DepthExceeded { position } => {
        write!(f, "stack too deep at {}", position)
      }
    }
  }
}

/// Recognizes a sequence of terminal names.
pub fn recognize<I>(
  automaton: &Automaton,
  input: I,
) -> Recognition
  where I: IntoIterator, I::Item: AsRef<str>
{
  match walk(automaton, input) {
    Ok(()) => Recognition::Accepted,
    Err(rejection) => Recognition::Rejected(rejection),
  }
}

/// Recognizes a string of single-character terminals. Whitespace is
/// skipped.
pub fn recognize_str(
  automaton: &Automaton,
  input: &str,
) -> Recognition {
  recognize(automaton, input.chars()
    .filter(|c| !c.is_whitespace())
    .map(String::from))
}

fn walk<I>(
  automaton: &Automaton,
  input: I,
) -> Result<(), Rejection>
  where I: IntoIterator, I::Item: AsRef<str>
{
  let bnf = &automaton.grammar().bnf;
  let max_depth = automaton.limits().max_stack_depth;
  let mut input = input.into_iter();
  let mut position = 0;

  let mut next_term = |position: usize| -> Result<TermId, Rejection> {
    match input.next() {
      None => Ok(TermId::END),
      Some(symbol) => {
        let symbol = symbol.as_ref();
        match bnf.term_id(symbol) {
          Some(id) if id != TermId::END => Ok(id),
          _ => Err(Rejection::UnknownSymbol {
            position,
            symbol: symbol.to_owned(),
          }),
        }
      }
    }
  };

  let mut stack = vec![automaton.start_state()];
  // stacks seen since the last shift, and the depth right after it
  let mut seen = HashSet::new();
  let mut floor = stack.len();
  let mut lookahead = next_term(position)?;

  loop {
    let top = stack[stack.len() - 1];

    if lookahead != TermId::END {
      if let Some(target) = automaton.shift_on(top, lookahead) {
        trace!("shift {} -> {}", bnf.term_name(lookahead), target);
        stack.push(target);
        position += 1;
        seen.clear();
        floor = stack.len();
        lookahead = next_term(position)?;
        continue;
      }
    } else if automaton.is_accepting(top) {
      return Ok(());
    }

    let prod = match automaton.completed(top, lookahead) {
      Some(prod) => bnf.prod(prod),
      None if lookahead == TermId::END => {
        return Err(Rejection::UnexpectedEnd { state: top });
      }
      None => return Err(Rejection::NoTransition { position, state: top }),
    };

    if !seen.insert(stack.clone()) {
      return Err(Rejection::Cycle { position });
    }
    // the dot is at the end, so the stack holds a state per symbol
    stack.truncate(stack.len() - prod.symbols.len());
    let below = stack[stack.len() - 1];
    let target = automaton.goto_on(below, prod.nonterm_id)
      .ok_or(Rejection::NoTransition { position, state: below })?;
    trace!("complete {} -> {}", bnf.nonterm_name(prod.nonterm_id), target);
    stack.push(target);
    if stack.len().saturating_sub(floor) > max_depth {
      return Err(Rejection::DepthExceeded { position });
    }
  }
}
