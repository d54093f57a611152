use crate::bnf::Symbol;
use super::closure::Closure;
use super::item::ItemSet;

/// Items of `state` with `symbol` after the dot, dot advanced, closed. Empty
/// when `state` has no transition on `symbol`.
pub(crate) fn transition(
  closure: &Closure,
  state: &ItemSet,
  symbol: Symbol,
) -> ItemSet {
  let mut kernel = ItemSet::new(closure.bnf.num_terms());
  for (core, lookaheads) in state.entries() {
    if core.next_symbol(closure.bnf) == Some(symbol) {
      kernel.insert_all(core.advance(), lookaheads);
    }
  }

  if kernel.is_empty() {
    kernel
  } else {
    closure.closure(kernel)
  }
}
