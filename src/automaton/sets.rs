use crate::bnf::*;
use super::token_set::TokenSet;

/// Nullable flags and FIRST sets of every nonterminal.
#[derive(Debug)]
pub(crate) struct FirstSets {
  nullable: Vec<bool>,
  first: Vec<TokenSet>,
}

impl FirstSets {
  pub(crate) fn new(bnf: &Bnf) -> Self {
    let nullable = gen_nullable(bnf);
    let first = gen_first(bnf, &nullable);
    FirstSets {
      nullable,
      first,
    }
  }

  /// Adds `FIRST(symbols lookaheads)` to `result`.
  pub(crate) fn first_of(
    &self,
    result: &mut TokenSet,
    symbols: &[Symbol],
    lookaheads: &TokenSet,
  ) {
    compute_first_for_symbols(result, &self.first, &self.nullable, symbols,
      Some(lookaheads));
  }
}

fn gen_nullable(
  bnf: &Bnf,
) -> Vec<bool> {
  let mut nullable = vec![false; bnf.num_nonterms()];

  loop {
    let mut changed = false;
    for prod in &bnf.prods {
      let nt_ix = prod.nonterm_id.0 as usize;
      if !nullable[nt_ix] &&
        prod.symbols.iter().all(|sym| is_nullable(&nullable, sym))
      {
        nullable[nt_ix] = true;
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }

  nullable
}

fn is_nullable(nullable: &[bool], sym: &Symbol) -> bool {
  match sym {
    Symbol::Term(_) => false,
    Symbol::Nonterm(id) => nullable[id.0 as usize],
  }
}

fn gen_first(
  bnf: &Bnf,
  nullable: &[bool],
) -> Vec<TokenSet> {
  let mut buf = TokenSet::new(bnf.num_terms());
  let mut first = vec![buf.clone(); bnf.num_nonterms()];

  loop {
    let mut changed = false;
    for prod in &bnf.prods {
      buf.clear();
      compute_first_for_symbols(&mut buf, &first, nullable, &prod.symbols,
        None);
      changed |= first[prod.nonterm_id.0 as usize].union_with(&buf);
    }
    if !changed {
      break;
    }
  }

  first
}

fn compute_first_for_symbols(
  result: &mut TokenSet,
  first: &[TokenSet],
  nullable: &[bool],
  symbols: &[Symbol],
  lookaheads: Option<&TokenSet>,
) {
  for sym in symbols {
    match sym {
      Symbol::Term(id) => {
        result.insert(*id);
        return;
      }
      Symbol::Nonterm(id) => {
        result.union_with(&first[id.0 as usize]);
        if !nullable[id.0 as usize] {
          return;
        }
      }
    }
  }

  if let Some(lookaheads) = lookaheads {
    result.union_with(lookaheads);
  }
}
