use std::collections::HashMap;
use indexmap::{IndexMap, IndexSet};
use crate::config::Limits;
use crate::error::{Error, Resource, Result};
use crate::grammar::END_MARKER;

/// Interned grammar. Production 0 is the augmented `S' -> S`, nonterminal 0
/// its left side, terminal 0 the end marker.
#[derive(Debug, Clone)]
pub(crate) struct Bnf {
  pub(crate) terms: IndexSet<String>,
  pub(crate) nonterms: Vec<Nonterm>,
  pub(crate) prods: Vec<Production>,
  nonterm_ids: HashMap<String, NontermId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Symbol {
  Term(TermId),
  Nonterm(NontermId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TermId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NontermId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ProdId(pub(crate) u32);

impl TermId {
  pub(crate) const END: TermId = TermId(0);
}

impl NontermId {
  pub(crate) const AUGMENTED: NontermId = NontermId(0);
}

impl ProdId {
  pub(crate) const AUGMENTED: ProdId = ProdId(0);
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Nonterm {
  pub(crate) name: String,
  /// non-empty
  pub(crate) prods: Vec<ProdId>,
}

#[derive(Debug, Clone)]
pub(crate) struct Production {
  pub(crate) nonterm_id: NontermId,
  pub(crate) symbols: Vec<Symbol>,
}

fn is_nonterm_name(name: &str) -> bool {
  name.starts_with(|c: char| c.is_ascii_uppercase())
}

impl Bnf {
  /// Classifies and interns `rules`, whose first key is the start symbol.
  pub(crate) fn lower(
    rules: IndexMap<String, Vec<Vec<String>>>,
    limits: &Limits,
  ) -> Result<Bnf> {
    let start = match rules.keys().next() {
      Some(start) => start.clone(),
      None => return Err(Error::malformed("", "grammar has no productions")),
    };

    let num_prods = rules.values().map(Vec::len).sum();
    limits.check(Resource::Productions, num_prods)?;

    let mut nonterm_ids = HashMap::new();
    let mut nonterms = vec![Nonterm {
      name: format!("{}'", start),
      prods: vec![ProdId::AUGMENTED],
    }];
    for name in rules.keys() {
      if !is_nonterm_name(name) {
        return Err(Error::malformed(name.as_str(),
          "left side must start with an uppercase letter"));
      }
      nonterm_ids.insert(name.clone(), NontermId(nonterms.len() as u32));
      nonterms.push(Nonterm {
        name: name.clone(),
        prods: vec![],
      });
    }

    let mut terms = IndexSet::new();
    terms.insert(END_MARKER.to_owned());

    let mut prods = vec![Production {
      nonterm_id: NontermId::AUGMENTED,
      symbols: vec![Symbol::Nonterm(NontermId(1))],
    }];

    for (name, alternatives) in rules {
      let nonterm_id = nonterm_ids[&name];
      for alternative in alternatives {
        let mut symbols = Vec::with_capacity(alternative.len());
        for s in alternative {
          symbols.push(lower_symbol(&nonterm_ids, &mut terms, limits, &name, s)?);
        }
        nonterms[nonterm_id.0 as usize].prods.push(ProdId(prods.len() as u32));
        prods.push(Production {
          nonterm_id,
          symbols,
        });
      }
    }

    Ok(Bnf {
      terms,
      nonterms,
      prods,
      nonterm_ids,
    })
  }

  pub(crate) fn start(&self) -> NontermId {
    NontermId(1)
  }

  pub(crate) fn num_terms(&self) -> usize {
    self.terms.len()
  }

  pub(crate) fn num_nonterms(&self) -> usize {
    self.nonterms.len()
  }

  pub(crate) fn user_nonterms(&self) -> impl Iterator<Item = NontermId> {
    (1..self.nonterms.len() as u32).map(NontermId)
  }

  /// Symbols that may follow a dot: terminals, then nonterminals, with the
  /// end marker and the augmented nonterminal left out.
  pub(crate) fn symbols(&self) -> Vec<Symbol> {
    (1..self.terms.len() as u32)
      .map(|i| Symbol::Term(TermId(i)))
      .chain(self.user_nonterms().map(Symbol::Nonterm))
      .collect()
  }

  pub(crate) fn prod(&self, id: ProdId) -> &Production {
    &self.prods[id.0 as usize]
  }

  pub(crate) fn term_id(&self, name: &str) -> Option<TermId> {
    self.terms.get_index_of(name).map(|i| TermId(i as u32))
  }

  pub(crate) fn nonterm_id(&self, name: &str) -> Option<NontermId> {
    self.nonterm_ids.get(name).copied()
  }

  pub(crate) fn symbol(&self, name: &str) -> Option<Symbol> {
    self.term_id(name).map(Symbol::Term)
      .or_else(|| self.nonterm_id(name).map(Symbol::Nonterm))
  }

  pub(crate) fn term_name(&self, id: TermId) -> &str {
    &self.terms[id.0 as usize]
  }

  pub(crate) fn nonterm_name(&self, id: NontermId) -> &str {
    &self.nonterms[id.0 as usize].name
  }

  pub(crate) fn symbol_name(&self, sym: Symbol) -> &str {
    match sym {
      Symbol::Term(id) => self.term_name(id),
      Symbol::Nonterm(id) => self.nonterm_name(id),
    }
  }
}

fn lower_symbol(
  nonterm_ids: &HashMap<String, NontermId>,
  terms: &mut IndexSet<String>,
  limits: &Limits,
  lhs: &str,
  name: String,
) -> Result<Symbol> {
  if name.is_empty() {
    return Err(Error::malformed(lhs, "empty symbol name"));
  }
  if name == END_MARKER {
    return Err(Error::malformed(lhs,
      format!("`{}` is reserved for end of input", END_MARKER)));
  }
  if is_nonterm_name(&name) {
    return match nonterm_ids.get(&name) {
      Some(&id) => Ok(Symbol::Nonterm(id)),
      None => Err(Error::malformed(lhs,
        format!("`{}` is a nonterminal without productions", name))),
    };
  }
  let (i, _) = terms.insert_full(name);
  limits.check(Resource::Terminals, terms.len())?;
  Ok(Symbol::Term(TermId(i as u32)))
}
