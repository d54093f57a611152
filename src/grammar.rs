//! Grammar definitions.
//!
//! A grammar is an ordered list of `(nonterminal, rule)` pairs. Rules are
//! built from [`sym`], [`seq`], [`chars`], [`empty`] and `|`:
//!
//! ```
//! use lalrkit::grammar::{Grammar, sym, seq, empty};
//!
//! let grammar = Grammar::load([
//!   ("S", seq([sym("("), sym("S"), sym(")"), sym("S")]) | empty()),
//! ]).unwrap();
//! assert_eq!(grammar.start(), "S");
//! ```
//!
//! Names starting with an ASCII uppercase letter are nonterminals and must
//! have rules; every other name is a terminal. The first rule's left side is
//! the start symbol.

use std::ops::BitOr;
use std::str::FromStr;
use indexmap::IndexMap;
use crate::bnf::{Bnf, Symbol};
use crate::config::Limits;
use crate::error::{Error, Result};

/// Name of the end-of-input terminal. It cannot appear in a rule.
pub const END_MARKER: &str = "$";

#[derive(Debug, Clone)]
pub struct Grammar {
  pub(crate) bnf: Bnf,
}

#[derive(Debug, Clone)]
pub struct Rule(RuleVariant);

#[derive(Debug, Clone)]
enum RuleVariant {
  Empty,
  Sym(String),
  Seq(Vec<Rule>),
  Or(Vec<Rule>),
}

pub fn sym(
  sym: impl Into<String>,
) -> Rule {
  Rule(RuleVariant::Sym(sym.into()))
}

pub fn seq(
  rules: impl IntoIterator<Item = Rule>,
) -> Rule {
  Rule(RuleVariant::Seq(rules.into_iter().collect()))
}

pub fn empty() -> Rule {
  Rule(RuleVariant::Empty)
}

/// One symbol per character, whitespace skipped: `chars("aSb")` is
/// `seq([sym("a"), sym("S"), sym("b")])`.
pub fn chars(
  s: &str,
) -> Rule {
  seq(s.chars()
    .filter(|c| !c.is_whitespace())
    .map(|c| sym(c.to_string())))
}

impl BitOr for Rule {
  type Output = Rule;

  fn bitor(self, rhs: Rule) -> Rule {
    match (self.0, rhs.0) {
      (RuleVariant::Or(mut x), RuleVariant::Or(mut y)) => {
        x.append(&mut y);
        Rule(RuleVariant::Or(x))
      }
      (RuleVariant::Or(mut x), y) => {
        x.push(Rule(y));
        Rule(RuleVariant::Or(x))
      }
      (x, RuleVariant::Or(mut y)) => {
        y.insert(0, Rule(x));
        Rule(RuleVariant::Or(y))
      }
      (x, y) => {
        Rule(RuleVariant::Or(vec![Rule(x), Rule(y)]))
      }
    }
  }
}

impl Rule {
  /// Expands the rule into the right sides it stands for. An alternation
  /// nested in a sequence multiplies out.
  fn alternatives(self) -> Vec<Vec<String>> {
    match self.0 {
      RuleVariant::Empty => vec![vec![]],
      RuleVariant::Sym(s) => vec![vec![s]],
      RuleVariant::Or(rules) => {
        rules.into_iter()
          .flat_map(Rule::alternatives)
          .collect()
      }
      RuleVariant::Seq(rules) => {
        let mut result = vec![vec![]];
        for rule in rules {
          let tails = rule.alternatives();
          result = result.into_iter()
            .flat_map(|head: Vec<String>| {
              tails.iter().map(move |tail| {
                let mut v = head.clone();
                v.extend(tail.iter().cloned());
                v
              })
            })
            .collect();
        }
        result
      }
    }
  }
}

/// Shorthand for [`Grammar::load`].
pub fn grammar<N: Into<String>>(
  rules: impl IntoIterator<Item = (N, Rule)>,
) -> Result<Grammar> {
  Grammar::load(rules)
}

impl Grammar {
  pub fn load<N: Into<String>>(
    rules: impl IntoIterator<Item = (N, Rule)>,
  ) -> Result<Grammar> {
    Self::load_with(rules, &Limits::default())
  }

  /// Loads a grammar, failing with `CapacityExceeded` when it has more
  /// productions or terminals than `limits` allow.
  pub fn load_with<N: Into<String>>(
    rules: impl IntoIterator<Item = (N, Rule)>,
    limits: &Limits,
  ) -> Result<Grammar> {
    let mut map: IndexMap<String, Vec<Vec<String>>> = IndexMap::new();
    for (name, rule) in rules {
      map.entry(name.into())
        .or_default()
        .extend(rule.alternatives());
    }
    let bnf = Bnf::lower(map, limits)?;
    Ok(Grammar { bnf })
  }

  /// Parses the single-character text form with the given limits.
  ///
  /// Each line is `X->rhs`, where `X` is an uppercase letter and every other
  /// character is a symbol. `#` is an empty right side and `|` separates
  /// alternatives. A line reading `0` ends the grammar.
  pub fn parse_with(
    text: &str,
    limits: &Limits,
  ) -> Result<Grammar> {
    let mut rules = vec![];
    for line in text.lines().map(str::trim) {
      if line.is_empty() {
        continue;
      }
      if line == "0" {
        break;
      }
      let (lhs, rhs) = line.split_once("->")
        .ok_or_else(|| Error::malformed(line, "expected `X->rhs`"))?;
      let lhs = lhs.trim();
      let mut lhs_chars = lhs.chars();
      match (lhs_chars.next(), lhs_chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => {}
        _ => {
          return Err(Error::malformed(lhs,
            "left side must be a single uppercase letter"));
        }
      }
      let mut rule: Option<Rule> = None;
      for alt in rhs.split('|') {
        let alt = text_alternative(lhs, alt.trim())?;
        rule = Some(match rule {
          Some(rule) => rule | alt,
          None => alt,
        });
      }
      if let Some(rule) = rule {
        rules.push((lhs.to_owned(), rule));
      }
    }
    Self::load_with(rules, limits)
  }

  pub fn start(&self) -> &str {
    self.bnf.nonterm_name(self.bnf.start())
  }

  /// Terminal names in id order; the first is [`END_MARKER`].
  pub fn terminals(&self) -> impl Iterator<Item = &str> {
    self.bnf.terms.iter().map(String::as_str)
  }

  /// Nonterminal names in declaration order.
  pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
    self.bnf.user_nonterms().map(|id| self.bnf.nonterm_name(id))
  }

  /// Right sides of `nonterminal`'s productions, in declaration order.
  pub fn productions(&self, nonterminal: &str) -> Option<Vec<Vec<&str>>> {
    let id = self.bnf.nonterm_id(nonterminal)?;
    let rhs = self.bnf.nonterms[id.0 as usize].prods.iter()
      .map(|&prod| {
        self.bnf.prods[prod.0 as usize].symbols.iter()
          .map(|&sym| self.bnf.symbol_name(sym))
          .collect()
      })
      .collect();
    Some(rhs)
  }

  /// Number of productions, not counting the augmented start production.
  pub fn production_count(&self) -> usize {
    self.bnf.prods.len() - 1
  }

  pub fn is_terminal(&self, name: &str) -> bool {
    matches!(self.bnf.symbol(name), Some(Symbol::Term(_)))
  }

  pub fn is_nonterminal(&self, name: &str) -> bool {
    matches!(self.bnf.symbol(name), Some(Symbol::Nonterm(_)))
  }
}

fn text_alternative(
  lhs: &str,
  alt: &str,
) -> Result<Rule> {
  if alt == "#" {
    Ok(empty())
  } else if alt.is_empty() {
    Err(Error::malformed(lhs, "empty alternative, write `#` instead"))
  } else if alt.contains('#') {
    Err(Error::malformed(lhs, "`#` must stand alone"))
  } else {
    Ok(chars(alt))
  }
}

impl FromStr for Grammar {
  type Err = Error;

  fn from_str(text: &str) -> Result<Grammar> {
    Self::parse_with(text, &Limits::default())
  }
}
