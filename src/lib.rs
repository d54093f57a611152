//! Builds a shift/goto automaton from a context-free grammar by item-set
//! closure, transition and core-based state merging, then recognizes input
//! with it.
//!
//! ```
//! use lalrkit::{build, recognize_str, Grammar};
//!
//! let grammar: Grammar = "
//!   E->E+T|T
//!   T->a|(E)
//! ".parse().unwrap();
//! let automaton = build(grammar).unwrap();
//!
//! assert!(recognize_str(&automaton, "a+(a+a)").is_accepted());
//! assert!(!recognize_str(&automaton, "a+").is_accepted());
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod grammar;
pub mod recognizer;
mod bnf;

pub use automaton::Automaton;
pub use config::{Config, Limits, LookaheadMode};
pub use error::{Error, Resource, Result};
pub use grammar::Grammar;
pub use recognizer::{recognize, recognize_str, Recognition, Rejection};

/// Builds the automaton of `grammar` with the default [`Config`].
pub fn build(grammar: Grammar) -> Result<Automaton> {
  build_with(grammar, &Config::default())
}

pub fn build_with(grammar: Grammar, config: &Config) -> Result<Automaton> {
  Automaton::new(grammar, config)
}
