use std::fmt::{self, Display, Formatter};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  /// Ill-formed right side, undeclared nonterminal or bad left side.
  #[error("malformed production for `{lhs}`: {reason}")]
  MalformedProduction {
    lhs: String,
    reason: String,
  },
  /// A configured ceiling would be exceeded. Nothing is built.
  #[error("too many {resource}: the limit is {limit}")]
  CapacityExceeded {
    resource: Resource,
    limit: usize,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
  Productions,
  Terminals,
  States,
  ItemsPerState,
}

impl Display for Resource {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let s = match self {
      Resource::Productions => "productions",
      Resource::Terminals => "terminals",
      Resource::States => "states",
      Resource::ItemsPerState => "items in one state",
    };
    f.write_str(s)
  }
}

impl Error {
  pub(crate) fn malformed(
    lhs: impl Into<String>,
    reason: impl Into<String>,
  ) -> Self {
    Error::MalformedProduction {
      lhs: lhs.into(),
      reason: reason.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn messages() {
    let err = Error::CapacityExceeded {
      resource: Resource::ItemsPerState,
      limit: 40,
    };
    assert_eq!(err.to_string(), "too many items in one state: the limit is 40");

    let err = Error::malformed("a", "left side must be a nonterminal");
    assert_eq!(
      err.to_string(),
      "malformed production for `a`: left side must be a nonterminal");
  }
}
