use lalrkit::grammar::sym;
use lalrkit::{
  build, build_with, recognize, recognize_str, Config, Error, Grammar, Limits,
  LookaheadMode, Recognition, Rejection, Resource,
};
use pretty_assertions::assert_eq;

#[test]
fn single_production() {
  let automaton = build("S->a\n0".parse().unwrap()).unwrap();

  assert_eq!(automaton.shift(0, "a"), Some(1));
  assert!(recognize_str(&automaton, "a").is_accepted());
  assert_eq!(recognize_str(&automaton, "b"), Recognition::Rejected(
    Rejection::UnknownSymbol { position: 0, symbol: "b".to_owned() }));
  assert!(!recognize_str(&automaton, "").is_accepted());
  assert!(!recognize_str(&automaton, "aa").is_accepted());
}

#[test]
fn text_after_sentinel_is_ignored() {
  let grammar: Grammar = "S->a\n0\nS->b".parse().unwrap();
  assert_eq!(grammar.production_count(), 1);
  assert!(!grammar.is_terminal("b"));
}

#[test]
fn both_modes_agree_on_expressions() {
  let text = "E->E+T|T\nT->T*F|F\nF->(E)|a";
  for mode in [LookaheadMode::Inherited, LookaheadMode::First] {
    let config = Config::new().lookahead(mode);
    let automaton = build_with(text.parse().unwrap(), &config).unwrap();
    assert_eq!(automaton.states().len(), 12);
    assert_eq!(automaton.lookahead_mode(), mode);
    for accepted in ["a", "a+a*a", "(a+a)*a", "((a))"] {
      assert!(recognize_str(&automaton, accepted).is_accepted(), "{}", accepted);
    }
    for rejected in ["", "+", "a+", "(a", "a)", "a a"] {
      assert!(!recognize_str(&automaton, rejected).is_accepted(), "{}", rejected);
    }
  }
}

#[test]
fn capacity_limits() {
  let limits = Limits {
    max_states: 2,
    ..Limits::default()
  };
  let err = build_with("S->a".parse().unwrap(), &Config::new().limits(limits))
    .unwrap_err();
  assert_eq!(err, Error::CapacityExceeded {
    resource: Resource::States,
    limit: 2,
  });
  assert_eq!(err.to_string(), "too many states: the limit is 2");

  let rules = (0..27).map(|i| format!("S->{}", i % 5)).collect::<Vec<_>>();
  assert_eq!(rules.join("\n").parse::<Grammar>().unwrap_err(),
    Error::CapacityExceeded {
      resource: Resource::Productions,
      limit: 26,
    });
}

fn productions(count: usize) -> String {
  let letters = "abcdefghijklmnopqrstuvwx".chars().collect::<Vec<_>>();
  (0..count)
    .map(|i| format!("S->{}", letters[i % letters.len()]))
    .collect::<Vec<_>>()
    .join("\n")
}

#[test]
fn build_checks_grammar_limits() {
  let at_limit: Grammar = productions(26).parse().unwrap();
  assert_eq!(at_limit.terminals().count(), 25);
  assert!(build(at_limit).is_ok());

  let over = Grammar::parse_with(&productions(27), &Limits::unbounded()).unwrap();
  assert_eq!(build(over).unwrap_err(), Error::CapacityExceeded {
    resource: Resource::Productions,
    limit: 26,
  });

  let wide = Grammar::parse_with("S->abcdefghijklmnopqrstuvwxyz",
    &Limits::unbounded()).unwrap();
  assert_eq!(build(wide).unwrap_err(), Error::CapacityExceeded {
    resource: Resource::Terminals,
    limit: 25,
  });
}

#[test]
fn unbounded_limits() {
  let limits = Limits::unbounded();
  let rule = (1..40)
    .map(|i| sym(format!("t{}", i)))
    .fold(sym("t0"), |rule, alt| rule | alt);
  let grammar = Grammar::load_with([("S", rule)], &limits).unwrap();
  assert!(build(grammar.clone()).is_err());

  let automaton = build_with(grammar, &Config::new().limits(limits)).unwrap();
  assert!(recognize(&automaton, ["t39"]).is_accepted());
  assert!(!recognize(&automaton, ["t40"]).is_accepted());
}
