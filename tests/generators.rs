//! Properties every generated problem must satisfy, driven through the public API.

use math_drill::generators::{arithmetic, expression};
use math_drill::{check_answer, select_and_generate, Configuration, Difficulty, Fallback, Registry, Size};
use rand::{rngs::StdRng, SeedableRng};

fn only(id: &str, difficulty: Difficulty) -> Configuration {
  Configuration { topics: vec![id.to_string()], difficulty: Some(difficulty), ..Default::default() }
}

#[test]
fn every_subtopic_accepts_its_own_display_answer() {
  let registry = Registry::builtin();
  let mut rng = StdRng::seed_from_u64(2024);
  for id in registry.ids() {
    for difficulty in Difficulty::ALL {
      let cfg = only(id, difficulty);
      for _ in 0..25 {
        let p = select_and_generate(&registry, &cfg.topics, &cfg, &mut rng);
        assert!(!p.question.is_empty(), "{id}: empty question");
        assert!(!p.answer.display.is_empty(), "{id}: empty answer");
        assert!(check_answer(&p.answer.display, &p.answer), "{id}: {}", p.answer.display);
        let spaced = format!(" {} ", p.answer.display);
        assert!(check_answer(&spaced, &p.answer), "{id}: padded {}", p.answer.display);
      }
    }
  }
}

fn split_binary(question: &str) -> (i64, &str, i64) {
  for symbol in [" + ", " - ", " \\times ", " \\div "] {
    if let Some((l, r)) = question.split_once(symbol) {
      return (l.parse().unwrap(), symbol.trim(), r.parse().unwrap());
    }
  }
  panic!("not a binary question: {question}");
}

#[test]
fn four_operation_answers_re_evaluate_from_the_question() {
  let registry = Registry::builtin();
  let mut rng = StdRng::seed_from_u64(7);
  for id in ["arith_add", "arith_sub", "arith_mul", "arith_div"] {
    for difficulty in Difficulty::ALL {
      for digits in 1..=3 {
        let cfg = Configuration { digits: Some(Size::Digits(digits)), ..only(id, difficulty) };
        let p = select_and_generate(&registry, &cfg.topics, &cfg, &mut rng);
        let (l, op, r) = split_binary(&p.question);
        let expected = match op {
          "+" => l + r,
          "-" => l - r,
          "\\times" => l * r,
          _ => {
            assert_eq!(l % r, 0, "{}", p.question);
            l / r
          }
        };
        assert_eq!(p.answer.display, expected.to_string(), "{}", p.question);
      }
    }
  }
}

#[test]
fn division_is_always_exact_across_digit_pairs() {
  let mut rng = StdRng::seed_from_u64(99);
  let mut draws = 0;
  while draws < 10_000 {
    for left in 1..=5 {
      for right in 1..=5 {
        for difficulty in Difficulty::ALL {
          let p = arithmetic::generate_div(Size::Pair([left, right]), difficulty, &mut rng);
          let (dividend, _, divisor) = split_binary(&p.question);
          assert!(divisor > 0 && dividend > 0, "{}", p.question);
          assert_eq!(dividend % divisor, 0, "{}", p.question);
          assert_eq!(p.answer.display, (dividend / divisor).to_string());
          if p.fallback.is_some() {
            assert_eq!(p.fallback, Some(Fallback::InfeasibleNumericConstraint));
            assert_eq!(dividend, divisor);
          }
          draws += 1;
        }
      }
    }
  }
}

/// Standard-precedence evaluator for rendered mixed expressions.
struct Parser<'a> {
  tokens: Vec<&'a str>,
  pos: usize,
}

impl<'a> Parser<'a> {
  fn new(src: &'a str) -> Self {
    Parser { tokens: src.split_whitespace().flat_map(split_parens).collect(), pos: 0 }
  }

  fn peek(&self) -> Option<&'a str> {
    self.tokens.get(self.pos).copied()
  }

  fn next(&mut self) -> &'a str {
    let t = self.tokens[self.pos];
    self.pos += 1;
    t
  }

  fn expr(&mut self) -> i64 {
    let mut acc = self.term();
    while let Some(op @ ("+" | "-")) = self.peek() {
      self.next();
      let rhs = self.term();
      acc = if op == "+" { acc + rhs } else { acc - rhs };
    }
    acc
  }

  fn term(&mut self) -> i64 {
    let mut acc = self.atom();
    while self.peek() == Some("\\times") {
      self.next();
      acc *= self.atom();
    }
    acc
  }

  fn atom(&mut self) -> i64 {
    match self.next() {
      "(" => {
        let v = self.expr();
        assert_eq!(self.next(), ")");
        v
      }
      n => n.parse().unwrap(),
    }
  }
}

fn split_parens(word: &str) -> Vec<&str> {
  let mut out = Vec::new();
  let mut rest = word;
  while let Some(stripped) = rest.strip_prefix('(') {
    out.push("(");
    rest = stripped;
  }
  let closing = rest.len() - rest.trim_end_matches(')').len();
  let core = &rest[..rest.len() - closing];
  if !core.is_empty() {
    out.push(core);
  }
  out.extend(std::iter::repeat(")").take(closing));
  out
}

#[test]
fn mixed_expressions_are_nonzero_and_follow_precedence() {
  let mut rng = StdRng::seed_from_u64(11);
  for difficulty in Difficulty::ALL {
    for digits in 1..=3 {
      for _ in 0..300 {
        let p = expression::generate_mixed(Size::Pair([digits, 1]), difficulty, &mut rng);
        let mut parser = Parser::new(&p.question);
        let value = parser.expr();
        assert_eq!(parser.pos, parser.tokens.len(), "{}", p.question);
        assert_ne!(value, 0, "{}", p.question);
        assert_eq!(p.answer.display, value.to_string(), "{}", p.question);
      }
    }
  }
}

#[test]
fn factored_quadratic_scenario() {
  let p = math_drill::generators::math_ia::quad_eq_from_factors(1, -3, 1, -4);
  assert_eq!(p.question, "x^2 - 7x + 12 = 0");
  assert_eq!(p.answer.display, "x = 3, 4");
  assert!(check_answer("4, 3", &p.answer));
  assert!(check_answer("x=3,x=4", &p.answer));
}
