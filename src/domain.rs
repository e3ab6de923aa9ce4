//! Domain models shared by the engine and the backend: difficulty, size, session
//! configuration, and the problem/answer value objects.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Global difficulty knob. Scales numeric sampling ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
  Easy,
  #[default]
  Normal,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

  /// Multiplicative factor applied to sampling ranges.
  pub fn scale(self) -> f64 {
    match self {
      Difficulty::Easy => 0.5,
      Difficulty::Normal => 1.0,
      Difficulty::Hard => 1.5,
    }
  }

  /// Case-insensitive parse used by query strings ("hard", "Hard", "HARD").
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "easy" => Some(Difficulty::Easy),
      "normal" => Some(Difficulty::Normal),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }
}

/// Digit-count parameter handed to a generator.
///
/// Arithmetic subtopics receive a `[left, right]` pair from the per-operation
/// table; every other subtopic gets the single global digit count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
  Digits(u32),
  Pair([u32; 2]),
}

impl Default for Size {
  fn default() -> Self { Size::Digits(2) }
}

impl Size {
  pub fn left(self) -> u32 {
    match self {
      Size::Digits(d) => d.max(1),
      Size::Pair([l, _]) => l.max(1),
    }
  }

  pub fn right(self) -> u32 {
    match self {
      Size::Digits(d) => d.max(1),
      Size::Pair([_, r]) => r.max(1),
    }
  }
}

/// Session configuration as sent by the caller. Every field is optional so a
/// partial request can be merged over server defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
  #[serde(default)] pub topics: Vec<String>,
  #[serde(default)] pub difficulty: Option<Difficulty>,
  #[serde(default)] pub digits: Option<Size>,
  /// Per-operation digit pairs keyed by operation name (`add`, `sub`, `mul`, `div`, `mixed`).
  #[serde(default)] pub arithmetic: Option<HashMap<String, [u32; 2]>>,
  #[serde(default)] pub count: Option<usize>,
}

/// Expected input shape. Only the UI cares (keyboard affordances).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
  MathInput,
  MathInputPoly,
  Text,
}

/// One structured answer token: a plain number or a markup fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
  Number(i64),
  Markup(String),
}

impl From<i64> for AnswerValue {
  fn from(n: i64) -> Self { AnswerValue::Number(n) }
}

impl From<String> for AnswerValue {
  fn from(s: String) -> Self { AnswerValue::Markup(s) }
}

impl From<&str> for AnswerValue {
  fn from(s: &str) -> Self { AnswerValue::Markup(s.to_string()) }
}

/// Canonical answer. `display` is the ground truth; `values` may be empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
  #[serde(default)] pub values: Vec<AnswerValue>,
  pub display: String,
}

impl Answer {
  pub fn new(values: Vec<AnswerValue>, display: impl Into<String>) -> Self {
    Self { values, display: display.into() }
  }

  /// Single integer answer, the most common shape.
  pub fn number(n: i64) -> Self {
    Self { values: vec![AnswerValue::Number(n)], display: n.to_string() }
  }

  /// Display-only answer (trig/geometry tables).
  pub fn display_only(display: impl Into<String>) -> Self {
    Self { values: Vec::new(), display: display.into() }
  }
}

/// Which documented recovery produced a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
  /// No requested id was known to the registry.
  UnresolvableSelection,
  /// A divisibility/range search had no solution.
  InfeasibleNumericConstraint,
  /// Every sampled expression evaluated to zero (or overflowed).
  DegenerateExpression,
}

/// The unit of work. Immutable once produced by a generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
  pub id: String,
  pub subtopic: String,
  pub question: String,
  pub answer: Answer,
  #[serde(rename = "type")]
  pub kind: ProblemKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fallback: Option<Fallback>,
}

impl Problem {
  pub fn new(id: impl Into<String>, subtopic: impl Into<String>, question: impl Into<String>, answer: Answer, kind: ProblemKind) -> Self {
    Self {
      id: id.into(),
      subtopic: subtopic.into(),
      question: question.into(),
      answer,
      kind,
      fallback: None,
    }
  }

  pub fn with_fallback(mut self, reason: Fallback) -> Self {
    self.fallback = Some(reason);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn size_deserializes_from_number_or_pair() {
    let single: Size = serde_json::from_str("3").unwrap();
    assert_eq!(single, Size::Digits(3));
    let pair: Size = serde_json::from_str("[2, 1]").unwrap();
    assert_eq!(pair, Size::Pair([2, 1]));
    assert_eq!(pair.left(), 2);
    assert_eq!(pair.right(), 1);
  }

  #[test]
  fn zero_digits_are_treated_as_one() {
    assert_eq!(Size::Digits(0).left(), 1);
    assert_eq!(Size::Pair([0, 0]).right(), 1);
  }

  #[test]
  fn problem_serializes_kind_as_type_and_skips_absent_fallback() {
    let p = Problem::new("t", "Test", "1 + 1", Answer::number(2), ProblemKind::MathInput);
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["type"], "math-input");
    assert!(v.get("fallback").is_none());
    assert_eq!(v["answer"]["values"][0], 2);
  }

  #[test]
  fn difficulty_parse_is_case_insensitive() {
    assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
    assert_eq!(Difficulty::parse(" easy "), Some(Difficulty::Easy));
    assert_eq!(Difficulty::parse("extreme"), None);
  }
}
