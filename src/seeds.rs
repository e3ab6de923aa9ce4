//! Built-in fallback instances. They guarantee that dispatch and every
//! generator always have something well-formed to return.

use crate::domain::{Answer, AnswerValue, Fallback, Problem, ProblemKind};

pub const DEFAULT_PROBLEM_QUESTION: &str = "x^2 - 5x + 6 = 0";
pub const DEFAULT_PROBLEM_DISPLAY: &str = "x = 2, 3";

pub const MIXED_FALLBACK_QUESTION: &str = "3 \\times 4 + 5";
pub const MIXED_FALLBACK_ANSWER: i64 = 17;

/// Absolute last resort of dispatch: served when no requested id is known.
pub fn default_problem() -> Problem {
  Problem::new(
    "default_quad",
    "Quadratic Equation",
    DEFAULT_PROBLEM_QUESTION,
    Answer::new(vec![AnswerValue::from("2"), AnswerValue::from("3")], DEFAULT_PROBLEM_DISPLAY),
    ProblemKind::MathInputPoly,
  )
  .with_fallback(Fallback::UnresolvableSelection)
}

/// Division with no feasible quotient window: `d ÷ d = 1`. Never `0 ÷ d`.
pub fn division_fallback(divisor: i64) -> Problem {
  let divisor = divisor.max(1);
  Problem::new(
    "arith_div",
    "Arithmetic (div)",
    format!("{} \\div {}", divisor, divisor),
    Answer::number(1),
    ProblemKind::MathInput,
  )
  .with_fallback(Fallback::InfeasibleNumericConstraint)
}

/// Mixed expression after every sampled tree was rejected.
pub fn mixed_fallback() -> Problem {
  Problem::new(
    "arith_mixed",
    "Arithmetic (mixed)",
    MIXED_FALLBACK_QUESTION,
    Answer::number(MIXED_FALLBACK_ANSWER),
    ProblemKind::MathInput,
  )
  .with_fallback(Fallback::DegenerateExpression)
}
