//! Four-operation arithmetic driven by per-operand digit counts.

use rand::{Rng, RngCore};
use tracing::warn;

use crate::domain::{Answer, Difficulty, Problem, ProblemKind, Size};
use crate::numeric::{digit_range, random_int, random_with_digits};
use crate::seeds::division_fallback;

/// Divisors tried before the division generator serves its fallback.
pub const DIV_MAX_ATTEMPTS: usize = 8;

/// Easy quotients stay at or below this while the digit window allows it.
const EASY_QUOTIENT_CAP: i64 = 10;

fn binary_problem(op_key: &str, symbol: &str, lhs: i64, rhs: i64, result: i64) -> Problem {
  Problem::new(
    format!("arith_{}", op_key),
    format!("Arithmetic ({})", op_key),
    format!("{} {} {}", lhs, symbol, rhs),
    Answer::number(result),
    ProblemKind::MathInput,
  )
}

pub fn generate_add(size: Size, _difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let v1 = random_with_digits(rng, size.left());
  let v2 = random_with_digits(rng, size.right());
  binary_problem("add", "+", v1, v2, v1 + v2)
}

/// Below Hard the larger operand goes first so results stay non-negative.
pub fn generate_sub(size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let mut v1 = random_with_digits(rng, size.left());
  let mut v2 = random_with_digits(rng, size.right());
  if difficulty != Difficulty::Hard && v2 > v1 {
    std::mem::swap(&mut v1, &mut v2);
  }
  binary_problem("sub", "-", v1, v2, v1 - v2)
}

pub fn generate_mul(size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let v1 = random_with_digits(rng, size.left());
  let v2 = if difficulty == Difficulty::Easy && size.right() > 1 {
    random_int(rng, 2, 9)
  } else {
    random_with_digits(rng, size.right())
  };
  binary_problem("mul", "\\times", v1, v2, v1 * v2)
}

/// Feasible quotients for `divisor` when the dividend must lie in `[lo, hi]`.
pub fn quotient_window(divisor: i64, lo: i64, hi: i64) -> Option<(i64, i64)> {
  if divisor <= 0 {
    return None;
  }
  let q_lo = (lo + divisor - 1) / divisor;
  let q_hi = hi / divisor;
  (q_lo.max(1) <= q_hi).then(|| (q_lo.max(1), q_hi))
}

/// Division by construction: pick the divisor, then a quotient whose multiple
/// lands inside the dividend's digit window.
pub fn generate_div(size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let divisor_digits = if difficulty == Difficulty::Easy { 1 } else { size.right() };
  let (d_lo, d_hi) = digit_range(divisor_digits);
  let (lo, hi) = digit_range(size.left());

  let mut divisor = d_lo.max(2);
  for _ in 0..DIV_MAX_ATTEMPTS {
    divisor = random_int(rng, d_lo.max(2), d_hi);
    let Some((q_lo, mut q_hi)) = quotient_window(divisor, lo, hi) else {
      continue;
    };
    if difficulty == Difficulty::Easy && q_lo <= EASY_QUOTIENT_CAP {
      q_hi = q_hi.min(EASY_QUOTIENT_CAP);
    }
    let quotient = rng.gen_range(q_lo..=q_hi);
    return binary_problem("div", "\\div", quotient * divisor, divisor, quotient);
  }

  warn!(
    target: "math_drill",
    dividend_digits = size.left(),
    divisor_digits,
    divisor,
    "No multiple of the divisor fits the dividend digit window; serving fallback"
  );
  division_fallback(divisor)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Fallback;
  use rand::{rngs::StdRng, SeedableRng};

  fn operands(question: &str, symbol: &str) -> (i64, i64) {
    let (l, r) = question.split_once(symbol).unwrap();
    (l.trim().parse().unwrap(), r.trim().parse().unwrap())
  }

  #[test]
  fn add_uses_per_operand_digits() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
      let p = generate_add(Size::Pair([3, 1]), Difficulty::Normal, &mut rng);
      let (a, b) = operands(&p.question, "+");
      assert!((100..=999).contains(&a));
      assert!((1..=9).contains(&b));
      assert_eq!(p.answer.display, (a + b).to_string());
    }
  }

  #[test]
  fn sub_is_non_negative_below_hard() {
    let mut rng = StdRng::seed_from_u64(2);
    for difficulty in [Difficulty::Easy, Difficulty::Normal] {
      for _ in 0..200 {
        let p = generate_sub(Size::Digits(2), difficulty, &mut rng);
        let (a, b) = operands(&p.question, "-");
        assert!(a >= b);
        assert_eq!(p.answer.display, (a - b).to_string());
      }
    }
  }

  #[test]
  fn easy_mul_keeps_a_single_digit_multiplier() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
      let p = generate_mul(Size::Pair([2, 3]), Difficulty::Easy, &mut rng);
      let (_, b) = operands(&p.question, "\\times");
      assert!((2..=9).contains(&b));
    }
  }

  #[test]
  fn quotient_window_edges() {
    assert_eq!(quotient_window(7, 10, 99), Some((2, 14)));
    assert_eq!(quotient_window(100, 1, 9), None);
    assert_eq!(quotient_window(0, 1, 9), None);
    assert_eq!(quotient_window(5, 5, 5), Some((1, 1)));
  }

  #[test]
  fn infeasible_division_serves_flagged_fallback() {
    let mut rng = StdRng::seed_from_u64(4);
    let p = generate_div(Size::Pair([1, 3]), Difficulty::Normal, &mut rng);
    assert_eq!(p.fallback, Some(Fallback::InfeasibleNumericConstraint));
    let (a, b) = operands(&p.question, "\\div");
    assert_ne!(a, 0);
    assert_eq!(a, b);
    assert_eq!(p.answer.display, "1");
  }

  #[test]
  fn easy_division_uses_small_quotients_when_possible() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
      let p = generate_div(Size::Pair([2, 2]), Difficulty::Easy, &mut rng);
      let (a, b) = operands(&p.question, "\\div");
      assert!(b <= 9);
      assert_eq!(a % b, 0);
      assert!(a / b <= EASY_QUOTIENT_CAP);
    }
  }
}
