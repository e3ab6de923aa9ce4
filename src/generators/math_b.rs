//! Math B: arithmetic/geometric sequences and series, sigma sums, and linear
//! transforms of random variables.

use rand::{Rng, RngCore};

use super::poly_markup;
use crate::domain::{Answer, AnswerValue, Difficulty, Problem, ProblemKind, Size};
use crate::numeric::{random_int, scaled_random_int};

fn signed_on_hard<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, v: i64) -> i64 {
  if difficulty == Difficulty::Hard && rng.gen_bool(0.5) { -v } else { v }
}

/// General term `a_n = dn + c` from two given terms.
pub fn generate_arith_seq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let magnitude = random_int(rng, 2, 5);
  let d = signed_on_hard(rng, difficulty, magnitude);
  let a1 = random_int(rng, 1, 10);
  let (n1, n2) = if difficulty == Difficulty::Easy {
    (3, 5)
  } else {
    let n1 = random_int(rng, 2, 4);
    (n1, n1 + random_int(rng, 2, 4))
  };
  let term = |n: i64| a1 + (n - 1) * d;

  let general = poly_markup(&[(d, "n"), (a1 - d, "")]);
  Problem::new(
    "mathb_arith_seq",
    "Arithmetic Sequence",
    format!("a_{{{}}} = {},\\ a_{{{}}} = {} \\text{{ : general term }} a_n", n1, term(n1), n2, term(n2)),
    Answer::new(vec![AnswerValue::from(general.clone())], general),
    ProblemKind::MathInputPoly,
  )
}

pub fn generate_arith_sum(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let a = random_int(rng, 1, 5);
  let d = random_int(rng, 2, 4);
  let n = if difficulty == Difficulty::Hard { random_int(rng, 10, 20) } else { random_int(rng, 5, 10) };
  let sum = n * (2 * a + (n - 1) * d) / 2;

  Problem::new(
    "mathb_arith_sum",
    "Arithmetic Series",
    format!("\\text{{First term }} {},\\ \\text{{difference }} {} \\text{{ : sum of the first }} {} \\text{{ terms}}", a, d, n),
    Answer::number(sum),
    ProblemKind::MathInput,
  )
}

/// General term `a \cdot r^{n-1}`. Hard gives two consecutive terms and may
/// use a negative ratio.
pub fn generate_geo_seq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let a = random_int(rng, 1, 4);
  let magnitude = random_int(rng, 2, 3);
  let r = signed_on_hard(rng, difficulty, magnitude);

  let ratio = if r < 0 { format!("({})", r) } else { r.to_string() };
  let general = if a == 1 {
    format!("{}^{{n-1}}", ratio)
  } else {
    format!("{} \\cdot {}^{{n-1}}", a, ratio)
  };

  let question = if difficulty == Difficulty::Hard {
    format!("a_2 = {},\\ a_3 = {} \\text{{ : general term }} a_n", a * r, a * r * r)
  } else {
    format!("\\text{{First term }} {},\\ \\text{{ratio }} {} \\text{{ : general term }} a_n", a, r)
  };

  Problem::new(
    "mathb_geo_seq",
    "Geometric Sequence",
    question,
    Answer::new(vec![AnswerValue::from(general.clone())], general),
    ProblemKind::MathInput,
  )
}

pub fn generate_geo_sum(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let a = random_int(rng, 1, 3);
  let r = random_int(rng, 2, 3);
  let n = if difficulty == Difficulty::Hard { random_int(rng, 4, 7) } else { random_int(rng, 3, 5) };
  let sum = a * (r.pow(n as u32) - 1) / (r - 1);

  Problem::new(
    "mathb_geo_sum",
    "Geometric Series",
    format!("\\text{{First term }} {},\\ \\text{{ratio }} {} \\text{{ : sum of the first }} {} \\text{{ terms}}", a, r, n),
    Answer::number(sum),
    ProblemKind::MathInput,
  )
}

/// `\sum_{k=1}^{N} (ak + b) = a N(N+1)/2 + bN`.
pub fn generate_sigma(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let a = random_int(rng, 1, 3);
  let b = scaled_random_int(rng, -3, 3, difficulty);
  let upper = if difficulty == Difficulty::Hard { random_int(rng, 10, 20) } else { random_int(rng, 5, 12) };
  let sum = a * upper * (upper + 1) / 2 + b * upper;

  Problem::new(
    "mathb_sigma",
    "Sigma",
    format!("\\sum_{{k=1}}^{{{}}} ({})", upper, poly_markup(&[(a, "k"), (b, "")])),
    Answer::number(sum),
    ProblemKind::MathInput,
  )
}

/// Mean, variance or standard deviation of `aX + b`.
pub fn generate_stat(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let magnitude = random_int(rng, 2, 5);
  let a = signed_on_hard(rng, difficulty, magnitude);
  let b = random_int(rng, 1, 10);
  let transformed = poly_markup(&[(a, "X"), (b, "")]);

  let mode = if difficulty == Difficulty::Easy { 0 } else { rng.gen_range(0..3) };
  let (question, value) = match mode {
    0 => {
      let mean = random_int(rng, 2, 10);
      (format!("E(X) = {} \\text{{ : }} E({})", mean, transformed), a * mean + b)
    }
    1 => {
      let variance = random_int(rng, 1, 9);
      (format!("V(X) = {} \\text{{ : }} V({})", variance, transformed), a * a * variance)
    }
    _ => {
      let deviation = random_int(rng, 1, 5);
      (format!("\\sigma(X) = {} \\text{{ : }} \\sigma({})", deviation, transformed), a.abs() * deviation)
    }
  };

  Problem::new("mathb_stat", "Statistics", question, Answer::number(value), ProblemKind::MathInput)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generators::checks::*;
  use crate::validator::check_answer;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn arithmetic_general_term_accepts_prefixed_input() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..50 {
      let p = generate_arith_seq(Size::Digits(1), Difficulty::Normal, &mut rng);
      let prefixed = format!("a_n = {}", p.answer.display);
      assert!(check_answer(&prefixed, &p.answer), "{}", p.answer.display);
    }
  }

  #[test]
  fn geometric_term_accepts_plain_text_input() {
    let answer = Answer::display_only("2 \\cdot 3^{n-1}");
    assert!(check_answer("2*3^(n-1)", &answer));
    assert!(check_answer("2×3^(n-1)", &answer));
    assert!(!check_answer("2*3^n", &answer));
  }

  /// `(n, value)` from a rendered `a_{n} = value` fragment.
  fn indexed_term(fragment: &str) -> (i64, i64) {
    let (index, value) = fragment.split_once("} = ").unwrap();
    (int(index.trim_start_matches("a_{")), int(value.split(' ').next().unwrap()))
  }

  #[test]
  fn arithmetic_general_term_passes_through_both_given_terms() {
    for p in draws(generate_arith_seq, 34) {
      let (first, second) = p.question.split_once(",\\ ").unwrap();
      let ((n1, v1), (n2, v2)) = (indexed_term(first), indexed_term(second));
      assert_eq!((v2 - v1) % (n2 - n1), 0, "{}", p.question);
      let d = (v2 - v1) / (n2 - n1);
      assert_eq!(coefficients(&p.answer.display, ["n", ""]), [d, v1 - d * n1], "{}", p.question);
    }
  }

  #[test]
  fn arithmetic_series_matches_term_by_term_sum() {
    for p in draws(generate_arith_sum, 35) {
      let a = int(between(&p.question, "First term } ", ","));
      let d = int(between(&p.question, "difference } ", " "));
      let n = int(between(&p.question, "first } ", " "));
      let sum: i64 = (0..n).map(|k| a + k * d).sum();
      assert_eq!(p.answer.display, sum.to_string(), "{}", p.question);
    }
  }

  #[test]
  fn geometric_general_term_matches_first_term_and_ratio() {
    for p in draws(generate_geo_seq, 36) {
      let (a, r) = if p.question.starts_with("a_2") {
        let a2 = int(between(&p.question, "a_2 = ", ","));
        let a3 = int(between(&p.question, "a_3 = ", " "));
        assert_eq!(a3 % a2, 0, "{}", p.question);
        let r = a3 / a2;
        (a2 / r, r)
      } else {
        (int(between(&p.question, "First term } ", ",")), int(between(&p.question, "ratio } ", " ")))
      };
      let display = p.answer.display.as_str();
      let (coef, power) = match display.split_once(" \\cdot ") {
        Some((coef, power)) => (int(coef), power),
        None => (1, display),
      };
      let base = power.strip_suffix("^{n-1}").unwrap_or_else(|| panic!("{display}"));
      let base = int(base.trim_start_matches('(').trim_end_matches(')'));
      assert_eq!((coef, base), (a, r), "{}", p.question);
    }
  }

  #[test]
  fn geometric_series_matches_term_by_term_sum() {
    for p in draws(generate_geo_sum, 37) {
      let a = int(between(&p.question, "First term } ", ","));
      let r = int(between(&p.question, "ratio } ", " "));
      let n = int(between(&p.question, "first } ", " "));
      let sum: i64 = (0..n as u32).map(|k| a * r.pow(k)).sum();
      assert_eq!(p.answer.display, sum.to_string(), "{}", p.question);
    }
  }

  #[test]
  fn sigma_matches_term_by_term_sum() {
    for p in draws(generate_sigma, 32) {
      let upper = int(between(&p.question, "^{", "}"));
      assert!(upper >= 5, "{}", p.question);
      let [a, b] = coefficients(between(&p.question, "} (", ")"), ["k", ""]);
      let sum: i64 = (1..=upper).map(|k| a * k + b).sum();
      assert_eq!(p.answer.display, sum.to_string(), "{}", p.question);
    }
  }

  #[test]
  fn statistics_follow_linearity_rules() {
    for p in draws(generate_stat, 38) {
      let given = int(between(&p.question, "(X) = ", " "));
      let (_, target) = p.question.split_once("\\text{ : } ").unwrap();
      let [a, b] = coefficients(between(target, "(", ")"), ["X", ""]);
      // E(aX + b) = aE(X) + b, V(aX + b) = a^2 V(X), sigma(aX + b) = |a| sigma(X)
      let expected = if p.question.starts_with("E(X)") {
        a * given + b
      } else if p.question.starts_with("V(X)") {
        a * a * given
      } else {
        assert!(p.question.starts_with("\\sigma(X)"), "{}", p.question);
        a.abs() * given
      };
      assert_eq!(p.answer.display, expected.to_string(), "{}", p.question);
    }
  }

  #[test]
  fn easy_statistics_only_asks_for_the_mean() {
    let mut rng = StdRng::seed_from_u64(33);
    for _ in 0..50 {
      let p = generate_stat(Size::Digits(1), Difficulty::Easy, &mut rng);
      assert!(p.question.starts_with("E(X)"));
    }
  }
}
