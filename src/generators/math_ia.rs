//! Math I·A: quadratics, expectation, trigonometric ratios, law of cosines.
//!
//! Quadratics are always built from their factors and then expanded, so the
//! roots are known exactly. The trigonometry generators draw from curated
//! tables of algebraically consistent values.

use rand::{Rng, RngCore};

use super::{pick, poly_markup};
use crate::domain::{Answer, AnswerValue, Difficulty, Problem, ProblemKind, Size};
use crate::numeric::{gcd, random_int, reduced_markup, scaled_random_int};

/// Build `(ax + b)(cx + d) = 0` expanded, with roots `-b/a` and `-d/c`.
/// `a` and `c` must be positive.
pub fn quad_eq_from_factors(a: i64, b: i64, c: i64, d: i64) -> Problem {
  let (mut qa, mut qb, mut qc) = (a * c, a * d + b * c, b * d);
  let common = gcd(gcd(qa, qb), qc);
  if common > 1 {
    qa /= common;
    qb /= common;
    qc /= common;
  }

  let root1 = reduced_markup(-b, a);
  let root2 = reduced_markup(-d, c);
  let (values, display) = if root1 == root2 {
    (vec![AnswerValue::from(root1.clone())], format!("x = {}", root1))
  } else {
    let display = format!("x = {}, {}", root1, root2);
    (vec![AnswerValue::from(root1), AnswerValue::from(root2)], display)
  };

  Problem::new(
    "mathIA_quad",
    "Quadratic Equation",
    format!("{} = 0", poly_markup(&[(qa, "x^2"), (qb, "x"), (qc, "")])),
    Answer::new(values, display),
    ProblemKind::MathInputPoly,
  )
}

pub fn generate_quad_eq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let (a, c) = match difficulty {
    Difficulty::Easy => (1, 1),
    Difficulty::Normal => (random_int(rng, 1, 3), random_int(rng, 1, 3)),
    Difficulty::Hard => (random_int(rng, 1, 5), random_int(rng, 1, 5)),
  };
  let b = scaled_random_int(rng, -5, 5, difficulty);
  let d = scaled_random_int(rng, -5, 5, difficulty);
  quad_eq_from_factors(a, b, c, d)
}

/// Vertex of `y = a(x - p)^2 + q`, shown expanded.
pub fn generate_quad_vertex(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let magnitude = match difficulty {
    Difficulty::Easy => 1,
    Difficulty::Normal => random_int(rng, 1, 2),
    Difficulty::Hard => random_int(rng, 1, 3),
  };
  let a = if difficulty != Difficulty::Easy && rng.gen_bool(0.5) { -magnitude } else { magnitude };
  let p = scaled_random_int(rng, -5, 5, difficulty);
  let q = scaled_random_int(rng, -5, 5, difficulty);
  vertex_from(a, p, q)
}

/// `y = a(x - p)^2 + q` expanded, with vertex `(p, q)`.
pub fn vertex_from(a: i64, p: i64, q: i64) -> Problem {
  let poly = poly_markup(&[(a, "x^2"), (-2 * a * p, "x"), (a * p * p + q, "")]);
  Problem::new(
    "mathIA_vertex",
    "Quadratic Function",
    format!("y = {} \\text{{ : vertex}}", poly),
    Answer::new(vec![p.into(), q.into()], format!("({}, {})", p, q)),
    ProblemKind::MathInput,
  )
}

/// Solve `k(x - r1)(x - r2) > 0` or `< 0` for integer roots `r1 < r2`.
pub fn generate_quad_ineq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let r1 = scaled_random_int(rng, -5, 5, difficulty);
  let r2 = r1 + random_int(rng, 1, 6);
  let k = if difficulty == Difficulty::Hard { random_int(rng, 1, 3) } else { 1 };
  let greater = rng.gen_bool(0.5);
  ineq_from(k, r1, r2, greater)
}

/// `k(x - r1)(x - r2) > 0` when `greater`, else `< 0`. Needs `k > 0` and `r1 < r2`.
pub fn ineq_from(k: i64, r1: i64, r2: i64, greater: bool) -> Problem {
  let poly = poly_markup(&[(k, "x^2"), (-k * (r1 + r2), "x"), (k * r1 * r2, "")]);
  let (relation, display) = if greater {
    (">", format!("x < {}, {} < x", r1, r2))
  } else {
    ("<", format!("{} < x < {}", r1, r2))
  };

  Problem::new(
    "mathIA_ineq",
    "Quadratic Inequality",
    format!("{} {} 0", poly, relation),
    Answer::new(vec![r1.into(), r2.into()], display),
    ProblemKind::Text,
  )
}

/// Expected score of one die roll where faces are grouped and each group pays
/// a multiple of ten.
pub fn generate_expected_val(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let (groups, max_tens): (&[i64], i64) = match difficulty {
    Difficulty::Easy => (&[2, 2, 2], 3),
    Difficulty::Normal => (&[2, 2, 2], 5),
    Difficulty::Hard => (&[1, 2, 3], 10),
  };

  let mut face = 1;
  let mut parts = Vec::with_capacity(groups.len());
  let mut weighted = 0;
  for &faces in groups {
    let score = 10 * random_int(rng, 1, max_tens);
    let labels: Vec<String> = (face..face + faces).map(|f| f.to_string()).collect();
    parts.push(format!("{} \\to {}", labels.join(","), score));
    weighted += faces * score;
    face += faces;
  }

  let display = reduced_markup(weighted, 6);
  let value = if weighted % 6 == 0 { AnswerValue::Number(weighted / 6) } else { AnswerValue::from(display.clone()) };
  Problem::new(
    "mathIA_exp",
    "Expected Value",
    format!("\\text{{Die score }} {} \\text{{ : expected value}}", parts.join(",\\ ")),
    Answer::new(vec![value], display),
    ProblemKind::MathInput,
  )
}

/// Acute-angle `(sin, cos, tan)` triples with exact values.
const TRIG_RATIOS: &[(&str, &str, &str)] = &[
  ("\\frac{3}{5}", "\\frac{4}{5}", "\\frac{3}{4}"),
  ("\\frac{4}{5}", "\\frac{3}{5}", "\\frac{4}{3}"),
  ("\\frac{5}{13}", "\\frac{12}{13}", "\\frac{5}{12}"),
  ("\\frac{12}{13}", "\\frac{5}{13}", "\\frac{12}{5}"),
  ("\\frac{8}{17}", "\\frac{15}{17}", "\\frac{8}{15}"),
  ("\\frac{1}{2}", "\\frac{\\sqrt{3}}{2}", "\\frac{1}{\\sqrt{3}}"),
  ("\\frac{\\sqrt{3}}{2}", "\\frac{1}{2}", "\\sqrt{3}"),
  ("\\frac{1}{\\sqrt{2}}", "\\frac{1}{\\sqrt{2}}", "1"),
];

/// Rows built from Pythagorean triples (no radicals).
const TRIG_RATIOS_RATIONAL: usize = 5;

pub fn generate_trig_ratio(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let pool = if difficulty == Difficulty::Easy { &TRIG_RATIOS[..TRIG_RATIOS_RATIONAL] } else { TRIG_RATIOS };
  let &(sin, cos, tan) = pick(rng, pool);
  let ask_tan = rng.gen_bool(0.5);

  // Hard gives the cosine instead of the sine.
  let (given_fn, given, target_fn, target) = match (difficulty == Difficulty::Hard, ask_tan) {
    (false, false) => ("sin", sin, "cos", cos),
    (false, true) => ("sin", sin, "tan", tan),
    (true, false) => ("cos", cos, "sin", sin),
    (true, true) => ("cos", cos, "tan", tan),
  };

  Problem::new(
    "mathIA_trig",
    "Trigonometric Ratio",
    format!("\\{} \\theta = {} \\text{{ (acute)}},\\ \\{} \\theta = ?", given_fn, given, target_fn),
    Answer::display_only(target),
    ProblemKind::MathInput,
  )
}

/// Integer triangles `(a, b, c, C)` where `C` is the angle opposite `c` in degrees.
const COSINE_TRIANGLES: &[(i64, i64, i64, i64)] = &[
  (3, 5, 7, 120),
  (7, 8, 13, 120),
  (5, 16, 19, 120),
  (6, 10, 14, 120),
  (5, 8, 7, 60),
  (3, 8, 7, 60),
  (8, 15, 13, 60),
  (7, 15, 13, 60),
  (3, 4, 5, 90),
  (5, 12, 13, 90),
  (8, 15, 17, 90),
];

pub fn generate_law_cosines(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let pool: Vec<&(i64, i64, i64, i64)> = COSINE_TRIANGLES
    .iter()
    .filter(|t| difficulty != Difficulty::Easy || t.3 != 120)
    .collect();
  let &&(a, b, c, angle) = pick(rng, &pool);

  let (question, answer) = if rng.gen_bool(0.5) {
    (
      format!("\\triangle ABC:\\ a = {},\\ b = {},\\ c = {} \\text{{ : find }} C", a, b, c),
      Answer::new(vec![angle.into()], format!("{}^\\circ", angle)),
    )
  } else {
    (
      format!("\\triangle ABC:\\ a = {},\\ b = {},\\ C = {}^\\circ \\text{{ : find }} c", a, b, angle),
      Answer::number(c),
    )
  };

  Problem::new("mathIA_cosine", "Law of Cosines", question, answer, ProblemKind::MathInput)
}
