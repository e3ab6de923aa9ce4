//! Math II: polynomial remainders, logarithms and exponentials, integrals,
//! standard-angle trigonometry and coordinate geometry.

use rand::{Rng, RngCore};

use super::{pick, poly_markup, shifted};
use crate::domain::{Answer, AnswerValue, Difficulty, Problem, ProblemKind, Size};
use crate::numeric::{random_int, reduced_markup, scaled_random_int};

pub fn generate_remainder_thm(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let max_k = if difficulty == Difficulty::Hard { 4 } else { 3 };
  let k = random_int(rng, 1, max_k) * if rng.gen_bool(0.5) { 1 } else { -1 };
  let b = scaled_random_int(rng, -5, 5, difficulty);
  let c = scaled_random_int(rng, -5, 5, difficulty);
  let cubic = if difficulty == Difficulty::Hard { random_int(rng, 1, 2) } else { 0 };
  remainder_from(cubic, b, c, k)
}

/// `(cubic x^3 + x^2 + bx + c) ÷ (x - k)`. The remainder is the value at `k`.
pub fn remainder_from(cubic: i64, b: i64, c: i64, k: i64) -> Problem {
  let remainder = cubic * k * k * k + k * k + b * k + c;
  let poly = poly_markup(&[(cubic, "x^3"), (1, "x^2"), (b, "x"), (c, "")]);
  Problem::new(
    "math2_rem",
    "Remainder Theorem",
    format!("({}) \\div ({}) \\text{{ : remainder}}", poly, shifted("x", k)),
    Answer::number(remainder),
    ProblemKind::MathInput,
  )
}

/// `log_b x = n`, or `log_b x + log_b (x - m) = n` built from `x = b^i`,
/// `x - m = b^j` so the only admissible root is an integer.
pub fn generate_log_eq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  if difficulty == Difficulty::Easy || rng.gen_bool(0.5) {
    let base = random_int(rng, 2, if difficulty == Difficulty::Easy { 3 } else { 5 });
    let n = if difficulty == Difficulty::Hard { random_int(rng, -2, 3) } else { random_int(rng, 1, 3) };
    log_power_from(base, n)
  } else {
    let base = random_int(rng, 2, 3);
    let i = random_int(rng, 1, 3);
    let j = random_int(rng, 0, i - 1);
    log_sum_from(base, i, j)
  }
}

/// `log_base x = n`, so `x = base^n`.
pub fn log_power_from(base: i64, n: i64) -> Problem {
  let power = base.pow(n.unsigned_abs() as u32);
  let answer = if n >= 0 {
    Answer::number(power)
  } else {
    let display = reduced_markup(1, power);
    Answer::new(vec![AnswerValue::from(display.clone())], display)
  };
  Problem::new(
    "math2_log",
    "Logarithmic Equation",
    format!("\\log_{{{}}} x = {} \\text{{ : find }} x", base, n),
    answer,
    ProblemKind::MathInput,
  )
}

/// Sum form with root `x = base^i` and `x - m = base^j`. Requires `j < i`.
pub fn log_sum_from(base: i64, i: i64, j: i64) -> Problem {
  let x = base.pow(i as u32);
  let m = x - base.pow(j as u32);
  Problem::new(
    "math2_log",
    "Logarithmic Equation",
    format!(
      "\\log_{{{b}}} x + \\log_{{{b}}} ({}) = {} \\text{{ : find }} x",
      shifted("x", m),
      i + j,
      b = base
    ),
    Answer::number(x),
    ProblemKind::MathInput,
  )
}

/// `(p^s)^x = p^t`, so `x = t / s`.
pub fn generate_exp_eq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let prime = *pick(rng, &[2_i64, 3, 5]);
  let s = match difficulty {
    Difficulty::Easy => 1,
    Difficulty::Normal => random_int(rng, 1, 2),
    Difficulty::Hard => random_int(rng, 1, 3),
  };
  let t = if difficulty == Difficulty::Hard { random_int(rng, -3, 4) } else { random_int(rng, 1, 4) };

  let base = prime.pow(s as u32);
  let magnitude = prime.pow(t.unsigned_abs() as u32);
  let rhs = if t >= 0 { magnitude.to_string() } else { format!("\\frac{{1}}{{{}}}", magnitude) };

  let display = reduced_markup(t, s);
  let value = if t % s == 0 { AnswerValue::Number(t / s) } else { AnswerValue::from(display.clone()) };
  Problem::new(
    "math2_exp",
    "Exponential Equation",
    format!("{}^x = {} \\text{{ : find }} x", base, rhs),
    Answer::new(vec![value], display),
    ProblemKind::MathInput,
  )
}

/// `∫_a^b (3c x^2 + m x + n) dx` with even `m`, so the value is an integer.
pub fn generate_def_integral(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let m = random_int(rng, 1, 3) * 2;
  let n = scaled_random_int(rng, -5, 5, difficulty);
  let c = if difficulty == Difficulty::Hard { random_int(rng, 1, 2) } else { 0 };
  let lower = random_int(rng, 0, 2);
  let upper = lower + random_int(rng, 1, 2);

  let antiderivative = |x: i64| c * x * x * x + (m / 2) * x * x + n * x;
  let value = antiderivative(upper) - antiderivative(lower);

  let integrand = poly_markup(&[(3 * c, "x^2"), (m, "x"), (n, "")]);
  Problem::new(
    "math2_int",
    "Definite Integral",
    format!("\\int_{{{}}}^{{{}}} ({})\\, dx", lower, upper, integrand),
    Answer::number(value),
    ProblemKind::MathInput,
  )
}

struct StandardAngle {
  degrees: i64,
  radians: &'static str,
  sin: &'static str,
  cos: &'static str,
  tan: Option<&'static str>,
}

const fn angle(degrees: i64, radians: &'static str, sin: &'static str, cos: &'static str, tan: Option<&'static str>) -> StandardAngle {
  StandardAngle { degrees, radians, sin, cos, tan }
}

const STANDARD_ANGLES: &[StandardAngle] = &[
  angle(0, "0", "0", "1", Some("0")),
  angle(30, "\\frac{\\pi}{6}", "\\frac{1}{2}", "\\frac{\\sqrt{3}}{2}", Some("\\frac{1}{\\sqrt{3}}")),
  angle(45, "\\frac{\\pi}{4}", "\\frac{1}{\\sqrt{2}}", "\\frac{1}{\\sqrt{2}}", Some("1")),
  angle(60, "\\frac{\\pi}{3}", "\\frac{\\sqrt{3}}{2}", "\\frac{1}{2}", Some("\\sqrt{3}")),
  angle(90, "\\frac{\\pi}{2}", "1", "0", None),
  angle(120, "\\frac{2\\pi}{3}", "\\frac{\\sqrt{3}}{2}", "-\\frac{1}{2}", Some("-\\sqrt{3}")),
  angle(135, "\\frac{3\\pi}{4}", "\\frac{1}{\\sqrt{2}}", "-\\frac{1}{\\sqrt{2}}", Some("-1")),
  angle(150, "\\frac{5\\pi}{6}", "\\frac{1}{2}", "-\\frac{\\sqrt{3}}{2}", Some("-\\frac{1}{\\sqrt{3}}")),
  angle(180, "\\pi", "0", "-1", Some("0")),
  angle(210, "\\frac{7\\pi}{6}", "-\\frac{1}{2}", "-\\frac{\\sqrt{3}}{2}", Some("\\frac{1}{\\sqrt{3}}")),
  angle(225, "\\frac{5\\pi}{4}", "-\\frac{1}{\\sqrt{2}}", "-\\frac{1}{\\sqrt{2}}", Some("1")),
  angle(240, "\\frac{4\\pi}{3}", "-\\frac{\\sqrt{3}}{2}", "-\\frac{1}{2}", Some("\\sqrt{3}")),
  angle(270, "\\frac{3\\pi}{2}", "-1", "0", None),
  angle(300, "\\frac{5\\pi}{3}", "-\\frac{\\sqrt{3}}{2}", "\\frac{1}{2}", Some("-\\sqrt{3}")),
  angle(315, "\\frac{7\\pi}{4}", "-\\frac{1}{\\sqrt{2}}", "\\frac{1}{\\sqrt{2}}", Some("-1")),
  angle(330, "\\frac{11\\pi}{6}", "-\\frac{1}{2}", "\\frac{\\sqrt{3}}{2}", Some("-\\frac{1}{\\sqrt{3}}")),
];

/// Exact value of sin/cos/tan at a standard angle. Easy stays in the first
/// quadrant, Hard writes the angle in radians.
pub fn generate_trig_value(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let pool: Vec<&StandardAngle> = STANDARD_ANGLES
    .iter()
    .filter(|a| difficulty != Difficulty::Easy || a.degrees <= 90)
    .collect();
  let row = *pick(rng, &pool);

  let mut functions: Vec<(&str, &str)> = vec![("sin", row.sin), ("cos", row.cos)];
  if let Some(tan) = row.tan {
    functions.push(("tan", tan));
  }
  let &(name, value) = pick(rng, &functions);

  let argument = if difficulty == Difficulty::Hard {
    row.radians.to_string()
  } else {
    format!("{}^\\circ", row.degrees)
  };

  Problem::new(
    "math2_trig",
    "Trigonometric Value",
    format!("\\{} {}", name, argument),
    Answer::display_only(value),
    ProblemKind::MathInput,
  )
}

/// `x^2 + y^2 + Dx + Ey + F = 0` from a center and an integer radius.
pub fn generate_circle_eq(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let a = scaled_random_int(rng, -5, 5, difficulty);
  let b = scaled_random_int(rng, -5, 5, difficulty);
  let r = random_int(rng, 1, if difficulty == Difficulty::Hard { 8 } else { 5 });
  circle_from(a, b, r, rng.gen_bool(0.5))
}

/// Circle centered at `(a, b)` with radius `r`, expanded to general form.
pub fn circle_from(a: i64, b: i64, r: i64, ask_center: bool) -> Problem {
  let equation = poly_markup(&[(1, "x^2"), (1, "y^2"), (-2 * a, "x"), (-2 * b, "y"), (a * a + b * b - r * r, "")]);
  let (target, answer) = if ask_center {
    ("center", Answer::new(vec![a.into(), b.into()], format!("({}, {})", a, b)))
  } else {
    ("radius", Answer::number(r))
  };

  Problem::new(
    "math2_circle",
    "Circle Equation",
    format!("{} = 0 \\text{{ : {}}}", equation, target),
    answer,
    ProblemKind::MathInput,
  )
}

/// Pythagorean triples `(p, q, hypotenuse)`.
const TRIPLES: &[(i64, i64, i64)] = &[(3, 4, 5), (6, 8, 10), (5, 12, 13), (8, 15, 17), (7, 24, 25)];

fn signed<R: Rng + ?Sized>(rng: &mut R, v: i64) -> i64 {
  if rng.gen_bool(0.5) { v } else { -v }
}

/// Distance between two points, or from a point to a line whose normal is a
/// Pythagorean pair, so the result is rational.
pub fn generate_coord_distance(_size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let &(p, q, h) = pick(rng, TRIPLES);
  let (p, q) = if rng.gen_bool(0.5) { (p, q) } else { (q, p) };
  let x0 = scaled_random_int(rng, -5, 5, difficulty);
  let y0 = scaled_random_int(rng, -5, 5, difficulty);

  if difficulty == Difficulty::Easy || rng.gen_bool(0.5) {
    let x1 = x0 + signed(rng, p);
    let y1 = y0 + signed(rng, q);
    return Problem::new(
      "math2_coord",
      "Coordinate Geometry",
      format!("\\text{{Distance between }} A({}, {}),\\ B({}, {})", x0, y0, x1, y1),
      Answer::number(h),
      ProblemKind::MathInput,
    );
  }

  let a = signed(rng, p);
  let c = scaled_random_int(rng, -10, 10, difficulty);
  point_line_distance((x0, y0), (a, q, c), h)
}

/// Distance from `(x0, y0)` to `ax + by + c = 0`, where `h` is the length
/// of the normal `(a, b)`.
pub fn point_line_distance((x0, y0): (i64, i64), (a, b, c): (i64, i64, i64), h: i64) -> Problem {
  let numerator = (a * x0 + b * y0 + c).abs();
  let display = reduced_markup(numerator, h);
  let value = if numerator % h == 0 { AnswerValue::Number(numerator / h) } else { AnswerValue::from(display.clone()) };

  Problem::new(
    "math2_coord",
    "Coordinate Geometry",
    format!(
      "\\text{{Distance from }} P({}, {}) \\text{{ to }} {} = 0",
      x0,
      y0,
      poly_markup(&[(a, "x"), (b, "y"), (c, "")])
    ),
    Answer::new(vec![value], display),
    ProblemKind::MathInput,
  )
}
