//! Numeric helpers shared by every generator: bounded sampling, difficulty
//! scaling, digit ranges and fraction handling.

use rand::Rng;

use crate::domain::Difficulty;

/// Largest digit count honoured by `digit_range`. Two 9-digit operands still
/// multiply inside `i64`.
pub const MAX_DIGITS: u32 = 9;

/// Uniform integer in `[min, max]` (inclusive). Inverted bounds are swapped.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
  let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
  rng.gen_range(lo..=hi)
}

/// Sample after scaling `(min, max)` by the difficulty factor.
///
/// Both bounds are rounded up, put back in order, and a single-point range is
/// widened by one so Easy never collapses to a constant.
pub fn scaled_random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64, difficulty: Difficulty) -> i64 {
  let (lo, hi) = scaled_bounds(min, max, difficulty);
  random_int(rng, lo, hi)
}

pub fn scaled_bounds(min: i64, max: i64, difficulty: Difficulty) -> (i64, i64) {
  let scale = difficulty.scale();
  let mut lo = (min as f64 * scale).ceil() as i64;
  let mut hi = (max as f64 * scale).ceil() as i64;
  if lo > hi {
    std::mem::swap(&mut lo, &mut hi);
  }
  if lo == hi {
    hi += 1;
  }
  (lo, hi)
}

/// Inclusive range of integers with exactly `digits` decimal digits.
pub fn digit_range(digits: u32) -> (i64, i64) {
  let d = digits.clamp(1, MAX_DIGITS);
  (10_i64.pow(d - 1), 10_i64.pow(d) - 1)
}

/// Uniform integer with exactly `digits` digits.
pub fn random_with_digits<R: Rng + ?Sized>(rng: &mut R, digits: u32) -> i64 {
  let (lo, hi) = digit_range(digits);
  random_int(rng, lo, hi)
}

/// Euclid. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> i64 {
  let (mut a, mut b) = (a.abs(), b.abs());
  while b != 0 {
    let r = a % b;
    a = b;
    b = r;
  }
  a
}

/// Divide numerator and denominator by their gcd. Signs are left where they are.
pub fn simplify_fraction(num: i64, den: i64) -> (i64, i64) {
  let common = gcd(num, den);
  if common == 0 {
    return (num, den);
  }
  (num / common, den / common)
}

/// Render a fraction as markup: an integer, a bare negative integer, or
/// `\frac{n}{d}` with the sign on the numerator. `den == 0` renders `undef`.
pub fn fraction_markup(num: i64, den: i64) -> String {
  if den == 0 {
    return "undef".to_string();
  }
  let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
  if num == 0 {
    return "0".to_string();
  }
  if den == 1 {
    return num.to_string();
  }
  format!("\\frac{{{}}}{{{}}}", num, den)
}

/// Simplify and render in one step.
pub fn reduced_markup(num: i64, den: i64) -> String {
  let (n, d) = simplify_fraction(num, den);
  fraction_markup(n, d)
}
