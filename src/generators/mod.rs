//! Per-subtopic problem generators.
//!
//! Every generator has the same shape (`GenerateFn`): it receives the resolved
//! size, the difficulty and an injected random source, and returns a finished
//! `Problem`. Generators never fail; an infeasible draw ends in a documented
//! fallback instance (see `crate::seeds`).

use rand::{Rng, RngCore};

use crate::domain::{Difficulty, Problem, Size};

pub mod arithmetic;
pub mod expression;
pub mod math_b;
pub mod math_ia;
pub mod math_ii;

pub type GenerateFn = fn(Size, Difficulty, &mut dyn RngCore) -> Problem;

/// Uniform pick from a curated table. Tables are non-empty constants.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
  &items[rng.gen_range(0..items.len())]
}

/// Render a polynomial from `(coefficient, monomial)` pairs, highest degree
/// first. Zero terms are skipped, unit coefficients are implicit.
///
/// `[(1, "x^2"), (-7, "x"), (12, "")]` renders `x^2 - 7x + 12`.
pub(crate) fn poly_markup(terms: &[(i64, &str)]) -> String {
  let mut out = String::new();
  for &(coef, mono) in terms {
    if coef == 0 {
      continue;
    }
    let magnitude = coef.unsigned_abs();
    let body = if mono.is_empty() {
      magnitude.to_string()
    } else if magnitude == 1 {
      mono.to_string()
    } else {
      format!("{}{}", magnitude, mono)
    };
    if out.is_empty() {
      if coef < 0 {
        out.push('-');
      }
    } else {
      out.push_str(if coef < 0 { " - " } else { " + " });
    }
    out.push_str(&body);
  }
  if out.is_empty() {
    out.push('0');
  }
  out
}

/// `x - 3`, `x + 2`, or plain `x` for a shift of zero.
pub(crate) fn shifted(var: &str, root: i64) -> String {
  match root {
    0 => var.to_string(),
    r if r > 0 => format!("{} - {}", var, r),
    r => format!("{} + {}", var, -r),
  }
}
