//! Mixed arithmetic: random binary expression trees.
//!
//! A tree is grown with a difficulty-controlled depth and branch probability,
//! rendered once with minimal parentheses and evaluated structurally (the
//! rendered string is never re-parsed). Trees that evaluate to zero or
//! overflow are rejected and regrown a bounded number of times.

use rand::{Rng, RngCore};
use tracing::warn;

use crate::domain::{Answer, Difficulty, Problem, ProblemKind, Size};
use crate::numeric::random_int;
use crate::seeds::mixed_fallback;

/// Attempts before the mixed generator gives up and serves the fallback.
pub const MIXED_MAX_ATTEMPTS: usize = 16;

const LEAF_PRECEDENCE: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
  Add,
  Sub,
  Mul,
}

impl Op {
  pub const ALL: [Op; 3] = [Op::Add, Op::Sub, Op::Mul];

  fn precedence(self) -> u8 {
    match self {
      Op::Add | Op::Sub => 1,
      Op::Mul => 2,
    }
  }

  fn symbol(self) -> &'static str {
    match self {
      Op::Add => "+",
      Op::Sub => "-",
      Op::Mul => "\\times",
    }
  }

  // a - (b - c) != a - b - c, but a + (b - c) == a + b - c
  fn right_operand_needs_grouping(self) -> bool {
    matches!(self, Op::Sub)
  }

  fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
    match self {
      Op::Add => lhs.checked_add(rhs),
      Op::Sub => lhs.checked_sub(rhs),
      Op::Mul => lhs.checked_mul(rhs),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
  Leaf(i64),
  Node { op: Op, lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
  pub fn node(op: Op, lhs: Expr, rhs: Expr) -> Self {
    Expr::Node { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
  }

  /// Structural evaluation. `None` on overflow.
  pub fn eval(&self) -> Option<i64> {
    match self {
      Expr::Leaf(v) => Some(*v),
      Expr::Node { op, lhs, rhs } => op.apply(lhs.eval()?, rhs.eval()?),
    }
  }

  pub fn render(&self) -> String {
    self.render_with_precedence().0
  }

  fn render_with_precedence(&self) -> (String, u8) {
    match self {
      Expr::Leaf(v) => (v.to_string(), LEAF_PRECEDENCE),
      Expr::Node { op, lhs, rhs } => {
        let (left, left_prec) = lhs.render_with_precedence();
        let (right, right_prec) = rhs.render_with_precedence();
        let parent = op.precedence();

        let left = if left_prec < parent { format!("({})", left) } else { left };
        let right = if right_prec < parent || (right_prec == parent && op.right_operand_needs_grouping()) {
          format!("({})", right)
        } else {
          right
        };
        (format!("{} {} {}", left, op.symbol(), right), parent)
      }
    }
  }

  pub fn leaf_count(&self) -> usize {
    match self {
      Expr::Leaf(_) => 1,
      Expr::Node { lhs, rhs, .. } => lhs.leaf_count() + rhs.leaf_count(),
    }
  }
}

/// Shape of the random trees for one difficulty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeParams {
  pub max_depth: u32,
  pub branch_probability: f64,
  pub leaf_digits: u32,
}

impl TreeParams {
  pub fn for_difficulty(difficulty: Difficulty, size: Size) -> Self {
    let leaf_digits = size.left().min(2);
    match difficulty {
      Difficulty::Easy => TreeParams { max_depth: 2, branch_probability: 0.5, leaf_digits: 1 },
      Difficulty::Normal => TreeParams { max_depth: 3, branch_probability: 0.65, leaf_digits },
      Difficulty::Hard => TreeParams { max_depth: 4, branch_probability: 0.8, leaf_digits },
    }
  }
}

/// Grow one tree. The root always branches so there is at least one operator.
pub fn build_tree<R: Rng + ?Sized>(rng: &mut R, params: &TreeParams) -> Expr {
  let depth = params.max_depth.max(1) - 1;
  let op = Op::ALL[rng.gen_range(0..Op::ALL.len())];
  Expr::node(op, grow(rng, depth, params), grow(rng, depth, params))
}

fn grow<R: Rng + ?Sized>(rng: &mut R, depth: u32, params: &TreeParams) -> Expr {
  if depth == 0 || !rng.gen_bool(params.branch_probability) {
    let max_leaf = 10_i64.pow(params.leaf_digits.clamp(1, 2)) - 1;
    return Expr::Leaf(random_int(rng, 1, max_leaf));
  }
  let op = Op::ALL[rng.gen_range(0..Op::ALL.len())];
  Expr::node(op, grow(rng, depth - 1, params), grow(rng, depth - 1, params))
}

/// Grow trees until one evaluates to a non-zero value, at most `max_attempts` times.
pub fn sample_nonzero<R: Rng + ?Sized>(rng: &mut R, params: &TreeParams, max_attempts: usize) -> Option<(Expr, i64)> {
  for _ in 0..max_attempts {
    let tree = build_tree(rng, params);
    match tree.eval() {
      Some(v) if v != 0 => return Some((tree, v)),
      _ => continue,
    }
  }
  None
}

pub fn generate_mixed(size: Size, difficulty: Difficulty, rng: &mut dyn RngCore) -> Problem {
  let params = TreeParams::for_difficulty(difficulty, size);
  generate_with_attempts(rng, &params, MIXED_MAX_ATTEMPTS)
}

pub fn generate_with_attempts(rng: &mut dyn RngCore, params: &TreeParams, max_attempts: usize) -> Problem {
  match sample_nonzero(rng, params, max_attempts) {
    Some((tree, value)) => Problem::new(
      "arith_mixed",
      "Arithmetic (mixed)",
      tree.render(),
      Answer::number(value),
      ProblemKind::MathInput,
    ),
    None => {
      warn!(target: "math_drill", max_attempts, ?params, "Every sampled expression was degenerate; serving fallback");
      mixed_fallback()
    }
  }
}
