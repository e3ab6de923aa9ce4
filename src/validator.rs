//! Answer normalization and comparison.
//!
//! Canonical form is plain text: radicals become `sqrt(X)`, fractions `A/B`,
//! products `*`, exponents `^X` or `^(X)`. Both the user's input and the
//! stored display answer are pushed through the same normalizer, so either
//! surface syntax (typed or markup) compares equal.

use crate::domain::Answer;

/// Canonicalize a raw answer string. Idempotent.
pub fn normalize(raw: &str) -> String {
  let scanner = Scanner::new(raw.chars().filter_map(map_char).collect());
  let scanned = scanner.scan(0, scanner.chars.len(), 0);
  strip_assignment_prefix(&scanned).to_string()
}

/// True when `user_raw` matches the canonical answer.
///
/// Exact display match first, then an order-independent comparison of the
/// comma-separated parts, then a whole-string normalized comparison. Input
/// that normalizes to nothing never matches.
pub fn check_answer(user_raw: &str, answer: &Answer) -> bool {
  if user_raw == answer.display {
    return true;
  }

  let user_parts = sorted_parts(user_raw);
  if user_parts.is_empty() {
    return false;
  }
  if user_parts == sorted_parts(&answer.display) {
    return true;
  }

  let user = normalize(user_raw);
  !user.is_empty() && user == normalize(&answer.display)
}

fn sorted_parts(s: &str) -> Vec<String> {
  let mut parts: Vec<String> = s
    .split([',', '，'])
    .map(normalize)
    .filter(|p| !p.is_empty())
    .collect();
  parts.sort();
  parts
}

/// Per-character folding: whitespace and degree signs vanish, full-width
/// ASCII and the usual typographic operators collapse to plain ASCII.
fn map_char(c: char) -> Option<char> {
  if c.is_whitespace() {
    return None;
  }
  let c = match c {
    '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
    _ => c,
  };
  match c {
    '\u{2212}' | '\u{2013}' | '\u{2014}' => Some('-'),
    '×' | '·' | '∙' | '⋅' => Some('*'),
    '÷' => Some('/'),
    '°' => None,
    _ => Some(c),
  }
}

/// Groups nested deeper than this are folded as plain text.
const MAX_NESTING: usize = 32;

struct Scanner {
  chars: Vec<char>,
  /// Matching close index for every balanced `{` and `(`.
  close: Vec<Option<usize>>,
}

impl Scanner {
  fn new(chars: Vec<char>) -> Self {
    let mut close = vec![None; chars.len()];
    let mut braces = Vec::new();
    let mut parens = Vec::new();
    for (j, &c) in chars.iter().enumerate() {
      let open = match c {
        '{' => {
          braces.push(j);
          continue;
        }
        '(' => {
          parens.push(j);
          continue;
        }
        '}' => braces.pop(),
        ')' => parens.pop(),
        _ => continue,
      };
      if let Some(open) = open {
        close[open] = Some(j);
      }
    }
    Scanner { chars, close }
  }

  /// Canonical text for `chars[start..end]`.
  fn scan(&self, start: usize, end: usize, depth: usize) -> String {
    if depth >= MAX_NESTING {
      return self.flat(start, end);
    }
    let mut out = String::with_capacity(end - start);
    let mut i = start;
    while i < end {
      i = match self.chars[i] {
        '\\' => self.command(i + 1, end, depth, &mut out),
        '√' => self.radical(i + 1, end, depth, &mut out),
        '^' => self.superscript(i + 1, end, depth, &mut out),
        '{' | '}' => i + 1,
        c => {
          out.push(c);
          i + 1
        }
      };
    }
    out
  }

  /// Markup characters dropped, everything else kept verbatim.
  fn flat(&self, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(end - start);
    for &c in &self.chars[start..end] {
      match c {
        '\\' | '{' | '}' => {}
        '√' => out.push_str("sqrt"),
        c => out.push(c),
      }
    }
    out
  }

  /// Close index of the `left` group opened at `open`, if it closes before `end`.
  fn group(&self, open: usize, end: usize, left: char) -> Option<usize> {
    if open >= end || self.chars[open] != left {
      return None;
    }
    self.close[open].filter(|&c| c < end)
  }

  fn starts_with(&self, at: usize, end: usize, needle: &str) -> bool {
    needle.chars().enumerate().all(|(k, n)| at + k < end && self.chars[at + k] == n)
  }

  /// A backslash command starting right after the backslash. Returns the index
  /// to resume scanning from.
  fn command(&self, start: usize, end: usize, depth: usize, out: &mut String) -> usize {
    let mut stop = start;
    while stop < end && self.chars[stop].is_ascii_alphabetic() {
      stop += 1;
    }

    if stop == start {
      // `\,` `\;` `\:` `\!` are spacing; any other escaped char is kept.
      return if start < end && matches!(self.chars[start], ',' | ';' | ':' | '!') { start + 1 } else { start };
    }

    let name: String = self.chars[start..stop].iter().collect();
    match name.as_str() {
      "sqrt" => {
        if let Some(close) = self.group(stop, end, '{') {
          push_sqrt(out, &self.scan(stop + 1, close, depth + 1));
          return close + 1;
        }
        if stop < end && self.chars[stop].is_ascii_digit() {
          out.push_str("sqrt(");
          out.push(self.chars[stop]);
          out.push(')');
          return stop + 1;
        }
        out.push_str("sqrt");
        stop
      }
      "frac" | "dfrac" | "tfrac" => {
        if let Some(num_close) = self.group(stop, end, '{') {
          if let Some(den_close) = self.group(num_close + 1, end, '{') {
            let num = self.scan(stop + 1, num_close, depth + 1);
            let den = self.scan(num_close + 2, den_close, depth + 1);
            out.push_str(&fraction_operand(num));
            out.push('/');
            out.push_str(&fraction_operand(den));
            return den_close + 1;
          }
        }
        out.push_str(&name);
        stop
      }
      "cdot" | "times" | "ast" => {
        out.push('*');
        stop
      }
      "div" => {
        out.push('/');
        stop
      }
      "le" | "leq" => {
        out.push_str("<=");
        stop
      }
      "ge" | "geq" => {
        out.push_str(">=");
        stop
      }
      "lt" => {
        out.push('<');
        stop
      }
      "gt" => {
        out.push('>');
        stop
      }
      // Layout-only commands; a following group is scanned as plain content.
      "left" | "right" | "circ" | "quad" | "qquad" | "displaystyle" | "text" | "mathrm" => stop,
      _ => {
        out.push_str(&name);
        stop
      }
    }
  }

  /// `√X`, `√(X)` or `√{X}`.
  fn radical(&self, start: usize, end: usize, depth: usize, out: &mut String) -> usize {
    for left in ['(', '{'] {
      if let Some(close) = self.group(start, end, left) {
        push_sqrt(out, &self.scan(start + 1, close, depth + 1));
        return close + 1;
      }
    }
    let mut stop = start;
    while stop < end && (self.chars[stop].is_ascii_alphanumeric() || self.chars[stop] == '.') {
      stop += 1;
    }
    if stop > start {
      let run: String = self.chars[start..stop].iter().collect();
      push_sqrt(out, &run);
      return stop;
    }
    out.push_str("sqrt");
    start
  }

  /// `^{X}`, degree marks, or a plain caret.
  fn superscript(&self, start: usize, end: usize, depth: usize, out: &mut String) -> usize {
    if self.starts_with(start, end, "\\circ") {
      return start + "\\circ".len();
    }
    if let Some(close) = self.group(start, end, '{') {
      let inner = self.scan(start + 1, close, depth + 1);
      match inner.chars().count() {
        0 => {}
        1 => {
          out.push('^');
          out.push_str(&inner);
        }
        _ => {
          out.push_str("^(");
          out.push_str(&inner);
          out.push(')');
        }
      }
      return close + 1;
    }
    out.push('^');
    start
  }
}

fn push_sqrt(out: &mut String, inner: &str) {
  out.push_str("sqrt(");
  out.push_str(inner);
  out.push(')');
}

/// Parenthesize a fraction part holding a top-level operator (`a+b` → `(a+b)`).
fn fraction_operand(part: String) -> String {
  let mut depth = 0i32;
  let compound = part.chars().enumerate().any(|(idx, c)| {
    match c {
      '(' => depth += 1,
      ')' => depth -= 1,
      _ => {}
    }
    depth == 0 && idx > 0 && matches!(c, '+' | '-' | '*' | '/')
  });
  if compound { format!("({})", part) } else { part }
}

/// Drop every leading `name=` (`x=`, `a_n=`, `X=`).
fn strip_assignment_prefix(s: &str) -> &str {
  let mut rest = s;
  loop {
    match rest.find('=') {
      Some(pos) if pos > 0 && rest[..pos].chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
        rest = &rest[pos + 1..];
      }
      _ => return rest,
    }
  }
}
