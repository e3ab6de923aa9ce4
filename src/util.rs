//! Small utility helpers used across modules.

/// Log-safe truncation for user-supplied strings. Cuts on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

/// Split a comma-separated query value (`topics=a,b`), dropping blanks.
pub fn split_csv(s: &str) -> Vec<String> {
  s.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}
