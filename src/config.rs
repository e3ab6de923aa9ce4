//! Loading engine configuration (session defaults) from TOML.
//!
//! ```toml
//! [defaults]
//! difficulty = "Normal"
//! digits = 2
//! count = 10
//! [defaults.arithmetic]
//! add = [2, 2]
//! div = [2, 1]
//! ```
//!
//! A missing top-level field keeps its built-in value. A present
//! `[defaults.arithmetic]` table replaces the built-in per-operation table as
//! a whole; operations it leaves out fall back to `digits`.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

use math_drill::{Configuration, Difficulty, Size};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct EngineConfig {
  #[serde(default)]
  pub defaults: SessionDefaults,
}

/// Server-side defaults that a request `Configuration` is merged over.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
  pub difficulty: Difficulty,
  pub digits: Size,
  pub count: usize,
  pub arithmetic: HashMap<String, [u32; 2]>,
}

impl Default for SessionDefaults {
  fn default() -> Self {
    let arithmetic = [("add", [2, 2]), ("sub", [2, 2]), ("mul", [2, 1]), ("div", [2, 1]), ("mixed", [1, 1])]
      .into_iter()
      .map(|(op, pair)| (op.to_string(), pair))
      .collect();
    Self { difficulty: Difficulty::Normal, digits: Size::Digits(2), count: 10, arithmetic }
  }
}

impl SessionDefaults {
  /// Fill every field the request left out.
  ///
  /// Per-operation precedence: request pair, then request `digits`, then
  /// default pair, then default `digits`. An explicit request `digits` drops
  /// the default per-operation table; otherwise request pairs merge over it
  /// key by key, so a request overriding `div` keeps the default `add`.
  pub fn merge(&self, request: Configuration) -> Configuration {
    let mut arithmetic = if request.digits.is_some() { HashMap::new() } else { self.arithmetic.clone() };
    arithmetic.extend(request.arithmetic.unwrap_or_default());
    Configuration {
      topics: request.topics,
      difficulty: Some(request.difficulty.unwrap_or(self.difficulty)),
      digits: Some(request.digits.unwrap_or(self.digits)),
      arithmetic: Some(arithmetic),
      count: Some(request.count.unwrap_or(self.count)),
    }
  }
}

/// Attempt to load `EngineConfig` from ENGINE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_engine_config_from_env() -> Option<EngineConfig> {
  let path = std::env::var("ENGINE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_engine_config(&s) {
      Ok(cfg) => {
        info!(target: "math_drill_backend", %path, "Loaded engine config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "math_drill_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "math_drill_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_engine_config(s: &str) -> Result<EngineConfig, toml::de::Error> {
  toml::from_str(s)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_top_level_values_and_replaces_operation_table() {
    let cfg = parse_engine_config("[defaults]\ndifficulty = \"Hard\"\n[defaults.arithmetic]\ndiv = [3, 2]\n").unwrap();
    assert_eq!(cfg.defaults.difficulty, Difficulty::Hard);
    assert_eq!(cfg.defaults.digits, Size::Digits(2));
    assert_eq!(cfg.defaults.count, 10);
    assert_eq!(cfg.defaults.arithmetic.get("div"), Some(&[3, 2]));
    assert!(cfg.defaults.arithmetic.get("add").is_none());
  }

  #[test]
  fn request_digits_replace_default_operation_table() {
    let defaults = SessionDefaults::default();
    let mut ops = HashMap::new();
    ops.insert("mul".to_string(), [3, 3]);
    let merged = defaults.merge(Configuration { digits: Some(Size::Digits(4)), arithmetic: Some(ops), ..Default::default() });
    assert_eq!(merged.digits, Some(Size::Digits(4)));
    let table = merged.arithmetic.unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table["mul"], [3, 3]);

    let merged = defaults.merge(Configuration { digits: Some(Size::Digits(4)), ..Default::default() });
    assert!(merged.arithmetic.unwrap().is_empty());
  }

  #[test]
  fn empty_file_is_all_defaults() {
    let cfg = parse_engine_config("").unwrap();
    assert_eq!(cfg.defaults.arithmetic.get("mul"), Some(&[2, 1]));
  }

  #[test]
  fn request_fields_win_over_defaults() {
    let defaults = SessionDefaults::default();
    let mut ops = HashMap::new();
    ops.insert("div".to_string(), [4, 2]);
    let merged = defaults.merge(Configuration {
      topics: vec!["arith_div".into()],
      difficulty: Some(Difficulty::Easy),
      arithmetic: Some(ops),
      ..Default::default()
    });
    assert_eq!(merged.difficulty, Some(Difficulty::Easy));
    assert_eq!(merged.digits, Some(Size::Digits(2)));
    assert_eq!(merged.count, Some(10));
    let table = merged.arithmetic.unwrap();
    assert_eq!(table["div"], [4, 2]);
    assert_eq!(table["add"], [2, 2]);
  }
}
