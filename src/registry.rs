//! Topic registry: category → { label, subtopic id → generator }.
//!
//! Built once at startup and passed around by reference. It is the single
//! source of truth for which subtopic ids exist.

use std::collections::HashMap;

use serde::Serialize;

use crate::generators::{arithmetic, expression, math_b, math_ia, math_ii, GenerateFn};

/// Key of the category whose subtopics honour per-operation digit pairs.
pub const ARITHMETIC: &str = "Arithmetic";

/// Prefix shared by arithmetic ids; the rest of the id is the operation name.
pub const ARITHMETIC_PREFIX: &str = "arith_";

#[derive(Clone, Copy)]
pub struct SubtopicEntry {
  pub id: &'static str,
  pub label: &'static str,
  pub generate: GenerateFn,
}

pub struct Category {
  pub key: &'static str,
  pub label: &'static str,
  /// Whether the UI should offer per-operation digit settings.
  pub has_size_config: bool,
  pub subtopics: Vec<SubtopicEntry>,
}

/// Serializable view used by topic pickers.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryInfo {
  pub key: &'static str,
  pub label: &'static str,
  #[serde(rename = "hasSizeConfig")]
  pub has_size_config: bool,
  pub subtopics: Vec<SubtopicInfo>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SubtopicInfo {
  pub id: &'static str,
  pub label: &'static str,
}

pub struct Registry {
  categories: Vec<Category>,
  index: HashMap<&'static str, (usize, usize)>,
}

fn entry(id: &'static str, label: &'static str, generate: GenerateFn) -> SubtopicEntry {
  SubtopicEntry { id, label, generate }
}

impl Registry {
  /// The built-in catalogue.
  pub fn builtin() -> Self {
    Self::from_categories(vec![
      Category {
        key: ARITHMETIC,
        label: "Arithmetic",
        has_size_config: true,
        subtopics: vec![
          entry("arith_add", "Addition (+)", arithmetic::generate_add),
          entry("arith_sub", "Subtraction (-)", arithmetic::generate_sub),
          entry("arith_mul", "Multiplication (×)", arithmetic::generate_mul),
          entry("arith_div", "Division (÷)", arithmetic::generate_div),
          entry("arith_mixed", "Mixed expressions", expression::generate_mixed),
        ],
      },
      Category {
        key: "MathIA",
        label: "Math I·A",
        has_size_config: false,
        subtopics: vec![
          entry("quad_eq", "Quadratic equations (factoring)", math_ia::generate_quad_eq),
          entry("quad_vertex", "Quadratic functions (vertex)", math_ia::generate_quad_vertex),
          entry("quad_ineq", "Quadratic inequalities", math_ia::generate_quad_ineq),
          entry("expected_val", "Expected value", math_ia::generate_expected_val),
          entry("trig_ratio", "Trigonometric ratios", math_ia::generate_trig_ratio),
          entry("law_cosines", "Law of cosines", math_ia::generate_law_cosines),
        ],
      },
      Category {
        key: "MathII",
        label: "Math II",
        has_size_config: false,
        subtopics: vec![
          entry("remainder_thm", "Remainder theorem", math_ii::generate_remainder_thm),
          entry("log_eq", "Logarithmic equations", math_ii::generate_log_eq),
          entry("exp_eq", "Exponential equations", math_ii::generate_exp_eq),
          entry("def_integral", "Definite integrals", math_ii::generate_def_integral),
          entry("trig_value", "Trigonometric values", math_ii::generate_trig_value),
          entry("circle_eq", "Circle equations", math_ii::generate_circle_eq),
          entry("coord_distance", "Distances in the plane", math_ii::generate_coord_distance),
        ],
      },
      Category {
        key: "MathB",
        label: "Math B",
        has_size_config: false,
        subtopics: vec![
          entry("arith_seq", "Arithmetic sequences (general term)", math_b::generate_arith_seq),
          entry("arith_sum", "Arithmetic series", math_b::generate_arith_sum),
          entry("geo_seq", "Geometric sequences (general term)", math_b::generate_geo_seq),
          entry("geo_sum", "Geometric series", math_b::generate_geo_sum),
          entry("sigma", "Sigma sums", math_b::generate_sigma),
          entry("stat", "Random variable transforms", math_b::generate_stat),
        ],
      },
    ])
  }

  /// Index the given categories. A repeated id keeps its first occurrence.
  pub fn from_categories(categories: Vec<Category>) -> Self {
    let mut index = HashMap::new();
    for (ci, category) in categories.iter().enumerate() {
      for (si, sub) in category.subtopics.iter().enumerate() {
        index.entry(sub.id).or_insert((ci, si));
      }
    }
    Self { categories, index }
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  pub fn get(&self, id: &str) -> Option<(&Category, &SubtopicEntry)> {
    let &(ci, si) = self.index.get(id)?;
    let category = &self.categories[ci];
    Some((category, &category.subtopics[si]))
  }

  pub fn contains(&self, id: &str) -> bool {
    self.index.contains_key(id)
  }

  /// Every subtopic id, in catalogue order.
  pub fn ids(&self) -> Vec<&'static str> {
    self
      .categories
      .iter()
      .enumerate()
      .flat_map(|(ci, c)| {
        c.subtopics
          .iter()
          .enumerate()
          .filter(move |(si, s)| self.index.get(s.id) == Some(&(ci, *si)))
          .map(|(_, s)| s.id)
      })
      .collect()
  }

  pub fn len(&self) -> usize {
    self.index.len()
  }

  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  /// Categories, subtopics and labels for a topic picker.
  pub fn catalog(&self) -> Vec<CategoryInfo> {
    self
      .categories
      .iter()
      .map(|c| CategoryInfo {
        key: c.key,
        label: c.label,
        has_size_config: c.has_size_config,
        subtopics: c.subtopics.iter().map(|s| SubtopicInfo { id: s.id, label: s.label }).collect(),
      })
      .collect()
  }
}

/// Operation name of an arithmetic id (`arith_div` → `div`).
pub fn operation_key(id: &str) -> Option<&str> {
  id.strip_prefix(ARITHMETIC_PREFIX)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn builtin_ids_are_unique_and_indexed() {
    let registry = Registry::builtin();
    let all: Vec<&str> = registry.categories().iter().flat_map(|c| c.subtopics.iter().map(|s| s.id)).collect();
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len());
    assert_eq!(registry.len(), all.len());
    assert_eq!(registry.ids(), all);
  }

  #[test]
  fn lookup_returns_owning_category() {
    let registry = Registry::builtin();
    let (category, sub) = registry.get("arith_div").unwrap();
    assert_eq!(category.key, ARITHMETIC);
    assert_eq!(sub.id, "arith_div");
    assert!(registry.get("nope").is_none());
  }

  #[test]
  fn operation_keys_strip_the_prefix() {
    assert_eq!(operation_key("arith_mixed"), Some("mixed"));
    assert_eq!(operation_key("quad_eq"), None);
  }

  #[test]
  fn catalog_marks_arithmetic_as_configurable() {
    let catalog = Registry::builtin().catalog();
    let arith = catalog.iter().find(|c| c.key == ARITHMETIC).unwrap();
    assert!(arith.has_size_config);
    assert_eq!(arith.subtopics.len(), 5);
    let json = serde_json::to_value(&catalog).unwrap();
    assert_eq!(json[0]["hasSizeConfig"], true);
  }
}
