//! Topic selection: map a configuration to exactly one generated problem.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Configuration, Problem, Size};
use crate::generators::pick;
use crate::registry::{operation_key, Registry, ARITHMETIC};
use crate::seeds;

/// Pick one of `ids` uniformly and run its generator.
///
/// An empty `ids` means every registered subtopic. Unknown ids are ignored;
/// if none survive, the built-in default problem is returned.
pub fn select_and_generate(registry: &Registry, ids: &[String], config: &Configuration, rng: &mut dyn RngCore) -> Problem {
  let known = candidate_ids(registry, ids);

  if known.is_empty() {
    warn!(target: "math_drill", requested = ?ids, "no known subtopic requested; serving default problem");
    return seeds::default_problem();
  }

  let id = *pick(rng, &known);
  let Some((category, entry)) = registry.get(id) else {
    return seeds::default_problem();
  };

  let size = size_for(category.key, entry.id, config);
  let difficulty = config.difficulty.unwrap_or_default();
  debug!(target: "math_drill", subtopic = entry.id, ?size, ?difficulty, "generating");

  let mut problem = (entry.generate)(size, difficulty, rng);
  problem.id = format!("{}_{}", problem.id, uniqueness_token());
  problem
}

/// Known ids as a set in request order. Empty `ids` means the whole registry.
fn candidate_ids<'a>(registry: &'a Registry, ids: &'a [String]) -> Vec<&'a str> {
  if ids.is_empty() {
    return registry.ids();
  }
  let mut seen = HashSet::new();
  ids
    .iter()
    .map(String::as_str)
    .filter(|id| registry.contains(id) && seen.insert(*id))
    .collect()
}

/// `count` independent draws (default 10).
pub fn generate_session(registry: &Registry, config: &Configuration, rng: &mut dyn RngCore) -> Vec<Problem> {
  let count = config.count.unwrap_or(DEFAULT_SESSION_COUNT);
  (0..count).map(|_| select_and_generate(registry, &config.topics, config, rng)).collect()
}

pub const DEFAULT_SESSION_COUNT: usize = 10;

/// Global digit count, overridden for arithmetic ids by the per-operation pair.
fn size_for(category: &str, id: &str, config: &Configuration) -> Size {
  let global = config.digits.unwrap_or_default();
  if category != ARITHMETIC {
    return global;
  }
  operation_key(id)
    .and_then(|op| config.arithmetic.as_ref()?.get(op).copied())
    .map(Size::Pair)
    .unwrap_or(global)
}

/// `<unix millis>_<8 hex chars>`, for UI keying only.
fn uniqueness_token() -> String {
  let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
  let nonce = Uuid::new_v4().simple().to_string();
  format!("{}_{}", millis, &nonce[..8])
}
