//! Application state: topic registry, session defaults, and the store of
//! problems handed out (so answers can be checked by id).
//!
//! The store lives only as long as the process and is bounded; once full,
//! the oldest issued problem is evicted first.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use math_drill::{generate_session, select_and_generate, Configuration, Problem, Registry};

use crate::config::SessionDefaults;

pub const MAX_STORED_PROBLEMS: usize = 10_000;

#[derive(Default)]
struct ProblemStore {
    by_id: HashMap<String, Problem>,
    order: VecDeque<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub defaults: SessionDefaults,
    issued: Arc<RwLock<ProblemStore>>,
    capacity: usize,
}

impl AppState {
    #[instrument(level = "info", skip_all)]
    pub fn new(defaults: SessionDefaults) -> Self {
        Self::with_capacity(defaults, MAX_STORED_PROBLEMS)
    }

    pub fn with_capacity(defaults: SessionDefaults, capacity: usize) -> Self {
        let registry = Registry::builtin();
        for category in registry.categories() {
            info!(target: "math_drill_backend", category = category.key, subtopics = category.subtopics.len(), "Startup topic inventory");
        }
        Self {
            registry: Arc::new(registry),
            defaults,
            issued: Arc::new(RwLock::new(ProblemStore::default())),
            capacity: capacity.max(1),
        }
    }

    /// One problem for an already-merged configuration. The thread-local RNG
    /// stays inside this synchronous call.
    pub fn generate_one(&self, config: &Configuration) -> Problem {
        let mut rng = rand::thread_rng();
        select_and_generate(&self.registry, &config.topics, config, &mut rng)
    }

    pub fn generate_many(&self, config: &Configuration) -> Vec<Problem> {
        let mut rng = rand::thread_rng();
        generate_session(&self.registry, config, &mut rng)
    }

    /// Keep issued problems for later grading, evicting the oldest past capacity.
    #[instrument(level = "debug", skip(self, problems), fields(n = problems.len()))]
    pub async fn remember(&self, problems: &[Problem]) {
        let mut store = self.issued.write().await;
        for p in problems {
            if store.by_id.insert(p.id.clone(), p.clone()).is_none() {
                store.order.push_back(p.id.clone());
            }
        }
        while store.order.len() > self.capacity {
            if let Some(oldest) = store.order.pop_front() {
                store.by_id.remove(&oldest);
                debug!(target: "problem", id = %oldest, "Evicted issued problem");
            }
        }
    }

    /// Read-only access to an issued problem by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_problem(&self, id: &str) -> Option<Problem> {
        self.issued.read().await.by_id.get(id).cloned()
    }

    pub async fn stored_len(&self) -> usize {
        self.issued.read().await.by_id.len()
    }
}
