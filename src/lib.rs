//! Math drill engine: randomized, difficulty-scaled problem generation across a
//! fixed topic catalogue, plus tolerant answer checking.
//!
//! ```
//! use math_drill::{check_answer, select_and_generate, Configuration, Registry};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let registry = Registry::builtin();
//! let config = Configuration { topics: vec!["quad_eq".into()], ..Default::default() };
//! let mut rng = StdRng::seed_from_u64(7);
//! let problem = select_and_generate(&registry, &config.topics, &config, &mut rng);
//! assert!(check_answer(&problem.answer.display, &problem.answer));
//! ```

pub mod dispatch;
pub mod domain;
pub mod generators;
pub mod numeric;
pub mod registry;
pub mod seeds;
pub mod validator;

pub use dispatch::{generate_session, select_and_generate};
pub use domain::{Answer, AnswerValue, Configuration, Difficulty, Fallback, Problem, ProblemKind, Size};
pub use registry::{CategoryInfo, Registry, SubtopicInfo};
pub use validator::{check_answer, normalize};
