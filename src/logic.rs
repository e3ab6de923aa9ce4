//! Core behaviors shared by both HTTP and WebSocket handlers: merge the
//! request over server defaults, issue problems, grade answers.

use tracing::{debug, info, instrument, warn};

use math_drill::{check_answer, Configuration, Difficulty, Problem, Size};

use crate::errors::ApiError;
use crate::protocol::ProblemQuery;
use crate::state::AppState;
use crate::util::{split_csv, trunc_for_log};

pub const MAX_SESSION_COUNT: usize = 100;

/// Longest answer accepted for grading, in bytes.
pub const MAX_ANSWER_LEN: usize = 1024;

/// Turn `?topics=a,b&difficulty=Hard&digits=2` into a request configuration.
pub fn config_from_query(q: ProblemQuery) -> Result<Configuration, ApiError> {
  let difficulty = match q.difficulty.as_deref() {
    None | Some("") => None,
    Some(raw) => Some(Difficulty::parse(raw).ok_or_else(|| ApiError::Validation(format!("unknown difficulty: {}", raw)))?),
  };
  Ok(Configuration {
    topics: q.topics.as_deref().map(split_csv).unwrap_or_default(),
    difficulty,
    digits: q.digits.map(Size::Digits),
    ..Default::default()
  })
}

#[instrument(level = "info", skip(state, request), fields(topics = request.topics.len()))]
pub async fn issue_problem(state: &AppState, request: Configuration) -> Problem {
  let config = state.defaults.merge(request);
  let problem = state.generate_one(&config);
  if let Some(reason) = problem.fallback {
    warn!(target: "problem", id = %problem.id, ?reason, "Issued fallback problem");
  }
  state.remember(std::slice::from_ref(&problem)).await;
  info!(target: "problem", id = %problem.id, subtopic = %problem.subtopic, "Problem issued");
  problem
}

#[instrument(level = "info", skip(state, request), fields(topics = request.topics.len(), count = ?request.count))]
pub async fn issue_session(state: &AppState, request: Configuration) -> Result<Vec<Problem>, ApiError> {
  let config = state.defaults.merge(request);
  let count = config.count.unwrap_or(state.defaults.count);
  if !(1..=MAX_SESSION_COUNT).contains(&count) {
    return Err(ApiError::Validation(format!("count must be between 1 and {}, got {}", MAX_SESSION_COUNT, count)));
  }
  let problems = state.generate_many(&config);
  state.remember(&problems).await;
  let stored = state.stored_len().await;
  info!(target: "problem", count = problems.len(), stored, "Session issued");
  Ok(problems)
}

/// Grade an answer against an issued problem. Returns `(correct, expected display)`.
#[instrument(level = "info", skip(state, answer), fields(%problem_id, answer_len = answer.len()))]
pub async fn evaluate_answer(state: &AppState, problem_id: &str, answer: &str) -> Result<(bool, String), ApiError> {
  if answer.len() > MAX_ANSWER_LEN {
    return Err(ApiError::Validation(format!("answer must be at most {} bytes, got {}", MAX_ANSWER_LEN, answer.len())));
  }
  let problem = state
    .get_problem(problem_id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("Unknown problemId: {}", problem_id)))?;
  let correct = check_answer(answer, &problem.answer);
  debug!(target: "problem", id = %problem_id, answer = %trunc_for_log(answer, 64), expected = %problem.answer.display, %correct, "Answer checked");
  Ok((correct, problem.answer.display))
}
