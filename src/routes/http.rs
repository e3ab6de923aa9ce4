//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use math_drill::Configuration;

use crate::errors::ApiError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TopicsOut { categories: state.registry.catalog() })
}

#[instrument(level = "info", skip(state), fields(topics = ?q.topics, difficulty = ?q.difficulty))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProblemQuery>,
) -> Result<Json<ProblemOut>, ApiError> {
  let config = config_from_query(q)?;
  let problem = issue_problem(&state, config).await;
  info!(target: "problem", id = %problem.id, "HTTP problem served");
  Ok(Json(to_out(&problem)))
}

#[instrument(level = "info", skip(state, body), fields(topics = body.topics.len()))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<Configuration>,
) -> Result<Json<SessionOut>, ApiError> {
  let problems = issue_session(&state, body).await?;
  info!(target: "problem", count = problems.len(), "HTTP session served");
  Ok(Json(SessionOut { problems: problems.iter().map(to_out).collect() }))
}

#[instrument(level = "info", skip(state, body), fields(%body.problem_id, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let (correct, expected) = evaluate_answer(&state, &body.problem_id, &body.answer).await?;
  info!(target: "problem", id = %body.problem_id, %correct, "HTTP submit_answer evaluated");
  Ok(Json(AnswerOut { correct, expected }))
}
