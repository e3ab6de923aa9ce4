//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::errors::ApiError;
use crate::protocol::{to_out, ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "math_drill_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "math_drill_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "math_drill_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { code: "INVALID_JSON".into(), message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "code": "INTERNAL_ERROR", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "math_drill_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "math_drill_backend", "WebSocket disconnected");
}

fn error_reply(e: ApiError) -> ServerWsMessage {
  ServerWsMessage::Error { code: e.code().into(), message: e.message().to_string() }
}

#[instrument(level = "info", skip(state))]
pub(crate) async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::ListTopics => ServerWsMessage::Topics { categories: state.registry.catalog() },

    ClientWsMessage::NewProblem { config } => {
      let problem = issue_problem(state, config).await;
      info!(target: "problem", id = %problem.id, "WS new_problem served");
      ServerWsMessage::Problem { problem: to_out(&problem) }
    }

    ClientWsMessage::NewSession { config } => match issue_session(state, config).await {
      Ok(problems) => {
        info!(target: "problem", count = problems.len(), "WS new_session served");
        ServerWsMessage::Session { problems: problems.iter().map(to_out).collect() }
      }
      Err(e) => error_reply(e),
    },

    ClientWsMessage::SubmitAnswer { problem_id, answer } => match evaluate_answer(state, &problem_id, &answer).await {
      Ok((correct, expected)) => {
        info!(target: "problem", id = %problem_id, %correct, "WS submit_answer evaluated");
        ServerWsMessage::AnswerResult { correct, expected }
      }
      Err(e) => error_reply(e),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SessionDefaults;
  use math_drill::Configuration;

  #[tokio::test]
  async fn ping_and_topics() {
    let state = AppState::new(SessionDefaults::default());
    assert!(matches!(handle_client_ws(ClientWsMessage::Ping, &state).await, ServerWsMessage::Pong));
    match handle_client_ws(ClientWsMessage::ListTopics, &state).await {
      ServerWsMessage::Topics { categories } => assert_eq!(categories.len(), 4),
      other => panic!("unexpected {:?}", other),
    }
  }

  #[tokio::test]
  async fn problem_then_answer_round() {
    let state = AppState::new(SessionDefaults::default());
    let config = Configuration { topics: vec!["arith_mul".into()], ..Default::default() };
    let id = match handle_client_ws(ClientWsMessage::NewProblem { config }, &state).await {
      ServerWsMessage::Problem { problem } => problem.id,
      other => panic!("unexpected {:?}", other),
    };
    let expected = state.get_problem(&id).await.unwrap().answer.display;
    match handle_client_ws(ClientWsMessage::SubmitAnswer { problem_id: id, answer: expected.clone() }, &state).await {
      ServerWsMessage::AnswerResult { correct, expected: e } => {
        assert!(correct);
        assert_eq!(e, expected);
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[tokio::test]
  async fn errors_become_error_messages() {
    let state = AppState::new(SessionDefaults::default());
    let reply = handle_client_ws(ClientWsMessage::SubmitAnswer { problem_id: "nope".into(), answer: "1".into() }, &state).await;
    assert!(matches!(reply, ServerWsMessage::Error { ref code, .. } if code == "NOT_FOUND"));
    let config = Configuration { count: Some(0), ..Default::default() };
    let reply = handle_client_ws(ClientWsMessage::NewSession { config }, &state).await;
    assert!(matches!(reply, ServerWsMessage::Error { ref code, .. } if code == "VALIDATION_ERROR"));
  }
}
