//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Problems always go out without their answer; `/answer` reveals it.

use serde::{Deserialize, Serialize};

use math_drill::{CategoryInfo, Configuration, Fallback, Problem, ProblemKind};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListTopics,
    NewProblem {
        #[serde(default)]
        config: Configuration,
    },
    NewSession {
        #[serde(default)]
        config: Configuration,
    },
    SubmitAnswer {
        #[serde(rename = "problemId")]
        problem_id: String,
        answer: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Topics {
        categories: Vec<CategoryInfo>,
    },
    Problem {
        problem: ProblemOut,
    },
    Session {
        problems: Vec<ProblemOut>,
    },
    AnswerResult {
        correct: bool,
        expected: String,
    },
    Error {
        code: String,
        message: String,
    },
}

/// DTO used by both WS and HTTP for problem delivery.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub id: String,
    pub subtopic: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Fallback>,
}

/// Convert a full `Problem` (internal) to the public DTO.
pub fn to_out(p: &Problem) -> ProblemOut {
    ProblemOut {
        id: p.id.clone(),
        subtopic: p.subtopic.clone(),
        question: p.question.clone(),
        kind: p.kind,
        fallback: p.fallback,
    }
}

//
// HTTP request/response DTOs
//

/// `GET /api/v1/problem?topics=a,b&difficulty=Hard&digits=2`
#[derive(Debug, Default, Deserialize)]
pub struct ProblemQuery {
    pub topics: Option<String>,
    pub difficulty: Option<String>,
    pub digits: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "problemId")]
    pub problem_id: String,
    pub answer: String,
}
#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub problems: Vec<ProblemOut>,
}

#[derive(Debug, Serialize)]
pub struct TopicsOut {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_drill::Answer;

    #[test]
    fn problem_out_hides_the_answer() {
        let p = Problem::new("quad_eq_1", "Quadratic Equation", "x^2 = 4", Answer::display_only("x = -2, 2"), ProblemKind::MathInputPoly);
        let v = serde_json::to_value(to_out(&p)).unwrap();
        assert!(v.get("answer").is_none());
        assert_eq!(v["type"], "math-input-poly");
    }

    #[test]
    fn client_messages_parse_with_and_without_config() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"new_problem"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::NewProblem { .. }));
        let m: ClientWsMessage =
            serde_json::from_str(r#"{"type":"new_session","config":{"topics":["sigma"],"count":3}}"#).unwrap();
        match m {
            ClientWsMessage::NewSession { config } => assert_eq!(config.count, Some(3)),
            other => panic!("unexpected {:?}", other),
        }
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"submit_answer","problemId":"x","answer":"4"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::SubmitAnswer { .. }));
    }
}
