//! API error taxonomy. Every error leaves the server as an HTTP status plus
//! a JSON `{ "error": … }` payload; nothing panics across a handler boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::game::GameError;
use crate::quiz::QuizError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
  /// Missing or invalid request fields.
  BadRequest(String),
  /// Unknown session/game/card id.
  NotFound(String),
  /// A state-machine guard rejected the operation (wrong phase or locked).
  Conflict(String),
  /// The image/quiz provider failed; the message is wrapped and surfaced.
  Upstream(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn message(&self) -> &str {
    match self {
      ApiError::BadRequest(m)
      | ApiError::NotFound(m)
      | ApiError::Conflict(m)
      | ApiError::Upstream(m) => m,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = Json(json!({ "error": self.message() }));
    (status, body).into_response()
  }
}

impl From<QuizError> for ApiError {
  fn from(e: QuizError) -> Self {
    match e {
      QuizError::OptionOutOfRange { .. } => ApiError::BadRequest(e.to_string()),
      QuizError::AlreadyComplete | QuizError::FeedbackPending | QuizError::NotComplete => {
        ApiError::Conflict(e.to_string())
      }
    }
  }
}

impl From<GameError> for ApiError {
  fn from(e: GameError) -> Self {
    match e {
      GameError::UnknownCard(_) => ApiError::NotFound(e.to_string()),
      GameError::CardAlreadyMatched(_) | GameError::CardAlreadyFlipped(_) => {
        ApiError::BadRequest(e.to_string())
      }
    }
  }
}
