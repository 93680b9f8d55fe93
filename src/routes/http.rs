//! HTTP endpoint handlers. These are thin wrappers that forward to core logic
//! and the session state machines. Each handler is instrumented and logs
//! parameters and basic result info.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::game::MatchGame;
use crate::logic;
use crate::protocol::*;
use crate::seeds;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut {
    status: "OK",
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
  })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_image(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateImageIn>,
) -> Result<Json<ImageOut>, ApiError> {
  let (prompt, provider) = logic::validate_generate_image(&body)?;
  let image_url = logic::generate_image_url(&state, &prompt, provider).await?;
  info!(target: "quizdeck_backend", ?provider, "Image URL served");
  Ok(Json(ImageOut { image_url }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateQuizIn>,
) -> Result<Json<QuizOut>, ApiError> {
  let (topic, difficulty, num_questions) = logic::validate_generate_quiz(&body)?;
  let (quiz, source) = state.generate_quiz(&topic, difficulty, num_questions).await;
  info!(target: "quiz", %topic, ?source, questions = quiz.questions.len(), "Quiz served");
  Ok(Json(to_quiz_out(&quiz, source)))
}

#[instrument(level = "info")]
pub async fn http_topics() -> impl IntoResponse {
  Json(TopicsOut { topics: seeds::suggested_topics() })
}

#[instrument(level = "info")]
pub async fn http_difficulties() -> impl IntoResponse {
  Json(DifficultiesOut { difficulties: vec!["easy", "medium", "hard"] })
}

//
// Quiz sessions
//

#[instrument(level = "info", skip(state, body))]
pub async fn http_start_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartQuizIn>,
) -> Result<Json<QuizSessionOut>, ApiError> {
  let data = match body.quiz {
    Some(quiz) => {
      quiz.validate().map_err(ApiError::BadRequest)?;
      quiz
    }
    None => state.default_quiz.clone(),
  };
  let (session_id, snapshot) = state.create_quiz_session(data.clone(), Instant::now()).await;
  info!(target: "quiz", session = %session_id, title = %data.title, "Quiz session started");
  Ok(Json(QuizSessionOut { session_id, quiz: data, state: snapshot }))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn http_get_quiz_session(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<QuizSessionOut>, ApiError> {
  let now = Instant::now();
  let sessions = state.sessions.read().await;
  let session = sessions
    .get(&session_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown session: {}", session_id)))?;
  Ok(Json(QuizSessionOut {
    session_id: session_id.clone(),
    quiz: session.data().clone(),
    state: session.snapshot(now),
  }))
}

#[instrument(level = "info", skip(state, body), fields(%session_id, answer = body.answer_index))]
pub async fn http_submit_answer(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let now = Instant::now();
  let mut sessions = state.sessions.write().await;
  let session = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown session: {}", session_id)))?;
  let outcome = session.submit_answer(body.answer_index, now)?;
  let snapshot = session.snapshot(now);
  info!(
    target: "quiz",
    session = %session_id,
    correct = outcome.correct,
    index = snapshot.current_question_index,
    score = snapshot.score,
    "Answer evaluated"
  );
  Ok(Json(AnswerOut {
    correct: outcome.correct,
    correct_answer: outcome.correct_answer,
    explanation: outcome.explanation,
    state: snapshot,
  }))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn http_quiz_results(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<ResultsOut>, ApiError> {
  let now = Instant::now();
  let mut sessions = state.sessions.write().await;
  let session = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown session: {}", session_id)))?;
  session.reveal_results()?;
  info!(target: "quiz", session = %session_id, score = session.score(), "Results revealed");
  Ok(Json(logic::build_results(session, now)))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn http_reset_quiz(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<QuizSessionOut>, ApiError> {
  let now = Instant::now();
  let mut sessions = state.sessions.write().await;
  let session = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown session: {}", session_id)))?;
  session.reset(now);
  info!(target: "quiz", session = %session_id, "Quiz session reset");
  Ok(Json(QuizSessionOut {
    session_id: session_id.clone(),
    quiz: session.data().clone(),
    state: session.snapshot(now),
  }))
}

//
// Matching game
//

fn game_out(id: &str, game: &MatchGame) -> GameOut {
  GameOut {
    game_id: id.to_string(),
    cards: game.cards().to_vec(),
    moves: game.moves(),
    matched_pairs: game.matched_pairs(),
    is_complete: game.is_complete(),
  }
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_start_game(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartGameIn>,
) -> Result<Json<GameOut>, ApiError> {
  let pairs = match body.pairs {
    Some(pairs) if !pairs.is_empty() => pairs,
    Some(_) => return Err(ApiError::BadRequest("pairs must not be empty".into())),
    None => state.default_pairs.clone(),
  };
  let (game_id, game) = state.create_game(pairs).await;
  info!(target: "game", game = %game_id, cards = game.cards().len(), "Game started");
  Ok(Json(game_out(&game_id, &game)))
}

#[instrument(level = "info", skip(state), fields(%game_id))]
pub async fn http_get_game(
  State(state): State<Arc<AppState>>,
  Path(game_id): Path<String>,
) -> Result<Json<GameOut>, ApiError> {
  let games = state.games.read().await;
  let game = games
    .get(&game_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown game: {}", game_id)))?;
  Ok(Json(game_out(&game_id, game)))
}

#[instrument(level = "info", skip(state, body), fields(%game_id, card = %body.card_id))]
pub async fn http_flip_card(
  State(state): State<Arc<AppState>>,
  Path(game_id): Path<String>,
  Json(body): Json<FlipIn>,
) -> Result<Json<FlipOut>, ApiError> {
  let mut games = state.games.write().await;
  let game = games
    .get_mut(&game_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown game: {}", game_id)))?;
  let outcome = game.flip(&body.card_id)?;
  info!(target: "game", game = %game_id, ?outcome, matched_pairs = game.matched_pairs(), "Card flipped");
  Ok(Json(FlipOut { result: outcome.into(), game: game_out(&game_id, game) }))
}

#[instrument(level = "info", skip(state), fields(%game_id))]
pub async fn http_reset_game(
  State(state): State<Arc<AppState>>,
  Path(game_id): Path<String>,
) -> Result<Json<GameOut>, ApiError> {
  let mut games = state.games.write().await;
  let game = games
    .get_mut(&game_id)
    .ok_or_else(|| ApiError::NotFound(format!("Unknown game: {}", game_id)))?;
  {
    let mut rng = rand::thread_rng();
    game.reset(&mut rng);
  }
  info!(target: "game", game = %game_id, "Game reset");
  Ok(Json(game_out(&game_id, game)))
}
