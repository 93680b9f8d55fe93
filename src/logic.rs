//! Core behaviors shared by the HTTP handlers.
//!
//! This includes:
//!   - Request validation for the image and quiz generators (missing/invalid
//!     fields become 400s with the messages the original clients expect)
//!   - Image URL resolution (provider dispatch + deterministic placeholder)
//!   - Building the end-of-quiz results review

use std::time::Instant;

use tracing::{error, instrument};

use crate::domain::Difficulty;
use crate::error::ApiError;
use crate::protocol::{GenerateImageIn, GenerateQuizIn, ResultsOut, ReviewItem};
use crate::quiz::QuizSession;
use crate::state::AppState;
use crate::util::format_time;

/// Accepted image providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageProvider {
  OpenAi,
  Placeholder,
}

const DEFAULT_NUM_QUESTIONS: usize = 5;
const MAX_NUM_QUESTIONS: usize = 10;

/// Deterministic fallback image: the prompt itself, URL-encoded, rendered as
/// placeholder text.
pub fn placeholder_image_url(prompt: &str) -> String {
  format!(
    "https://via.placeholder.com/512x512/667eea/ffffff?text={}",
    urlencoding::encode(prompt)
  )
}

/// Check the generate-image request. The provider defaults to OpenAI,
/// matching the original proxy.
pub fn validate_generate_image(body: &GenerateImageIn) -> Result<(String, ImageProvider), ApiError> {
  let prompt = match body.prompt.as_deref().map(str::trim) {
    Some(p) if !p.is_empty() => p.to_string(),
    _ => return Err(ApiError::BadRequest("Prompt is required".into())),
  };
  let provider = match body.provider.as_deref() {
    None | Some("openai") => ImageProvider::OpenAi,
    Some("placeholder") => ImageProvider::Placeholder,
    Some(_) => return Err(ApiError::BadRequest("Invalid provider".into())),
  };
  Ok((prompt, provider))
}

/// Check the generate-quiz request; difficulty defaults to medium and the
/// question count to 5, as in the original generator service.
pub fn validate_generate_quiz(
  body: &GenerateQuizIn,
) -> Result<(String, Difficulty, usize), ApiError> {
  let topic = match body.topic.as_deref().map(str::trim) {
    Some(t) if !t.is_empty() => t.to_string(),
    _ => return Err(ApiError::BadRequest("Topic is required".into())),
  };
  let difficulty = match body.difficulty.as_deref() {
    None => Difficulty::Medium,
    Some(s) => Difficulty::parse(s)
      .ok_or_else(|| ApiError::BadRequest("Invalid difficulty: expected easy, medium, or hard".into()))?,
  };
  let num_questions = body.num_questions.unwrap_or(DEFAULT_NUM_QUESTIONS);
  if num_questions == 0 || num_questions > MAX_NUM_QUESTIONS {
    return Err(ApiError::BadRequest(format!(
      "num_questions must be between 1 and {}",
      MAX_NUM_QUESTIONS
    )));
  }
  Ok((topic, difficulty, num_questions))
}

/// Resolve an image URL for `prompt` through the requested provider.
/// Placeholder never fails; OpenAI failures surface as 500s, unretried.
#[instrument(level = "info", skip(state, prompt), fields(prompt_len = prompt.len(), ?provider))]
pub async fn generate_image_url(
  state: &AppState,
  prompt: &str,
  provider: ImageProvider,
) -> Result<String, ApiError> {
  match provider {
    ImageProvider::Placeholder => Ok(placeholder_image_url(prompt)),
    ImageProvider::OpenAi => {
      let Some(oa) = &state.openai else {
        return Err(ApiError::Upstream(
          "Failed to generate image: no image provider is configured".into(),
        ));
      };
      oa.generate_image(prompt).await.map_err(|e| {
        error!(target: "quizdeck_backend", error = %e, "Image generation failed");
        ApiError::Upstream(format!("Failed to generate image: {}", e))
      })
    }
  }
}

/// Build the full results review for a completed session.
pub fn build_results(session: &QuizSession, now: Instant) -> ResultsOut {
  let data = session.data();
  let total = data.questions.len();
  let score = session.score();
  let percentage = if total == 0 {
    0
  } else {
    ((score as f64 / total as f64) * 100.0).round() as u32
  };

  let review = data
    .questions
    .iter()
    .zip(session.answers())
    .map(|(q, &given)| ReviewItem {
      question: q.question.clone(),
      your_answer: given,
      your_answer_text: q.options.get(given).cloned().unwrap_or_default(),
      correct_answer: q.correct_answer,
      correct_answer_text: q.options[q.correct_answer].clone(),
      correct: given == q.correct_answer,
      explanation: q.explanation.clone(),
    })
    .collect();

  let elapsed = session.elapsed(now).as_secs();
  ResultsOut {
    title: data.title.clone(),
    score,
    total,
    percentage,
    time_elapsed: elapsed,
    time_formatted: format_time(elapsed),
    review,
  }
}
