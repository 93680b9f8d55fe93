//! Minimal OpenAI client for our two use-cases: strict-JSON quiz generation
//! via chat.completions and image generation via images/generations.
//!
//! Calls are instrumented and log model names, latencies, and response sizes
//! (not contents). The client is built from an explicit `OpenAiConfig`; it
//! never reads the process environment and never logs the API key.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{OpenAiConfig, Prompts};
use crate::domain::{Difficulty, QuizData};
use crate::util::{fill_template, trunc_for_log};

#[derive(Clone)]
pub struct OpenAI {
  client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub chat_model: String,
  pub image_model: String,
}

/// Shape the model is asked to return for a quiz.
#[derive(Deserialize)]
struct GenQuiz {
  title: String,
  description: String,
  questions: Vec<GenQuestion>,
}

#[derive(Deserialize)]
struct GenQuestion {
  question: String,
  options: Vec<String>,
  correct_answer: usize,
  explanation: String,
}

impl OpenAI {
  /// Construct the client from resolved settings. Returns None only if the
  /// HTTP client itself cannot be built.
  pub fn new(cfg: OpenAiConfig) -> Option<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self {
      client,
      api_key: cfg.api_key,
      base_url: cfg.base_url,
      chat_model: cfg.chat_model,
      image_model: cfg.image_model,
    })
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "quizdeck-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();

    serde_json::from_str::<T>(&text).map_err(|e| format!("JSON parse error: {}", e))
  }

  /// Generate a full quiz. The result is renumbered, truncated to the
  /// requested size, and structurally validated before it is accepted.
  #[instrument(
    level = "info",
    skip(self, prompts),
    fields(%topic, difficulty = %difficulty.as_str(), model = %self.chat_model)
  )]
  pub async fn generate_quiz(
    &self,
    prompts: &Prompts,
    topic: &str,
    difficulty: Difficulty,
    num_questions: usize,
  ) -> Result<QuizData, String> {
    let n = num_questions.to_string();
    let user = fill_template(
      &prompts.quiz_user_template,
      &[("topic", topic), ("difficulty", difficulty.as_str()), ("num_questions", &n)],
    );

    let start = std::time::Instant::now();
    let result = self.chat_json::<GenQuiz>(&self.chat_model, &prompts.quiz_system, &user, 0.9).await;
    let elapsed = start.elapsed();

    let generated = match result {
      Ok(g) => {
        info!(?elapsed, "Model response received successfully");
        g
      }
      Err(e) => {
        error!(?elapsed, error = %e, "Model call failed during quiz generation");
        return Err(format!("Model generation failed: {e}"));
      }
    };

    let quiz = QuizData {
      title: generated.title,
      description: generated.description,
      questions: generated
        .questions
        .into_iter()
        .take(num_questions)
        .enumerate()
        .map(|(i, gq)| crate::domain::QuizQuestion {
          id: i as u32 + 1,
          question: gq.question,
          options: gq.options,
          correct_answer: gq.correct_answer,
          explanation: gq.explanation,
        })
        .collect(),
    };
    quiz.validate().map_err(|e| format!("Generated quiz failed validation: {e}"))?;

    info!(
      title = %quiz.title,
      questions = quiz.questions.len(),
      "Quiz successfully generated"
    );
    Ok(quiz)
  }

  /// Generate one image for `prompt` and return its URL.
  #[instrument(level = "info", skip(self, prompt), fields(prompt_len = prompt.len(), model = %self.image_model))]
  pub async fn generate_image(&self, prompt: &str) -> Result<String, String> {
    let url = format!("{}/images/generations", self.base_url);
    let req = ImageGenerationRequest {
      model: self.image_model.clone(),
      prompt: prompt.to_string(),
      n: 1,
      size: "1024x1024".into(),
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "quizdeck-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ImageGenerationResponse = res.json().await.map_err(|e| e.to_string())?;
    let image_url = body
      .data
      .first()
      .and_then(|d| d.url.clone())
      .ok_or_else(|| "OpenAI returned no image URL".to_string())?;

    info!(elapsed = ?start.elapsed(), "Image generated");
    Ok(image_url)
  }
}

// --- API DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ImageGenerationRequest {
  model: String,
  prompt: String,
  n: u8,
  size: String,
}
#[derive(Deserialize)]
struct ImageGenerationResponse {
  data: Vec<ImageDatum>,
}
#[derive(Deserialize)]
struct ImageDatum {
  #[serde(default)]
  url: Option<String>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
