//! Loading application configuration: prompts + optional quiz/pair banks from
//! TOML, and the OpenAI settings from the environment.
//!
//! The OpenAI credential is resolved here, once, and handed to the client as
//! an explicit value; nothing below `main` reads the process environment.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{GamePair, QuizQuestion};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub quizzes: Vec<QuizCfg>,
  #[serde(default)]
  pub pairs: Vec<GamePair>,
}

/// Quiz entry accepted in TOML configuration. Entries are validated on load;
/// malformed ones are skipped with an error log rather than failing startup.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizCfg {
  pub topic: String,
  #[serde(default)] pub title: Option<String>,
  #[serde(default)] pub description: Option<String>,
  pub questions: Vec<QuizQuestion>,
}

/// Prompts used by the OpenAI quiz generator. Defaults match the original
/// generator service; override them in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub quiz_system: String,
  pub quiz_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      quiz_system: "You are a quiz content generator. Respond ONLY with strict JSON.".into(),
      quiz_user_template: "Generate a {difficulty} difficulty quiz about {topic} with {num_questions} multiple choice questions. Return JSON with fields: title, description, questions. Each question is an object with fields: id, question, options, correct_answer, explanation. Each question must have exactly 4 options; correct_answer is the 0-based index of the correct option. Questions should be engaging and educational, explanations clear and informative.".into(),
    }
  }
}

/// OpenAI connection settings, resolved from the environment at startup and
/// injected into the client as a plain value.
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
  pub api_key: String,
  pub base_url: String,
  pub chat_model: String,
  pub image_model: String,
}

impl OpenAiConfig {
  /// Present only when OPENAI_API_KEY is set; everything else has defaults.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let chat_model =
      std::env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let image_model =
      std::env::var("OPENAI_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".into());
    Some(Self { api_key, base_url, chat_model, image_model })
  }
}

/// Attempt to load `AppConfig` from QUIZDECK_CONFIG_PATH. On any parsing/IO
/// error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("QUIZDECK_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizdeck_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizdeck_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizdeck_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toml_quiz_bank_parses() {
    let cfg: AppConfig = toml::from_str(
      r#"
        [prompts]
        quiz_system = "system"
        quiz_user_template = "make a {difficulty} quiz about {topic}"

        [[quizzes]]
        topic = "Rust"
        title = "Rust Quiz"

        [[quizzes.questions]]
        id = 1
        question = "Who maintains Rust?"
        options = ["One person", "The Rust project", "Nobody", "A compiler"]
        correct_answer = 1
        explanation = "The Rust project stewards the language."

        [[pairs]]
        term = "Ownership"
        image_prompt = "a crab guarding a treasure chest"
      "#,
    )
    .expect("valid config");

    assert_eq!(cfg.quizzes.len(), 1);
    assert_eq!(cfg.quizzes[0].topic, "Rust");
    assert_eq!(cfg.quizzes[0].questions[0].correct_answer, 1);
    assert_eq!(cfg.pairs[0].term, "Ownership");
    assert_eq!(cfg.prompts.quiz_system, "system");
  }

  #[test]
  fn empty_config_uses_default_prompts() {
    let cfg: AppConfig = toml::from_str("").expect("empty config");
    assert!(cfg.quizzes.is_empty());
    assert!(cfg.pairs.is_empty());
    assert!(cfg.prompts.quiz_user_template.contains("{topic}"));
  }
}
