//! Domain models used by the backend: game cards, quiz content, and provenance tags.

use serde::{Deserialize, Serialize};

/// Which face of a pair a card carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
  /// Displays the term text directly.
  Term,
  /// Holds an image-generation prompt; the client resolves it to a picture.
  Image,
}

/// A single face-down/face-up tile in the matching game.
/// Invariant: every `pair_id` is shared by exactly two cards, one of each
/// kind, with distinct `id`s. `build_cards` is the only constructor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: CardKind,
  pub content: String,
  pub pair_id: String,
  pub is_flipped: bool,
  pub is_matched: bool,
}

/// One term/image-prompt pair of the flash-card game data set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GamePair {
  pub term: String,
  #[serde(alias = "imagePrompt")]
  pub image_prompt: String,
}

/// A single multiple-choice question.
/// Wire names follow the generate-quiz contract (snake_case `correct_answer`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub id: u32,
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: usize,
  pub explanation: String,
}

/// A full quiz as served to clients and stored in sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizData {
  pub title: String,
  pub description: String,
  pub questions: Vec<QuizQuestion>,
}

impl QuizData {
  /// Structural validation applied to config-bank entries and generated
  /// quizzes before they are accepted: at least one question, every
  /// question has options, and `correct_answer` indexes into them.
  pub fn validate(&self) -> Result<(), String> {
    if self.questions.is_empty() {
      return Err("quiz has no questions".into());
    }
    for q in &self.questions {
      if q.options.is_empty() {
        return Err(format!("question {} has no options", q.id));
      }
      if q.correct_answer >= q.options.len() {
        return Err(format!(
          "question {}: correct_answer {} out of range (only {} options)",
          q.id, q.correct_answer, q.options.len()
        ));
      }
    }
    Ok(())
  }
}

/// Requested quiz difficulty. Parsed manually so bad input maps to a 400
/// rather than a body-rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

/// Where did we get the quiz from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuizSource {
  LocalBank,   // from user-provided TOML bank
  Generated,   // generated via OpenAI
  Seed,        // built-in bank (last resort)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn question(correct: usize, options: usize) -> QuizQuestion {
    QuizQuestion {
      id: 1,
      question: "?".into(),
      options: (0..options).map(|i| format!("opt {}", i)).collect(),
      correct_answer: correct,
      explanation: String::new(),
    }
  }

  #[test]
  fn validate_accepts_in_range_answers() {
    let quiz = QuizData {
      title: "t".into(),
      description: "d".into(),
      questions: vec![question(0, 4), question(3, 4)],
    };
    assert!(quiz.validate().is_ok());
  }

  #[test]
  fn validate_rejects_out_of_range_answer() {
    let quiz = QuizData {
      title: "t".into(),
      description: "d".into(),
      questions: vec![question(4, 4)],
    };
    assert!(quiz.validate().is_err());
  }

  #[test]
  fn validate_rejects_empty_quiz() {
    let quiz = QuizData { title: "t".into(), description: "d".into(), questions: vec![] };
    assert!(quiz.validate().is_err());
  }

  #[test]
  fn difficulty_parse_round_trips() {
    for s in ["easy", "medium", "hard"] {
      assert_eq!(Difficulty::parse(s).unwrap().as_str(), s);
    }
    assert!(Difficulty::parse("extreme").is_none());
  }
}
