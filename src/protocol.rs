//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Naming follows the original clients: camelCase for the game/session
//! surfaces, snake_case (`correct_answer`) for the generate-quiz contract.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, GamePair, QuizData, QuizQuestion, QuizSource};
use crate::game::FlipOutcome;
use crate::quiz::QuizSnapshot;

#[derive(Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub timestamp: String,
}

//
// Image proxy
//

/// Fields are optional so missing ones surface as a 400 with a clear
/// message instead of a body-rejection.
#[derive(Debug, Deserialize)]
pub struct GenerateImageIn {
    pub prompt: Option<String>,
    pub provider: Option<String>,
}

#[derive(Serialize)]
pub struct ImageOut {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

//
// Quiz generation
//

#[derive(Debug, Deserialize)]
pub struct GenerateQuizIn {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub num_questions: Option<usize>,
}

#[derive(Serialize)]
pub struct QuizOut {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
    pub source: QuizSource,
}

/// Convert internal quiz data plus its provenance to the public DTO.
pub fn to_quiz_out(data: &QuizData, source: QuizSource) -> QuizOut {
    QuizOut {
        title: data.title.clone(),
        description: data.description.clone(),
        questions: data.questions.clone(),
        source,
    }
}

#[derive(Serialize)]
pub struct TopicsOut {
    pub topics: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct DifficultiesOut {
    pub difficulties: Vec<&'static str>,
}

//
// Quiz sessions
//

#[derive(Debug, Deserialize)]
pub struct StartQuizIn {
    pub quiz: Option<QuizData>,
}

#[derive(Serialize)]
pub struct QuizSessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub quiz: QuizData,
    pub state: QuizSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "answerIndex")]
    pub answer_index: usize,
}

#[derive(Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    pub explanation: String,
    pub state: QuizSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub question: String,
    pub your_answer: usize,
    pub your_answer_text: String,
    pub correct_answer: usize,
    pub correct_answer_text: String,
    pub correct: bool,
    pub explanation: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsOut {
    pub title: String,
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub time_elapsed: u64,
    pub time_formatted: String,
    pub review: Vec<ReviewItem>,
}

//
// Matching game
//

#[derive(Debug, Deserialize)]
pub struct StartGameIn {
    pub pairs: Option<Vec<GamePair>>,
}

#[derive(Serialize)]
pub struct GameOut {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub cards: Vec<Card>,
    pub moves: u32,
    #[serde(rename = "matchedPairs")]
    pub matched_pairs: usize,
    #[serde(rename = "isComplete")]
    pub is_complete: bool,
}

#[derive(Debug, Deserialize)]
pub struct FlipIn {
    #[serde(rename = "cardId")]
    pub card_id: String,
}

#[derive(Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FlipResultOut {
    Revealed,
    Matched {
        #[serde(rename = "pairId")]
        pair_id: String,
    },
    Mismatched {
        #[serde(rename = "otherId")]
        other_id: String,
    },
}

impl From<FlipOutcome> for FlipResultOut {
    fn from(outcome: FlipOutcome) -> Self {
        match outcome {
            FlipOutcome::Revealed => FlipResultOut::Revealed,
            FlipOutcome::Matched { pair_id } => FlipResultOut::Matched { pair_id },
            FlipOutcome::Mismatched { other_id } => FlipResultOut::Mismatched { other_id },
        }
    }
}

#[derive(Serialize)]
pub struct FlipOut {
    #[serde(flatten)]
    pub result: FlipResultOut,
    pub game: GameOut,
}
