//! Application state: in-memory stores, banks, prompts, and the OpenAI client.
//!
//! This module owns:
//!   - the quiz-session and match-game stores (by id)
//!   - the offline quiz bank (config TOML entries layered over built-in seeds)
//!   - the default quiz and default card pairs
//!   - the optional OpenAI client
//!
//! Quiz generation prefers OpenAI when available and falls back to the bank,
//! then to a hard fallback, so the API stays useful without a key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{AppConfig, Prompts};
use crate::domain::{Difficulty, GamePair, QuizData, QuizSource};
use crate::game::MatchGame;
use crate::openai::OpenAI;
use crate::quiz::{QuizSession, QuizSnapshot};
use crate::seeds;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
    pub games: Arc<RwLock<HashMap<String, MatchGame>>>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
    pub quiz_bank: HashMap<String, (QuizData, QuizSource)>,
    pub default_quiz: QuizData,
    pub default_pairs: Vec<GamePair>,
}

impl AppState {
    /// Build state from config: layer the TOML quiz bank over the built-in
    /// seeds, pick the card pairs, keep the (optional) OpenAI client.
    #[instrument(level = "info", skip_all)]
    pub fn new(cfg: AppConfig, openai: Option<OpenAI>) -> Self {
        let mut bank = HashMap::<String, (QuizData, QuizSource)>::new();

        // Config-bank entries are validated on load; malformed ones are
        // skipped so a bad TOML entry cannot take the server down.
        for qc in &cfg.quizzes {
            let quiz = QuizData {
                title: qc.title.clone().unwrap_or_else(|| format!("{} Quiz", qc.topic)),
                description: qc.description.clone().unwrap_or_default(),
                questions: qc.questions.clone(),
            };
            if let Err(e) = quiz.validate() {
                error!(target: "quiz", topic = %qc.topic, error = %e, "Skipping bank entry: invalid quiz");
                continue;
            }
            bank.insert(qc.topic.clone(), (quiz, QuizSource::LocalBank));
        }

        // Built-in seeds never overwrite config entries.
        for (topic, questions) in seeds::seed_quiz_bank() {
            bank.entry(topic.to_string()).or_insert_with(|| {
                let quiz = QuizData {
                    title: format!("{} Quiz", topic),
                    description: String::new(),
                    questions,
                };
                (quiz, QuizSource::Seed)
            });
        }

        let local = bank.values().filter(|(_, s)| *s == QuizSource::LocalBank).count();
        let seed = bank.len() - local;
        info!(target: "quiz", local_bank = local, seed = seed, "Startup quiz bank inventory");

        let default_pairs = if cfg.pairs.is_empty() { seeds::seed_game_pairs() } else { cfg.pairs.clone() };

        if let Some(oa) = &openai {
            info!(target: "quizdeck_backend", base_url = %oa.base_url, chat_model = %oa.chat_model, image_model = %oa.image_model, "OpenAI enabled.");
        } else {
            info!(target: "quizdeck_backend", "OpenAI disabled (no OPENAI_API_KEY). Using bank/placeholder logic.");
        }

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            games: Arc::new(RwLock::new(HashMap::new())),
            openai,
            prompts: cfg.prompts,
            quiz_bank: bank,
            default_quiz: seeds::default_quiz(),
            default_pairs,
        }
    }

    /// Quiz generation cascade:
    /// OpenAI when available, else the bank for the topic, else hard fallback.
    #[instrument(level = "info", skip(self), fields(%topic, difficulty = %difficulty.as_str()))]
    pub async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
        num_questions: usize,
    ) -> (QuizData, QuizSource) {
        if let Some(oa) = &self.openai {
            match oa.generate_quiz(&self.prompts, topic, difficulty, num_questions).await {
                Ok(quiz) => {
                    info!(target: "quiz", %topic, title = %quiz.title, source = "openai_generated", "Generated fresh quiz");
                    return (quiz, QuizSource::Generated);
                }
                Err(e) => {
                    error!(target: "quiz", %topic, error = %e, "OpenAI generation failed; using bank");
                }
            }
        }

        if let Some((quiz, source)) = self.quiz_bank.get(topic) {
            let mut quiz = quiz.clone();
            quiz.questions.truncate(num_questions);
            quiz.description = format!("A {} difficulty quiz about {}", difficulty.as_str(), topic);
            warn!(target: "quiz", %topic, source = ?source, "Serving bank quiz");
            return (quiz, *source);
        }

        let mut quiz = seeds::hard_fallback_quiz(topic, difficulty);
        quiz.questions.truncate(num_questions);
        warn!(target: "quiz", %topic, source = "hard_fallback", "Serving hard fallback quiz");
        (quiz, QuizSource::Seed)
    }

    /// Start a quiz session; returns its id and the initial snapshot.
    #[instrument(level = "debug", skip(self, data), fields(title = %data.title))]
    pub async fn create_quiz_session(&self, data: QuizData, now: Instant) -> (String, QuizSnapshot) {
        let session = QuizSession::new(data, now);
        let snapshot = session.snapshot(now);
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), session);
        (id, snapshot)
    }

    /// Start a matching game over `pairs`; returns its id and the stored game.
    #[instrument(level = "debug", skip(self, pairs), fields(pairs = pairs.len()))]
    pub async fn create_game(&self, pairs: Vec<GamePair>) -> (String, MatchGame) {
        let game = {
            let mut rng = rand::thread_rng();
            MatchGame::new(pairs, &mut rng)
        };
        let id = Uuid::new_v4().to_string();
        self.games.write().await.insert(id.clone(), game.clone());
        (id, game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizCfg;
    use crate::domain::QuizQuestion;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), None)
    }

    #[tokio::test]
    async fn bank_quiz_is_truncated_and_relabeled() {
        let s = state();
        let (quiz, source) = s.generate_quiz("World Geography", Difficulty::Hard, 3).await;
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(source, QuizSource::Seed);
        assert!(quiz.description.contains("hard"));
        assert!(quiz.description.contains("World Geography"));
    }

    #[tokio::test]
    async fn unknown_topic_falls_back_hard() {
        let s = state();
        let (quiz, source) = s.generate_quiz("Underwater Basket Weaving", Difficulty::Easy, 5).await;
        assert_eq!(source, QuizSource::Seed);
        assert_eq!(quiz.title, "Underwater Basket Weaving Quiz");
        assert!(!quiz.questions.is_empty());
    }

    #[tokio::test]
    async fn config_bank_shadows_seed_topic_and_skips_invalid() {
        let good = QuizCfg {
            topic: "World Geography".into(),
            title: Some("My Geography".into()),
            description: None,
            questions: vec![QuizQuestion {
                id: 1,
                question: "?".into(),
                options: vec!["a".into(), "b".into()],
                correct_answer: 0,
                explanation: String::new(),
            }],
        };
        let bad = QuizCfg {
            topic: "Broken".into(),
            title: None,
            description: None,
            questions: vec![QuizQuestion {
                id: 1,
                question: "?".into(),
                options: vec!["a".into()],
                correct_answer: 3,
                explanation: String::new(),
            }],
        };
        let cfg = AppConfig { quizzes: vec![good, bad], ..Default::default() };
        let s = AppState::new(cfg, None);

        let (quiz, source) = s.generate_quiz("World Geography", Difficulty::Medium, 5).await;
        assert_eq!(source, QuizSource::LocalBank);
        assert_eq!(quiz.title, "My Geography");
        assert!(!s.quiz_bank.contains_key("Broken"));
    }

    #[tokio::test]
    async fn sessions_and_games_are_addressable_by_id() {
        let s = state();
        let (sid, snapshot) = s.create_quiz_session(seeds::default_quiz(), Instant::now()).await;
        assert!(s.sessions.read().await.contains_key(&sid));
        assert_eq!(snapshot.current_question_index, 0);
        assert_eq!(snapshot.total_questions, 5);

        let (gid, game) = s.create_game(seeds::seed_game_pairs()).await;
        assert_eq!(game.cards().len(), seeds::seed_game_pairs().len() * 2);
        assert!(s.games.read().await.contains_key(&gid));
    }
}
