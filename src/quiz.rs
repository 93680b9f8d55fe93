//! Quiz progression state machine.
//!
//! A session walks a fixed question list: each accepted submission appends
//! the chosen option, bumps the score on a correct answer, and advances the
//! index as one atomic update. After each accepted answer the session is
//! locked for a fixed feedback interval during which further submissions are
//! rejected. The elapsed clock runs from the start instant and freezes the
//! moment the last question is answered.
//!
//! Callers supply `now` explicitly, so the machine is fully deterministic
//! under test.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::QuizData;

/// How long a submission locks the session while feedback is on screen.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(2);

/// Why a session operation was rejected. These are defensive guards; none
/// of them panics or corrupts the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizError {
  /// `submit_answer` after the last question was answered.
  AlreadyComplete,
  /// `submit_answer` while the previous answer's feedback interval is open.
  FeedbackPending,
  /// The selected option does not exist on the current question.
  OptionOutOfRange { selected: usize, options: usize },
  /// `reveal_results` before the last question was answered.
  NotComplete,
}

impl fmt::Display for QuizError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QuizError::AlreadyComplete => write!(f, "quiz is already complete"),
      QuizError::FeedbackPending => write!(f, "answer feedback is still showing"),
      QuizError::OptionOutOfRange { selected, options } => {
        write!(f, "answer index {} out of range (question has {} options)", selected, options)
      }
      QuizError::NotComplete => write!(f, "quiz is not complete yet"),
    }
  }
}

/// Where the session currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
  InProgress,
  Completed,
  ResultsShown,
}

/// What a successful submission tells the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
  pub correct: bool,
  pub correct_answer: usize,
  pub explanation: String,
  pub is_complete: bool,
}

/// Serializable view of the progression state, shaped like the client's
/// quiz-state record. `time_elapsed` is whole seconds.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSnapshot {
  pub current_question_index: usize,
  pub score: usize,
  pub answers: Vec<usize>,
  pub is_complete: bool,
  pub show_results: bool,
  pub time_elapsed: u64,
  pub total_questions: usize,
}

/// One quiz attempt: the quiz content plus the mutable progression record.
#[derive(Clone, Debug)]
pub struct QuizSession {
  data: QuizData,
  current_question: usize,
  score: usize,
  answers: Vec<usize>,
  show_results: bool,
  started_at: Instant,
  frozen_elapsed: Option<Duration>,
  feedback_until: Option<Instant>,
}

impl QuizSession {
  pub fn new(data: QuizData, now: Instant) -> Self {
    Self {
      data,
      current_question: 0,
      score: 0,
      answers: Vec::new(),
      show_results: false,
      started_at: now,
      frozen_elapsed: None,
      feedback_until: None,
    }
  }

  pub fn data(&self) -> &QuizData {
    &self.data
  }

  pub fn is_complete(&self) -> bool {
    self.current_question == self.data.questions.len()
  }

  pub fn phase(&self) -> QuizPhase {
    if !self.is_complete() {
      QuizPhase::InProgress
    } else if self.show_results {
      QuizPhase::ResultsShown
    } else {
      QuizPhase::Completed
    }
  }

  pub fn answers(&self) -> &[usize] {
    &self.answers
  }

  pub fn score(&self) -> usize {
    self.score
  }

  /// Elapsed time since the session started; frozen once complete.
  pub fn elapsed(&self, now: Instant) -> Duration {
    self
      .frozen_elapsed
      .unwrap_or_else(|| now.saturating_duration_since(self.started_at))
  }

  /// Record an answer for the current question.
  ///
  /// Rejected while complete, while the feedback interval of the previous
  /// answer is open, or when `selected` is not a valid option index.
  /// On success the answer list, score, and index move together; reaching
  /// the end of the question list freezes the clock.
  pub fn submit_answer(&mut self, selected: usize, now: Instant) -> Result<AnswerOutcome, QuizError> {
    if self.is_complete() {
      return Err(QuizError::AlreadyComplete);
    }
    if let Some(until) = self.feedback_until {
      if now < until {
        return Err(QuizError::FeedbackPending);
      }
    }

    let question = &self.data.questions[self.current_question];
    if selected >= question.options.len() {
      return Err(QuizError::OptionOutOfRange { selected, options: question.options.len() });
    }
    let correct = selected == question.correct_answer;
    let correct_answer = question.correct_answer;
    let explanation = question.explanation.clone();

    self.answers.push(selected);
    if correct {
      self.score += 1;
    }
    self.current_question += 1;

    if self.is_complete() {
      self.frozen_elapsed = Some(now.saturating_duration_since(self.started_at));
      self.feedback_until = None;
    } else {
      self.feedback_until = Some(now + FEEDBACK_DELAY);
    }

    Ok(AnswerOutcome { correct, correct_answer, explanation, is_complete: self.is_complete() })
  }

  /// Flip the results view on. Only valid once the quiz is complete;
  /// idempotent after that, so a client can safely re-fetch the review.
  pub fn reveal_results(&mut self) -> Result<(), QuizError> {
    if !self.is_complete() {
      return Err(QuizError::NotComplete);
    }
    self.show_results = true;
    Ok(())
  }

  /// Back to a fresh attempt on the same quiz: counters zeroed, clock
  /// restarted. Valid in any state.
  pub fn reset(&mut self, now: Instant) {
    self.current_question = 0;
    self.score = 0;
    self.answers.clear();
    self.show_results = false;
    self.started_at = now;
    self.frozen_elapsed = None;
    self.feedback_until = None;
  }

  pub fn snapshot(&self, now: Instant) -> QuizSnapshot {
    QuizSnapshot {
      current_question_index: self.current_question,
      score: self.score,
      answers: self.answers.clone(),
      is_complete: self.is_complete(),
      show_results: self.show_results,
      time_elapsed: self.elapsed(now).as_secs(),
      total_questions: self.data.questions.len(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuizQuestion;

  fn three_question_quiz() -> QuizData {
    // Correct answers [1, 0, 2].
    let correct = [1usize, 0, 2];
    QuizData {
      title: "Test quiz".into(),
      description: String::new(),
      questions: correct
        .iter()
        .enumerate()
        .map(|(i, &c)| QuizQuestion {
          id: i as u32 + 1,
          question: format!("question {}", i + 1),
          options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
          correct_answer: c,
          explanation: format!("because {}", i + 1),
        })
        .collect(),
    }
  }

  /// Submit with the feedback interval already elapsed.
  fn submit_settled(
    s: &mut QuizSession,
    selected: usize,
    t0: Instant,
    step: &mut u64,
  ) -> Result<AnswerOutcome, QuizError> {
    *step += 3;
    s.submit_answer(selected, t0 + Duration::from_secs(*step))
  }

  #[test]
  fn all_correct_answers_score_three() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    let mut step = 0;
    for &a in &[1, 0, 2] {
      submit_settled(&mut s, a, t0, &mut step).unwrap();
    }
    assert_eq!(s.score(), 3);
    assert!(s.is_complete());
    assert_eq!(s.answers(), &[1, 0, 2]);
  }

  #[test]
  fn one_correct_answer_scores_one() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    let mut step = 0;
    for &a in &[0, 0, 0] {
      submit_settled(&mut s, a, t0, &mut step).unwrap();
    }
    assert_eq!(s.score(), 1, "only question 2 has correct answer 0");
    assert!(s.is_complete());
  }

  #[test]
  fn outcome_reports_correctness_and_explanation() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    let out = s.submit_answer(1, t0).unwrap();
    assert!(out.correct);
    assert_eq!(out.correct_answer, 1);
    assert_eq!(out.explanation, "because 1");
    assert!(!out.is_complete);
  }

  #[test]
  fn submission_is_locked_during_feedback_interval() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    s.submit_answer(1, t0).unwrap();

    let during = t0 + Duration::from_secs(1);
    assert_eq!(s.submit_answer(0, during), Err(QuizError::FeedbackPending));

    let after = t0 + FEEDBACK_DELAY;
    assert!(s.submit_answer(0, after).is_ok());
    assert_eq!(s.answers(), &[1, 0], "rejected submission left no trace");
  }

  #[test]
  fn out_of_range_answer_is_rejected_without_side_effects() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    let err = s.submit_answer(4, t0).unwrap_err();
    assert_eq!(err, QuizError::OptionOutOfRange { selected: 4, options: 4 });
    assert_eq!(s.score(), 0);
    assert!(s.answers().is_empty());
    assert_eq!(s.snapshot(t0).current_question_index, 0);
  }

  #[test]
  fn submission_after_completion_is_rejected() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    let mut step = 0;
    for &a in &[1, 0, 2] {
      submit_settled(&mut s, a, t0, &mut step).unwrap();
    }
    let late = t0 + Duration::from_secs(60);
    assert_eq!(s.submit_answer(0, late), Err(QuizError::AlreadyComplete));
  }

  #[test]
  fn results_only_reveal_after_completion() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    assert_eq!(s.reveal_results(), Err(QuizError::NotComplete));
    assert_eq!(s.phase(), QuizPhase::InProgress);

    let mut step = 0;
    for &a in &[1, 0, 2] {
      submit_settled(&mut s, a, t0, &mut step).unwrap();
    }
    assert_eq!(s.phase(), QuizPhase::Completed);
    s.reveal_results().unwrap();
    assert_eq!(s.phase(), QuizPhase::ResultsShown);
    // Re-fetching the review is fine.
    s.reveal_results().unwrap();
  }

  #[test]
  fn elapsed_runs_while_active_and_freezes_on_completion() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    assert_eq!(s.elapsed(t0 + Duration::from_secs(5)).as_secs(), 5);

    s.submit_answer(1, t0 + Duration::from_secs(3)).unwrap();
    s.submit_answer(0, t0 + Duration::from_secs(6)).unwrap();
    s.submit_answer(2, t0 + Duration::from_secs(10)).unwrap();

    assert_eq!(s.elapsed(t0 + Duration::from_secs(10)).as_secs(), 10);
    assert_eq!(s.elapsed(t0 + Duration::from_secs(500)).as_secs(), 10, "frozen after completion");
  }

  #[test]
  fn reset_restores_the_initial_state() {
    let t0 = Instant::now();
    let mut s = QuizSession::new(three_question_quiz(), t0);
    let mut step = 0;
    for &a in &[1, 0, 2] {
      submit_settled(&mut s, a, t0, &mut step).unwrap();
    }
    s.reveal_results().unwrap();

    let t1 = t0 + Duration::from_secs(120);
    s.reset(t1);
    let snap = s.snapshot(t1 + Duration::from_secs(4));
    assert_eq!(snap.current_question_index, 0);
    assert_eq!(snap.score, 0);
    assert!(snap.answers.is_empty());
    assert!(!snap.is_complete);
    assert!(!snap.show_results);
    assert_eq!(snap.time_elapsed, 4, "clock restarted from the reset instant");
    assert!(s.submit_answer(1, t1 + Duration::from_secs(4)).is_ok());
  }
}
