//! Flip/match session for the card game.
//!
//! At most one unmatched card is face up between flips: the second flip of an
//! attempt resolves immediately through the match predicate. On a match both
//! cards stay face up and are marked matched; on a mismatch both return face
//! down (the client renders the brief reveal before hiding them again). The
//! flipped/already-matched guards are what keep a card from being compared
//! against itself.

use std::fmt;

use rand::Rng;

use crate::cards::{build_cards, is_match};
use crate::domain::{Card, GamePair};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
  UnknownCard(String),
  CardAlreadyMatched(String),
  CardAlreadyFlipped(String),
}

impl fmt::Display for GameError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GameError::UnknownCard(id) => write!(f, "unknown card id: {}", id),
      GameError::CardAlreadyMatched(id) => write!(f, "card {} is already matched", id),
      GameError::CardAlreadyFlipped(id) => write!(f, "card {} is already face up", id),
    }
  }
}

/// What a flip did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
  /// First card of an attempt turned face up.
  Revealed,
  /// Second card completed the pair; both cards stay up and matched.
  Matched { pair_id: String },
  /// Second card did not match; both cards are face down again.
  Mismatched { other_id: String },
}

/// One matching-game attempt: the shuffled deck plus flip bookkeeping.
#[derive(Clone, Debug)]
pub struct MatchGame {
  pairs: Vec<GamePair>,
  cards: Vec<Card>,
  face_up: Option<String>,
  moves: u32,
  matched_pairs: usize,
}

impl MatchGame {
  pub fn new<R: Rng>(pairs: Vec<GamePair>, rng: &mut R) -> Self {
    let cards = build_cards(&pairs, rng);
    Self { pairs, cards, face_up: None, moves: 0, matched_pairs: 0 }
  }

  pub fn cards(&self) -> &[Card] {
    &self.cards
  }

  pub fn moves(&self) -> u32 {
    self.moves
  }

  pub fn matched_pairs(&self) -> usize {
    self.matched_pairs
  }

  pub fn is_complete(&self) -> bool {
    self.cards.iter().all(|c| c.is_matched)
  }

  fn index_of(&self, card_id: &str) -> Result<usize, GameError> {
    self
      .cards
      .iter()
      .position(|c| c.id == card_id)
      .ok_or_else(|| GameError::UnknownCard(card_id.to_string()))
  }

  /// Turn a card face up and, on the second card of an attempt, resolve it.
  pub fn flip(&mut self, card_id: &str) -> Result<FlipOutcome, GameError> {
    let idx = self.index_of(card_id)?;
    if self.cards[idx].is_matched {
      return Err(GameError::CardAlreadyMatched(card_id.to_string()));
    }
    if self.cards[idx].is_flipped {
      return Err(GameError::CardAlreadyFlipped(card_id.to_string()));
    }
    self.cards[idx].is_flipped = true;

    let Some(other_id) = self.face_up.take() else {
      self.face_up = Some(card_id.to_string());
      return Ok(FlipOutcome::Revealed);
    };

    // Second card of the attempt: resolve.
    self.moves += 1;
    let other_idx = self.index_of(&other_id)?;
    if is_match(&self.cards[idx], &self.cards[other_idx]) {
      self.cards[idx].is_matched = true;
      self.cards[other_idx].is_matched = true;
      self.matched_pairs += 1;
      Ok(FlipOutcome::Matched { pair_id: self.cards[idx].pair_id.clone() })
    } else {
      self.cards[idx].is_flipped = false;
      self.cards[other_idx].is_flipped = false;
      Ok(FlipOutcome::Mismatched { other_id })
    }
  }

  /// Fresh attempt over the same pairs: reshuffled deck, cleared counters.
  pub fn reset<R: Rng>(&mut self, rng: &mut R) {
    self.cards = build_cards(&self.pairs, rng);
    self.face_up = None;
    self.moves = 0;
    self.matched_pairs = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn game(n: usize) -> MatchGame {
    let pairs: Vec<GamePair> = (0..n)
      .map(|i| GamePair { term: format!("term {}", i), image_prompt: format!("prompt {}", i) })
      .collect();
    let mut rng = StdRng::seed_from_u64(99);
    MatchGame::new(pairs, &mut rng)
  }

  fn card(game: &MatchGame, id: &str) -> Card {
    game.cards().iter().find(|c| c.id == id).cloned().unwrap()
  }

  #[test]
  fn matching_flip_pair_stays_matched() {
    let mut g = game(3);
    assert_eq!(g.flip("term-0").unwrap(), FlipOutcome::Revealed);
    assert_eq!(g.flip("image-0").unwrap(), FlipOutcome::Matched { pair_id: "pair-0".into() });

    assert!(card(&g, "term-0").is_matched);
    assert!(card(&g, "image-0").is_matched);
    assert!(card(&g, "term-0").is_flipped);
    assert_eq!(g.matched_pairs(), 1);
    assert_eq!(g.moves(), 1);
  }

  #[test]
  fn mismatching_pair_returns_face_down() {
    let mut g = game(3);
    g.flip("term-1").unwrap();
    let out = g.flip("image-2").unwrap();
    assert_eq!(out, FlipOutcome::Mismatched { other_id: "term-1".into() });

    assert!(!card(&g, "term-1").is_flipped);
    assert!(!card(&g, "image-2").is_flipped);
    assert_eq!(g.matched_pairs(), 0);
    assert_eq!(g.moves(), 1);
  }

  #[test]
  fn matched_cards_cannot_be_flipped_again() {
    let mut g = game(2);
    g.flip("term-0").unwrap();
    g.flip("image-0").unwrap();
    assert_eq!(g.flip("image-0"), Err(GameError::CardAlreadyMatched("image-0".into())));
  }

  #[test]
  fn flipping_the_same_card_twice_is_rejected() {
    let mut g = game(2);
    g.flip("term-0").unwrap();
    assert_eq!(g.flip("term-0"), Err(GameError::CardAlreadyFlipped("term-0".into())));
  }

  #[test]
  fn unknown_card_is_rejected() {
    let mut g = game(2);
    assert_eq!(g.flip("term-9"), Err(GameError::UnknownCard("term-9".into())));
  }

  #[test]
  fn game_completes_when_all_pairs_match() {
    let mut g = game(2);
    assert!(!g.is_complete());
    g.flip("term-0").unwrap();
    g.flip("image-0").unwrap();
    g.flip("term-1").unwrap();
    g.flip("image-1").unwrap();
    assert!(g.is_complete());
    assert_eq!(g.matched_pairs(), 2);
  }

  #[test]
  fn reset_rebuilds_a_face_down_deck() {
    let mut g = game(2);
    g.flip("term-0").unwrap();
    g.flip("image-0").unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    g.reset(&mut rng);
    assert_eq!(g.cards().len(), 4);
    assert_eq!(g.moves(), 0);
    assert_eq!(g.matched_pairs(), 0);
    assert!(g.cards().iter().all(|c| !c.is_flipped && !c.is_matched));
  }
}
