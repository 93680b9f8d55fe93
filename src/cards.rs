//! Card deck construction for the matching game: Fisher-Yates shuffling,
//! pair expansion, and the match predicate.

use rand::Rng;

use crate::domain::{Card, CardKind, GamePair};

/// Return a uniformly shuffled copy of `items`; the input is left untouched.
///
/// Standard Fisher-Yates on the copy: walk `i` from the last index down to 1,
/// draw `j` uniformly in `[0, i]`, swap. Generic over the RNG so tests can
/// seed a `StdRng`.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
  let mut out = items.to_vec();
  for i in (1..out.len()).rev() {
    let j = rng.gen_range(0..=i);
    out.swap(i, j);
  }
  out
}

/// Expand each term/image pair at position `k` into a `term-{k}` and an
/// `image-{k}` card sharing `pair-{k}`, both face down and unmatched, and
/// return the shuffled deck. Empty input yields an empty deck.
pub fn build_cards<R: Rng>(pairs: &[GamePair], rng: &mut R) -> Vec<Card> {
  let mut cards = Vec::with_capacity(pairs.len() * 2);
  for (k, pair) in pairs.iter().enumerate() {
    cards.push(Card {
      id: format!("term-{}", k),
      kind: CardKind::Term,
      content: pair.term.clone(),
      pair_id: format!("pair-{}", k),
      is_flipped: false,
      is_matched: false,
    });
    cards.push(Card {
      id: format!("image-{}", k),
      kind: CardKind::Image,
      content: pair.image_prompt.clone(),
      pair_id: format!("pair-{}", k),
      is_flipped: false,
      is_matched: false,
    });
  }
  shuffled(&cards, rng)
}

/// Two cards complete a pair iff they share a pair id but are distinct cards.
/// The id inequality is the guard that keeps a card from matching itself.
pub fn is_match(a: &Card, b: &Card) -> bool {
  a.pair_id == b.pair_id && a.id != b.id
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashMap;

  fn pairs(n: usize) -> Vec<GamePair> {
    (0..n)
      .map(|i| GamePair { term: format!("term {}", i), image_prompt: format!("prompt {}", i) })
      .collect()
  }

  #[test]
  fn shuffled_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(7);
    let input: Vec<u32> = (0..50).collect();
    let out = shuffled(&input, &mut rng);

    let mut sorted = out.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, input, "same multiset of elements");
    assert_eq!(input, (0..50).collect::<Vec<u32>>(), "input left unmodified");
  }

  #[test]
  fn shuffled_empty_is_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    let out: Vec<u32> = shuffled(&[], &mut rng);
    assert!(out.is_empty());
  }

  #[test]
  fn shuffled_single_element_is_unchanged() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(shuffled(&[42], &mut rng), vec![42]);
  }

  #[test]
  fn build_cards_emits_one_term_and_one_image_per_pair() {
    let mut rng = StdRng::seed_from_u64(11);
    let cards = build_cards(&pairs(8), &mut rng);
    assert_eq!(cards.len(), 16);

    let terms = cards.iter().filter(|c| c.kind == CardKind::Term).count();
    let images = cards.iter().filter(|c| c.kind == CardKind::Image).count();
    assert_eq!(terms, 8);
    assert_eq!(images, 8);

    let mut by_pair: HashMap<&str, Vec<&Card>> = HashMap::new();
    for c in &cards {
      by_pair.entry(c.pair_id.as_str()).or_default().push(c);
    }
    assert_eq!(by_pair.len(), 8);
    for (pair_id, members) in by_pair {
      assert_eq!(members.len(), 2, "{} referenced by exactly two cards", pair_id);
      assert_ne!(members[0].id, members[1].id);
      assert_ne!(members[0].kind, members[1].kind, "{} spans one term and one image", pair_id);
    }
  }

  #[test]
  fn build_cards_starts_face_down_and_unmatched() {
    let mut rng = StdRng::seed_from_u64(3);
    for card in build_cards(&pairs(4), &mut rng) {
      assert!(!card.is_flipped);
      assert!(!card.is_matched);
    }
  }

  #[test]
  fn build_cards_empty_input_yields_empty_deck() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(build_cards(&[], &mut rng).is_empty());
  }

  #[test]
  fn is_match_requires_same_pair_and_distinct_ids() {
    let mut rng = StdRng::seed_from_u64(5);
    let cards = build_cards(&pairs(2), &mut rng);
    let term0 = cards.iter().find(|c| c.id == "term-0").unwrap();
    let image0 = cards.iter().find(|c| c.id == "image-0").unwrap();
    let image1 = cards.iter().find(|c| c.id == "image-1").unwrap();

    assert!(is_match(term0, image0));
    assert!(is_match(image0, term0));
    assert!(!is_match(term0, image1), "different pairs never match");
    assert!(!is_match(term0, term0), "a card never matches itself");
  }
}
