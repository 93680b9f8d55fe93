//! Built-in content: the default quiz, the offline quiz bank served when
//! generation is unavailable, the default matching-game pairs, and the
//! topic catalog.

use crate::domain::{Difficulty, GamePair, QuizData, QuizQuestion};

fn q(id: u32, question: &str, options: [&str; 4], correct_answer: usize, explanation: &str) -> QuizQuestion {
  QuizQuestion {
    id,
    question: question.into(),
    options: options.map(String::from).to_vec(),
    correct_answer,
    explanation: explanation.into(),
  }
}

/// The quiz a session starts with when the client does not supply one.
pub fn default_quiz() -> QuizData {
  QuizData {
    title: "General Knowledge Quiz".into(),
    description: "A quick warm-up across history, science, and geography.".into(),
    questions: vec![
      q(1, "When did World War II end?", ["1943", "1944", "1945", "1946"], 2,
        "World War II ended in 1945 with the surrender of Germany in May and Japan in September."),
      q(2, "What is the chemical symbol for gold?", ["Ag", "Au", "Fe", "Cu"], 1,
        "Au is the chemical symbol for gold, from the Latin word 'aurum'."),
      q(3, "What is the capital of Australia?", ["Sydney", "Melbourne", "Canberra", "Brisbane"], 2,
        "Canberra is the capital of Australia, chosen as a compromise between Sydney and Melbourne."),
      q(4, "Which planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter", "Saturn"], 1,
        "Mars is known as the Red Planet due to its reddish appearance from iron oxide on its surface."),
      q(5, "Who painted the Mona Lisa?", ["Michelangelo", "Leonardo da Vinci", "Raphael", "Donatello"], 1,
        "Leonardo da Vinci painted the Mona Lisa between 1503 and 1519."),
    ],
  }
}

/// Offline bank keyed by topic. Guarantees `/api/generate-quiz` is useful
/// even without an API key or external generator.
pub fn seed_quiz_bank() -> Vec<(&'static str, Vec<QuizQuestion>)> {
  vec![
    ("Historical Events", vec![
      q(1, "When did World War II end?", ["1943", "1944", "1945", "1946"], 2,
        "World War II ended in 1945 with the surrender of Germany in May and Japan in September."),
      q(2, "Who was the first President of the United States?",
        ["Thomas Jefferson", "John Adams", "George Washington", "Benjamin Franklin"], 2,
        "George Washington was the first President of the United States, serving from 1789 to 1797."),
      q(3, "In what year did the Berlin Wall fall?", ["1987", "1988", "1989", "1990"], 2,
        "The Berlin Wall fell on November 9, 1989, marking the end of the Cold War."),
      q(4, "Who was the first Emperor of Rome?", ["Julius Caesar", "Augustus", "Nero", "Caligula"], 1,
        "Augustus was the first Emperor of Rome, ruling from 27 BC to 14 AD."),
      q(5, "When did the American Civil War begin?", ["1860", "1861", "1862", "1863"], 1,
        "The American Civil War began in 1861 with the attack on Fort Sumter."),
    ]),
    ("Science and Technology", vec![
      q(1, "What is the chemical symbol for gold?", ["Ag", "Au", "Fe", "Cu"], 1,
        "Au is the chemical symbol for gold, from the Latin word 'aurum'."),
      q(2, "Which planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter", "Saturn"], 1,
        "Mars is known as the Red Planet due to its reddish appearance from iron oxide on its surface."),
      q(3, "What is the largest organ in the human body?", ["Heart", "Brain", "Liver", "Skin"], 3,
        "The skin is the largest organ in the human body, covering about 20 square feet."),
      q(4, "Who invented the World Wide Web?",
        ["Bill Gates", "Tim Berners-Lee", "Steve Jobs", "Mark Zuckerberg"], 1,
        "Tim Berners-Lee invented the World Wide Web in 1989 while working at CERN."),
      q(5, "What is the hardest natural substance on Earth?", ["Steel", "Diamond", "Granite", "Quartz"], 1,
        "Diamond is the hardest natural substance on Earth, scoring 10 on the Mohs scale."),
    ]),
    ("World Geography", vec![
      q(1, "What is the capital of Australia?", ["Sydney", "Melbourne", "Canberra", "Brisbane"], 2,
        "Canberra is the capital of Australia, chosen as a compromise between Sydney and Melbourne."),
      q(2, "Which is the largest continent by area?", ["North America", "Africa", "Asia", "Europe"], 2,
        "Asia is the largest continent, covering about 30% of Earth's land area."),
      q(3, "What is the longest river in the world?", ["Amazon", "Nile", "Yangtze", "Mississippi"], 1,
        "The Nile is the longest river in the world, stretching about 4,135 miles."),
      q(4, "Which country has the most islands?", ["Indonesia", "Sweden", "Finland", "Norway"], 1,
        "Sweden has the most islands in the world, with over 267,570 islands."),
      q(5, "What is the smallest country in the world?",
        ["Monaco", "San Marino", "Vatican City", "Liechtenstein"], 2,
        "Vatican City is the smallest country in the world, covering just 0.17 square miles."),
    ]),
    ("Space and Astronomy", vec![
      q(1, "What is the closest planet to the Sun?", ["Venus", "Mercury", "Earth", "Mars"], 1,
        "Mercury is the closest planet to the Sun in our solar system."),
      q(2, "What is the largest planet in our solar system?", ["Saturn", "Jupiter", "Neptune", "Uranus"], 1,
        "Jupiter is the largest planet in our solar system."),
      q(3, "What galaxy do we live in?",
        ["Andromeda", "Milky Way", "Triangulum", "Large Magellanic Cloud"], 1,
        "We live in the Milky Way galaxy."),
      q(4, "What is a light year?", ["Time", "Distance", "Speed", "Energy"], 1,
        "A light year is a unit of distance - the distance light travels in one year."),
      q(5, "How many moons does Earth have?", ["0", "1", "2", "3"], 1,
        "Earth has one natural satellite - the Moon."),
    ]),
  ]
}

/// Absolute last resort: served when neither generation nor the bank can
/// cover the requested topic.
pub fn hard_fallback_quiz(topic: &str, difficulty: Difficulty) -> QuizData {
  let questions = seed_quiz_bank()
    .into_iter()
    .next()
    .map(|(_, qs)| qs)
    .unwrap_or_default();
  QuizData {
    title: format!("{} Quiz", topic),
    description: format!("A {} difficulty quiz about {}", difficulty.as_str(), topic),
    questions,
  }
}

/// Default term/image-prompt pairs for the matching game.
pub fn seed_game_pairs() -> Vec<GamePair> {
  let pairs = [
    ("Volcano", "a snow-capped volcano erupting with glowing lava at dusk"),
    ("Coral Reef", "a vibrant coral reef teeming with tropical fish"),
    ("Aurora", "green northern lights swirling over a frozen lake"),
    ("Sahara", "golden sand dunes stretching to the horizon under a blazing sun"),
    ("Redwood", "a towering redwood forest with sunbeams through the fog"),
    ("Glacier", "a massive blue glacier calving into an arctic sea"),
  ];
  pairs
    .iter()
    .map(|(term, prompt)| GamePair { term: (*term).into(), image_prompt: (*prompt).into() })
    .collect()
}

/// Suggested quiz topics surfaced by `/api/topics`.
pub fn suggested_topics() -> Vec<&'static str> {
  vec![
    "Historical Events",
    "World Geography",
    "Science and Technology",
    "Literature and Authors",
    "Art and Artists",
    "Mathematics",
    "Space and Astronomy",
    "Ancient Civilizations",
    "Modern Politics",
    "Environmental Science",
    "Music History",
    "Sports Legends",
    "Famous Inventors",
    "World Religions",
    "Oceanography",
  ]
}
