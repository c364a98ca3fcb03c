//! Quiz and flashcard synthesis from vocabulary tables.
//!
//! A lesson author supplies vocabulary rows; the synthesizer turns them into
//! a reviewable deck and a multiple-choice quiz on the fly. Distractors come
//! from sibling entries, so every generated question stays inside the
//! lesson's own vocabulary.

use rand::Rng;

use crate::shuffle::{sample_without_replacement, shuffle_and_locate};
use crate::types::{normalize_blanks, Flashcard, FlashcardDeck, Question, QuizData, VocabularyEntry};

/// Distractors sampled per question when enough siblings exist.
pub const DISTRACTORS_PER_QUESTION: usize = 3;

/// Build a flashcard deck from vocabulary entries: one card per entry,
/// word on the front, definition plus example on the back.
pub fn deck_from_vocabulary(title: &str, entries: &[VocabularyEntry]) -> FlashcardDeck {
    let cards = entries
        .iter()
        .map(|entry| Flashcard {
            front: entry.word.clone(),
            back: format!("{}\n\nExample: {}", entry.definition, entry.sample_sentence),
        })
        .collect();
    FlashcardDeck {
        title: title.to_string(),
        cards,
    }
}

/// Build a multiple-choice quiz from vocabulary entries.
///
/// One question per entry: the challenge sentence with its blank marker
/// normalized to the fixed placeholder, up to three sibling words as
/// distractors sampled without replacement, candidates shuffled, and
/// `correct_answer` set to the word's 1-based post-shuffle position. The
/// position is recomputed on every generation. A lone entry still yields a
/// single-option question.
pub fn quiz_from_vocabulary(
    title: &str,
    entries: &[VocabularyEntry],
    rng: &mut impl Rng,
) -> QuizData {
    let questions = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| synthesize_question(entries, i, entry, rng))
        .collect();
    QuizData {
        title: title.to_string(),
        questions,
    }
}

fn synthesize_question(
    entries: &[VocabularyEntry],
    index: usize,
    entry: &VocabularyEntry,
    rng: &mut impl Rng,
) -> Question {
    let siblings: Vec<String> = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, e)| e.word.clone())
        .collect();
    let distractors = sample_without_replacement(&siblings, DISTRACTORS_PER_QUESTION, rng);
    let located = shuffle_and_locate(distractors, entry.word.clone(), rng);

    Question {
        text: normalize_blanks(&entry.challenge_sentence),
        answers: located.shuffled,
        correct_answer: (located.index + 1).to_string(),
        message_for_correct_answer: format!("Correct! \"{}\": {}", entry.word, entry.definition),
        message_for_incorrect_answer: format!(
            "Not quite. \"{}\" means: {}",
            entry.word, entry.definition
        ),
    }
}
