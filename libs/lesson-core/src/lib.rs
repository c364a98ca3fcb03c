//! Interactive exercise engine for structured language-learning lessons.
//!
//! Provides:
//! - Content block model and JSON lesson loader
//! - Per-exercise state machines (quiz, two fill-in-blank variants, flashcards)
//! - Quiz/flashcard synthesis from vocabulary tables
//! - Block dispatcher with per-block fault isolation, and a lesson sequencer
//!
//! The engine is a pure library: rendering, navigation, persistence, and any
//! network surface belong to the embedding host. All state transitions fire
//! in response to discrete user events on a single thread, and random
//! operations take a caller-supplied `Rng` so hosts and tests control them.

pub mod dispatcher;
pub mod error;
pub mod loader;
pub mod matching;
pub mod runner;
pub mod sequencer;
pub mod shuffle;
pub mod synthesizer;
pub mod types;

pub use dispatcher::{dispatch, BlockDiagnostic, BlockHandle, PassiveKind};
pub use error::{EngineError, Result};
pub use loader::parse_lesson;
pub use runner::{
    ClozeRunner, FeedbackTier, FillBlankRunner, FlashcardRunner, QuestionResult, QuizPhase,
    QuizRunner, QuizSummary, SlotResult,
};
pub use sequencer::Lesson;
pub use shuffle::{sample_without_replacement, shuffle_and_locate, Located};
pub use synthesizer::{deck_from_vocabulary, quiz_from_vocabulary};
pub use types::{
    Accessibility, BlockData, ClozeSentence, ContentBlock, FillBlankSentence,
    FillBlankSentenceSet, Flashcard, FlashcardDeck, Question, QuizData, TextData, VocabularyEntry,
    YoutubeEmbedData,
};
