//! Per-exercise state machines.
//!
//! Every runner is a plain state object driven by discrete user events and
//! testable without any rendering harness. Illegal transitions are silent
//! no-ops; completion and result events come back as return values rather
//! than hidden callbacks.

pub mod cloze;
pub mod fill_blank;
pub mod flashcard;
pub mod quiz;

pub use cloze::{ClozeRunner, SlotResult};
pub use fill_blank::FillBlankRunner;
pub use flashcard::FlashcardRunner;
pub use quiz::{FeedbackTier, QuestionResult, QuizPhase, QuizRunner, QuizSummary};
