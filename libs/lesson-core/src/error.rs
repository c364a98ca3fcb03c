//! Error types for lesson-core.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while loading a lesson or constructing a block's runner.
///
/// Everything except `DuplicateBlockId` and `Json` is block-scoped: the
/// dispatcher catches it at the per-block boundary and turns it into a
/// visible diagnostic instead of failing the lesson.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("block {block}: sentence has {blanks} blanks but {words} words")]
    BlankCountMismatch {
        block: String,
        blanks: usize,
        words: usize,
    },

    #[error("block {block}: flashcard deck is empty")]
    EmptyDeck { block: String },

    #[error("block {block}: question {question} has invalid correct answer index {value:?}")]
    InvalidAnswerIndex {
        block: String,
        question: usize,
        value: String,
    },

    #[error("block {block}: unknown block type {block_type:?}")]
    UnknownBlockType { block: String, block_type: String },

    #[error("block {block}: malformed {block_type} payload: {reason}")]
    MalformedPayload {
        block: String,
        block_type: String,
        reason: String,
    },

    #[error("duplicate block id {block:?}")]
    DuplicateBlockId { block: String },

    #[error("invalid lesson JSON: {0}")]
    Json(#[from] serde_json::Error),
}
