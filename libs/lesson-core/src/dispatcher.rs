//! Block dispatcher.
//!
//! Routes each content block to its runner or renderer by declared type.
//! The match over [`BlockData`] is exhaustive, so a new block type cannot go
//! silently unhandled. Every fault raised while setting a block up is
//! caught here, at the per-block boundary, and replaced with a visible
//! diagnostic; sibling blocks are unaffected.

use rand::Rng;

use crate::error::EngineError;
use crate::runner::{ClozeRunner, FillBlankRunner, FlashcardRunner, QuizRunner};
use crate::types::{BlockData, ContentBlock};

/// A passive block the engine carries but never interprets; the host
/// renders it straight from the block's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassiveKind {
    Text,
    YoutubeEmbed,
    Chart,
    Timeline,
    ConceptMap,
    Flowchart,
}

/// A visible per-block diagnostic, shown in place of the block's content.
#[derive(Debug)]
pub struct BlockDiagnostic {
    pub block_id: String,
    pub block_type: String,
    pub error: EngineError,
}

impl BlockDiagnostic {
    /// Human-readable message naming the offending block.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// What dispatching one block produced: a live runner, a passive marker,
/// or a diagnostic.
#[derive(Debug)]
pub enum BlockHandle {
    Quiz(QuizRunner),
    FillBlanks(FillBlankRunner),
    Cloze(ClozeRunner),
    Flashcards(FlashcardRunner),
    Passive(PassiveKind),
    Diagnostic(BlockDiagnostic),
}

impl BlockHandle {
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Diagnostic(_))
    }
}

/// Route one block to its handler.
pub fn dispatch(block: &ContentBlock, rng: &mut impl Rng) -> BlockHandle {
    let id = &block.block_id;
    match &block.data {
        BlockData::Text(_) => BlockHandle::Passive(PassiveKind::Text),
        BlockData::YoutubeEmbed(_) => BlockHandle::Passive(PassiveKind::YoutubeEmbed),
        BlockData::Chart(_) => BlockHandle::Passive(PassiveKind::Chart),
        BlockData::Timeline(_) => BlockHandle::Passive(PassiveKind::Timeline),
        BlockData::ConceptMap(_) => BlockHandle::Passive(PassiveKind::ConceptMap),
        BlockData::Flowchart(_) => BlockHandle::Passive(PassiveKind::Flowchart),
        BlockData::Quiz(quiz) => {
            handled(block, QuizRunner::new(id, quiz.clone()).map(BlockHandle::Quiz))
        }
        BlockData::FillInTheBlanks(set) => handled(
            block,
            FillBlankRunner::new(id, set.clone(), rng).map(BlockHandle::FillBlanks),
        ),
        BlockData::Cloze(cloze) => handled(
            block,
            ClozeRunner::new(id, cloze.clone()).map(BlockHandle::Cloze),
        ),
        BlockData::Flashcard(deck) => handled(
            block,
            FlashcardRunner::new(id, deck.clone()).map(BlockHandle::Flashcards),
        ),
        BlockData::Unknown { block_type } => diagnostic(
            block,
            EngineError::UnknownBlockType {
                block: id.clone(),
                block_type: block_type.clone(),
            },
        ),
        BlockData::Malformed { block_type, reason } => diagnostic(
            block,
            EngineError::MalformedPayload {
                block: id.clone(),
                block_type: block_type.clone(),
                reason: reason.clone(),
            },
        ),
    }
}

fn handled(block: &ContentBlock, result: crate::error::Result<BlockHandle>) -> BlockHandle {
    match result {
        Ok(handle) => handle,
        Err(error) => diagnostic(block, error),
    }
}

fn diagnostic(block: &ContentBlock, error: EngineError) -> BlockHandle {
    tracing::warn!(
        block_id = %block.block_id,
        block_type = %block.data.type_name(),
        %error,
        "block replaced with diagnostic"
    );
    BlockHandle::Diagnostic(BlockDiagnostic {
        block_id: block.block_id.clone(),
        block_type: block.data.type_name().to_string(),
        error,
    })
}
