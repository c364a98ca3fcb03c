//! Lesson sequencer.
//!
//! A [`Lesson`] owns the immutable block list plus one handle per block,
//! keyed by `block_id`, built by invoking the dispatcher once per block in
//! document order. Runner state lives exactly as long as the lesson;
//! dropping the lesson discards it all. Handles are independent map
//! entries, so no block can read or mutate another block's state.

use rand::Rng;
use std::collections::HashMap;

use crate::dispatcher::{dispatch, BlockDiagnostic, BlockHandle};
use crate::error::{EngineError, Result};
use crate::loader::parse_lesson;
use crate::types::ContentBlock;

/// One loaded lesson: the block list and the per-block runner state.
#[derive(Debug)]
pub struct Lesson {
    blocks: Vec<ContentBlock>,
    handles: HashMap<String, BlockHandle>,
}

impl Lesson {
    /// Build a lesson from an already-structured block list.
    ///
    /// The list is taken as immutable for the lesson's lifetime. Duplicate
    /// block ids are rejected up front; they would make runner state
    /// ambiguous.
    pub fn new(blocks: Vec<ContentBlock>, rng: &mut impl Rng) -> Result<Self> {
        let mut handles = HashMap::with_capacity(blocks.len());
        for block in &blocks {
            if handles.contains_key(&block.block_id) {
                return Err(EngineError::DuplicateBlockId {
                    block: block.block_id.clone(),
                });
            }
            handles.insert(block.block_id.clone(), dispatch(block, rng));
        }
        tracing::debug!(blocks = blocks.len(), "lesson sequenced");
        Ok(Self { blocks, handles })
    }

    /// Build a lesson straight from lesson JSON.
    pub fn from_json(json: &str, rng: &mut impl Rng) -> Result<Self> {
        Self::new(parse_lesson(json)?, rng)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Blocks with their handles, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContentBlock, &BlockHandle)> {
        self.blocks.iter().map(|block| {
            // every block was inserted in new()
            let handle = &self.handles[&block.block_id];
            (block, handle)
        })
    }

    pub fn handle(&self, block_id: &str) -> Option<&BlockHandle> {
        self.handles.get(block_id)
    }

    pub fn handle_mut(&mut self, block_id: &str) -> Option<&mut BlockHandle> {
        self.handles.get_mut(block_id)
    }

    /// All per-block diagnostics, for a host that wants to surface them
    /// together.
    pub fn diagnostics(&self) -> Vec<&BlockDiagnostic> {
        self.blocks
            .iter()
            .filter_map(|block| match &self.handles[&block.block_id] {
                BlockHandle::Diagnostic(diag) => Some(diag),
                _ => None,
            })
            .collect()
    }
}
