//! Flashcard review state machine.
//!
//! Navigation wraps cyclically and flipping never moves the index.

use crate::error::{EngineError, Result};
use crate::types::{Flashcard, FlashcardDeck};

/// State machine for one flashcard block.
#[derive(Debug)]
pub struct FlashcardRunner {
    deck: FlashcardDeck,
    current_index: usize,
    is_flipped: bool,
}

impl FlashcardRunner {
    /// Start at the first card, front side up. An empty deck is a
    /// reportable configuration error for the block, not a silent no-op.
    pub fn new(block_id: &str, deck: FlashcardDeck) -> Result<Self> {
        if deck.cards.is_empty() {
            return Err(EngineError::EmptyDeck {
                block: block_id.to_string(),
            });
        }
        Ok(Self {
            deck,
            current_index: 0,
            is_flipped: false,
        })
    }

    pub fn deck_size(&self) -> usize {
        self.deck.cards.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn current_card(&self) -> &Flashcard {
        &self.deck.cards[self.current_index]
    }

    /// Toggle which side is showing without moving.
    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    /// Show the front of the next card, wrapping past the last one.
    pub fn next(&mut self) {
        self.is_flipped = false;
        self.current_index = (self.current_index + 1) % self.deck.cards.len();
    }
}
