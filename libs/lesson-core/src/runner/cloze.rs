//! Single-sentence cloze state machine.
//!
//! The sentence splits into N+1 literal segments and N free-text slots.
//! Submission is all-or-nothing: every input locks at once, per-slot
//! correctness is graded case-insensitively, and incorrect slots expose the
//! canonical word as an inline hint until `reset`.

use crate::error::{EngineError, Result};
use crate::matching::answers_match;
use crate::types::ClozeSentence;

/// Graded outcome for one slot, available after submission.
#[derive(Debug, Clone)]
pub struct SlotResult {
    pub input: String,
    pub correct: bool,
    /// Canonical word, shown inline when the slot is wrong.
    pub hint: Option<String>,
}

/// State machine for one cloze block.
#[derive(Debug)]
pub struct ClozeRunner {
    title: String,
    segments: Vec<String>,
    words: Vec<String>,
    inputs: Vec<String>,
    submitted: bool,
}

impl ClozeRunner {
    /// Validate blank/word parity and start with all slots empty.
    ///
    /// A mismatch between the number of blank markers and the word list is a
    /// block-scoped fatal data error.
    pub fn new(block_id: &str, cloze: ClozeSentence) -> Result<Self> {
        let blanks = cloze.blank_count();
        if blanks != cloze.words.len() {
            return Err(EngineError::BlankCountMismatch {
                block: block_id.to_string(),
                blanks,
                words: cloze.words.len(),
            });
        }
        if blanks == 0 {
            return Err(EngineError::MalformedPayload {
                block: block_id.to_string(),
                block_type: "fillInTheBlanks".to_string(),
                reason: "sentence has no blanks".to_string(),
            });
        }
        let segments = cloze.segments();
        Ok(Self {
            title: cloze.title,
            segments,
            words: cloze.words,
            inputs: vec![String::new(); blanks],
            submitted: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Literal segments around the slots; one more than `slot_count`.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn slot_count(&self) -> usize {
        self.words.len()
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Type into a slot. Ignored once submitted (inputs are locked) and for
    /// out-of-range slots.
    pub fn set_input(&mut self, slot: usize, text: &str) {
        if self.submitted {
            return;
        }
        if let Some(input) = self.inputs.get_mut(slot) {
            *input = text.to_string();
        }
    }

    /// Lock all inputs and grade every slot. Re-submitting is a no-op.
    pub fn submit(&mut self) {
        self.submitted = true;
    }

    /// Clear all inputs and unlock.
    pub fn reset(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
        self.submitted = false;
    }

    /// Per-slot grading, available only after submission.
    pub fn slot_results(&self) -> Option<Vec<SlotResult>> {
        if !self.submitted {
            return None;
        }
        Some(
            self.inputs
                .iter()
                .zip(&self.words)
                .map(|(input, word)| {
                    let correct = answers_match(input, word);
                    SlotResult {
                        input: input.clone(),
                        correct,
                        hint: (!correct).then(|| word.clone()),
                    }
                })
                .collect(),
        )
    }

    /// Whether every slot was graded correct. False before submission.
    pub fn all_correct(&self) -> bool {
        self.submitted
            && self
                .inputs
                .iter()
                .zip(&self.words)
                .all(|(input, word)| answers_match(input, word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cloze() -> ClozeSentence {
        ClozeSentence {
            title: "Daily routine".to_string(),
            sentence: "She ___ to school and ___ lunch at noon.".to_string(),
            words: vec!["walks".to_string(), "eats".to_string()],
        }
    }

    fn runner() -> ClozeRunner {
        ClozeRunner::new("cloze-1", cloze()).unwrap()
    }

    #[test]
    fn splits_into_segments_and_slots() {
        let runner = runner();
        assert_eq!(runner.slot_count(), 2);
        assert_eq!(runner.segments().len(), 3);
        assert_eq!(runner.segments()[0], "She ");
        assert_eq!(runner.inputs().to_vec(), vec!["", ""]);
    }

    #[test]
    fn grading_is_case_insensitive_and_trimmed() {
        let mut runner = runner();
        runner.set_input(0, "  Walks ");
        runner.set_input(1, "EATS");
        runner.submit();

        let results = runner.slot_results().unwrap();
        assert!(results[0].correct);
        assert!(results[1].correct);
        assert!(runner.all_correct());
    }

    #[test]
    fn wrong_slot_exposes_canonical_word_as_hint() {
        let mut runner = runner();
        runner.set_input(0, "runs");
        runner.set_input(1, "eats");
        runner.submit();

        let results = runner.slot_results().unwrap();
        assert!(!results[0].correct);
        assert_eq!(results[0].hint.as_deref(), Some("walks"));
        assert_eq!(results[1].hint, None);
        assert!(!runner.all_correct());
    }

    #[test]
    fn no_results_before_submission() {
        let runner = runner();
        assert!(runner.slot_results().is_none());
        assert!(!runner.all_correct());
    }

    #[test]
    fn submit_locks_all_inputs_at_once() {
        let mut runner = runner();
        runner.set_input(0, "walks");
        runner.submit();

        runner.set_input(0, "overwritten");
        runner.set_input(1, "late edit");
        assert_eq!(runner.inputs().to_vec(), vec!["walks", ""]);
    }

    #[test]
    fn reset_returns_to_empty_unsubmitted_state() {
        let mut runner = runner();
        runner.set_input(0, "runs");
        runner.set_input(1, "eats");
        runner.submit();

        runner.reset();
        assert!(!runner.is_submitted());
        assert_eq!(runner.inputs().to_vec(), vec!["", ""]);

        // editable again
        runner.set_input(0, "walks");
        assert_eq!(runner.inputs()[0], "walks");
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut runner = runner();
        runner.set_input(5, "walks");
        assert_eq!(runner.inputs().to_vec(), vec!["", ""]);
    }

    #[test]
    fn blank_word_mismatch_is_a_fatal_data_error() {
        let bad = ClozeSentence {
            title: "Bad".to_string(),
            sentence: "Only ___ blank.".to_string(),
            words: vec!["one".to_string(), "two".to_string()],
        };
        assert!(matches!(
            ClozeRunner::new("cloze-1", bad),
            Err(EngineError::BlankCountMismatch {
                blanks: 1,
                words: 2,
                ..
            })
        ));
    }

    #[test]
    fn sentence_without_blanks_is_rejected() {
        let bad = ClozeSentence {
            title: "Bad".to_string(),
            sentence: "No blanks at all.".to_string(),
            words: vec![],
        };
        assert!(matches!(
            ClozeRunner::new("cloze-1", bad),
            Err(EngineError::MalformedPayload { .. })
        ));
    }
}
