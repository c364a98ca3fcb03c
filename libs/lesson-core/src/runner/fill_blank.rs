//! Multi-sentence fill-in-the-blank state machine.
//!
//! Each sentence tracks its own selection and completion. Options are
//! freshly shuffled every time a sentence is entered, and correctness is
//! decided by comparing the selected value to the canonical answer — never
//! by position — so shuffling can never change which option is correct.

use rand::Rng;

use crate::error::{EngineError, Result};
use crate::shuffle::shuffle;
use crate::types::{count_blanks, FillBlankSentence, FillBlankSentenceSet};

#[derive(Debug, Default)]
struct SentenceState {
    selected: Option<String>,
    checked: bool,
}

/// State machine for one multi-sentence fill-in-the-blank block.
#[derive(Debug)]
pub struct FillBlankRunner {
    set: FillBlankSentenceSet,
    current: usize,
    /// Freshly shuffled options for the current sentence.
    options: Vec<String>,
    states: Vec<SentenceState>,
    completion_fired: bool,
}

impl FillBlankRunner {
    /// Validate the sentence set and enter the first sentence.
    ///
    /// Every sentence must carry exactly one blank marker and list its
    /// canonical answer among its options.
    pub fn new(block_id: &str, set: FillBlankSentenceSet, rng: &mut impl Rng) -> Result<Self> {
        if set.sentences.is_empty() {
            return Err(malformed(block_id, "sentence set is empty"));
        }
        for (i, sentence) in set.sentences.iter().enumerate() {
            let blanks = count_blanks(&sentence.text);
            if blanks != 1 {
                return Err(malformed(
                    block_id,
                    &format!("sentence {i} has {blanks} blanks, expected 1"),
                ));
            }
            if !sentence.options.contains(&sentence.correct_answer) {
                return Err(malformed(
                    block_id,
                    &format!("sentence {i} does not list its correct answer as an option"),
                ));
            }
        }

        let states = set.sentences.iter().map(|_| SentenceState::default()).collect();
        let mut runner = Self {
            set,
            current: 0,
            options: Vec::new(),
            states,
            completion_fired: false,
        };
        runner.enter(rng);
        Ok(runner)
    }

    /// Reshuffle options for the current sentence. Runs on every (re)entry.
    fn enter(&mut self, rng: &mut impl Rng) {
        self.options = self.set.sentences[self.current].options.clone();
        shuffle(&mut self.options, rng);
    }

    pub fn sentence_count(&self) -> usize {
        self.set.sentences.len()
    }

    /// Zero-based index of the active sentence.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_sentence(&self) -> &FillBlankSentence {
        &self.set.sentences[self.current]
    }

    /// Options for the active sentence, in their current shuffled order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn instructions(&self) -> &str {
        &self.set.instructions
    }

    pub fn selected(&self) -> Option<&str> {
        self.states[self.current].selected.as_deref()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.states.get(index).is_some_and(|s| s.checked)
    }

    pub fn all_complete(&self) -> bool {
        self.states.iter().all(|s| s.checked)
    }

    /// Select an option by value. Values not on offer for the active
    /// sentence are ignored.
    pub fn select(&mut self, value: &str) {
        if self.options.iter().any(|o| o == value) {
            self.states[self.current].selected = Some(value.to_string());
        }
    }

    /// Grade the active sentence. The sentence is marked complete when the
    /// selected value matches the canonical answer; completion is monotonic,
    /// so a wrong re-check never un-marks it. Returns the sentence's
    /// completion state. With no selection this is a no-op.
    pub fn check_answer(&mut self) -> bool {
        let canonical = self.set.sentences[self.current].correct_answer.clone();
        let state = &mut self.states[self.current];
        if let Some(selected) = &state.selected {
            if *selected == canonical {
                state.checked = true;
            }
        }
        state.checked
    }

    /// Move to the next sentence, gated on completion of the current one.
    ///
    /// On the final sentence, advancing requires every sentence to be
    /// complete and fires the one-shot overall-completion event; `true`
    /// means the event fired. All other calls return `false`, including
    /// gated no-ops.
    pub fn advance(&mut self, rng: &mut impl Rng) -> bool {
        let last = self.current + 1 == self.set.sentences.len();
        if last {
            if self.all_complete() && !self.completion_fired {
                self.completion_fired = true;
                return true;
            }
            return false;
        }
        if self.states[self.current].checked {
            self.current += 1;
            self.enter(rng);
        }
        false
    }
}

fn malformed(block_id: &str, reason: &str) -> EngineError {
    EngineError::MalformedPayload {
        block: block_id.to_string(),
        block_type: "fillInTheBlanks".to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sentence(text: &str, options: &[&str], correct: &str) -> FillBlankSentence {
        FillBlankSentence {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
        }
    }

    fn sentence_set() -> FillBlankSentenceSet {
        FillBlankSentenceSet {
            title: "Prepositions".to_string(),
            instructions: "Pick the word that completes each sentence.".to_string(),
            sentences: vec![
                sentence("The cat sat ___ the mat.", &["on", "at", "to"], "on"),
                sentence("She arrived ___ noon.", &["on", "at", "to"], "at"),
            ],
        }
    }

    fn runner(seed: u64) -> FillBlankRunner {
        let mut rng = StdRng::seed_from_u64(seed);
        FillBlankRunner::new("fib-1", sentence_set(), &mut rng).unwrap()
    }

    #[test]
    fn correct_value_stays_correct_across_shuffles() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut runner = FillBlankRunner::new("fib-1", sentence_set(), &mut rng).unwrap();
            assert!(runner.options().contains(&"on".to_string()));
            runner.select("on");
            assert!(runner.check_answer());
        }
    }

    #[test]
    fn wrong_value_is_not_marked_complete() {
        let mut runner = runner(1);
        runner.select("to");
        assert!(!runner.check_answer());
        assert!(!runner.is_checked(0));
    }

    #[test]
    fn selecting_an_unlisted_value_is_ignored() {
        let mut runner = runner(1);
        runner.select("under");
        assert_eq!(runner.selected(), None);
    }

    #[test]
    fn check_with_no_selection_is_a_no_op() {
        let mut runner = runner(1);
        assert!(!runner.check_answer());
        assert!(!runner.is_checked(0));
    }

    #[test]
    fn completion_is_monotonic_under_wrong_recheck() {
        let mut runner = runner(2);
        runner.select("on");
        assert!(runner.check_answer());
        runner.select("to");
        assert!(runner.check_answer());
        assert!(runner.is_checked(0));
    }

    #[test]
    fn advance_is_gated_on_current_sentence_completion() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut runner = FillBlankRunner::new("fib-1", sentence_set(), &mut rng).unwrap();
        runner.advance(&mut rng);
        assert_eq!(runner.current_index(), 0);

        runner.select("on");
        runner.check_answer();
        runner.advance(&mut rng);
        assert_eq!(runner.current_index(), 1);
    }

    #[test]
    fn final_advance_fires_completion_once() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut runner = FillBlankRunner::new("fib-1", sentence_set(), &mut rng).unwrap();
        runner.select("on");
        runner.check_answer();
        runner.advance(&mut rng);

        // not complete yet: gated
        assert!(!runner.advance(&mut rng));

        runner.select("at");
        runner.check_answer();
        assert!(runner.all_complete());
        assert!(runner.advance(&mut rng));
        // one-shot
        assert!(!runner.advance(&mut rng));
    }

    #[test]
    fn entering_a_sentence_reshuffles_its_options() {
        // Across many seeds the second sentence's options must appear in
        // more than one order, while always holding the same values.
        let mut orders = std::collections::HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut runner = FillBlankRunner::new("fib-1", sentence_set(), &mut rng).unwrap();
            runner.select("on");
            runner.check_answer();
            runner.advance(&mut rng);

            let mut values = runner.options().to_vec();
            orders.insert(values.clone());
            values.sort();
            assert_eq!(values, vec!["at", "on", "to"]);
        }
        assert!(orders.len() > 1);
    }

    #[test]
    fn rejects_sentence_without_exactly_one_blank() {
        let mut rng = StdRng::seed_from_u64(5);
        let set = FillBlankSentenceSet {
            title: "Bad".to_string(),
            instructions: String::new(),
            sentences: vec![sentence("No blanks here.", &["on"], "on")],
        };
        assert!(matches!(
            FillBlankRunner::new("fib-1", set, &mut rng),
            Err(EngineError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn rejects_correct_answer_missing_from_options() {
        let mut rng = StdRng::seed_from_u64(6);
        let set = FillBlankSentenceSet {
            title: "Bad".to_string(),
            instructions: String::new(),
            sentences: vec![sentence("The cat sat ___ the mat.", &["at", "to"], "on")],
        };
        assert!(matches!(
            FillBlankRunner::new("fib-1", set, &mut rng),
            Err(EngineError::MalformedPayload { .. })
        ));
    }
}
