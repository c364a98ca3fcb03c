//! Quiz progression state machine.
//!
//! `Answering -> Submitted -> Answering(next) | Completed`, one question at
//! a time. Submitting appends to a result log; completion maps the tally to
//! a feedback tier. There is no partial credit and no time limit.

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::types::QuizData;

/// Where the runner is in the quiz lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for a selection on the current question.
    Answering,
    /// Current question submitted and graded; waiting to advance.
    Submitted { correct: bool },
    /// All questions answered.
    Completed,
}

/// One entry of the result log, also the `onQuestionComplete` event value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub selected: String,
    pub correct_answer: String,
    pub correct: bool,
    /// The author's feedback message for the graded outcome.
    pub explanation: String,
}

/// Completion feedback tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    /// 100% correct.
    Perfect,
    /// At least 80% correct.
    Strong,
    /// Below 80%.
    NeedsPractice,
}

impl FeedbackTier {
    /// Tier for `correct` out of `total` answers. `total` must be non-zero,
    /// which the runner constructor guarantees.
    pub fn for_tally(correct: usize, total: usize) -> Self {
        if correct == total {
            Self::Perfect
        } else if correct * 100 >= total * 80 {
            Self::Strong
        } else {
            Self::NeedsPractice
        }
    }
}

/// Tally reported once the quiz is completed.
#[derive(Debug, Clone)]
pub struct QuizSummary {
    pub correct: usize,
    pub total: usize,
    pub tier: FeedbackTier,
}

/// State machine for one quiz block.
#[derive(Debug)]
pub struct QuizRunner {
    quiz: QuizData,
    index: usize,
    selected: Option<usize>,
    phase: QuizPhase,
    results: Vec<QuestionResult>,
}

impl QuizRunner {
    /// Validate the quiz and start at `Answering(0)`.
    ///
    /// Every `correct_answer` must index validly into its question's
    /// answers, and the quiz must have at least one question.
    pub fn new(block_id: &str, quiz: QuizData) -> Result<Self> {
        if quiz.questions.is_empty() {
            return Err(EngineError::MalformedPayload {
                block: block_id.to_string(),
                block_type: "quiz".to_string(),
                reason: "quiz has no questions".to_string(),
            });
        }
        for (i, question) in quiz.questions.iter().enumerate() {
            if question.correct_index().is_none() {
                return Err(EngineError::InvalidAnswerIndex {
                    block: block_id.to_string(),
                    question: i,
                    value: question.correct_answer.clone(),
                });
            }
        }
        Ok(Self {
            quiz,
            index: 0,
            selected: None,
            phase: QuizPhase::Answering,
            results: Vec::new(),
        })
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Zero-based index of the current question.
    pub fn question_index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn current_question(&self) -> &crate::types::Question {
        &self.quiz.questions[self.index]
    }

    /// Zero-based index of the currently selected answer, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// Record a selection. Legal only while answering; out-of-range answers
    /// and selections in other phases are ignored.
    pub fn select_answer(&mut self, answer: usize) {
        if self.phase != QuizPhase::Answering {
            return;
        }
        if answer >= self.current_question().answers.len() {
            return;
        }
        self.selected = Some(answer);
    }

    /// Grade the current selection and append it to the result log.
    ///
    /// Returns the logged result so a host can forward it as its
    /// question-complete event. With no selection, or outside `Answering`,
    /// this is a no-op returning `None`.
    pub fn submit(&mut self) -> Option<QuestionResult> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        let selected = self.selected?;
        let question = self.current_question();
        // new() validated every correct_answer, so the index is present
        let correct_index = question.correct_index().unwrap_or(0);
        let correct = selected == correct_index;

        let result = QuestionResult {
            question: question.text.clone(),
            selected: question.answers[selected].clone(),
            correct_answer: question.answers[correct_index].clone(),
            correct,
            explanation: if correct {
                question.message_for_correct_answer.clone()
            } else {
                question.message_for_incorrect_answer.clone()
            },
        };
        self.results.push(result.clone());
        self.phase = QuizPhase::Submitted { correct };
        Some(result)
    }

    /// Move past a submitted question: on to the next, or to `Completed`
    /// after the last one. No-op unless in `Submitted`.
    pub fn advance(&mut self) {
        if !matches!(self.phase, QuizPhase::Submitted { .. }) {
            return;
        }
        if self.index + 1 == self.quiz.questions.len() {
            self.phase = QuizPhase::Completed;
        } else {
            self.index += 1;
            self.selected = None;
            self.phase = QuizPhase::Answering;
        }
    }

    /// Return to `Answering(0)` with an empty result log.
    pub fn restart(&mut self) {
        self.index = 0;
        self.selected = None;
        self.phase = QuizPhase::Answering;
        self.results.clear();
    }

    /// Tally and feedback tier, available once completed.
    pub fn summary(&self) -> Option<QuizSummary> {
        if self.phase != QuizPhase::Completed {
            return None;
        }
        let correct = self.results.iter().filter(|r| r.correct).count();
        let total = self.quiz.questions.len();
        Some(QuizSummary {
            correct,
            total,
            tier: FeedbackTier::for_tally(correct, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Question;
    use pretty_assertions::assert_eq;

    fn question(text: &str, answers: &[&str], correct: usize) -> Question {
        Question {
            text: text.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            correct_answer: correct.to_string(),
            message_for_correct_answer: "Well done.".to_string(),
            message_for_incorrect_answer: "Review the word.".to_string(),
        }
    }

    fn two_question_quiz() -> QuizData {
        QuizData {
            title: "Vocabulary check".to_string(),
            questions: vec![
                question("Pick A", &["a", "b", "c"], 1),
                question("Pick C", &["a", "b", "c"], 3),
            ],
        }
    }

    fn runner() -> QuizRunner {
        QuizRunner::new("quiz-1", two_question_quiz()).unwrap()
    }

    #[test]
    fn starts_answering_first_question() {
        let runner = runner();
        assert_eq!(runner.phase(), QuizPhase::Answering);
        assert_eq!(runner.question_index(), 0);
        assert_eq!(runner.selected(), None);
    }

    #[test]
    fn submit_without_selection_is_a_no_op() {
        let mut runner = runner();
        assert!(runner.submit().is_none());
        assert_eq!(runner.phase(), QuizPhase::Answering);
        assert!(runner.results().is_empty());
    }

    #[test]
    fn recorded_correctness_matches_selection() {
        let mut runner = runner();
        runner.select_answer(0);
        let result = runner.submit().unwrap();
        assert!(result.correct);
        assert_eq!(result.selected, "a");
        assert_eq!(result.explanation, "Well done.");
        assert_eq!(runner.phase(), QuizPhase::Submitted { correct: true });
    }

    #[test]
    fn incorrect_selection_logs_incorrect_result() {
        let mut runner = runner();
        runner.select_answer(2);
        let result = runner.submit().unwrap();
        assert!(!result.correct);
        assert_eq!(result.correct_answer, "a");
        assert_eq!(result.explanation, "Review the word.");
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut runner = runner();
        runner.select_answer(9);
        assert_eq!(runner.selected(), None);
    }

    #[test]
    fn select_is_ignored_after_submit() {
        let mut runner = runner();
        runner.select_answer(0);
        runner.submit().unwrap();
        runner.select_answer(1);
        assert_eq!(runner.selected(), Some(0));
    }

    #[test]
    fn advance_moves_to_next_question_with_cleared_selection() {
        let mut runner = runner();
        runner.select_answer(0);
        runner.submit().unwrap();
        runner.advance();
        assert_eq!(runner.phase(), QuizPhase::Answering);
        assert_eq!(runner.question_index(), 1);
        assert_eq!(runner.selected(), None);
    }

    #[test]
    fn advance_before_submit_is_a_no_op() {
        let mut runner = runner();
        runner.select_answer(0);
        runner.advance();
        assert_eq!(runner.question_index(), 0);
        assert_eq!(runner.phase(), QuizPhase::Answering);
    }

    #[test]
    fn one_correct_of_two_is_needs_practice() {
        let mut runner = runner();
        runner.select_answer(0); // correct
        runner.submit().unwrap();
        runner.advance();
        runner.select_answer(0); // incorrect, answer is "c"
        runner.submit().unwrap();
        runner.advance();

        assert_eq!(runner.phase(), QuizPhase::Completed);
        let summary = runner.summary().unwrap();
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.tier, FeedbackTier::NeedsPractice);
    }

    #[test]
    fn all_correct_is_perfect() {
        let mut runner = runner();
        runner.select_answer(0);
        runner.submit().unwrap();
        runner.advance();
        runner.select_answer(2);
        runner.submit().unwrap();
        runner.advance();

        assert_eq!(runner.summary().unwrap().tier, FeedbackTier::Perfect);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(FeedbackTier::for_tally(5, 5), FeedbackTier::Perfect);
        assert_eq!(FeedbackTier::for_tally(4, 5), FeedbackTier::Strong);
        assert_eq!(FeedbackTier::for_tally(3, 5), FeedbackTier::NeedsPractice);
    }

    #[test]
    fn restart_clears_results_from_any_phase() {
        let mut runner = runner();
        runner.select_answer(1);
        runner.submit().unwrap();
        runner.advance();
        runner.select_answer(1);
        runner.submit().unwrap();
        runner.advance();
        assert_eq!(runner.phase(), QuizPhase::Completed);

        runner.restart();
        assert_eq!(runner.phase(), QuizPhase::Answering);
        assert_eq!(runner.question_index(), 0);
        assert!(runner.results().is_empty());
        assert!(runner.summary().is_none());
    }

    #[test]
    fn rejects_empty_quiz() {
        let quiz = QuizData {
            title: "Empty".to_string(),
            questions: vec![],
        };
        assert!(matches!(
            QuizRunner::new("quiz-1", quiz),
            Err(EngineError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn rejects_invalid_correct_answer_index() {
        let quiz = QuizData {
            title: "Bad".to_string(),
            questions: vec![question("Pick", &["a", "b"], 5)],
        };
        assert!(matches!(
            QuizRunner::new("quiz-1", quiz),
            Err(EngineError::InvalidAnswerIndex { question: 0, .. })
        ));
    }
}
