//! Core content types for lesson delivery.
//!
//! Lesson content is JSON-shaped and authored externally, so the wire field
//! names are camelCase (`blockId`, `correctAnswer`) and every payload type
//! derives serde both ways.

use serde::{Deserialize, Serialize};

/// Runs of this many underscores (or more) in authored text count as one blank.
pub const BLANK_MARKER_MIN_LEN: usize = 3;

/// Fixed placeholder the synthesizer normalizes blank markers to.
pub const BLANK_PLACEHOLDER: &str = "_____";

/// Optional accessibility description attached to a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    pub alt_text: String,
    pub long_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_table: Option<String>,
}

/// Atomic, typed unit of lesson content.
///
/// `block_id` is unique within a lesson and is the stable key for the
/// block's runner state.
#[derive(Debug, Clone)]
pub struct ContentBlock {
    pub block_id: String,
    pub data: BlockData,
    pub accessibility: Option<Accessibility>,
}

/// Type-specific payload of a content block.
///
/// The dispatcher matches this exhaustively, so adding a block type without
/// a handler fails to compile. Unrecognized declared types and payloads that
/// could not be decoded survive as carrier variants rather than being
/// dropped at load time; the dispatcher turns them into per-block
/// diagnostics.
#[derive(Debug, Clone)]
pub enum BlockData {
    Text(TextData),
    Quiz(QuizData),
    FillInTheBlanks(FillBlankSentenceSet),
    Cloze(ClozeSentence),
    Flashcard(FlashcardDeck),
    YoutubeEmbed(YoutubeEmbedData),
    Chart(serde_json::Value),
    Timeline(serde_json::Value),
    ConceptMap(serde_json::Value),
    Flowchart(serde_json::Value),
    /// Declared `type` string was not recognized.
    Unknown { block_type: String },
    /// Declared type was recognized but its payload could not be decoded.
    Malformed { block_type: String, reason: String },
}

impl BlockData {
    /// The declared type name, as it appears on the wire.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Quiz(_) => "quiz",
            Self::FillInTheBlanks(_) | Self::Cloze(_) => "fillInTheBlanks",
            Self::Flashcard(_) => "flashcard",
            Self::YoutubeEmbed(_) => "youtubeEmbed",
            Self::Chart(_) => "chart",
            Self::Timeline(_) => "timeline",
            Self::ConceptMap(_) => "conceptMap",
            Self::Flowchart(_) => "flowchart",
            Self::Unknown { block_type } | Self::Malformed { block_type, .. } => block_type,
        }
    }
}

/// Passive prose block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    pub content: String,
}

/// Passive embedded video block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeEmbedData {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A multiple-choice quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub title: String,
    pub questions: Vec<Question>,
}

/// One multiple-choice question.
///
/// `correct_answer` is a 1-based index into `answers`, carried as a string
/// on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub answers: Vec<String>,
    pub correct_answer: String,
    pub message_for_correct_answer: String,
    pub message_for_incorrect_answer: String,
}

impl Question {
    /// Zero-based index of the correct answer, if `correct_answer` indexes
    /// validly into `answers`.
    pub fn correct_index(&self) -> Option<usize> {
        let one_based: usize = self.correct_answer.trim().parse().ok()?;
        if one_based >= 1 && one_based <= self.answers.len() {
            Some(one_based - 1)
        } else {
            None
        }
    }
}

/// Multi-sentence fill-in-the-blank drill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlankSentenceSet {
    pub title: String,
    pub instructions: String,
    pub sentences: Vec<FillBlankSentence>,
}

/// One sentence of a multi-sentence drill. `text` carries exactly one blank
/// marker; `correct_answer` is one of `options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlankSentence {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Single-sentence cloze exercise: `sentence` carries N blank markers and
/// `words[i]` is the canonical answer for the i-th blank in reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeSentence {
    pub title: String,
    pub sentence: String,
    pub words: Vec<String>,
}

impl ClozeSentence {
    /// Literal segments around the blanks; N blanks yield N+1 segments.
    pub fn segments(&self) -> Vec<String> {
        split_on_blanks(&self.sentence)
    }

    /// Number of blank markers in the sentence.
    pub fn blank_count(&self) -> usize {
        count_blanks(&self.sentence)
    }
}

/// A flashcard deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDeck {
    pub title: String,
    pub cards: Vec<Flashcard>,
}

/// One card of a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// Synthesizer input: one vocabulary table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    pub definition: String,
    pub sample_sentence: String,
    /// Sentence using the word, with the word replaced by one blank marker.
    pub challenge_sentence: String,
}

/// Split text on blank markers into its literal segments.
///
/// N blanks yield N+1 segments; underscore runs shorter than
/// [`BLANK_MARKER_MIN_LEN`] are kept as literal text.
pub fn split_on_blanks(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut underscores = 0usize;

    for ch in text.chars() {
        if ch == '_' {
            underscores += 1;
            continue;
        }
        if underscores >= BLANK_MARKER_MIN_LEN {
            segments.push(std::mem::take(&mut current));
        } else {
            current.extend(std::iter::repeat('_').take(underscores));
        }
        underscores = 0;
        current.push(ch);
    }
    if underscores >= BLANK_MARKER_MIN_LEN {
        segments.push(std::mem::take(&mut current));
    } else {
        current.extend(std::iter::repeat('_').take(underscores));
    }
    segments.push(current);
    segments
}

/// Number of blank markers in `text`.
pub fn count_blanks(text: &str) -> usize {
    split_on_blanks(text).len() - 1
}

/// Replace every blank marker in `text` with [`BLANK_PLACEHOLDER`].
pub fn normalize_blanks(text: &str) -> String {
    split_on_blanks(text).join(BLANK_PLACEHOLDER)
}
