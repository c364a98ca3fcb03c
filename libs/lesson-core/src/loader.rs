//! Lesson JSON loader.
//!
//! Loading runs in two phases: a raw pass that only needs `blockId` and
//! `type`, then a typed conversion per block. Unrecognized types and
//! undecodable payloads are kept as carrier variants instead of failing the
//! lesson, so the dispatcher can surface them as per-block diagnostics.
//! Only a duplicate `blockId` or unparseable top-level JSON fails the load.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{EngineError, Result};
use crate::types::{
    Accessibility, BlockData, ClozeSentence, ContentBlock, FillBlankSentenceSet,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    block_id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    accessibility: Option<Accessibility>,
}

/// The two payload shapes authored under the `fillInTheBlanks` type: a
/// sentence set (has `sentences`) or a single cloze sentence (has
/// `sentence` and `words`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FillBlankPayload {
    Sentences(FillBlankSentenceSet),
    Cloze(ClozeSentence),
}

/// Parse a lesson: a JSON array of content blocks.
pub fn parse_lesson(json: &str) -> Result<Vec<ContentBlock>> {
    let raw: Vec<RawBlock> = serde_json::from_str(json)?;

    let mut seen_ids = HashSet::new();
    let mut blocks = Vec::with_capacity(raw.len());
    for raw_block in raw {
        if !seen_ids.insert(raw_block.block_id.clone()) {
            return Err(EngineError::DuplicateBlockId {
                block: raw_block.block_id,
            });
        }
        blocks.push(convert(raw_block));
    }
    tracing::debug!(blocks = blocks.len(), "lesson parsed");
    Ok(blocks)
}

fn convert(raw: RawBlock) -> ContentBlock {
    let data = decode_payload(&raw.block_type, raw.data);
    ContentBlock {
        block_id: raw.block_id,
        data,
        accessibility: raw.accessibility,
    }
}

fn decode_payload(block_type: &str, data: Value) -> BlockData {
    match block_type {
        "text" => typed(block_type, data, BlockData::Text),
        "quiz" => typed(block_type, data, BlockData::Quiz),
        "fillInTheBlanks" => match serde_json::from_value::<FillBlankPayload>(data) {
            Ok(FillBlankPayload::Sentences(set)) => BlockData::FillInTheBlanks(set),
            Ok(FillBlankPayload::Cloze(cloze)) => BlockData::Cloze(cloze),
            Err(_) => BlockData::Malformed {
                block_type: block_type.to_string(),
                reason: "payload is neither a sentence set nor a cloze sentence".to_string(),
            },
        },
        "flashcard" => typed(block_type, data, BlockData::Flashcard),
        "youtubeEmbed" => typed(block_type, data, BlockData::YoutubeEmbed),
        "chart" => BlockData::Chart(data),
        "timeline" => BlockData::Timeline(data),
        "conceptMap" => BlockData::ConceptMap(data),
        "flowchart" => BlockData::Flowchart(data),
        other => BlockData::Unknown {
            block_type: other.to_string(),
        },
    }
}

fn typed<T, F>(block_type: &str, data: Value, wrap: F) -> BlockData
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(T) -> BlockData,
{
    match serde_json::from_value(data) {
        Ok(payload) => wrap(payload),
        Err(err) => BlockData::Malformed {
            block_type: block_type.to_string(),
            reason: err.to_string(),
        },
    }
}
