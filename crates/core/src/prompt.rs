use crate::retriever::CandidateSet;
use serde::{Deserialize, Serialize};
use storage::{ReferenceRecord, ReferenceStore};
use tracing::{debug, warn};

pub const FRAME_TASK: &str =
    "I'm working on Nice classification of goods and services for intellectual property.";
pub const FRAME_DESCRIPTION: &str = "Here is the description of the product:";
pub const FRAME_QUESTION: &str = "What is the class of this product?";

pub const MESSAGES_PER_CLASS: usize = 4;
pub const FRAME_MESSAGES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Context,
    Instruction,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::Context => "context",
            MessageRole::Instruction => "instruction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ClassificationMessage {
    pub fn context(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Context,
            content: content.into(),
        }
    }

    pub fn instruction(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Instruction,
            content: content.into(),
        }
    }
}

pub fn render_class(record: &ReferenceRecord) -> [ClassificationMessage; MESSAGES_PER_CLASS] {
    [
        ClassificationMessage::context(record.introduction.clone()),
        ClassificationMessage::context(format!(
            "This class includes: {}",
            record.heading.join(", ")
        )),
        ClassificationMessage::context(format!(
            "This class particularly includes: {}",
            record.includes.join(", ")
        )),
        ClassificationMessage::context(format!(
            "This class particularly excludes: {}",
            record.excludes.join(", ")
        )),
    ]
}

/// Builds the full prompt: grounding for each known candidate in ascending
/// class order, then the instruction frame around the raw description.
///
/// Candidates missing from the store are left out.
pub fn assemble(
    description: &str,
    candidates: &CandidateSet,
    store: &ReferenceStore,
) -> Vec<ClassificationMessage> {
    let mut messages = Vec::with_capacity(candidates.len() * MESSAGES_PER_CLASS + FRAME_MESSAGES);

    for class_id in candidates.iter() {
        match store.get(class_id) {
            Ok(record) => messages.extend(render_class(record)),
            Err(e) => warn!(class_id, error = %e, "candidate omitted from prompt"),
        }
    }
    if messages.is_empty() {
        debug!("no grounding available, prompting with the description only");
    }

    messages.extend([
        ClassificationMessage::instruction(FRAME_TASK),
        ClassificationMessage::instruction(FRAME_DESCRIPTION),
        ClassificationMessage::instruction(description),
        ClassificationMessage::instruction(FRAME_QUESTION),
    ]);
    messages
}
