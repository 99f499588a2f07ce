use nice_core::prompt::ClassificationMessage;
use nice_core::{CandidateSet, Classification};
use serde::Serialize;
use std::path::Path;
use storage::ReferenceStore;
use tracing::{info, warn};

#[derive(Serialize)]
struct ClassificationReport<'a> {
    description: &'a str,
    candidates: &'a CandidateSet,
    answer: &'a str,
}

pub fn classification_json(
    description: &str,
    result: &Classification,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ClassificationReport {
        description,
        candidates: &result.candidates,
        answer: &result.answer,
    })
}

/// One line per candidate: class number, tab, heading terms.
pub fn candidate_lines(candidates: &CandidateSet, store: &ReferenceStore) -> Vec<String> {
    candidates
        .iter()
        .map(|id| match store.get(id) {
            Ok(record) => format!("{}\t{}", id, record.heading.join("; ")),
            Err(_) => format!("{}\t(no reference data)", id),
        })
        .collect()
}

pub fn messages_json(messages: &[ClassificationMessage]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(messages)
}

#[derive(Serialize)]
struct Snapshot<'a> {
    description: &'a str,
    messages: &'a [ClassificationMessage],
}

/// Diagnostic dump of the prompt. Failures are logged and reported as `false`.
pub fn write_snapshot(path: &Path, description: &str, messages: &[ClassificationMessage]) -> bool {
    let body = match serde_json::to_vec_pretty(&Snapshot {
        description,
        messages,
    }) {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "could not serialize prompt snapshot");
            return false;
        }
    };
    match std::fs::write(path, body) {
        Ok(()) => {
            info!(path = %path.display(), "prompt snapshot written");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not write prompt snapshot");
            false
        }
    }
}
