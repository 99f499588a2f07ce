use clap::Parser;
use cli::args::{Cli, Commands};
use cli::output::{candidate_lines, classification_json, messages_json, write_snapshot};
use nice_core::prompt::ClassificationMessage;
use nice_core::{CandidateSet, Classification, RetrievalOptions};
use storage::{ReferenceRecord, ReferenceStore};

fn store() -> ReferenceStore {
    ReferenceStore::from_records(vec![ReferenceRecord {
        class_id: 9,
        heading: vec!["machine tools".into(), "motors".into()],
        introduction: "Machine tools".into(),
        includes: vec!["lathes".into()],
        excludes: vec![],
    }])
    .unwrap()
}

fn defaults() -> RetrievalOptions {
    RetrievalOptions {
        collections: vec!["introduction".into(), "heading".into()],
        limit_per_collection: 2,
    }
}

#[test]
fn retrieval_flags_override_config_defaults() {
    let cli = Cli::try_parse_from([
        "nice-classify",
        "classify",
        "an industrial lathe",
        "--limit",
        "5",
        "--collections",
        "heading,include",
        "--json",
    ])
    .unwrap();
    match cli.command {
        Commands::Classify {
            description,
            retrieval,
            json,
            snapshot,
        } => {
            assert_eq!(description, "an industrial lathe");
            assert!(json);
            assert!(snapshot.is_none());
            let opts = retrieval.options(&defaults());
            assert_eq!(opts.collections, vec!["heading", "include"]);
            assert_eq!(opts.limit_per_collection, 5);
        }
        _ => panic!("expected classify"),
    }
}

#[test]
fn retrieval_flags_may_precede_the_description() {
    let cli = Cli::try_parse_from([
        "nice-classify",
        "classify",
        "--collections",
        "heading,include",
        "--limit",
        "3",
        "an industrial lathe",
    ])
    .unwrap();
    match cli.command {
        Commands::Classify {
            description,
            retrieval,
            ..
        } => {
            assert_eq!(description, "an industrial lathe");
            let opts = retrieval.options(&defaults());
            assert_eq!(opts.collections, vec!["heading", "include"]);
            assert_eq!(opts.limit_per_collection, 3);
        }
        _ => panic!("expected classify"),
    }

    let cli = Cli::try_parse_from([
        "nice-classify",
        "candidates",
        "--collections",
        "exclude",
        "a lathe",
    ])
    .unwrap();
    match cli.command {
        Commands::Candidates {
            description,
            retrieval,
        } => {
            assert_eq!(description, "a lathe");
            assert_eq!(retrieval.collections, vec!["exclude"]);
        }
        _ => panic!("expected candidates"),
    }
}

#[test]
fn missing_flags_keep_config_defaults() {
    let cli = Cli::try_parse_from(["nice-classify", "-c", "nice.toml", "prompt", "a lathe"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some("nice.toml"));
    match cli.command {
        Commands::Prompt { retrieval, .. } => assert_eq!(retrieval.options(&defaults()), defaults()),
        _ => panic!("expected prompt"),
    }
}

#[test]
fn candidate_lines_mark_unknown_classes() {
    let candidates: CandidateSet = [44, 9].into_iter().collect();
    let lines = candidate_lines(&candidates, &store());
    assert_eq!(lines, vec!["9\tmachine tools; motors", "44\t(no reference data)"]);
}

#[test]
fn classification_json_carries_answer_and_candidates() {
    let result = Classification {
        answer: "Class 7".into(),
        candidates: [9].into_iter().collect(),
        messages: vec![ClassificationMessage::instruction("a lathe")],
    };
    let json: serde_json::Value =
        serde_json::from_str(&classification_json("a lathe", &result).unwrap()).unwrap();
    assert_eq!(json["answer"], "Class 7");
    assert_eq!(json["candidates"], serde_json::json!([9]));
    assert_eq!(json["description"], "a lathe");
}

#[test]
fn messages_json_lists_roles_in_order() {
    let json: serde_json::Value = serde_json::from_str(
        &messages_json(&[
            ClassificationMessage::context("Machine tools"),
            ClassificationMessage::instruction("a lathe"),
        ])
        .unwrap(),
    )
    .unwrap();
    assert_eq!(json[0]["role"], "context");
    assert_eq!(json[1]["role"], "instruction");
    assert_eq!(json[1]["content"], "a lathe");
}

#[test]
fn snapshot_write_failures_are_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let messages = vec![ClassificationMessage::instruction("a lathe")];

    let ok = dir.path().join("prompt.json");
    assert!(write_snapshot(&ok, "a lathe", &messages));
    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&ok).unwrap()).unwrap();
    assert_eq!(written["description"], "a lathe");

    let unwritable = dir.path().join("missing").join("prompt.json");
    assert!(!write_snapshot(&unwritable, "a lathe", &messages));
}
