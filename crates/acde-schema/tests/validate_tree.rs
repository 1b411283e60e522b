//! Integration tests: full validation runs over temporary asset trees.
//!
//! Each test lays out the `prompts/de`, `chatmodes/de`, `instructions/de`
//! and `patterns` directories the built-in registry expects, runs
//! `validate_tree`, and checks the aggregated summary.

use std::path::Path;

use acde_core::{IssueKind, RunSummary};
use acde_schema::{validate_tree, Registry};

const CHATMODE_OK: &str = "---
name: Streaming Data Specialist
description: Designs Kafka and Flink pipelines
capabilities:
  - exactly-once sinks
  - watermark tuning
boundaries:
  - never drop a topic
activation: on request
---

You help design streaming pipelines.
";

const CHATMODE_NO_CAPABILITIES: &str = "---
name: Cohort Retention Coach
description: Explains retention curves
boundaries:
  - no PII in examples
---

You coach analysts on cohort analysis.
";

const PATTERN_OK: &str = "---
description: \"Incremental merge with late-arriving data\"
mode: agent
model: GPT-4o
tools: [\"codebase\"]
---

Write a MERGE for ${input:table}.
";

const INSTRUCTIONS_OK: &str = "---
name: Airflow DAG conventions
globs: [\"dags/**/*.py\"]
rules:
  - one DAG per file
  - set catchup explicitly
autofix_hints:
  - add default_args
---

Apply these rules to every DAG.
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn create_all_asset_dirs(root: &Path) {
    for dir in ["prompts/de", "chatmodes/de", "instructions/de", "patterns"] {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }
}

fn run(root: &Path) -> RunSummary {
    let registry = Registry::builtin().unwrap();
    validate_tree(&registry, root, |_| {})
}

#[test]
fn chatmode_missing_capabilities_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    create_all_asset_dirs(root);
    write(root, "chatmodes/de/streaming-data-specialist.chatmode.md", CHATMODE_OK);
    write(root, "chatmodes/de/cohort-retention-coach.chatmode.md", CHATMODE_NO_CAPABILITIES);

    let summary = run(root);

    assert_eq!(summary.total_files(), 2);
    assert_eq!(summary.valid_files(), 1);
    assert_eq!(summary.error_files(), 1);
    assert_eq!(summary.errors().len(), 1);
    let error = &summary.errors()[0];
    assert_eq!(error.kind(), IssueKind::RequiredField);
    assert!(error.message().contains("capabilities"));
    assert!(error
        .file()
        .ends_with("chatmodes/de/cohort-retention-coach.chatmode.md"));
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn empty_existing_directories_pass_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    create_all_asset_dirs(dir.path());

    let summary = run(dir.path());

    assert_eq!(summary.total_files(), 0);
    assert!(summary.errors().is_empty());
    assert!(summary.warnings().is_empty());
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn missing_asset_directory_is_a_warning_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("prompts/de")).unwrap();
    std::fs::create_dir_all(root.join("chatmodes/de")).unwrap();
    std::fs::create_dir_all(root.join("instructions/de")).unwrap();

    let summary = run(root);

    assert_eq!(summary.total_files(), 0);
    assert_eq!(summary.warnings().len(), 1);
    assert_eq!(summary.warnings()[0].kind(), IssueKind::Directory);
    assert!(summary.warnings()[0].file().ends_with("patterns"));
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn compliant_tree_across_all_types() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    create_all_asset_dirs(root);
    write(root, "chatmodes/de/streaming.chatmode.md", CHATMODE_OK);
    write(root, "patterns/pattern-late-data.prompt.md", PATTERN_OK);
    write(root, "prompts/de/sql/late-data.prompt.md", PATTERN_OK);
    write(root, "instructions/de/airflow.instructions.md", INSTRUCTIONS_OK);
    // Ignored: does not carry the `pattern-` prefix.
    write(root, "patterns/late-data.prompt.md", PATTERN_OK);

    let summary = run(root);

    assert_eq!(summary.total_files(), 4);
    assert_eq!(summary.valid_files(), 4);
    assert!(summary.errors().is_empty(), "{:?}", summary.errors());
    assert!(summary.warnings().is_empty(), "{:?}", summary.warnings());
}

#[test]
fn unknown_fields_warn_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    create_all_asset_dirs(root);
    let legacy = "---
description: Legacy prompt
mode: agent
model: GPT-4o
title: Old title
intent: Old intent
---

Body.
";
    write(root, "prompts/de/legacy.prompt.md", legacy);

    let summary = run(root);

    assert_eq!(summary.total_files(), 1);
    assert_eq!(summary.valid_files(), 1);
    assert_eq!(summary.warning_files(), 1);
    let messages: Vec<&str> = summary.warnings().iter().map(|w| w.message()).collect();
    assert_eq!(messages, ["Unknown field: title", "Unknown field: intent"]);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn errors_accumulate_across_asset_types() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    create_all_asset_dirs(root);
    write(root, "prompts/de/no-header.prompt.md", "# Just a heading\n");
    write(
        root,
        "instructions/de/broken.instructions.md",
        "---\nname: [unclosed\n---\nrules: none\n",
    );

    let summary = run(root);

    assert_eq!(summary.total_files(), 2);
    assert_eq!(summary.error_files(), 2);
    let kinds: Vec<IssueKind> = summary.errors().iter().map(|i| i.kind()).collect();
    assert_eq!(
        kinds,
        [IssueKind::MissingFrontmatter, IssueKind::MissingFrontmatter]
    );
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn separate_runs_do_not_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    create_all_asset_dirs(root);
    write(root, "chatmodes/de/coach.chatmode.md", CHATMODE_NO_CAPABILITIES);

    let first = run(root);
    let second = run(root);

    assert_eq!(first, second);
    assert_eq!(second.total_files(), 1);
    assert_eq!(second.errors().len(), 1);
}
