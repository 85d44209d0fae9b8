//! Integration tests for dynamic rule loading
//!
//! Covers the file and HTTP rule sources, fetch-once semantics, failure
//! handling and reloads racing with readers.

use safeguard::config::secret_string;
use safeguard::context::{RedactionContext, RuleLoadOutcome};
use safeguard::rules::{FileRuleSource, HttpRuleSource, RuleKind, Verdict};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn write_rules(path: &std::path::Path, wipeout: &[&str]) {
    let quoted: Vec<String> = wipeout.iter().map(|r| format!("'{r}'")).collect();
    std::fs::write(
        path,
        format!(
            "boilerplate = ['\\*\\*\\* migrated \\*\\*\\*']\nwipeout = [{}]\n",
            quoted.join(", ")
        ),
    )
    .unwrap();
}

fn wipeout_patterns(context: &RedactionContext) -> Vec<String> {
    context
        .snapshot()
        .wipeout()
        .rules()
        .iter()
        .map(|r| r.as_str().to_string())
        .collect()
}

#[tokio::test]
async fn test_file_rules_applied_to_documents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.toml");
    write_rules(&path, &["need to delete", r"\.+"]);

    let context = RedactionContext::embedded().unwrap();
    let source = FileRuleSource::new(&path);
    for kind in RuleKind::ALL {
        assert!(context.ensure_rules_loaded(&source, kind).await.is_ok());
    }

    assert_eq!(
        context.strip_boilerplate("Normal scan. *** migrated ***"),
        "Normal scan."
    );
    assert!(context.gatekeep("Need to delete").is_discard());
    assert!(context.gatekeep("...").is_discard());
    assert_eq!(
        context.gatekeep("Normal scan."),
        Verdict::Keep("Normal scan.".to_string())
    );
}

#[tokio::test]
async fn test_http_rules_fetched_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/wipeout")
        .match_header("authorization", "Bearer rule-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"["need to delete"]"#)
        .expect(1)
        .create_async()
        .await;

    let source = HttpRuleSource::new(
        server.url(),
        Some(secret_string("rule-token".to_string())),
        Duration::from_secs(5),
    )
    .unwrap();
    let context = RedactionContext::embedded().unwrap();

    let first = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    assert_eq!(
        first,
        RuleLoadOutcome::Loaded {
            kind: RuleKind::Wipeout,
            accepted: 1,
            rejected: Vec::new(),
        }
    );
    let second = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    assert_eq!(second, RuleLoadOutcome::AlreadyLoaded);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_ensure_fetches_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/boilerplate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"["~[BbIiUu]"]"#)
        .expect(1)
        .create_async()
        .await;

    let source = Arc::new(HttpRuleSource::new(server.url(), None, Duration::from_secs(5)).unwrap());
    let context = Arc::new(RedactionContext::embedded().unwrap());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let source = Arc::clone(&source);
        let context = Arc::clone(&context);
        handles.push(tokio::spawn(async move {
            context
                .ensure_rules_loaded(&*source, RuleKind::Boilerplate)
                .await
        }));
    }

    let mut loaded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            RuleLoadOutcome::Loaded { .. } => loaded += 1,
            RuleLoadOutcome::AlreadyLoaded => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(loaded, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_rejected_patterns_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/wipeout")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"["\\.+", "(unclosed"]"#)
        .create_async()
        .await;

    let source = HttpRuleSource::new(server.url(), None, Duration::from_secs(5)).unwrap();
    let context = RedactionContext::embedded().unwrap();

    let outcome = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    match &outcome {
        RuleLoadOutcome::Loaded {
            accepted, rejected, ..
        } => {
            assert_eq!(*accepted, 1);
            assert_eq!(rejected.len(), 1);
            assert!(rejected[0].contains("(unclosed"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(outcome.diagnostic().is_some());
    assert!(context.gatekeep("...").is_discard());
}

#[tokio::test]
async fn test_http_failure_leaves_rules_unloaded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/wipeout")
        .with_status(503)
        .create_async()
        .await;

    let source = HttpRuleSource::new(server.url(), None, Duration::from_secs(5)).unwrap();
    let context = RedactionContext::embedded().unwrap();

    let outcome = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    assert!(!outcome.is_ok());
    assert!(outcome.diagnostic().unwrap().contains("503"));
    assert!(!context.snapshot().is_loaded(RuleKind::Wipeout));
    assert!(!context.gatekeep("Need to delete").is_discard());
}

#[tokio::test]
async fn test_failed_fetch_retried_on_next_call() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.toml");
    let source = FileRuleSource::new(&path);
    let context = RedactionContext::embedded().unwrap();

    let outcome = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    assert!(matches!(outcome, RuleLoadOutcome::Failed { .. }));

    write_rules(&path, &["need to delete"]);
    let outcome = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    assert!(matches!(outcome, RuleLoadOutcome::Loaded { accepted: 1, .. }));
    assert!(context.gatekeep("need to delete").is_discard());
}

#[tokio::test]
async fn test_reload_replaces_and_survives_failure() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.toml");
    write_rules(&path, &["alpha", "beta"]);

    let source = FileRuleSource::new(&path);
    let context = RedactionContext::embedded().unwrap();
    context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
    assert_eq!(wipeout_patterns(&context), vec!["alpha", "beta"]);

    write_rules(&path, &["gamma"]);
    assert!(context.reload_rules(&source, RuleKind::Wipeout).await.is_ok());
    assert_eq!(wipeout_patterns(&context), vec!["gamma"]);

    std::fs::remove_file(&path).unwrap();
    let outcome = context.reload_rules(&source, RuleKind::Wipeout).await;
    assert!(!outcome.is_ok());
    assert_eq!(wipeout_patterns(&context), vec!["gamma"]);
    assert!(context.gatekeep("gamma").is_discard());
}

#[tokio::test]
async fn test_readers_never_observe_partial_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.toml");
    let old_set = ["alpha", "beta", "delta"];
    let new_set = ["gamma", "epsilon", "zeta"];
    write_rules(&path, &old_set);

    let source = FileRuleSource::new(&path);
    let context = Arc::new(RedactionContext::embedded().unwrap());
    context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;

    let mut readers = Vec::new();
    for _ in 0..4 {
        let context = Arc::clone(&context);
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let patterns = wipeout_patterns(&context);
                assert!(
                    patterns == old_set || patterns == new_set,
                    "partial rule set observed: {patterns:?}"
                );
                tokio::task::yield_now().await;
            }
        }));
    }

    for round in 0..20 {
        let set = if round % 2 == 0 { &new_set } else { &old_set };
        write_rules(&path, set);
        assert!(context.reload_rules(&source, RuleKind::Wipeout).await.is_ok());
        tokio::task::yield_now().await;
    }

    for reader in readers {
        reader.await.unwrap();
    }
}
