//! End-to-end runs against an in-memory roster, writing real files.

use std::fs;

use nafuda_core::{ChannelId, LayoutKind};
use nafuda_pipeline::{run, FileSink, PipelineError, WriteResult};
use nafuda_renderer::Renderer;
use nafuda_roster::{memory::profile, InMemorySource, SourceError};
use tempfile::TempDir;

fn three_members_b_fails() -> InMemorySource {
    InMemorySource::new()
        .with_member("UA", profile("Alice", "alice", "PM"))
        .with_failing_member(
            "UB",
            SourceError::Status {
                method: "users.info",
                status: 500,
            },
        )
        .with_member("UC", profile("Carol", "carol", ""))
        .with_page_size(1)
}

#[test]
fn skipped_member_still_produces_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("name_badges.html");
    let renderer = Renderer::new().unwrap();

    let outcome = run(
        &ChannelId::from("C1"),
        &three_members_b_fails(),
        &renderer,
        &LayoutKind::Nafuda.spec(),
        &mut FileSink::new(&path),
    )
    .expect("run");

    assert!(matches!(outcome.write, WriteResult::Written { .. }));
    assert_eq!(outcome.write.path(), path.as_path());
    let html = fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches(r#"class="badge""#).count(), 2);
    assert!(html.find("Alice").unwrap() < html.find("Carol").unwrap());
    assert_eq!(outcome.report.skipped[0].member_id.0, "UB");
}

#[test]
fn listing_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("name_badges.html");
    let renderer = Renderer::new().unwrap();
    let source = three_members_b_fails().with_listing_error(SourceError::Api {
        method: "conversations.members",
        error: "channel_not_found".into(),
    });

    let err = run(
        &ChannelId::from("CBAD"),
        &source,
        &renderer,
        &LayoutKind::Simple.spec(),
        &mut FileSink::new(&path),
    )
    .unwrap_err();

    assert!(matches!(err, PipelineError::Resolve(_)));
    assert!(err.to_string().contains("channel_not_found"));
    assert!(!path.exists(), "no output on fatal listing error");
}

#[test]
fn dry_run_reports_path_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("name_badges.html");
    let renderer = Renderer::new().unwrap();

    let outcome = run(
        &ChannelId::from("C1"),
        &three_members_b_fails(),
        &renderer,
        &LayoutKind::A4.spec(),
        &mut FileSink::new(&path).dry_run(true),
    )
    .expect("run");

    assert!(matches!(outcome.write, WriteResult::WouldWrite { .. }));
    assert!(!path.exists());
}

#[test]
fn listing_failure_keeps_previous_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("name_badges.html");
    fs::write(&path, "previous sheet").unwrap();
    let renderer = Renderer::new().unwrap();
    let source = three_members_b_fails().with_listing_error(SourceError::Transport {
        method: "conversations.members",
        message: "timed out".into(),
    });

    run(
        &ChannelId::from("C1"),
        &source,
        &renderer,
        &LayoutKind::Nafuda.spec(),
        &mut FileSink::new(&path),
    )
    .unwrap_err();

    assert_eq!(fs::read_to_string(&path).unwrap(), "previous sheet");
}
