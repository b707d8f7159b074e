use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use nafuda_core::LayoutSpec;

fn nafuda_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nafuda"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("SLACK_TOKEN")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

fn write_records(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("records.json");
    fs::write(
        &path,
        r#"[
  {"full_name": "Alice <Admin> & Co", "display_name": "alice", "title": "PM", "image_ref": "https://a/alice_192.png"},
  {"full_name": "Bob", "display_name": "", "title": "", "image_ref": ""},
  {"full_name": "Carol", "display_name": "carol", "title": "SRE", "image_ref": ""}
]"#,
    )
    .expect("write records");
    path
}

// ---------------------------------------------------------------------------
// 1. Configuration errors happen before any network call
// ---------------------------------------------------------------------------

#[test]
fn render_without_token_fails() {
    let home = TempDir::new().unwrap();
    nafuda_cmd(home.path())
        .args(["render", "C024BE91L"])
        .assert()
        .failure()
        .stderr(contains("missing API token"));
    assert!(!home.path().join("name_badges.html").exists());
}

#[test]
fn render_without_channel_fails() {
    let home = TempDir::new().unwrap();
    nafuda_cmd(home.path())
        .args(["render", "--token", "xoxb-test"])
        .assert()
        .failure()
        .stderr(contains("missing channel id"));
}

#[test]
fn render_with_channel_name_fails() {
    let home = TempDir::new().unwrap();
    nafuda_cmd(home.path())
        .env("SLACK_TOKEN", "xoxb-test")
        .args(["render", "#general"])
        .assert()
        .failure()
        .stderr(contains("invalid channel id '#general'"));
}

#[test]
fn unreachable_listing_is_fatal_and_writes_nothing() {
    let home = TempDir::new().unwrap();
    nafuda_cmd(home.path())
        .env("SLACK_TOKEN", "xoxb-test")
        .args([
            "render",
            "C024BE91L",
            "--api-base",
            "http://127.0.0.1:9/api",
            "--timeout",
            "2",
        ])
        .assert()
        .failure()
        .stderr(contains("failed to build badges for channel C024BE91L"))
        .stderr(contains("cannot list members"));
    assert!(!home.path().join("name_badges.html").exists());
}

#[test]
fn zero_timeout_is_rejected() {
    let home = TempDir::new().unwrap();
    nafuda_cmd(home.path())
        .env("SLACK_TOKEN", "xoxb-test")
        .args(["render", "C024BE91L", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(contains("--timeout"));
    assert!(!home.path().join("name_badges.html").exists());
}

// ---------------------------------------------------------------------------
// 2. Offline rendering
// ---------------------------------------------------------------------------

#[test]
fn render_file_writes_escaped_sheet() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let output = home.path().join("out").join("badges.html");

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .args(["--layout", "nafuda", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("3 badge(s) written to"))
        .stdout(contains("badges.html"));

    let html = fs::read_to_string(&output).expect("read output");
    assert_eq!(html.matches(r#"class="badge""#).count(), 3);
    assert!(html.contains("Alice &lt;Admin&gt; &amp; Co"));
    assert!(!html.contains("<Admin>"));
    assert!(html.find("Alice").unwrap() < html.find("Bob").unwrap());
    assert!(html.find("Bob").unwrap() < html.find("Carol").unwrap());
}

#[test]
fn render_file_defaults_to_name_badges_html_in_cwd() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .assert()
        .success();

    let html = fs::read_to_string(home.path().join("name_badges.html")).expect("default output");
    assert!(!html.contains(r#"class="display-name""#), "simple hides display name");
}

#[test]
fn render_file_dry_run_writes_nothing() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(contains("[dry-run]"));

    assert!(!home.path().join("name_badges.html").exists());
}

#[test]
fn render_file_accepts_yaml_and_empty_roster() {
    let home = TempDir::new().unwrap();
    let records = home.path().join("empty.yaml");
    fs::write(&records, "[]\n").unwrap();

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .args(["--layout", "a4"])
        .assert()
        .success()
        .stdout(contains("0 badge(s)"));

    let html = fs::read_to_string(home.path().join("name_badges.html")).unwrap();
    assert!(html.contains("</html>"));
    assert_eq!(html.matches(r#"class="badge""#).count(), 0);
}

#[test]
fn bad_layout_file_is_fatal() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let layout = home.path().join("layout.yaml");
    fs::write(&layout, "grid:\n  columns: 0\n").unwrap();

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .arg("--layout-file")
        .arg(&layout)
        .assert()
        .failure()
        .stderr(contains("columns"));
    assert!(!home.path().join("name_badges.html").exists());
}

#[test]
fn user_templates_in_home_are_picked_up() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());
    let templates = home.path().join(".nafuda").join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("simple.html.tera"),
        "CUSTOM {{ badge_count }}\n",
    )
    .unwrap();

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .assert()
        .success();

    let html = fs::read_to_string(home.path().join("name_badges.html")).unwrap();
    assert_eq!(html.trim_end(), "CUSTOM 3");
}

#[test]
fn missing_explicit_template_dir_is_fatal() {
    let home = TempDir::new().unwrap();
    let records = write_records(home.path());

    nafuda_cmd(home.path())
        .arg("render-file")
        .arg(&records)
        .arg("--templates")
        .arg(home.path().join("tempaltes"))
        .assert()
        .failure()
        .stderr(contains("failed to load templates"))
        .stderr(contains("template directory not found"));
    assert!(!home.path().join("name_badges.html").exists());
}

// ---------------------------------------------------------------------------
// 3. Layout listing
// ---------------------------------------------------------------------------

#[test]
fn layouts_lists_presets() {
    let home = TempDir::new().unwrap();
    nafuda_cmd(home.path())
        .arg("layouts")
        .assert()
        .success()
        .stdout(contains("simple").and(contains("nafuda")).and(contains("a4")))
        .stdout(contains("91 × 55 mm"));
}

#[test]
fn layouts_yaml_round_trips_through_layout_file() {
    let home = TempDir::new().unwrap();
    let output = nafuda_cmd(home.path())
        .args(["layouts", "--yaml", "a4"])
        .output()
        .expect("run layouts");
    assert!(output.status.success());

    let spec: LayoutSpec = serde_yaml::from_slice(&output.stdout).expect("yaml");
    assert_eq!(spec.name, "a4");
    assert_eq!(spec.grid.rows_per_page, Some(4));
}
