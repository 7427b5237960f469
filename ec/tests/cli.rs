//! End-to-end tests for the `ec` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with logs and config lookups confined to a temp dir
fn ec(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ec").expect("binary should build");
    cmd.current_dir(dir.path())
        .env("XDG_DATA_HOME", dir.path().join("data"))
        .env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

#[test]
fn test_run_prints_events_and_state() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "ec.yml", "initializer:\n  delay-ms: 1\n");
    let script = write(
        &dir,
        "session.yml",
        r#"
- switch-project: projects/beta
- set-panel: history
- toggle-connection-panel
- emit:
    type: format-content
"#,
    );

    ec(&dir)
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"type":"project-context-ready","project":"projects/beta"}"#,
        ))
        .stdout(predicate::str::contains(r#"{"type":"format-content"}"#))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("events emitted:    2"));
}

#[test]
fn test_run_yaml_output() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "session.yml", "- set-change-mode: editor\n- toggle-ai-chat-box\n");

    ec(&dir)
        .args(["run", "--yaml", "--project", "projects/start"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("project: projects/start"))
        .stdout(predicate::str::contains("standard_mode: true"))
        .stdout(predicate::str::contains("show_ai_chat_box: true"));
}

#[test]
fn test_run_fails_on_switch_timeout() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "ec.yml", "initializer:\n  delay-ms: 2000\nswitch:\n  timeout-ms: 20\n");
    let script = write(&dir, "session.yml", "- switch-project: projects/slow\n");

    ec(&dir)
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out"));
}

#[test]
fn test_run_missing_script() {
    let dir = TempDir::new().unwrap();

    ec(&dir)
        .args(["run", "nope.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read session script"));
}

#[test]
fn test_config_uses_local_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".editorctx.yml", "session:\n  initial-project: projects/local\n");

    ec(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("initial-project: projects/local"))
        .stdout(predicate::str::contains("delay-ms: 50"));
}
