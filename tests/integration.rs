//! Integration tests for the roster binary's non-interactive surface

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Temporary directory holding an optional config file
struct TestEnv {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn with_config(contents: &str) -> Self {
        let env = Self::new();
        fs::write(&env.config_path, contents).unwrap();
        env
    }

    fn cmd(&self) -> Command {
        let mut cmd = roster_cmd();
        cmd.arg("--config").arg(&self.config_path);
        cmd
    }
}

fn roster_cmd() -> Command {
    Command::cargo_bin("roster").unwrap()
}

// =============================================================================
// CLI
// =============================================================================

#[test]
fn help_lists_check_config() {
    roster_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check-config"))
        .stdout(predicate::str::contains("--log-level"));
}

// =============================================================================
// check-config
// =============================================================================

#[test]
fn check_config_without_file_uses_defaults() {
    let env = TestEnv::new();
    env.cmd()
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("Log level: info"));
}

#[test]
fn check_config_accepts_valid_file() {
    let log_dir = TempDir::new().unwrap();
    let env = TestEnv::with_config(&format!(
        r#"
[keys.list]
add = "+"
delete = ["Delete", "D"]

[ui.colors]
border = [10, 20, 30]

[ui.icons]
family = "F:"

[log]
level = "debug"
dir = "{}"
"#,
        log_dir.path().display()
    ));

    env.cmd()
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("Log level: debug"))
        .stdout(predicate::str::contains(log_dir.path().display().to_string()));
}

#[test]
fn check_config_rejects_key_collision() {
    let env = TestEnv::with_config(
        r#"
[keys.form]
confirm = "Tab"
"#,
    );

    env.cmd()
        .arg("check-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key binding collision in [keys.form]"));
}

#[test]
fn check_config_rejects_malformed_toml() {
    let env = TestEnv::with_config("[keys\n");
    env.cmd()
        .arg("check-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains(env.config_path.display().to_string()));
}

#[test]
fn check_config_warns_on_unknown_keys() {
    let env = TestEnv::with_config(
        r#"
vdir = "~/contacts"

[ui]
theme = "dark"
"#,
    );

    env.cmd()
        .arg("check-config")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: unknown configuration key `vdir`"))
        .stderr(predicate::str::contains("`theme` in [ui]"));
}

#[test]
fn invalid_log_level_flag_is_rejected() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--log-level", "loud", "check-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));
}
