use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary against an empty config location so the host's
/// `~/.config/sshot/config.toml` never leaks into a test.
fn sshot_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sshot").expect("binary exists");
    cmd.env("SSHOT_CONFIG", config_home.path().join("config.toml"));
    cmd
}

#[test]
fn help_prints_usage_and_template_variables() {
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("A lightweight screenshot CLI tool"))
        .stdout(predicate::str::contains("{counter}"));
}

#[test]
fn version_exits_zero() {
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sshot"));
}

#[test]
fn quality_out_of_range_is_argument_error() {
    let temp = TempDir::new().unwrap();
    for quality in ["0", "101"] {
        sshot_cmd(&temp)
            .current_dir(temp.path())
            .args(["-q", quality])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("quality must be between 1 and 100"));
    }
    assert!(!temp.path().join("screenshot.png").exists());
}

#[test]
fn unsupported_format_is_format_error() {
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp)
        .args(["-f", "tiff"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unsupported format: tiff"));
}

#[test]
fn malformed_region_is_argument_error() {
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp)
        .args(["-r", "100,200,800"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid region format"));
}

#[test]
fn count_and_interval_must_be_positive() {
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp)
        .args(["-n", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("count must be at least 1"));
    sshot_cmd(&temp)
        .args(["-n", "3", "-i", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("interval must be at least 1 second"));
}

#[test]
fn unknown_flag_is_argument_error() {
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp).arg("--bogus").assert().code(1);
}

#[test]
fn malformed_config_file_is_argument_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "[output\nformat =").unwrap();
    sshot_cmd(&temp)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn info_never_reports_argument_errors() {
    // Headless CI has no displays, so only the capture error code is acceptable
    // besides success.
    let temp = TempDir::new().unwrap();
    sshot_cmd(&temp)
        .arg("info")
        .assert()
        .code(predicate::in_iter([0, 3]));
}
