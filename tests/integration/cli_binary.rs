//! End-to-end tests against the real binary.
//!
//! `PATH` points at a temporary directory holding fake `deno` and `uv` scripts
//! that record their arguments, so the generator and installer never run.

use super::test_utils::recording_bin_dir;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const URL_VAR: &str = "ARTIFACTS_MMO_OPENAPI_SPEC_URL";

struct Harness {
    root: TempDir,
    bin_dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("project")).unwrap();
        std::fs::create_dir_all(root.path().join("trace")).unwrap();
        std::fs::create_dir_all(root.path().join("home")).unwrap();
        Self {
            root,
            bin_dir: recording_bin_dir(),
        }
    }

    fn project(&self) -> std::path::PathBuf {
        self.root.path().join("project")
    }

    fn trace(&self, name: &str) -> std::path::PathBuf {
        self.root.path().join("trace").join(format!("{}.args", name))
    }

    fn command(&self, search_path: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_artifacts-codegen"));
        cmd.env_clear()
            .env("PATH", search_path)
            .env("HOME", self.root.path().join("home"))
            .env("CODEGEN_TRACE_DIR", self.root.path().join("trace"))
            .arg("--project-root")
            .arg(self.project())
            .arg("--log-format")
            .arg("json");
        cmd
    }

    fn run(&self, env: &[(&str, &str)]) -> Output {
        let mut cmd = self.command(self.bin_dir.path());
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().unwrap()
    }
}

/// Parse JSON log lines and return (message, fields) per record.
fn log_records(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| line.trim_start().starts_with('{'))
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .collect()
}

fn messages(records: &[serde_json::Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r["fields"]["message"].as_str().map(str::to_string))
        .collect()
}

fn read_args(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_success_exit_code_and_log_sequence() {
    let harness = Harness::new();
    let output = harness.run(&[(URL_VAR, "https://example.test/spec.json")]);

    assert!(
        output.status.success(),
        "run should succeed: stdout={} stderr={}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let records = log_records(&output.stdout);
    assert_eq!(
        messages(&records),
        vec![
            "config_loaded",
            "generating_client",
            "generation_complete",
            "installing_client",
            "workflow_complete",
        ]
    );
    assert_eq!(
        records[0]["fields"]["url"].as_str(),
        Some("https://example.test/spec.json")
    );

    let output_dir = harness.project().join("artifacts_api_client");
    let output_dir = output_dir.to_string_lossy().to_string();
    assert_eq!(
        read_args(&harness.trace("deno")),
        vec![
            "x".to_string(),
            "npm:@openapitools/openapi-generator-cli".to_string(),
            "generate".to_string(),
            "-i".to_string(),
            "https://example.test/spec.json".to_string(),
            "-g".to_string(),
            "python".to_string(),
            "-o".to_string(),
            output_dir.clone(),
            "--additional-properties=packageName=artifacts_api_client".to_string(),
            "--skip-validate-spec".to_string(),
        ]
    );
    assert_eq!(
        read_args(&harness.trace("uv")),
        vec![
            "pip".to_string(),
            "install".to_string(),
            "-e".to_string(),
            output_dir
        ]
    );
}

#[test]
fn test_generator_failure_exits_one_without_install() {
    let harness = Harness::new();
    let output = harness.run(&[("FAKE_DENO_EXIT", "1")]);

    assert_eq!(output.status.code(), Some(1));
    let records = log_records(&output.stdout);
    let messages = messages(&records);
    assert_eq!(messages.last().map(String::as_str), Some("generation_failed"));
    assert!(harness.trace("deno").exists());
    assert!(
        !harness.trace("uv").exists(),
        "installer must not run after a failed generation"
    );
}

#[test]
fn test_env_file_in_project_root_is_used() {
    let harness = Harness::new();
    std::fs::write(
        harness.project().join(".env"),
        format!("{}=https://from-env-file.test/openapi.json\n", URL_VAR),
    )
    .unwrap();

    let output = harness.run(&[]);

    assert!(output.status.success());
    let args = read_args(&harness.trace("deno"));
    assert!(args.contains(&"https://from-env-file.test/openapi.json".to_string()));
}

#[test]
fn test_missing_runtime_exits_one() {
    let harness = Harness::new();
    let empty = TempDir::new().unwrap();
    let output = harness.command(empty.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let records = log_records(&output.stdout);
    assert_eq!(messages(&records), vec!["execution_failed"]);
    assert_eq!(
        records[0]["fields"]["error_type"].as_str(),
        Some("RuntimeNotFoundError")
    );
}

#[test]
fn test_malformed_url_exits_one_before_any_subprocess() {
    let harness = Harness::new();
    let output = harness.run(&[(URL_VAR, "not-a-url")]);

    assert_eq!(output.status.code(), Some(1));
    let records = log_records(&output.stdout);
    assert_eq!(messages(&records), vec!["execution_failed"]);
    assert_eq!(
        records[0]["fields"]["error_type"].as_str(),
        Some("ConfigurationError")
    );
    assert!(!harness.trace("deno").exists());
    assert!(!harness.trace("uv").exists());
}

#[test]
fn test_quiet_failure_reports_on_stderr() {
    let harness = Harness::new();
    let empty = TempDir::new().unwrap();
    let output = harness
        .command(empty.path())
        .arg("--quiet")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("RuntimeNotFoundError"),
        "stderr should name the error category: {}",
        stderr
    );
}

#[test]
fn test_install_failure_keeps_generated_client() {
    let harness = Harness::new();
    let output = harness.run(&[("FAKE_UV_EXIT", "2")]);

    assert_eq!(output.status.code(), Some(1));
    let records = log_records(&output.stdout);
    let failure = records
        .iter()
        .rev()
        .find(|r| r["fields"]["message"].as_str() == Some("generation_failed"))
        .expect("install failure should be logged as generation_failed");
    assert_eq!(failure["fields"]["stage"].as_str(), Some("Generated"));

    let output_dir = harness.project().join("artifacts_api_client");
    assert_eq!(
        failure["fields"]["path"].as_str(),
        Some(output_dir.to_string_lossy().as_ref())
    );
    assert!(
        !messages(&records).contains(&"workflow_complete".to_string()),
        "a failed install must not report completion"
    );
    assert!(harness.trace("uv").exists());
    assert!(output_dir.is_dir(), "generated client should be left on disk");
}

#[test]
fn test_unrelated_non_utf8_variable_does_not_abort() {
    let harness = Harness::new();
    let empty = TempDir::new().unwrap();
    let output = harness
        .command(empty.path())
        .env("UNRELATED_BYTES", OsStr::from_bytes(b"\xff\xfe"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let records = log_records(&output.stdout);
    assert_eq!(messages(&records), vec!["execution_failed"]);
    assert_eq!(
        records[0]["fields"]["error_type"].as_str(),
        Some("RuntimeNotFoundError")
    );
}

#[test]
fn test_unrelated_non_utf8_variable_is_ignored_on_success() {
    let harness = Harness::new();
    let output = harness
        .command(harness.bin_dir.path())
        .env("UNRELATED_BYTES", OsStr::from_bytes(b"\xff\xfe"))
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_non_utf8_spec_url_is_a_configuration_error() {
    let harness = Harness::new();
    let output = harness
        .command(harness.bin_dir.path())
        .env(URL_VAR, OsStr::from_bytes(b"https://\xff.test/spec.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let records = log_records(&output.stdout);
    assert_eq!(messages(&records), vec!["execution_failed"]);
    assert_eq!(
        records[0]["fields"]["error_type"].as_str(),
        Some("ConfigurationError")
    );
    assert!(!harness.trace("deno").exists());
}
