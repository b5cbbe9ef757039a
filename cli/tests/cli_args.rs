//! Binary surface: argument count, stdout/stderr contract, config wiring.

use std::path::Path;
use std::process::{Command, Output};

/// Runs `mci` in `dir` with an empty XDG config home, so no user config leaks in.
fn run_mci_in(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mci"));
    cmd.args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("LOG_FILE")
        .env_remove("RUST_LOG")
        .env_remove("PORT")
        .env_remove("SESSION_TTL_SECONDS")
        .env_remove("MODEL_PROVIDER_API_KEY")
        .env_remove("LLM_API_KEY");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run mci binary")
}

fn run_mci(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    run_mci_in(dir.path(), args, &[])
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_succeeds() {
    let out = run_mci(&["--help"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("MCI"));
    assert!(text.contains("SESSION_ID"));
}

#[test]
fn no_arguments_is_usage_error() {
    let out = run_mci(&[]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Usage"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn one_argument_is_usage_error() {
    let out = run_mci(&["s1"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Usage"));
}

#[test]
fn three_arguments_is_usage_error() {
    let out = run_mci(&["s1", "hello", "extra"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Usage"));
}

#[test]
fn two_arguments_print_reply() {
    let out = run_mci(&["s1", "hello"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello\n");
}

#[test]
fn text_starting_with_hyphen_is_accepted() {
    let out = run_mci(&["s1", "-5 degrees outside?"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "-5 degrees outside?\n");
}

#[test]
fn flags_after_positionals_still_parse() {
    let out = run_mci(&["s1", "--json", "--looks-like-a-flag"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let v: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(v["reply"], "--looks-like-a-flag");
}

#[test]
fn json_flag_prints_one_json_line() {
    let out = run_mci(&["--json", "s1", "hello"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 1);
    let v: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(v["session_id"], "s1");
    assert_eq!(v["reply"], "hello");
    assert_eq!(v["output"]["type"], "answer");
    assert_eq!(v["output"]["text"], "hello");
}

#[test]
fn verbose_prints_summary_without_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_mci_in(
        dir.path(),
        &["-v", "s1", "hello"],
        &[("MODEL_PROVIDER_API_KEY", "sk-test-secret"), ("ENV", "Production")],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let err = stderr(&out);
    assert!(err.contains("[server] env=Production production=true"));
    assert!(err.contains("api_key=set"));
    assert!(!err.contains("sk-test-secret"));
    assert_eq!(stdout(&out), "hello\n");
}

#[test]
fn dotenv_in_working_directory_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "PORT=not-a-port\n").unwrap();
    let out = run_mci_in(dir.path(), &["s1", "hello"], &[]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("PORT"), "stderr: {}", err);
    assert!(stdout(&out).is_empty());
}

#[test]
fn existing_env_beats_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "SESSION_TTL_SECONDS=never\n").unwrap();
    let out = run_mci_in(dir.path(), &["s1", "hello"], &[("SESSION_TTL_SECONDS", "60")]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}

#[test]
fn log_file_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("mci.log");
    let out = run_mci_in(
        dir.path(),
        &["s1", "hello"],
        &[("LOG_FILE", log.to_str().unwrap()), ("LOG_LEVEL", "info")],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.contains("running turn"));
    assert_eq!(stdout(&out), "hello\n");
}
