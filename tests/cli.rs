//! Integration tests for top-level CLI behavior.

use std::process::Command;

fn run_shellrelay(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_shellrelay");
    Command::new(bin)
        .args(args)
        .env_remove("SHELLRELAY_RECORD")
        .env_remove("SHELLRELAY_REPLAY")
        .env_remove("SHELLRELAY_TIMEOUT_MS")
        .output()
        .expect("failed to run shellrelay binary")
}

#[test]
fn exec_echoes_lines_then_prints_result() {
    let output = run_shellrelay(&["exec", "echo", "hello"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout, "[Stream]: hello\nSTDOUT:\nhello\n");
}

#[test]
fn quiet_suppresses_stream_echo() {
    let output = run_shellrelay(&["--quiet", "exec", "echo", "hello"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout, "STDOUT:\nhello\n");
}

#[test]
fn failing_command_prints_stderr_and_partial_stdout() {
    let output = run_shellrelay(&["-q", "exec", "echo partial; echo oops >&2; exit 3"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    // A failed shell command is still a successful tool call.
    assert!(output.status.success());
    assert_eq!(stdout, "STDERR:\noops\n\nPARTIAL STDOUT:\npartial\n");
}

#[test]
fn missing_working_dir_is_execution_error() {
    let output = run_shellrelay(&["-q", "--cwd", "/definitely/not/here", "exec", "echo", "hi"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("EXECUTION ERROR: "), "got: {stdout}");
}

#[test]
fn timeout_kills_long_command() {
    let output = run_shellrelay(&["-q", "--timeout-ms", "300", "exec", "echo start; sleep 5"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("STDERR:\n"), "got: {stdout}");
    assert!(stdout.contains("timed out after 300 ms"));
    assert!(stdout.ends_with("PARTIAL STDOUT:\nstart\n"));
}

#[test]
fn tools_lists_descriptors_as_json() {
    let output = run_shellrelay(&["tools"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let names: Vec<&str> =
        json.as_array().unwrap().iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["execute", "search", "edit", "read", "write", "glob"]);
    assert!(json[0]["parameters"]["properties"]["command"].is_object());
}

#[test]
fn call_runs_tool_with_json_arguments() {
    let output = run_shellrelay(&["-q", "call", "execute", r#"{"command":"echo called"}"#]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout, "STDOUT:\ncalled\n");
}

#[test]
fn call_with_invalid_json_fails() {
    let output = run_shellrelay(&["call", "execute", "{not json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Invalid JSON arguments"));
}

#[test]
fn write_then_read_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().to_str().unwrap();

    let output = run_shellrelay(&["--cwd", cwd, "write", "notes.txt", "--content", "alpha\nbeta\n"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Successfully wrote to notes.txt\n");

    let output = run_shellrelay(&["--cwd", cwd, "read", "notes.txt"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "alpha\nbeta\n");

    let output = run_shellrelay(&["-q", "--cwd", cwd, "search", "beta", "notes.txt"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "STDOUT:\n2:beta\n");
}

#[test]
fn edit_replaces_literally_by_default() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "path a/b here\n").unwrap();
    let cwd = dir.path().to_str().unwrap();

    let output = run_shellrelay(&["--cwd", cwd, "edit", "a/b", "c.d", "a.txt"]);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "STDOUT:\nreplaced 1 occurrence(s) in a.txt\n"
    );
    assert_eq!(std::fs::read_to_string(dir.path().join("a.txt")).unwrap(), "path c.d here\n");
}

#[test]
fn unknown_subcommand_shows_error() {
    let output = run_shellrelay(&["frobnicate"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn help_lists_subcommands() {
    let output = run_shellrelay(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for name in ["exec", "search", "edit", "read", "write", "glob", "tools", "call"] {
        assert!(stdout.contains(name), "missing {name} in help");
    }
}
