//! CLI integration tests.

use std::process::Command;

fn run_cli(args: &[&str]) -> std::io::Result<std::process::Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ctxlog"));
    command.args(args);
    command
        .env_remove("TRACE")
        .env_remove("PRINT_STACK")
        .env_remove("RUST_LOG");
    command.output()
}

#[test]
fn info_goes_to_stdout_as_text() -> std::io::Result<()> {
    let output = run_cli(&["--prefix", "deploy", "--field", "n=2", "info", "started"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("INFO deploy: main.rs:"), "{stdout}");
    assert!(stdout.ends_with(" started [n=2]\n"), "{stdout}");
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn error_goes_to_stderr() -> std::io::Result<()> {
    let output = run_cli(&["error", "broken"])?;
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("ERROR ctxlog: "), "{stderr}");
    assert!(stderr.ends_with(" broken\n"));
    Ok(())
}

#[test]
fn json_format_writes_one_object() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["--format", "json", "--prefix", "api", "debug", "ready"])?;
    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(record["level"], "DEBUG");
    assert_eq!(record["component"], "api");
    assert_eq!(record["msg"], "ready");
    Ok(())
}

#[test]
fn fatal_exits_with_status_one() -> std::io::Result<()> {
    let output = run_cli(&["fatal", "cannot continue"])?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("FATAL ctxlog: "), "{stderr}");
    Ok(())
}

#[test]
fn trace_is_silent_unless_enabled() -> std::io::Result<()> {
    let quiet = run_cli(&["trace", "hidden"])?;
    assert!(quiet.status.success());
    assert!(quiet.stdout.is_empty());

    let loud = Command::new(env!("CARGO_BIN_EXE_ctxlog"))
        .args(["--prefix", "db", "trace", "shown"])
        .env("TRACE", "db, cache")
        .env_remove("PRINT_STACK")
        .output()?;
    assert!(String::from_utf8_lossy(&loud.stdout).starts_with("TRACE db: "));
    Ok(())
}

#[test]
fn tracing_format_emits_through_the_subscriber() -> std::io::Result<()> {
    let output = run_cli(&["--format", "tracing", "--prefix", "jobs", "info", "queued"])?;
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#""component":"jobs""#), "{stderr}");
    assert!(stderr.contains(r#""message":"queued""#), "{stderr}");
    Ok(())
}

#[test]
fn malformed_field_is_rejected() -> std::io::Result<()> {
    let output = run_cli(&["--field", "oops", "info", "x"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
