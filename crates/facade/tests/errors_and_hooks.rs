//! Error pass-through, fatal handling and reporters.

use ctxlog::{ContextMap, Error, LogEnv, Logger, Severity, ops};
use ctxlog_testkit::{FatalRecorder, MemoryCapture, global_lock};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

fn logger(prefix: &str) -> Logger {
    Logger::with_env(prefix, &LogEnv::default())
}

#[test]
fn error_returns_the_error_it_was_given() {
    let _lock = global_lock();
    let _capture = MemoryCapture::text();
    let original = Error::new("timeout");

    let returned = logger("net").error(&original);

    assert!(returned.same_as(&original));
}

#[test]
fn errorf_returns_first_error_argument_and_logs_formatted_text() {
    let _lock = global_lock();
    let capture = MemoryCapture::text();
    let log = logger("net");
    let first = Error::new("dns failure");
    let second = Error::new("fallback failure");

    let returned = ctxlog::errorf!(log, "lookup {} failed: {} / {}", "example.org", &first, &second);

    assert!(returned.same_as(&first));
    let lines = capture.errors.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" lookup example.org failed: dns failure / fallback failure ["));
}

#[test]
fn errorf_without_error_argument_builds_a_located_error() {
    let _lock = global_lock();
    let _capture = MemoryCapture::text();
    let log = logger("net");

    let line = line!() + 1;
    let returned = ctxlog::errorf!(log, "status {}", 503);

    assert_eq!(returned.text(), "status 503");
    assert_eq!(returned.template(), Some("status {}"));
    assert_eq!(returned.location().map(|location| location.line()), Some(line));
}

#[test]
fn fatal_invokes_the_handler_exactly_once() {
    let _lock = global_lock();
    let capture = MemoryCapture::text();
    let recorder = FatalRecorder::install();

    logger("main").fatal("x");

    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.errors()[0].text(), "x");
    let lines = capture.errors.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("FATAL main: "));
}

#[test]
fn fatalf_and_fatalw_hand_over_their_errors() {
    let _lock = global_lock();
    let _capture = MemoryCapture::text();
    let recorder = FatalRecorder::install();
    let log = logger("main");
    let cause = Error::new("corrupt index");

    ctxlog::fatalf!(log, "cannot start: {}", &cause);
    log.fatalw("giving up", &[("attempts", json!(3))]);

    let errors = recorder.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].same_as(&cause));
    assert_eq!(errors[1].text(), "giving up");
}

#[test]
fn reporter_is_called_for_error_events_only() {
    let _lock = global_lock();
    let _capture = MemoryCapture::text();
    let _recorder = FatalRecorder::install();
    let seen: Arc<Mutex<Vec<(String, Severity, ContextMap)>>> = Arc::default();
    let record = Arc::clone(&seen);
    ctxlog::register_reporter(move |error: &Error, severity: Severity, context: &ContextMap| {
        record
            .lock()
            .push((error.text().to_string(), severity, context.clone()));
    });
    ops::set_global("deployment", "canary");

    let log = logger("svc");
    log.info("ignored");
    log.debugw("ignored", &[]);
    let _ = log.error("one");
    let _ = log.errorw("two", &[("shard", json!(2))]);
    log.fatal("three");
    log.as_std_logger().print("std logger lines are not reported");

    ctxlog::clear_reporter();
    let _ = log.error("after clear");
    ops::clear_global("deployment");

    let seen = seen.lock().clone();
    let summary: Vec<(&str, Severity)> = seen
        .iter()
        .map(|(text, severity, _)| (text.as_str(), *severity))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("one", Severity::Error),
            ("two", Severity::Error),
            ("three", Severity::Fatal),
        ]
    );
    let (_, _, context) = &seen[1];
    assert_eq!(context.get("shard"), Some(&json!(2)));
    assert_eq!(context.get("deployment"), Some(&json!("canary")));
}

#[test]
fn globals_stay_out_of_log_lines() {
    let _lock = global_lock();
    let capture = MemoryCapture::text();
    ops::set_global("build", "1.2.3");

    logger("svc").info("hello");
    ops::clear_global("build");

    assert!(!capture.debug.contents().contains("build="));
}

#[test]
fn explicit_pairs_override_error_and_ambient_values() {
    let _lock = global_lock();
    let capture = MemoryCapture::json();
    let op = ops::begin("import");
    op.set("row", 1);

    let _ = logger("etl").errorw("bad row", &[("row", json!(42)), ("op", json!("override"))]);

    let written = capture.errors.take();
    assert_eq!(written.len(), 1);
    let record: serde_json::Value = serde_json::from_str(written[0].trim_end()).unwrap_or_default();
    assert_eq!(record["context"]["row"], json!(42));
    assert_eq!(record["context"]["op"], json!("override"));
    assert_eq!(record["context"]["root_op"], json!("import"));
}
