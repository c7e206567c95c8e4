//! Stack trace resolution for `PRINT_STACK` output.
//!
//! The trace starts at the first application frame (frames of the logging
//! crates themselves are skipped) and stops at the first frame that belongs
//! to the runtime, or at the first frame that cannot be resolved.

/// Symbol prefixes of frames that sit between the application and the
/// backend. Leading frames matching these are skipped.
const INTERNAL_PREFIXES: &[&str] = &[
    "backtrace::",
    "ctxlog::",
    "ctxlog_adapters::",
    "ctxlog_app::",
    "ctxlog_ports::",
    "ctxlog_shared::",
];

/// Symbol prefixes of runtime frames. The trace ends at the first match.
const RUNTIME_PREFIXES: &[&str] = &[
    "std::rt::",
    "std::sys::",
    "std::panicking::",
    "std::panic::",
    "std::thread::",
    "std::backtrace",
    "core::ops::function::",
    "core::panic",
    "test::",
    "__rust_",
];

/// One resolved application frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled function path, without the hash suffix.
    pub function: String,
    /// Source file.
    pub file: String,
    /// Line number.
    pub line: u32,
}

/// Raw frame data as produced by symbol resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    /// Demangled symbol name.
    pub name: Option<String>,
    /// Source file.
    pub file: Option<String>,
    /// Line number.
    pub line: Option<u32>,
}

/// Capture the application frames of the current stack.
#[must_use]
pub fn capture() -> Vec<Frame> {
    let mut raw = Vec::new();
    backtrace::trace(|frame| {
        let mut resolved: Option<RawFrame> = None;
        backtrace::resolve_frame(frame, |symbol| {
            if resolved.is_none() {
                resolved = Some(RawFrame {
                    name: symbol.name().map(|name| format!("{name:#}")),
                    file: symbol
                        .filename()
                        .map(|path| path.display().to_string()),
                    line: symbol.lineno(),
                });
            }
        });
        raw.push(resolved.unwrap_or_default());
        true
    });
    trim_frames(raw)
}

/// Drop leading internal frames, then keep frames up to the first runtime
/// or unresolvable frame.
#[must_use]
pub fn trim_frames(raw: Vec<RawFrame>) -> Vec<Frame> {
    raw.into_iter()
        .skip_while(|frame| frame.name.as_deref().is_none_or(is_internal))
        .map_while(|frame| {
            let function = frame.name?;
            if is_runtime(&function) {
                return None;
            }
            Some(Frame {
                function,
                file: frame.file?,
                line: frame.line?,
            })
        })
        .collect()
}

/// Render frames as `\t<function>\t<file>: <line>` lines.
#[must_use]
pub fn format_frames(frames: &[Frame]) -> String {
    frames
        .iter()
        .map(|frame| format!("\t{}\t{}: {}\n", frame.function, frame.file, frame.line))
        .collect()
}

fn symbol_path(name: &str) -> &str {
    name.trim_start_matches('<')
}

fn is_internal(name: &str) -> bool {
    let path = symbol_path(name);
    INTERNAL_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn is_runtime(name: &str) -> bool {
    let path = symbol_path(name);
    RUNTIME_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, file: &str, line: u32) -> RawFrame {
        RawFrame {
            name: Some(name.to_string()),
            file: Some(file.to_string()),
            line: Some(line),
        }
    }

    #[test]
    fn skips_internal_frames_and_stops_at_runtime() {
        let frames = trim_frames(vec![
            raw("backtrace::backtrace::trace", "trace.rs", 1),
            raw("ctxlog_adapters::stack::capture", "stack.rs", 2),
            raw(
                "<ctxlog_adapters::text::TextOutput as ctxlog_ports::output::Output>::error",
                "text.rs",
                3,
            ),
            raw("ctxlog::logger::Logger::error", "logger.rs", 4),
            raw("my_app::handler", "src/handler.rs", 10),
            raw("my_app::main", "src/main.rs", 20),
            raw("core::ops::function::FnOnce::call_once", "function.rs", 250),
            raw("std::rt::lang_start", "rt.rs", 5),
        ]);

        assert_eq!(
            frames,
            vec![
                Frame {
                    function: "my_app::handler".to_string(),
                    file: "src/handler.rs".to_string(),
                    line: 10,
                },
                Frame {
                    function: "my_app::main".to_string(),
                    file: "src/main.rs".to_string(),
                    line: 20,
                },
            ]
        );
    }

    #[test]
    fn unresolvable_frames_truncate_the_trace() {
        let frames = trim_frames(vec![
            RawFrame::default(),
            raw("ctxlog::logger::Logger::info", "logger.rs", 1),
            raw("my_app::work", "src/work.rs", 7),
            RawFrame {
                name: Some("my_app::caller".to_string()),
                file: None,
                line: Some(3),
            },
            raw("my_app::main", "src/main.rs", 1),
        ]);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames.first().map(|frame| frame.line), Some(7));
    }

    #[test]
    fn formats_tab_separated_lines() {
        let text = format_frames(&[
            Frame {
                function: "my_app::work".to_string(),
                file: "src/work.rs".to_string(),
                line: 7,
            },
            Frame {
                function: "my_app::main".to_string(),
                file: "src/main.rs".to_string(),
                line: 31,
            },
        ]);
        assert_eq!(
            text,
            "\tmy_app::work\tsrc/work.rs: 7\n\tmy_app::main\tsrc/main.rs: 31\n"
        );
        assert!(format_frames(&[]).is_empty());
    }

    #[test]
    fn live_capture_never_reports_internal_frames() {
        for frame in capture() {
            assert!(!is_internal(&frame.function), "{}", frame.function);
            assert!(!is_runtime(&frame.function), "{}", frame.function);
        }
    }
}
