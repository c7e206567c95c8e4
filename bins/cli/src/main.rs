//! CLI binary entrypoint: emit one log event from the command line.

mod error;
mod format;

use clap::{Parser, ValueEnum};
use ctxlog::ContextValue;
use error::CliError;
use format::LogFormat;
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(
    name = "ctxlog",
    version,
    about = "Emit a structured log event",
    long_about = None
)]
struct Cli {
    /// Backend used to render the event.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    format: LogFormat,
    /// Logger name.
    #[arg(long, default_value = "ctxlog")]
    prefix: String,
    /// Context field as `key=value`. Values that parse as JSON keep their
    /// type; anything else is a string. May be repeated.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, ContextValue)>,
    /// Severity of the event.
    #[arg(value_enum)]
    level: Level,
    /// Message text.
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Level {
    Debug,
    Info,
    Trace,
    Error,
    Fatal,
}

fn parse_field(raw: &str) -> Result<(String, ContextValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| ContextValue::from(value));
    Ok((key.to_string(), value))
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.message.is_empty() {
        return Err(CliError::InvalidInput("message must be non-empty".to_string()));
    }
    cli.format.install()?;

    let log = ctxlog::logger_for(&cli.prefix);
    let fields: Vec<(&str, ContextValue)> = cli
        .fields
        .iter()
        .map(|(key, value)| (key.as_str(), value.clone()))
        .collect();
    match cli.level {
        Level::Debug => log.debugw(&cli.message, &fields),
        Level::Info => log.infow(&cli.message, &fields),
        Level::Trace => log.tracew(&cli.message, &fields),
        Level::Error => {
            let _ = log.errorw(&cli.message, &fields);
        },
        Level::Fatal => log.fatalw(&cli.message, &fields),
    }
    Ok(())
}
