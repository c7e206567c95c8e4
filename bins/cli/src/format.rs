//! Backend selection for emitted events.

use crate::error::CliError;
use clap::ValueEnum;
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Output format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// `SEVERITY prefix: file:line message [k=v ...]` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
    /// Events forwarded to a `tracing` JSON subscriber on stderr.
    Tracing,
}

impl LogFormat {
    /// Configure the process-wide output for this format.
    pub fn install(self) -> Result<(), CliError> {
        match self {
            Self::Text => ctxlog::reset_outputs(),
            Self::Json => {
                ctxlog::use_json_output(Arc::new(ctxlog::StderrSink), Arc::new(ctxlog::StdoutSink));
            },
            Self::Tracing => {
                let env_filter =
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                    .try_init()
                    .map_err(|error| CliError::Subscriber(error.to_string()))?;
                ctxlog::use_tracing_output();
            },
        }
        Ok(())
    }
}
