//! Log setup for the nullary loop workspace.
//!
//! The generator binary installs its subscriber through [`init_global_tracing`],
//! normally with [`TracingConfig::from_env`]. Level macros are re-exported so
//! crates can log without depending on `tracing` directly.

#[macro_use]
pub mod macros;

use std::env;

pub use tracing::{debug, error, info, trace, warn};

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter applied when neither the config nor `RUST_LOG` name one.
pub const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Error)]
pub enum TracingSetupError {
    #[error("Invalid tracing directive `{directive}`: {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Failed to install global tracing subscriber: {0}")]
    SubscriberInit(#[from] TryInitError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingOutput {
    Compact,
    Pretty,
    Json,
}

impl TracingOutput {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter directives, e.g. `nullary_codegen=debug`. `None` defers to `RUST_LOG`.
    pub directives: Option<String>,
    pub output: TracingOutput,
    pub ansi: bool,
    /// Log span close events with their busy/idle times
    pub span_timings: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_local()
    }
}

impl TracingConfig {
    /// Human-readable coloured output.
    pub fn for_local() -> Self {
        Self {
            directives: None,
            output: TracingOutput::Pretty,
            ansi: true,
            span_timings: false,
        }
    }

    /// One JSON object per event, no colour codes.
    pub fn for_ci() -> Self {
        Self {
            output: TracingOutput::Json,
            ansi: false,
            ..Self::for_local()
        }
    }

    /// Preset chosen by `NULLARY_TRACING_PROFILE` (`local` or `ci`), adjusted by
    /// `NULLARY_TRACING_DIRECTIVES`, `NULLARY_TRACING_FORMAT`, and `NULLARY_TRACING_SPANS`.
    pub fn from_env() -> Self {
        let var = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

        let mut config = match var("NULLARY_TRACING_PROFILE").as_deref() {
            Some(p) if p.eq_ignore_ascii_case("ci") => Self::for_ci(),
            _ => Self::for_local(),
        };
        config.directives = var("NULLARY_TRACING_DIRECTIVES").or(config.directives);
        if let Some(output) = var("NULLARY_TRACING_FORMAT").as_deref().and_then(TracingOutput::parse) {
            config.output = output;
            config.ansi &= output != TracingOutput::Json;
        }
        if let Some(spans) = var("NULLARY_TRACING_SPANS") {
            config.span_timings = spans == "1" || spans.eq_ignore_ascii_case("true");
        }
        config
    }

    fn filter(&self) -> Result<EnvFilter, TracingSetupError> {
        match &self.directives {
            Some(directive) => EnvFilter::try_new(directive).map_err(|e| TracingSetupError::InvalidFilter {
                directive: directive.clone(),
                reason: e.to_string(),
            }),
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))),
        }
    }
}

/// Subscriber for `config`, not yet installed.
pub fn build_subscriber(config: &TracingConfig) -> Result<impl Subscriber + Send + Sync, TracingSetupError> {
    let spans = if config.span_timings { FmtSpan::CLOSE } else { FmtSpan::NONE };
    let wants = |output| config.output == output;

    // Exactly one of the three is present.
    let compact = wants(TracingOutput::Compact).then(|| {
        fmt::layer()
            .compact()
            .with_ansi(config.ansi)
            .with_span_events(spans.clone())
    });
    let pretty = wants(TracingOutput::Pretty).then(|| {
        fmt::layer()
            .pretty()
            .with_ansi(config.ansi)
            .with_span_events(spans.clone())
    });
    let json = wants(TracingOutput::Json).then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_span_events(spans.clone())
    });

    Ok(Registry::default()
        .with(config.filter()?)
        .with(compact)
        .with(pretty)
        .with(json))
}

pub fn init_global_tracing(config: &TracingConfig) -> Result<(), TracingSetupError> {
    build_subscriber(config)?.try_init()?;
    Ok(())
}
