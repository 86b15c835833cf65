use std::env;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `dev` (the default) gets human-readable output, every other
    /// environment gets JSON lines.
    pub fn for_environment(environment: Option<&str>) -> Self {
        match environment.unwrap_or("dev") {
            "dev" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }

    pub fn from_env() -> Self {
        Self::for_environment(env::var("APP_ENVIRONMENT").ok().as_deref())
    }
}

pub fn init_logging(format: LogFormat) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            subscriber_builder.pretty().with_ansi(true).finish(),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            subscriber_builder.json().with_ansi(false).finish(),
        ),
    }
}
