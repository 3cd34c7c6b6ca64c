//! Tracing subscriber setup for both binaries

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines on stderr for local runs
    Pretty,
    /// One JSON object per line, no ANSI colors (CloudWatch Logs)
    Json,
}

/// Build the filter: `RUST_LOG` if set, `info` otherwise, AWS SDK capped at `warn`.
pub fn env_filter() -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    ["aws_config", "aws_sdk_ec2", "aws_sdk_lambda", "aws_sdk_cloudwatch", "aws_smithy_runtime"]
        .into_iter()
        .filter_map(|target| format!("{target}=warn").parse::<Directive>().ok())
        .fold(base, |filter, directive| filter.add_directive(directive))
}

/// Initialize the global tracing subscriber
pub fn init(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    match format {
        LogFormat::Pretty => builder.with_writer(std::io::stderr).init(),
        LogFormat::Json => builder
            .json()
            .with_ansi(false)
            .with_current_span(false)
            .without_time()
            .init(),
    }
}
