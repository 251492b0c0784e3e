//! Tracing subscriber: formatted output, level filter and optional OTLP layer.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, LoggingConfig},
};

use super::ObservabilityError;

/// Transport and exporter crates are noisy at `info`.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tower", "tonic", "opentelemetry", "lettre"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        let tracer = provider.tracer(config.observability.otel_service_name.clone());

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(output_layer(config.logging.log_format))
        .with(env_filter(&config.logging))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

fn output_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

/// `RUST_LOG` wins when it parses; otherwise the configured level applies.
fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_ignored| EnvFilter::new(default_directives(logging)))
}

fn default_directives(logging: &LoggingConfig) -> String {
    let mut directives = vec![logging.log_level.clone()];

    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));

    if !logging.log_sql {
        directives.push("sqlx::query=warn".to_owned());
    }

    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(log_sql: bool) -> LoggingConfig {
        LoggingConfig {
            log_level: "debug".to_owned(),
            log_format: LogFormat::Compact,
            log_sql,
        }
    }

    #[test]
    fn configured_level_comes_first() {
        let directives = default_directives(&logging(false));

        assert!(directives.starts_with("debug,"), "got {directives}");
        assert!(directives.contains("hyper=warn"), "got {directives}");
    }

    #[test]
    fn sql_statements_are_hidden_unless_requested() {
        assert!(default_directives(&logging(false)).contains("sqlx::query=warn"));
        assert!(!default_directives(&logging(true)).contains("sqlx::query"));
    }
}
