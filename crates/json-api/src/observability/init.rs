//! Observability startup and teardown.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Handle to the telemetry pipelines; call [`Observability::shutdown`] before
/// exiting so buffered spans are exported.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        let tracer_provider = config
            .observability
            .otel_enabled
            .then(|| {
                global::set_text_map_propagator(TraceContextPropagator::new());

                otel::build_tracer_provider(config)
            })
            .transpose()?;

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        match &tracer_provider {
            Some(_) => info!(
                endpoint = %config.observability.otel_exporter_otlp_endpoint,
                service = %config.observability.otel_service_name,
                "exporting traces over OTLP"
            ),
            None => info!("trace export disabled"),
        }

        Ok(Self { tracer_provider })
    }

    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to flush traces on shutdown: {source}");
        }
    }
}
