//! Logging and distributed tracing setup.
//!
//! Log lines go to stdout through `tracing-subscriber`, pretty or JSON per
//! `observability.log_format`. When `observability.otlp_endpoint` is set,
//! spans are also exported over OTLP.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
use roster_config::{AppConfig, ObservabilityConfig};
use roster_core::{RosterError, RosterResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Builds the env filter: `RUST_LOG` wins, otherwise `observability.log_level`.
fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Maps a ratio onto a sampler, clamping at both ends.
fn sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}

fn tracer_provider(config: &AppConfig, endpoint: &str) -> RosterResult<TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| RosterError::internal(format!("Failed to create OTLP exporter: {}", e)))?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_sampler(sampler(config.observability.sampling_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(Resource::new(vec![KeyValue::new(
            SERVICE_NAME,
            config.app.name.clone(),
        )]))
        .build())
}

/// Installs the global subscriber.
///
/// Must be called once, from inside the tokio runtime when OTLP export is on.
pub fn init_telemetry(config: &AppConfig) -> RosterResult<()> {
    let observability = &config.observability;

    let fmt_layer = if observability.json_logs() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    let otel_layer = match &observability.otlp_endpoint {
        Some(endpoint) => {
            let provider = tracer_provider(config, endpoint)?;
            let tracer = provider.tracer(config.app.name.clone());
            opentelemetry::global::set_tracer_provider(provider);
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter(observability))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| RosterError::internal(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        service_name = %config.app.name,
        log_format = %observability.log_format,
        otlp_endpoint = ?observability.otlp_endpoint,
        "Telemetry initialized"
    );

    Ok(())
}

/// Flushes pending spans.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
    tracing::info!("Telemetry shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_bounds() {
        assert!(matches!(sampler(1.0), Sampler::AlwaysOn));
        assert!(matches!(sampler(0.0), Sampler::AlwaysOff));
        assert!(matches!(sampler(0.25), Sampler::TraceIdRatioBased(r) if (r - 0.25).abs() < f64::EPSILON));
    }
}
