//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported as `service.name` and used for the tracer and trace file.
pub const SERVICE_NAME: &str = "cinefind";

/// File name of the span export under the data directory.
pub const TRACE_FILE_NAME: &str = "cinefind-otlp.json";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, else the `trace_level`
/// configuration key, else `info`. Spans are exported to
/// [`TRACE_FILE_NAME`] in the plugin data directory.
///
/// Tracing is optional: if the data directory cannot be created or a
/// subscriber is already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(otel_layer)
        .try_init();

    tracing::debug!(trace_file = %data_dir.join(TRACE_FILE_NAME).display(), "tracing initialized");
}

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}
