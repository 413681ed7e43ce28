//! Tracer provider that exports spans to a local file.
//!
//! The plugin sandbox has no network route to a collector, so finished spans
//! are encoded as OTLP JSON and appended to a rotating file instead.

use super::file_writer::{RotatingFile, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_BYTES};
use super::span_formatter::OtlpJsonEncoder;
use futures_util::future::{self, BoxFuture, FutureExt};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

struct FileSpanExporter {
    output: RotatingFile,
    encoder: OtlpJsonEncoder,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("file exporter is shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.output
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };

        future::ready(result).boxed()
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.encoder = OtlpJsonEncoder::new(resource);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("output", &self.output)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider whose spans are written, one batch per line, to
/// `file_path`.
///
/// Uses the simple (synchronous) span processor: the plugin runs on a single
/// WASM thread with no async runtime to drive a batch processor.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        output: RotatingFile::new(file_path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS),
        encoder: OtlpJsonEncoder::new(&resource),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
