//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → OTLP JSON file
//! ```
//!
//! - Spans land in `~/.local/share/zellij/cinefind/cinefind-otlp.json`
//! - The file rotates at 10 MB and keeps 3 numbered backups
//! - Catalog requests carry their trace context through the host, so a
//!   response is handled under the span that issued its request
//!
//! Trace level is taken from `RUST_LOG`, then the `trace_level` plugin
//! option, then defaults to `info`.
//!
//! ```rust,no_run
//! use cinefind::observability::init_tracing;
//! use cinefind::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
