//! Trace context propagation across the host's asynchronous request boundary.
//!
//! A catalog request leaves the plugin through the host and its answer comes
//! back as an unrelated event. To keep both halves in one trace, the current
//! trace and span ids travel inside the request's context map and are read
//! back when the response arrives.

use std::collections::BTreeMap;

const TRACE_ID_FIELD: &str = "cinefind.trace_id";
const PARENT_SPAN_ID_FIELD: &str = "cinefind.parent_span_id";

/// Trace identifiers carried alongside a catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the active span.
    ///
    /// Returns `None` when tracing is not initialized or the span is not
    /// sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    pub fn write_to(&self, context: &mut BTreeMap<String, String>) {
        context.insert(TRACE_ID_FIELD.to_string(), self.trace_id.clone());
        context.insert(PARENT_SPAN_ID_FIELD.to_string(), self.parent_span_id.clone());
    }

    #[must_use]
    pub fn read_from(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(TRACE_ID_FIELD)?.clone(),
            parent_span_id: context.get(PARENT_SPAN_ID_FIELD)?.clone(),
        })
    }

    /// Makes the request's span the remote parent of spans opened while the
    /// returned guard is held.
    ///
    /// Returns `None` if the ids are not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}
