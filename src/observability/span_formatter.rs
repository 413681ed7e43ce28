//! OTLP JSON encoding of exported spans.
//!
//! Each exported batch becomes one `resourceSpans` document on one line,
//! readable by OTLP tooling such as `otel-cli` or a collector's file
//! receiver.

use std::time::{SystemTime, UNIX_EPOCH};

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};

/// Instrumentation scope recorded on every batch.
const SCOPE_NAME: &str = "cinefind";

/// Encodes span batches together with the process resource.
pub struct OtlpJsonEncoder {
    resource_attributes: Vec<JsonValue>,
}

impl OtlpJsonEncoder {
    pub fn new(resource: &Resource) -> Self {
        let resource_attributes = resource
            .iter()
            .map(|(key, value)| attribute(key.as_str(), value))
            .collect();
        Self { resource_attributes }
    }

    pub fn encode_batch(&self, batch: &[SpanData]) -> JsonValue {
        json!({
            "resourceSpans": [{
                "resource": { "attributes": self.resource_attributes },
                "scopeSpans": [{
                    "scope": {
                        "name": SCOPE_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                    "spans": batch.iter().map(encode_span).collect::<Vec<_>>(),
                }]
            }]
        })
    }
}

fn encode_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(event).collect::<Vec<_>>(),
        "links": span.links.iter().map(link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs.iter().map(|kv| attribute(kv.key.as_str(), &kv.value)).collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

/// OTLP `AnyValue`; 64-bit integers are strings per the JSON mapping.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

const fn kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

/// Nanoseconds since the epoch as a decimal string; times before it read as 0.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos())
        .to_string()
}

impl std::fmt::Debug for OtlpJsonEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpJsonEncoder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn attribute_values_follow_otlp_json_mapping() {
        assert_eq!(any_value(&Value::I64(42)), json!({ "intValue": "42" }));
        assert_eq!(any_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(
            attribute("query", &Value::from("alien")),
            json!({ "key": "query", "value": { "stringValue": "alien" } })
        );
    }

    #[test]
    fn timestamps_are_decimal_nanoseconds() {
        let time = UNIX_EPOCH + Duration::from_millis(1500);
        assert_eq!(unix_nanos(time), "1500000000");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "cinefind")]);
        let doc = OtlpJsonEncoder::new(&resource).encode_batch(&[]);

        let resource_spans = &doc["resourceSpans"][0];
        assert_eq!(
            resource_spans["resource"]["attributes"][0]["value"]["stringValue"],
            "cinefind"
        );
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "cinefind");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], json!([]));
    }
}
