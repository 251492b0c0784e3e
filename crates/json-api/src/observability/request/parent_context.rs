//! W3C `traceparent` extraction for request spans.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

use crate::observability::settings;

/// Remote parent for the request span, when propagation is switched on and
/// the caller sent a valid trace context.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    if !settings::otel_parent_propagation_enabled() {
        return None;
    }

    let carrier = HeaderCarrier(headers);

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a request without trace headers does
        // not pick up whatever span happens to be current.
        let context = propagator.extract_with_context(&Context::new(), &carrier);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::header::HeaderValue;

    use super::*;

    #[test]
    fn carrier_reads_header_values() {
        let mut headers = HeaderMap::new();
        headers.insert("traceparent", HeaderValue::from_static("00-abc-def-01"));

        let carrier = HeaderCarrier(&headers);

        assert_eq!(carrier.get("traceparent"), Some("00-abc-def-01"));
        assert_eq!(carrier.keys(), vec!["traceparent"]);
    }

    #[test]
    fn propagation_is_off_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        assert!(remote_parent(&headers).is_none(), "propagation must be opt-in");
    }
}
