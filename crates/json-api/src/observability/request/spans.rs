//! Span naming for HTTP requests.
//!
//! Record identifiers are collapsed so span names and metric routes keep a
//! bounded cardinality.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_template(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(placeholder)
        .collect();

    format!("/{}", segments.join("/"))
}

fn placeholder(segment: &str) -> &str {
    if Uuid::parse_str(segment).is_ok() {
        "{uuid}"
    } else if is_human_id(segment, "HH") {
        "{booking_id}"
    } else if is_human_id(segment, "PAY") {
        "{payment_id}"
    } else {
        segment
    }
}

fn is_human_id(segment: &str, prefix: &str) -> bool {
    segment.strip_prefix(prefix).is_some_and(|rest| {
        rest.len() >= 4
            && rest.bytes().take(4).all(|byte| byte.is_ascii_digit())
            && rest.contains('-')
    })
}

#[cfg(test)]
mod tests {
    use super::request_span_name;

    #[test]
    fn uuid_segments_are_collapsed() {
        let names = request_span_name(
            "PUT",
            "/bookings/0195f1de-8f7a-7c3e-9b1a-1c2d3e4f5a6b/cancel",
        );

        assert_eq!(names.otel_path, "/bookings/{uuid}/cancel");
        assert_eq!(names.otel_span_name, "PUT /bookings/{uuid}/cancel");
    }

    #[test]
    fn human_ids_are_collapsed() {
        assert_eq!(
            request_span_name("GET", "/bookings/HH2026-0001-12345678").otel_path,
            "/bookings/{booking_id}"
        );
        assert_eq!(
            request_span_name("GET", "/payments/PAY2026000001-12345678").otel_path,
            "/payments/{payment_id}"
        );
    }

    #[test]
    fn plain_segments_are_kept() {
        assert_eq!(
            request_span_name("POST", "/payments/verify").otel_path,
            "/payments/verify"
        );
        assert_eq!(request_span_name("GET", "/HHouse").otel_path, "/HHouse");
    }

    #[test]
    fn root_path_is_kept() {
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
    }
}
