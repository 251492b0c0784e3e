//! `x-request-id` handling.
//!
//! Callers may supply their own id so a booking attempt can be traced across
//! the client, this server and the payment gateway callback. Ids that would
//! not survive a round trip through a header or a log line are replaced.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    match header_value.map(|value| value.trim().to_owned()) {
        Some(value) if is_acceptable(&value) => value,
        Some(value) if !value.is_empty() => {
            warn!(len = value.len(), "replacing unusable incoming request id");

            Uuid::now_v7().to_string()
        }
        _ => Uuid::now_v7().to_string(),
    }
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}
