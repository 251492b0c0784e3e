//! Response Envelope
//!
//! Every JSON body carries a `success` flag and a human readable `message`.
//! Successful responses add a `data` payload; errors are rewritten by
//! [`render_error`] into the same shape without one.

use salvo::{catcher::Catcher, http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Successful response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    /// Always `true`
    pub success: bool,

    /// Outcome description
    pub message: String,

    /// Response payload
    pub data: T,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Always `false`
    pub success: bool,

    /// Error description
    pub message: String,
}

/// Catcher hoop rendering error statuses as [`ErrorBody`].
///
/// The brief of a rendered [`StatusError`] becomes the message; anything else
/// falls back to the status code's reason phrase.
#[handler]
pub(crate) async fn render_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(code) = res.status_code else {
        return;
    };

    if !(code.is_client_error() || code.is_server_error()) {
        return;
    }

    let message = match res.replace_body(ResBody::None) {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief,
        _ => code.canonical_reason().unwrap_or("Error").to_string(),
    };

    res.render(Json(ErrorBody {
        success: false,
        message,
    }));

    ctrl.skip_rest();
}

/// Wrap a router so every error leaves as an [`ErrorBody`].
pub(crate) fn service(router: Router) -> Service {
    Service::new(router).catcher(Catcher::default().hoop(render_error))
}
