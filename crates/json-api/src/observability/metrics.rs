//! Prometheus metrics: HTTP traffic plus booking and payment ledger events.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Business events worth counting next to raw HTTP traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LedgerEvent {
    BookingCreated,
    BookingCancelled,
    OrderCreated,
    PaymentVerified,
    SignatureRejected,
}

impl LedgerEvent {
    const fn label(self) -> &'static str {
        match self {
            Self::BookingCreated => "booking_created",
            Self::BookingCancelled => "booking_cancelled",
            Self::OrderCreated => "order_created",
            Self::PaymentVerified => "payment_verified",
            Self::SignatureRejected => "signature_rejected",
        }
    }
}

#[derive(Debug)]
struct ServerMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    ledger_events_total: IntCounterVec,
}

static SERVER_METRICS: OnceLock<Option<ServerMetrics>> = OnceLock::new();

/// Keeps the in-flight gauge raised while a request is being served.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code), code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count one ledger event.
pub(crate) fn record_ledger_event(event: LedgerEvent) {
    if let Some(metrics) = metrics() {
        metrics
            .ledger_events_total
            .with_label_values(&[event.label()])
            .inc();
    }
}

/// Prometheus text exposition.
#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to build metrics content type: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static ServerMetrics> {
    SERVER_METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, metric: Result<M, prometheus::Error>, name: &str) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!("failed to create {name} metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register {name} metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<ServerMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "homestay_json_http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
        "requests_total",
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "homestay_json_http_request_duration_seconds",
                "HTTP request latency in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
        "request_duration_seconds",
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::with_opts(Opts::new(
            "homestay_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        )),
        "requests_in_flight",
    )?;

    let ledger_events_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "homestay_json_ledger_events_total",
                "Booking and payment ledger events by kind.",
            ),
            &["event"],
        ),
        "ledger_events_total",
    )?;

    Some(ServerMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        ledger_events_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
