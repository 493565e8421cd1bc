//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    sales_recorded_total: IntCounterVec,
    warranties_filed_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
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

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a recorded sale, labelled by whether it carries a warranty.
pub(crate) fn record_sale(has_warranty: bool) {
    let Some(metrics) = metrics() else {
        return;
    };

    let warranty = if has_warranty { "true" } else { "false" };

    metrics
        .sales_recorded_total
        .with_label_values(&[warranty])
        .inc();
}

/// Count a filed warranty.
pub(crate) fn record_warranty_filed() {
    if let Some(metrics) = metrics() {
        metrics.warranties_filed_total.inc();
    }
}

fn encode(metrics: &Metrics) -> Result<(String, HeaderValue), String> {
    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    encoder
        .encode(&metrics.registry.gather(), &mut encoded)
        .map_err(|source| format!("failed to encode metrics response: {source}"))?;

    let content_type = HeaderValue::from_str(encoder.format_type())
        .map_err(|source| format!("failed to encode metrics content type header: {source}"))?;

    let body = String::from_utf8(encoded)
        .map_err(|source| format!("metrics response is not utf-8: {source}"))?;

    Ok((body, content_type))
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let encoded = metrics()
        .ok_or_else(|| "metrics registry is unavailable".to_string())
        .and_then(encode);

    match encoded {
        Ok((body, content_type)) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(body);
        }
        Err(message) => {
            error!("{message}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

/// Create and register one collector, logging and giving up on either failure.
fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!(metric = name, "failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!(metric = name, "failed to register metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "shopfront_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "shopfront_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "shopfront_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let sales_recorded_total = register(
        &registry,
        "sales_recorded_total",
        IntCounterVec::new(
            Opts::new(
                "shopfront_json_sales_recorded_total",
                "Sales recorded, partitioned by whether they carry a warranty.",
            ),
            &["warranty"],
        ),
    )?;

    let warranties_filed_total = register(
        &registry,
        "warranties_filed_total",
        IntCounter::with_opts(Opts::new(
            "shopfront_json_warranties_filed_total",
            "Standalone warranties filed.",
        )),
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        sales_recorded_total,
        warranties_filed_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}
