use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

const ROUTE_LABELS: [&str; 3] = ["method", "route", "status"];

/// Prometheus metrics for the adapter, registered on their own registry.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub unhandled_requests_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new(
                "oauth_app_http_requests_total",
                "Requests handled by the OAuth App middleware",
            ),
            &ROUTE_LABELS,
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "oauth_app_http_request_duration_seconds",
                "Time spent handling OAuth App routes",
            ),
            &ROUTE_LABELS,
        )?;
        let unhandled_requests_total = IntCounter::new(
            "oauth_app_unhandled_requests_total",
            "Requests forwarded to the fallback service",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(unhandled_requests_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            unhandled_requests_total,
        })
    }

    pub fn observe_route(&self, method: &str, route: &str, status: u16, seconds: f64) {
        let status = status.to_string();
        let labels = [method, route, status.as_str()];
        self.http_requests_total.with_label_values(&labels[..]).inc();
        self.http_request_duration_seconds
            .with_label_values(&labels[..])
            .observe(seconds);
    }
}
