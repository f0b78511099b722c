use {
    crate::domain::dispatch::Mode,
    prometheus_metric_storage::StorageRegistry,
    std::sync::OnceLock,
};

/// Metrics for the gateway.
#[derive(Debug, Clone, prometheus_metric_storage::MetricStorage)]
#[metric(subsystem = "tron_gateway")]
struct Metrics {
    /// Operations that made it past the busy check, by dispatch mode.
    #[metric(labels("mode"))]
    dispatches: prometheus::IntCounterVec,

    /// Errors that occurred at the dispatch boundary.
    #[metric(labels("kind"))]
    dispatch_errors: prometheus::IntCounterVec,

    /// Operations rejected because another one was in flight.
    busy_rejections: prometheus::IntCounter,

    /// Completed operations by whether the broadcast was accepted.
    #[metric(labels("success"))]
    results: prometheus::IntCounterVec,

    /// Total number of requests that got sent to the node or the wallet.
    #[metric(labels("collaborator"))]
    requests: prometheus::IntCounterVec,
}

pub fn dispatch(mode: Mode) {
    get().dispatches.with_label_values(&[mode.as_str()]).inc();
}

pub fn dispatch_error(kind: &str) {
    get().dispatch_errors.with_label_values(&[kind]).inc();
}

pub fn busy() {
    get().busy_rejections.inc();
}

pub fn result(success: bool) {
    get()
        .results
        .with_label_values(&[if success { "true" } else { "false" }])
        .inc();
}

pub fn request_sent(collaborator: &str) {
    get().requests.with_label_values(&[collaborator]).inc();
}

/// Renders all registered metrics in the Prometheus text format.
pub fn encode() -> String {
    let families = registry().registry().gather();
    prometheus::TextEncoder::new()
        .encode_to_string(&families)
        .unwrap_or_else(|err| {
            tracing::error!(?err, "failed to encode metrics");
            String::new()
        })
}

fn registry() -> &'static StorageRegistry {
    static REGISTRY: OnceLock<StorageRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| StorageRegistry::new(prometheus::Registry::new()))
}

/// Get the metrics instance.
fn get() -> &'static Metrics {
    Metrics::instance(registry()).expect("unexpected error getting metrics instance")
}
