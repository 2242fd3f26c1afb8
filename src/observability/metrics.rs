use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub board_refreshes_total: IntCounterVec,
    pub board_refresh_latency_seconds: HistogramVec,
    pub active_orders: IntGauge,
    pub critical_orders: IntGaugeVec,
    pub status_transitions_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let board_refreshes_total = IntCounterVec::new(
            Opts::new("board_refreshes_total", "Driver board refreshes by trigger"),
            &["trigger"],
        )
        .expect("valid board_refreshes_total metric");

        let board_refresh_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "board_refresh_latency_seconds",
                "Time spent rebuilding driver boards in seconds",
            ),
            &["trigger"],
        )
        .expect("valid board_refresh_latency_seconds metric");

        let active_orders = IntGauge::new(
            "active_orders",
            "Orders on driver boards after the last refresh",
        )
        .expect("valid active_orders metric");

        let critical_orders = IntGaugeVec::new(
            Opts::new("critical_orders", "Critical orders per driver board"),
            &["driver_id"],
        )
        .expect("valid critical_orders metric");

        let status_transitions_total = IntCounterVec::new(
            Opts::new("status_transitions_total", "Order status changes by outcome"),
            &["outcome"],
        )
        .expect("valid status_transitions_total metric");

        registry
            .register(Box::new(board_refreshes_total.clone()))
            .expect("register board_refreshes_total");
        registry
            .register(Box::new(board_refresh_latency_seconds.clone()))
            .expect("register board_refresh_latency_seconds");
        registry
            .register(Box::new(active_orders.clone()))
            .expect("register active_orders");
        registry
            .register(Box::new(critical_orders.clone()))
            .expect("register critical_orders");
        registry
            .register(Box::new(status_transitions_total.clone()))
            .expect("register status_transitions_total");

        Self {
            registry,
            board_refreshes_total,
            board_refresh_latency_seconds,
            active_orders,
            critical_orders,
            status_transitions_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
