use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus counters for the dispatch pipeline
// ============================================================================
//
// - dispatch_total:              every dispatched command, by outcome label
// - authorization_denied_total:  gate refusals, by command
// - logins_total:                login attempts, by result
//
// The shell prints the text exposition on the `metrics` built-in.
// ============================================================================

pub struct Metrics {
    registry: Registry,
    pub dispatch_total: IntCounterVec,
    pub authorization_denied: IntCounterVec,
    pub logins_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new_custom(Some("storefront".to_string()), None)?;

        let dispatch_total = IntCounterVec::new(
            Opts::new("dispatch_total", "Commands dispatched, by outcome"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(dispatch_total.clone()))?;

        let authorization_denied = IntCounterVec::new(
            Opts::new(
                "authorization_denied_total",
                "Gated commands refused by the authorization gate",
            ),
            &["command"],
        )?;
        registry.register(Box::new(authorization_denied.clone()))?;

        let logins_total = IntCounterVec::new(
            Opts::new("logins_total", "Login attempts, by result"),
            &["result"],
        )?;
        registry.register(Box::new(logins_total.clone()))?;

        Ok(Self {
            registry,
            dispatch_total,
            authorization_denied,
            logins_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_dispatch(&self, command: &str, outcome: &str) {
        self.dispatch_total
            .with_label_values(&[command, outcome])
            .inc();
    }

    pub fn record_denial(&self, command: &str) {
        self.authorization_denied.with_label_values(&[command]).inc();
    }

    pub fn record_login(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.logins_total.with_label_values(&[result]).inc();
    }

    /// Prometheus text exposition of every registered metric.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
