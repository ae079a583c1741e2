use std::fmt;

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::types::{FixVerdict, RejectReason};

/// Prometheus-tellere for økter. Leses aldri tilbake av motoren.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    fixes_total: IntCounterVec,
    splits_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fixes_total = IntCounterVec::new(
            Opts::new("runpro_fixes_total", "GPS fixes by gate outcome"),
            &["outcome"],
        )?;
        let splits_total = IntCounter::new("runpro_splits_total", "Completed kilometer splits")?;

        registry.register(Box::new(fixes_total.clone()))?;
        registry.register(Box::new(splits_total.clone()))?;

        // forhåndsopprett alle etiketter så de vises med 0
        fixes_total.with_label_values(&["accepted"]);
        for r in RejectReason::ALL {
            fixes_total.with_label_values(&[r.as_str()]);
        }

        Ok(Self { registry, fixes_total, splits_total })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn observe_verdict(&self, verdict: &FixVerdict) {
        let outcome = match verdict {
            FixVerdict::Accepted => "accepted",
            FixVerdict::Rejected(r) => r.as_str(),
        };
        self.fixes_total.with_label_values(&[outcome]).inc();
    }

    pub fn observe_splits(&self, n: usize) {
        self.splits_total.inc_by(n as u64);
    }

    pub fn fixes_count(&self, outcome: &str) -> u64 {
        self.fixes_total.with_label_values(&[outcome]).get()
    }

    pub fn splits_count(&self) -> u64 {
        self.splits_total.get()
    }

    /// Tekstformat (Prometheus exposition).
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("accepted", &self.fixes_count("accepted"))
            .field("splits", &self.splits_count())
            .finish()
    }
}
