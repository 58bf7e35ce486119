use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use voyage_core::ReplyKind;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Per-process submission counters, one per reply kind.
#[derive(Debug, Default)]
pub struct AppMetrics {
    submissions_total: AtomicU64,
    itineraries_total: AtomicU64,
    clarifications_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    transport_errors_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub submissions_total: u64,
    pub itineraries_total: u64,
    pub clarifications_total: u64,
    pub upstream_errors_total: u64,
    pub transport_errors_total: u64,
    /// Share of finished submissions that ended in a generation failure.
    pub generation_failure_ratio: f64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_submission(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a finished submission under its reply kind and adds its latency.
    pub fn record_outcome(&self, kind: ReplyKind, elapsed: Duration) {
        self.outcome_counter(kind).fetch_add(1, Ordering::Relaxed);
        self.total_latency_millis
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn outcome_total(&self, kind: ReplyKind) -> u64 {
        self.outcome_counter(kind).load(Ordering::Relaxed)
    }

    fn outcome_counter(&self, kind: ReplyKind) -> &AtomicU64 {
        match kind {
            ReplyKind::Itinerary => &self.itineraries_total,
            ReplyKind::Clarification => &self.clarifications_total,
            ReplyKind::UpstreamError => &self.upstream_errors_total,
            ReplyKind::TransportError => &self.transport_errors_total,
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let submissions = self.submissions_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);
        let itineraries = self.outcome_total(ReplyKind::Itinerary);
        let clarifications = self.outcome_total(ReplyKind::Clarification);
        let upstream = self.outcome_total(ReplyKind::UpstreamError);
        let transport = self.outcome_total(ReplyKind::TransportError);
        let finished = itineraries + clarifications + upstream + transport;

        MetricsSnapshot {
            submissions_total: submissions,
            itineraries_total: itineraries,
            clarifications_total: clarifications,
            upstream_errors_total: upstream,
            transport_errors_total: transport,
            generation_failure_ratio: ratio(upstream + transport, finished),
            avg_latency_millis: ratio(latency, finished),
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Installs the JSON subscriber once per process. Logs go to stderr so
/// that command output on stdout stays clean.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,voyage_api=info,voyage_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
