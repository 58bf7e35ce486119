mod config;
mod requester;

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};
use voyage_core::{
    raw_from_flexible, validate_and_refine_on, FlexibleRequest, PlanReply, RawPreferences,
    ReplyKind,
};
use voyage_observability::AppMetrics;

pub use config::{
    ConfigurationError, GenerationConfig, GenerationParameters, CREDENTIAL_ENV,
    DEFAULT_GENERATION_URL, ENDPOINT_ENV,
};
pub use requester::{GenerationError, ItineraryRequester};

/// Runs a submission end to end: normalize, render, request.
#[derive(Clone)]
pub struct TravelPlanner {
    requester: Arc<ItineraryRequester>,
    metrics: Arc<AppMetrics>,
}

impl TravelPlanner {
    pub fn new(requester: ItineraryRequester, metrics: Arc<AppMetrics>) -> Self {
        Self {
            requester: Arc::new(requester),
            metrics,
        }
    }

    pub fn from_config(
        config: GenerationConfig,
        metrics: Arc<AppMetrics>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::new(ItineraryRequester::new(config)?, metrics))
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    #[instrument(skip(self, raw))]
    pub async fn plan_detailed(&self, raw: RawPreferences) -> PlanReply {
        self.plan(raw, Local::now().date_naive()).await
    }

    #[instrument(skip(self, request))]
    pub async fn plan_flexible(&self, request: FlexibleRequest) -> PlanReply {
        self.plan_flexible_on(request, Local::now().date_naive())
            .await
    }

    pub async fn plan_flexible_on(&self, request: FlexibleRequest, today: NaiveDate) -> PlanReply {
        self.plan(raw_from_flexible(request, today), today).await
    }

    async fn plan(&self, raw: RawPreferences, today: NaiveDate) -> PlanReply {
        let started = Instant::now();
        self.metrics.inc_submission();

        let record = match validate_and_refine_on(raw, today) {
            Ok(record) => record,
            Err(error) => {
                self.metrics
                    .record_outcome(ReplyKind::Clarification, started.elapsed());
                warn!(reason = %error, "submission needs clarification");
                return PlanReply::clarification(error.clarification());
            }
        };

        let reply = match self.requester.try_request_itinerary(&record).await {
            Ok(itinerary) => PlanReply::itinerary(itinerary),
            Err(error) => {
                warn!(error = %error, "itinerary generation failed");
                PlanReply {
                    kind: error.reply_kind(),
                    text: error.itinerary_text(),
                }
            }
        };

        self.metrics.record_outcome(reply.kind, started.elapsed());
        info!(
            destination = %record.destination,
            start = %record.start_date,
            end = %record.end_date,
            kind = ?reply.kind,
            latency_ms = started.elapsed().as_millis() as u64,
            "submission handled"
        );

        reply
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use voyage_core::build_prompt;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    fn planner(endpoint: String) -> TravelPlanner {
        TravelPlanner::from_config(
            GenerationConfig::new(endpoint, "hf_test"),
            AppMetrics::shared(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn flexible_without_destination_asks_for_clarification() {
        let planner = planner("http://127.0.0.1:9/generate".to_string());
        let reply = planner
            .plan_flexible_on(
                FlexibleRequest {
                    description: "history and food".to_string(),
                    ..FlexibleRequest::default()
                },
                today(),
            )
            .await;

        assert_eq!(reply.kind, ReplyKind::Clarification);
        assert!(reply.text.starts_with("Input Clarification Needed: "));

        let snapshot = planner.metrics().snapshot();
        assert_eq!(snapshot.submissions_total, 1);
        assert_eq!(snapshot.clarifications_total, 1);
    }

    #[tokio::test]
    async fn flexible_submission_reaches_the_service() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|Json(payload): Json<Value>| async move {
                let prompt = payload["inputs"].as_str().unwrap_or_default().to_string();
                Json(json!([{ "generated_text": format!("{prompt}Day 1: Louvre") }]))
            }),
        ))
        .await;
        let planner = planner(endpoint);

        let reply = planner
            .plan_flexible_on(
                FlexibleRequest {
                    description: "art and food".to_string(),
                    destination: Some("Paris".to_string()),
                    dates: Some("2027-04-10".to_string()),
                    budget_description: None,
                },
                today(),
            )
            .await;

        assert_eq!(reply, PlanReply::itinerary("Day 1: Louvre"));
        assert_eq!(planner.metrics().snapshot().itineraries_total, 1);
    }

    #[tokio::test]
    async fn upstream_failure_is_classified() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        ))
        .await;
        let planner = planner(endpoint);

        let reply = planner
            .plan_detailed(RawPreferences {
                destination: Some("Kyoto".to_string()),
                ..RawPreferences::default()
            })
            .await;

        assert_eq!(reply.kind, ReplyKind::UpstreamError);
        assert!(reply.text.contains("503"));
        let snapshot = planner.metrics().snapshot();
        assert_eq!(snapshot.upstream_errors_total, 1);
        assert_eq!(snapshot.generation_failure_ratio, 1.0);
    }

    #[test]
    fn destination_only_record_prompts_with_defaults() {
        let record = validate_and_refine_on(
            RawPreferences {
                destination: Some("Kyoto".to_string()),
                ..RawPreferences::default()
            },
            today(),
        )
        .unwrap();
        let prompt = build_prompt(&record);
        assert!(prompt.contains("Travel Dates: 2026-11-01 to 2026-11-07"));
        assert!(prompt.contains("Total Budget: $2000"));
    }
}
