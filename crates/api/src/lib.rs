use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{Json, Query, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use voyage_agents::{GenerationConfig, TravelPlanner};
use voyage_core::{
    catalog, detailed_interest_choices, FlexibleRequest, InterestCategory, PlanReply,
    RawPreferences,
};
use voyage_observability::AppMetrics;

pub const API_KEY_ENV: &str = "VOYAGE_API_KEY";
pub const BIND_ENV: &str = "VOYAGE_BIND";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub generation: GenerationConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{API_KEY_ENV} must be set"))?;
        let generation =
            GenerationConfig::from_env().context("text-generation service is not configured")?;

        Ok(Self {
            api_key,
            generation,
        })
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub planner: TravelPlanner,
    pub metrics: Arc<AppMetrics>,
    pub api_key: Arc<str>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: voyage_observability::MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct DetailedInterestsQuery {
    main: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetailedInterestsResponse {
    main: Vec<InterestCategory>,
    choices: Vec<String>,
}

pub fn build_app(config: ApiConfig) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let planner = TravelPlanner::from_config(config.generation, metrics.clone())
        .context("failed to initialize itinerary planner")?;

    Ok(build_router(ApiState {
        planner,
        metrics,
        api_key: Arc::from(config.api_key),
    }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/catalog", get(catalog_get))
        .route("/v1/catalog/detailed_interests", get(detailed_interests))
        .route("/v1/itinerary/detailed", post(itinerary_detailed))
        .route("/v1/itinerary/flexible", post(itinerary_flexible))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn catalog_get() -> impl IntoResponse {
    (StatusCode::OK, Json(catalog()))
}

async fn detailed_interests(Query(query): Query<DetailedInterestsQuery>) -> impl IntoResponse {
    let main = query
        .main
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(InterestCategory::parse)
        .collect::<Vec<_>>();
    let choices = detailed_interest_choices(&main);

    (StatusCode::OK, Json(DetailedInterestsResponse { main, choices }))
}

async fn itinerary_detailed(
    State(state): State<ApiState>,
    Json(input): Json<RawPreferences>,
) -> Json<PlanReply> {
    Json(state.planner.plan_detailed(input).await)
}

async fn itinerary_flexible(
    State(state): State<ApiState>,
    Json(input): Json<FlexibleRequest>,
) -> Json<PlanReply> {
    Json(state.planner.plan_flexible(input).await)
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header_key == &*state.api_key {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "message": "missing or invalid x-api-key header"
        })),
    )
        .into_response()
}

fn is_public_endpoint(path: &str) -> bool {
    path == "/health"
}
