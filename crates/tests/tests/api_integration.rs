use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Local;
use serde_json::{json, Value};
use tower::ServiceExt;
use voyage_agents::GenerationConfig;
use voyage_api::{build_app, ApiConfig};
use voyage_core::next_month_window;

const API_KEY: &str = "test-api-key";
const TOKEN: &str = "hf_integration";

#[derive(Clone, Default)]
struct MockService {
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

async fn generate(
    State(mock): State<MockService>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {TOKEN}"))
        .unwrap_or(false);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "bad token" })),
        );
    }

    let prompt = payload["inputs"].as_str().unwrap_or_default();
    mock.prompts.lock().unwrap().push(prompt.to_string());
    if prompt.contains("Destination: Atlantis") {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Model is currently loading" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!([{ "generated_text": format!("{prompt}\nDay 1: Arrive and explore the old town.\n") }])),
    )
}

async fn start_mock() -> (String, MockService) {
    let mock = MockService::default();
    let router = Router::new()
        .route("/generate", post(generate))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/generate"), mock)
}

async fn app() -> (Router, MockService) {
    let (endpoint, mock) = start_mock().await;
    let app = build_app(ApiConfig {
        api_key: API_KEY.to_string(),
        generation: GenerationConfig::new(endpoint, TOKEN),
    })
    .expect("app should build");
    (app, mock)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", API_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["submissions_total"], 0);
}

#[tokio::test]
async fn itinerary_requires_api_key() {
    let (app, mock) = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/itinerary/detailed")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "destination": "Kyoto" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn detailed_submission_returns_itinerary() {
    let (app, mock) = app().await;

    let response = app
        .oneshot(post_json(
            "/v1/itinerary/detailed",
            json!({
                "destination": "Kyoto",
                "start_date": "2027-04-01",
                "end_date": "2027-04-07",
                "budget": 4500,
                "main_interests": ["History", "Food"],
                "dietary_preferences": "Vegetarian",
                "mobility_level": "Full Mobility",
                "accommodation_type": "Boutique"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["kind"], "itinerary");
    assert_eq!(parsed["text"], "Day 1: Arrive and explore the old town.");
    assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_form_fields_get_defaults() {
    let (app, mock) = app().await;

    let response = app
        .oneshot(post_json(
            "/v1/itinerary/detailed",
            json!({
                "destination": "Kyoto",
                "start_date": "",
                "end_date": "",
                "dietary_preferences": "",
                "mobility_level": "",
                "accommodation_type": " "
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["kind"], "itinerary");

    let (start, end) = next_month_window(Local::now().date_naive());
    let prompts = mock.prompts.lock().unwrap();
    let prompt = &prompts[0];
    assert!(prompt.contains(&format!(
        "Travel Dates: {} to {}\n",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )));
    assert!(prompt.contains("Dietary Preferences: No Restrictions\n"));
    assert!(prompt.contains("Mobility Level: Full Mobility\n"));
    assert!(prompt.contains("Accommodation Type: Mid-Range\n"));
}

#[tokio::test]
async fn flexible_without_destination_needs_clarification() {
    let (app, mock) = app().await;

    let response = app
        .oneshot(post_json(
            "/v1/itinerary/flexible",
            json!({ "description": "somewhere warm with great food", "dates": "next summer" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["kind"], "clarification");
    assert!(parsed["text"]
        .as_str()
        .unwrap()
        .starts_with("Input Clarification Needed: Please specify a destination"));
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_failure_is_returned_as_text() {
    let (app, _) = app().await;

    let response = app
        .oneshot(post_json(
            "/v1/itinerary/flexible",
            json!({ "description": "history", "destination": "Atlantis" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["kind"], "upstream_error");
    let text = parsed["text"].as_str().unwrap();
    assert!(text.contains("503"));
    assert!(text.contains("Model is currently loading"));
}

#[tokio::test]
async fn catalog_lists_reference_data() {
    let (app, _) = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/catalog")
                .header("x-api-key", API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["dietary_preferences"][0], "No Restrictions");
    assert_eq!(parsed["budget_ranges"][3]["name"], "luxury");
    assert_eq!(parsed["budget_ranges"][3]["max"], Value::Null);
    assert_eq!(parsed["interest_keywords"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn detailed_interest_choices_follow_selection() {
    let (app, _) = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/catalog/detailed_interests?main=Art,unknown,nature")
                .header("x-api-key", API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["main"], json!(["Art", "Nature"]));
    assert_eq!(parsed["choices"].as_array().unwrap().len(), 9);
    assert_eq!(parsed["choices"][0], "Art Galleries");
}

#[tokio::test]
async fn invalid_enum_value_is_rejected() {
    let (app, mock) = app().await;

    let response = app
        .oneshot(post_json(
            "/v1/itinerary/detailed",
            json!({ "destination": "Kyoto", "mobility_level": "Jetpack" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}
