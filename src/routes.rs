use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::{debug, error};

use crate::state::AppState;
use crate::translate::languages::{languages_json, LANGUAGES};
use crate::translate::mock::SAMPLE_TEXTS;
use crate::translate::{TranslationRequest, AUTO_DETECT};

type ApiError = (StatusCode, Json<Value>);

pub fn create_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/status", get(api_status))
        .route("/api/health", get(api_health))
        .route("/api/translate", post(api_translate))
        .route("/api/languages", get(api_languages))
        .route("/api/metrics", get(api_metrics))
        .route("/api/samples", get(api_samples))
        // Dashboard assets
        .fallback_service(ServeDir::new(&state.config.static_dir))
}

/// Full application: routes, middleware and state.
pub fn create_app(state: AppState) -> Router {
    with_middleware(create_routes(state.clone())).with_state(state)
}

fn with_middleware(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": message})),
    )
}

fn internal_error(detail: impl std::fmt::Display) -> ApiError {
    error!("Translation API error: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": format!("Internal server error: {}", detail),
            "timestamp": timestamp()
        })),
    )
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    internal_error(detail).into_response()
}

async fn api_status(State(state): State<AppState>) -> Json<Value> {
    let translator = &state.translator;
    let healthy = translator.check_health(true).await;
    let health = translator.health().await;

    Json(json!({
        "endpoint": translator.endpoint(),
        "model_name": translator.model_name(),
        "backend": translator.backend(),
        "healthy": healthy,
        "debug": state.config.debug,
        "last_check": health.last_check,
        "timestamp": timestamp()
    }))
}

async fn api_health(State(state): State<AppState>) -> Json<Value> {
    let healthy = state.translator.check_health(true).await;
    Json(json!({
        "healthy": healthy,
        "timestamp": timestamp(),
        "endpoint": state.translator.endpoint()
    }))
}

fn default_source_language() -> String {
    AUTO_DETECT.to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub struct TranslatePayload {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

async fn api_translate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!("Rejected translate body: {}", rejection.body_text());
        bad_request("No data provided")
    })?;
    // `null`, `{}` and other empty bodies carry no data at all
    let has_data = match &body {
        Value::Null => false,
        Value::Object(fields) => !fields.is_empty(),
        _ => true,
    };
    if !has_data {
        return Err(bad_request("No data provided"));
    }
    let payload: TranslatePayload = serde_json::from_value(body).map_err(|e| {
        debug!("Rejected translate body: {}", e);
        bad_request("No data provided")
    })?;

    let text = payload.text.as_deref().unwrap_or_default().trim();
    if text.is_empty() {
        return Err(bad_request("No text provided"));
    }

    let request =
        TranslationRequest::new(text, payload.source_language, payload.target_language);
    let result = state.translator.translate(&request).await;

    let mut body = serde_json::to_value(&result).map_err(internal_error)?;
    body["timestamp"] = json!(timestamp());
    body["source_language"] = json!(request.source_language);
    body["target_language"] = json!(request.target_language);
    body["text_length"] = json!(text.chars().count());

    Ok(Json(body))
}

async fn api_languages() -> Json<Value> {
    Json(json!({
        "languages": languages_json(),
        "count": LANGUAGES.len(),
        "timestamp": timestamp()
    }))
}

async fn api_metrics(State(state): State<AppState>) -> Json<Value> {
    let translator = &state.translator;
    let health = translator.health().await;
    Json(json!({
        "endpoint": translator.endpoint(),
        "model_name": translator.model_name(),
        "healthy": health.healthy,
        "last_health_check": health.last_check,
        "timestamp": timestamp()
    }))
}

async fn api_samples() -> Json<Value> {
    Json(json!({
        "samples": SAMPLE_TEXTS,
        "timestamp": timestamp()
    }))
}
