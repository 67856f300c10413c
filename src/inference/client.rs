use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::error::InferenceError;
use super::extract::extract;
use super::health::{HealthSnapshot, HealthState};
use crate::config::Config;
use crate::translate::{TranslationRequest, TranslationResult};

const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_PREDICT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PREDICT_PATH: &str = "/predict";

/// Decoded body of a successful prediction call.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub body: Value,
    pub response_time_ms: f64,
}

/// HTTP client for a KServe-hosted model (`/v1/models/{name}`).
///
/// Owns the cached health state; a prediction is only attempted while the
/// cached or freshly probed state is healthy.
pub struct InferenceClient {
    http: Client,
    endpoint: String,
    model_name: String,
    health_interval: Duration,
    health_timeout: Duration,
    predict_timeout: Duration,
    predict_path: String,
    health: RwLock<HealthState>,
    // Serialises probes so concurrent non-forced checks share one network call.
    probe_gate: Mutex<()>,
}

impl InferenceClient {
    pub fn new(endpoint: impl Into<String>, model_name: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let model_name = model_name.into();
        info!(
            "Initialized InferenceClient: endpoint={}, model={}",
            endpoint, model_name
        );
        Self {
            http: Client::new(),
            endpoint,
            model_name,
            health_interval: DEFAULT_HEALTH_INTERVAL,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            predict_timeout: DEFAULT_PREDICT_TIMEOUT,
            predict_path: DEFAULT_PREDICT_PATH.to_string(),
            health: RwLock::new(HealthState::default()),
            probe_gate: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.model_endpoint.clone(), config.model_name.clone())
            .with_health_interval(config.health_check_interval())
            .with_timeouts(config.health_timeout(), config.predict_timeout())
    }

    pub fn with_health_interval(mut self, interval: Duration) -> Self {
        self.health_interval = interval;
        self
    }

    pub fn with_timeouts(mut self, health: Duration, predict: Duration) -> Self {
        self.health_timeout = health;
        self.predict_timeout = predict;
        self
    }

    /// Suffix appended to the model URL for prediction calls, e.g. `:predict`
    /// for KServe's v1 protocol.
    pub fn with_predict_path(mut self, path: impl Into<String>) -> Self {
        self.predict_path = path.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// `{endpoint}/v1/models/{model_name}{path}`
    pub fn model_url(&self, path: &str) -> String {
        format!(
            "{}/v1/models/{}{}",
            self.endpoint.trim_end_matches('/'),
            self.model_name,
            path
        )
    }

    /// Returns the cached health flag while it is younger than the staleness
    /// interval, otherwise probes the model resource. `force` always probes.
    /// Probe failures of any kind count as unhealthy.
    pub async fn check_health(&self, force: bool) -> bool {
        if !force {
            if let Some(healthy) = self.health.read().await.fresh(self.health_interval) {
                return healthy;
            }
        }

        let _gate = self.probe_gate.lock().await;
        if !force {
            // Another task may have refreshed the state while we waited.
            if let Some(healthy) = self.health.read().await.fresh(self.health_interval) {
                return healthy;
            }
        }

        let healthy = self.probe().await;
        self.health.write().await.record(healthy);
        healthy
    }

    async fn probe(&self) -> bool {
        match self.model_status().await {
            Ok(status) if status == StatusCode::OK => true,
            Ok(status) => {
                warn!("Model health check returned {}", status);
                false
            }
            Err(e) => {
                debug!("Health check failed: {}", e);
                false
            }
        }
    }

    /// One uncached request to the model resource. Leaves the health state alone.
    pub async fn model_status(&self) -> Result<StatusCode, InferenceError> {
        let response = self
            .http
            .get(self.model_url(""))
            .timeout(self.health_timeout)
            .send()
            .await?;
        Ok(response.status())
    }

    /// Last recorded health, without probing.
    pub async fn health(&self) -> HealthSnapshot {
        self.health.read().await.snapshot()
    }

    fn payload(request: &TranslationRequest) -> Value {
        let mut payload = Map::new();
        payload.insert(
            "instances".to_string(),
            Value::Array(vec![Value::String(request.text.clone())]),
        );
        if !request.auto_detect_source() {
            payload.insert(
                "source_language".to_string(),
                Value::String(request.source_language.clone()),
            );
        }
        if !request.target_language.is_empty() {
            payload.insert(
                "target_language".to_string(),
                Value::String(request.target_language.clone()),
            );
        }
        Value::Object(payload)
    }

    async fn send_prediction(
        &self,
        request: &TranslationRequest,
    ) -> Result<(StatusCode, String, f64), InferenceError> {
        let url = self.model_url(&self.predict_path);
        let payload = Self::payload(request);
        debug!("Sending prediction request to {}: {}", url, payload);

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .timeout(self.predict_timeout)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        Ok((status, body, elapsed_ms))
    }

    fn interpret(status: StatusCode, body: &str) -> Result<Value, InferenceError> {
        if status != StatusCode::OK {
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }
        serde_json::from_str(body).map_err(|e| InferenceError::MalformedResponse(e.to_string()))
    }

    /// Raw prediction call. Skips the health gate.
    pub async fn predict(&self, request: &TranslationRequest) -> Result<Prediction, InferenceError> {
        let (status, body, response_time_ms) = self.send_prediction(request).await?;
        let body = Self::interpret(status, &body)?;
        Ok(Prediction {
            body,
            response_time_ms,
        })
    }

    /// Health-gated translation. Never fails: every error becomes a failure result.
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        if !self.check_health(false).await {
            return TranslationResult::failed(request, InferenceError::Unhealthy);
        }

        let (status, body, elapsed_ms) = match self.send_prediction(request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Prediction call failed: {}", err);
                return TranslationResult::failed(request, err);
            }
        };

        match Self::interpret(status, &body) {
            Ok(value) => {
                let extracted = extract(&value);
                debug!(
                    "Prediction succeeded in {:.1}ms (confidence {:.2})",
                    elapsed_ms,
                    extracted.confidence.value()
                );
                TranslationResult::translated(request, extracted.translation, extracted.confidence)
                    .with_response_time(elapsed_ms)
                    .with_raw_response(value)
            }
            Err(err) => {
                warn!("Prediction rejected: {}", err);
                TranslationResult::failed(request, err).with_response_time(elapsed_ms)
            }
        }
    }
}
