use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::inference::{HealthSnapshot, InferenceError};

/// Source language value meaning "let the model detect it".
pub const AUTO_DETECT: &str = "auto";

/// One translation call: input text plus language codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    pub fn auto_detect_source(&self) -> bool {
        self.source_language == AUTO_DETECT
    }

    /// `"{source}-{target}"`, the key used by the sample tables.
    pub fn language_pair(&self) -> String {
        format!("{}-{}", self.source_language, self.target_language)
    }
}

/// A score in `[0.0, 1.0]`. Out-of-range input is clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    Translated {
        translation: String,
        confidence: Confidence,
    },
    Failed(InferenceError),
}

/// Result of a translation call. Always holds either a translation or an error.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub outcome: TranslationOutcome,
    /// Wall-clock latency of the backend call in milliseconds, when one was made.
    pub response_time_ms: Option<f64>,
    pub source_language: String,
    pub target_language: String,
    pub raw_response: Option<Value>,
    pub note: Option<String>,
}

impl TranslationResult {
    pub fn translated(
        request: &TranslationRequest,
        translation: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self::with_outcome(
            request,
            TranslationOutcome::Translated {
                translation: translation.into(),
                confidence,
            },
        )
    }

    pub fn failed(request: &TranslationRequest, error: InferenceError) -> Self {
        Self::with_outcome(request, TranslationOutcome::Failed(error))
    }

    fn with_outcome(request: &TranslationRequest, outcome: TranslationOutcome) -> Self {
        Self {
            outcome,
            response_time_ms: None,
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            raw_response: None,
            note: None,
        }
    }

    pub fn with_response_time(mut self, millis: f64) -> Self {
        self.response_time_ms = Some(millis);
        self
    }

    pub fn with_raw_response(mut self, raw: Value) -> Self {
        self.raw_response = Some(raw);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, TranslationOutcome::Translated { .. })
    }

    pub fn translation(&self) -> Option<&str> {
        match &self.outcome {
            TranslationOutcome::Translated { translation, .. } => Some(translation),
            TranslationOutcome::Failed(_) => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match &self.outcome {
            TranslationOutcome::Translated { confidence, .. } => Some(*confidence),
            TranslationOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&InferenceError> {
        match &self.outcome {
            TranslationOutcome::Failed(err) => Some(err),
            TranslationOutcome::Translated { .. } => None,
        }
    }
}

// Flat wire shape: `success` plus either `translation`/`confidence` or `error`.
#[derive(Serialize)]
struct ResultWire<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_time: Option<f64>,
    source_language: &'a str,
    target_language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

impl Serialize for TranslationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResultWire {
            success: self.is_success(),
            translation: self.translation(),
            confidence: self.confidence(),
            error: self.error().map(ToString::to_string),
            response_time: self.response_time_ms,
            source_language: &self.source_language,
            target_language: &self.target_language,
            raw_response: self.raw_response.as_ref(),
            note: self.note.as_deref(),
        }
        .serialize(serializer)
    }
}

/// A translation backend the gateway can delegate to.
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Short backend identifier reported by the status endpoints.
    fn backend(&self) -> &'static str;

    fn endpoint(&self) -> &str;

    fn model_name(&self) -> &str;

    /// Health of the backend, served from cache unless `force` is set or the
    /// cached value is stale.
    async fn check_health(&self, force: bool) -> bool;

    /// Last known health without probing.
    async fn health(&self) -> HealthSnapshot;

    async fn translate(&self, request: &TranslationRequest) -> TranslationResult;
}
