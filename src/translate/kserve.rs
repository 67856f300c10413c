use async_trait::async_trait;

use super::interface::{TranslationRequest, TranslationResult, TranslatorInterface};
use crate::inference::{HealthSnapshot, InferenceClient};

#[async_trait]
impl TranslatorInterface for InferenceClient {
    fn backend(&self) -> &'static str {
        "kserve"
    }

    fn endpoint(&self) -> &str {
        InferenceClient::endpoint(self)
    }

    fn model_name(&self) -> &str {
        InferenceClient::model_name(self)
    }

    async fn check_health(&self, force: bool) -> bool {
        InferenceClient::check_health(self, force).await
    }

    async fn health(&self) -> HealthSnapshot {
        InferenceClient::health(self).await
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        InferenceClient::translate(self, request).await
    }
}
