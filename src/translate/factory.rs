use std::sync::Arc;
use tracing::info;

use super::interface::TranslatorInterface;
use super::mock::MockTranslator;
use crate::config::{BackendKind, Config};
use crate::inference::InferenceClient;

/// Factory for the translation backend behind `/api/translate`
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create_translator(config: &Config) -> Arc<dyn TranslatorInterface> {
        info!("Initializing translation backend: {:?}", config.backend);

        match config.backend {
            BackendKind::Kserve => Arc::new(InferenceClient::from_config(config)),
            BackendKind::Mock => Arc::new(MockTranslator::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_backend_from_config() {
        let mut config = Config::default();
        let kserve = TranslatorFactory::create_translator(&config);
        assert_eq!(kserve.backend(), "kserve");
        assert_eq!(kserve.endpoint(), "http://localhost:8080");
        assert_eq!(kserve.model_name(), "ai4bharat-bert");

        config.backend = BackendKind::Mock;
        let mock = TranslatorFactory::create_translator(&config);
        assert_eq!(mock.backend(), "mock");
    }
}
