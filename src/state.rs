use std::sync::Arc;

use crate::config::Config;
use crate::translate::{TranslatorFactory, TranslatorInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn TranslatorInterface>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let translator = TranslatorFactory::create_translator(&config);
        Self::with_translator(config, translator)
    }

    pub fn with_translator(config: Config, translator: Arc<dyn TranslatorInterface>) -> Self {
        Self {
            config: Arc::new(config),
            translator,
        }
    }
}
