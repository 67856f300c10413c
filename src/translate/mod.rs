pub mod factory;
pub mod interface;
pub mod kserve;
pub mod languages;
pub mod mock;

pub use factory::TranslatorFactory;
pub use interface::{
    Confidence, TranslationOutcome, TranslationRequest, TranslationResult, TranslatorInterface,
    AUTO_DETECT,
};
pub use languages::{LanguageDescriptor, LANGUAGES};
pub use mock::MockTranslator;
