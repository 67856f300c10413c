//! Canned translations for running the dashboard without a model service.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::interface::{Confidence, TranslationRequest, TranslationResult, TranslatorInterface};
use crate::inference::HealthSnapshot;

pub const SAMPLE_CONFIDENCE: f64 = 0.95;
pub const MOCK_PREFIX: &str = "[MOCK]";
pub const MOCK_NOTE: &str =
    "This is a mock translation for testing. Deploy KServe to get real translations.";

type PhraseTable = &'static [(&'static str, &'static str)];

/// Exact-text translations keyed by `"{source}-{target}"`.
const SAMPLE_TRANSLATIONS: &[(&str, PhraseTable)] = &[
    (
        "hi-en",
        &[
            ("नमस्ते, कैसे हो आप?", "Hello, how are you?"),
            ("धन्यवाद, आपका दिन शुभ हो", "Thank you, have a good day"),
            ("शुभ रात्रि, मीठे सपने", "Good night, sweet dreams"),
            ("मैं आपसे प्यार करता हूं", "I love you"),
            ("क्या आप मुझे समझ सकते हैं?", "Can you understand me?"),
        ],
    ),
    (
        "ta-en",
        &[
            ("வணக்கம், எப்படி இருக்கிறீர்கள்?", "Hello, how are you?"),
            ("கடவுள் உங்களை காப்பாற்றட்டும்", "May God protect you"),
            ("நன்றி, உங்கள் நாள் நல்லதாக இருக்கட்டும்", "Thank you, have a good day"),
            ("நான் உங்களை நேசிக்கிறேன்", "I love you"),
            ("நீங்கள் என்னை புரிந்து கொள்ள முடியுமா?", "Can you understand me?"),
        ],
    ),
    (
        "mr-en",
        &[
            ("नमस्कार, तुम्ही कसे आहात?", "Hello, how are you?"),
            ("धन्यवाद, तुमचा दिवस शुभ असो", "Thank you, have a good day"),
            ("शुभ रात्री, गोड स्वप्ने", "Good night, sweet dreams"),
            ("मी तुमच्यावर प्रेम करतो", "I love you"),
            ("तुम्ही मला समजू शकता का?", "Can you understand me?"),
        ],
    ),
    (
        "gu-en",
        &[
            ("નમસ્તે, તમે કેમ છો?", "Hello, how are you?"),
            ("ધન્યવાદ, તમારો દિવસ શુભ રહો", "Thank you, have a good day"),
            ("શુભ રાત્રિ, મીઠા સ્વપ્નો", "Good night, sweet dreams"),
            ("હું તમને પ્રેમ કરું છું", "I love you"),
            ("શું તમે મને સમજી શકો છો?", "Can you understand me?"),
        ],
    ),
    (
        "en-hi",
        &[
            ("Hello, how are you?", "नमस्ते, कैसे हो आप?"),
            ("Thank you, have a good day", "धन्यवाद, आपका दिन शुभ हो"),
            ("Good night, sweet dreams", "शुभ रात्रि, मीठे सपने"),
            ("I love you", "मैं आपसे प्यार करता हूं"),
            ("Can you understand me?", "क्या आप मुझे समझ सकते हैं?"),
        ],
    ),
];

const FALLBACK_TEMPLATE: &str = "Hello! This is a test translation.";

/// Placeholder output per target language for texts missing from the table.
const TEMPLATES: PhraseTable = &[
    ("hi", "नमस्ते! यह एक परीक्षण अनुवाद है।"),
    ("ta", "வணக்கம்! இது ஒரு சோதனை மொழிபெயர்ப்பு."),
    ("mr", "नमस्कार! हे एक चाचणी भाषांतर आहे."),
    ("gu", "નમસ્તે! આ એક પરીક્ષણ અનુવાદ છે."),
    ("en", FALLBACK_TEMPLATE),
];

#[derive(Debug, Clone, Serialize)]
pub struct SampleTexts {
    pub greetings: &'static [&'static str],
    pub common_phrases: &'static [&'static str],
}

pub const SAMPLE_TEXTS: SampleTexts = SampleTexts {
    greetings: &[
        "नमस्ते, कैसे हो आप?",
        "வணக்கம், எப்படி இருக்கிறீர்கள்?",
        "नमस्कार, तुम्ही कसे आहात?",
        "Hello, how are you?",
    ],
    common_phrases: &[
        "धन्यवाद, आपका दिन शुभ हो",
        "கடவுள் உங்களை காப்பாற்றட்டும்",
        "Thank you very much",
        "Good morning everyone",
    ],
};

pub fn sample_translation(language_pair: &str, text: &str) -> Option<&'static str> {
    SAMPLE_TRANSLATIONS
        .iter()
        .find(|(pair, _)| *pair == language_pair)
        .and_then(|(_, phrases)| phrases.iter().find(|(source, _)| *source == text))
        .map(|(_, translation)| *translation)
}

pub fn template_for(target_language: &str) -> &'static str {
    TEMPLATES
        .iter()
        .find(|(code, _)| *code == target_language)
        .map(|(_, template)| *template)
        .unwrap_or(FALLBACK_TEMPLATE)
}

/// Local stand-in backend with simulated network latency.
pub struct MockTranslator {
    /// Artificial delay bounds in seconds; `(0.0, 0.0)` disables it.
    delay_secs: (f64, f64),
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(500), Duration::from_millis(1500))
    }

    pub fn without_delay() -> Self {
        Self::with_delay(Duration::ZERO, Duration::ZERO)
    }

    /// Each call sleeps a random time in `[low, high)`; equal bounds sleep exactly `high`.
    pub fn with_delay(low: Duration, high: Duration) -> Self {
        Self {
            delay_secs: (low.as_secs_f64(), high.as_secs_f64().max(low.as_secs_f64())),
        }
    }

    async fn simulate_latency(&self) {
        let (low, high) = self.delay_secs;
        if high <= 0.0 {
            return;
        }
        let secs = if high > low {
            rand::thread_rng().gen_range(low..high)
        } else {
            high
        };
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslatorInterface for MockTranslator {
    fn backend(&self) -> &'static str {
        "mock"
    }

    fn endpoint(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-translations"
    }

    async fn check_health(&self, _force: bool) -> bool {
        true
    }

    async fn health(&self) -> HealthSnapshot {
        HealthSnapshot {
            healthy: true,
            last_check: Some(Utc::now()),
        }
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        self.simulate_latency().await;

        let pair = request.language_pair();
        let mut rng = rand::thread_rng();

        if let Some(translation) = sample_translation(&pair, &request.text) {
            debug!("Mock sample hit for {}", pair);
            return TranslationResult::translated(
                request,
                translation,
                Confidence::new(SAMPLE_CONFIDENCE),
            )
            .with_response_time(f64::from(rng.gen_range(800u32..=1500)));
        }

        let translation = format!("{} {}", MOCK_PREFIX, template_for(&request.target_language));
        TranslationResult::translated(
            request,
            translation,
            Confidence::new(rng.gen_range(0.7..0.9)),
        )
        .with_response_time(f64::from(rng.gen_range(600u32..=1200)))
        .with_note(MOCK_NOTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_hit_has_fixed_confidence() {
        let mock = MockTranslator::without_delay();
        let result = mock
            .translate(&TranslationRequest::new("नमस्ते, कैसे हो आप?", "hi", "en"))
            .await;
        assert_eq!(result.translation(), Some("Hello, how are you?"));
        assert_eq!(result.confidence().map(|c| c.value()), Some(0.95));
        assert!(result.note.is_none());
        let millis = result.response_time_ms.unwrap();
        assert!((800.0..=1500.0).contains(&millis));
    }

    #[tokio::test]
    async fn miss_uses_flagged_template() {
        let mock = MockTranslator::without_delay();
        let result = mock
            .translate(&TranslationRequest::new("Good morning everyone", "en", "ta"))
            .await;
        assert_eq!(
            result.translation(),
            Some("[MOCK] வணக்கம்! இது ஒரு சோதனை மொழிபெயர்ப்பு.")
        );
        assert_eq!(result.note.as_deref(), Some(MOCK_NOTE));
        let confidence = result.confidence().unwrap().value();
        assert!((0.7..=0.9).contains(&confidence));
        let millis = result.response_time_ms.unwrap();
        assert!((600.0..=1200.0).contains(&millis));
    }

    #[tokio::test]
    async fn auto_source_never_hits_table() {
        let mock = MockTranslator::without_delay();
        let result = mock
            .translate(&TranslationRequest::new("नमस्ते, कैसे हो आप?", "auto", "en"))
            .await;
        assert_eq!(
            result.translation(),
            Some("[MOCK] Hello! This is a test translation.")
        );
    }

    #[test]
    fn unknown_target_falls_back_to_english() {
        assert_eq!(template_for("kn"), FALLBACK_TEMPLATE);
    }

    #[test]
    fn lookup_requires_exact_text() {
        assert_eq!(sample_translation("en-hi", "I love you"), Some("मैं आपसे प्यार करता हूं"));
        assert_eq!(sample_translation("en-hi", "i love you"), None);
        assert_eq!(sample_translation("hi-ta", "I love you"), None);
    }

    #[tokio::test]
    async fn translate_waits_within_delay_window() {
        let low = Duration::from_millis(50);
        let high = Duration::from_millis(150);
        let mock = MockTranslator::with_delay(low, high);

        let started = tokio::time::Instant::now();
        let result = mock
            .translate(&TranslationRequest::new("I love you", "en", "hi"))
            .await;
        let elapsed = started.elapsed();

        assert!(result.is_success());
        assert!(elapsed >= low, "returned after {:?}", elapsed);
        // Scheduler slack on loaded machines
        assert!(elapsed < high + Duration::from_secs(1), "took {:?}", elapsed);
    }

    #[test]
    fn default_delay_window() {
        assert_eq!(MockTranslator::new().delay_secs, (0.5, 1.5));
    }

    #[tokio::test]
    async fn mock_is_always_healthy() {
        let mock = MockTranslator::without_delay();
        assert!(mock.check_health(true).await);
        assert!(mock.health().await.healthy);
    }
}
