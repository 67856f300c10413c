//! Normalisation of prediction payloads.
//!
//! The model service does not commit to one response schema, so the first
//! prediction is probed with an ordered list of rules and the first rule that
//! matches wins.

use serde_json::Value;
use tracing::debug;

use crate::translate::Confidence;

pub const TRANSLATION_NOT_AVAILABLE: &str = "Translation not available";
pub const TRANSLATION_EXTRACTION_FAILED: &str = "Error extracting translation";

/// Used when the response carries no prediction, or a bare string prediction.
pub const CONFIDENCE_WITHOUT_PREDICTION: f64 = 0.90;
/// Used when an object prediction has no numeric confidence field.
pub const CONFIDENCE_UNSCORED: f64 = 0.85;
pub const CONFIDENCE_ON_EXTRACTION_ERROR: f64 = 0.80;

/// One way of reading translation text out of a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextRule {
    /// The prediction itself is a string.
    Plain,
    /// The prediction is an object holding the text under this key.
    Key(&'static str),
    /// The first string-valued field of an object prediction.
    FirstString,
    /// Render the whole prediction as JSON text.
    Stringify,
}

pub const TRANSLATION_RULES: &[TextRule] = &[
    TextRule::Plain,
    TextRule::Key("text"),
    TextRule::Key("translation"),
    TextRule::Key("output"),
    TextRule::Key("result"),
    TextRule::FirstString,
    TextRule::Stringify,
];

/// Object keys probed, in order, for a numeric confidence.
pub const CONFIDENCE_KEYS: &[&str] = &["confidence", "score", "probability"];

#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub translation: String,
    pub confidence: Confidence,
}

impl TextRule {
    pub fn apply(&self, prediction: &Value) -> Option<String> {
        match self {
            TextRule::Plain => prediction.as_str().map(str::to_owned),
            TextRule::Key(key) => prediction.as_object()?.get(*key).and_then(render_field),
            TextRule::FirstString => prediction
                .as_object()?
                .values()
                .find_map(|v| v.as_str().map(str::to_owned)),
            TextRule::Stringify => Some(match prediction {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }
    }
}

// A null under a candidate key counts as absent so the next rule gets a chance.
fn render_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads translation text and confidence from a prediction response body.
pub fn extract(body: &Value) -> Extracted {
    match first_prediction(body) {
        Ok(Some(prediction)) => Extracted {
            translation: extract_translation(prediction),
            confidence: extract_confidence(prediction),
        },
        Ok(None) => Extracted {
            translation: TRANSLATION_NOT_AVAILABLE.to_string(),
            confidence: Confidence::new(CONFIDENCE_WITHOUT_PREDICTION),
        },
        Err(reason) => {
            debug!("Error extracting prediction: {}", reason);
            Extracted {
                translation: TRANSLATION_EXTRACTION_FAILED.to_string(),
                confidence: Confidence::new(CONFIDENCE_ON_EXTRACTION_ERROR),
            }
        }
    }
}

fn first_prediction(body: &Value) -> Result<Option<&Value>, String> {
    let Some(fields) = body.as_object() else {
        return Ok(None);
    };
    match fields.get("predictions") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(items.first()),
        Some(other) => Err(format!("\"predictions\" is not a list: {}", other)),
    }
}

pub fn extract_translation(prediction: &Value) -> String {
    TRANSLATION_RULES
        .iter()
        .find_map(|rule| rule.apply(prediction))
        .unwrap_or_else(|| prediction.to_string())
}

pub fn extract_confidence(prediction: &Value) -> Confidence {
    let raw = match prediction.as_object() {
        Some(fields) => CONFIDENCE_KEYS
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_f64))
            .unwrap_or(CONFIDENCE_UNSCORED),
        None => CONFIDENCE_WITHOUT_PREDICTION,
    };
    Confidence::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_prediction() {
        let out = extract(&json!({"predictions": ["hola"]}));
        assert_eq!(out.translation, "hola");
        assert_eq!(out.confidence.value(), CONFIDENCE_WITHOUT_PREDICTION);
    }

    #[test]
    fn object_prediction_with_score() {
        let out = extract(&json!({"predictions": [{"score": 0.42, "output": "hola"}]}));
        assert_eq!(out.translation, "hola");
        assert_eq!(out.confidence.value(), 0.42);
    }

    #[test]
    fn empty_predictions_is_not_an_error() {
        let out = extract(&json!({"predictions": []}));
        assert_eq!(out.translation, TRANSLATION_NOT_AVAILABLE);
        assert_eq!(out.confidence.value(), 0.90);
    }

    #[test]
    fn missing_predictions_field() {
        let out = extract(&json!({"model_name": "ai4bharat-bert"}));
        assert_eq!(out.translation, TRANSLATION_NOT_AVAILABLE);
        assert_eq!(out.confidence.value(), 0.90);
    }

    #[test]
    fn key_order_is_respected() {
        let prediction = json!({"result": "r", "output": "o", "translation": "t"});
        assert_eq!(extract_translation(&prediction), "t");
    }

    #[test]
    fn falls_back_to_first_string_field() {
        let prediction = json!({"tokens": 7, "lang": "hi", "label": "x"});
        assert_eq!(extract_translation(&prediction), "hi");
    }

    #[test]
    fn null_candidate_is_skipped() {
        let prediction = json!({"text": null, "translation": "namaste"});
        assert_eq!(extract_translation(&prediction), "namaste");
    }

    #[test]
    fn object_without_strings_is_stringified() {
        let prediction = json!({"logits": [0.1, 0.9]});
        assert_eq!(extract_translation(&prediction), r#"{"logits":[0.1,0.9]}"#);
    }

    #[test]
    fn numeric_prediction_is_stringified() {
        let out = extract(&json!({"predictions": [3]}));
        assert_eq!(out.translation, "3");
        assert_eq!(out.confidence.value(), CONFIDENCE_WITHOUT_PREDICTION);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(extract_confidence(&json!({"confidence": 7.5})).value(), 1.0);
        assert_eq!(extract_confidence(&json!({"probability": -2})).value(), 0.0);
    }

    #[test]
    fn non_numeric_confidence_falls_through() {
        let prediction = json!({"confidence": "high", "probability": 0.6});
        assert_eq!(extract_confidence(&prediction).value(), 0.6);
        assert_eq!(
            extract_confidence(&json!({"confidence": "high"})).value(),
            CONFIDENCE_UNSCORED
        );
    }

    #[test]
    fn predictions_of_wrong_type_uses_error_defaults() {
        let out = extract(&json!({"predictions": {"text": "hola"}}));
        assert_eq!(out.translation, TRANSLATION_EXTRACTION_FAILED);
        assert_eq!(out.confidence.value(), CONFIDENCE_ON_EXTRACTION_ERROR);
    }

    #[test]
    fn confidence_always_in_unit_interval() {
        let bodies = [
            json!({"predictions": [{"score": 1e9}]}),
            json!({"predictions": [{"score": -1e9}]}),
            json!({"predictions": ["x"]}),
            json!({"predictions": []}),
            json!({"predictions": "oops"}),
            json!([1, 2, 3]),
        ];
        for body in &bodies {
            let c = extract(body).confidence.value();
            assert!((0.0..=1.0).contains(&c), "{} out of range for {}", c, body);
        }
    }
}
