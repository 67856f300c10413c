use serde::Serialize;
use serde_json::{Map, Value};

/// Static reference entry for a supported language.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageDescriptor {
    #[serde(skip)]
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
    pub script: &'static str,
}

const fn language(
    code: &'static str,
    name: &'static str,
    native: &'static str,
    script: &'static str,
) -> LanguageDescriptor {
    LanguageDescriptor {
        code,
        name,
        native,
        script,
    }
}

pub const LANGUAGES: &[LanguageDescriptor] = &[
    language("hi", "Hindi", "हिंदी", "Devanagari"),
    language("en", "English", "English", "Latin"),
    language("ta", "Tamil", "தமிழ்", "Tamil"),
    language("mr", "Marathi", "मराठी", "Devanagari"),
    language("gu", "Gujarati", "ગુજરાતી", "Gujarati"),
    language("ne", "Nepali", "नेपाली", "Devanagari"),
    language("bn", "Bengali", "বাংলা", "Bengali"),
    language("te", "Telugu", "తెలుగు", "Telugu"),
    language("kn", "Kannada", "ಕನ್ನಡ", "Kannada"),
    language("ml", "Malayalam", "മലയാളം", "Malayalam"),
    language("pa", "Punjabi", "ਪੰਜਾਬੀ", "Gurmukhi"),
];

/// `{code: {name, native, script}}` in table order.
pub fn languages_json() -> Value {
    let mut table = Map::new();
    for lang in LANGUAGES {
        table.insert(
            lang.code.to_string(),
            serde_json::to_value(lang).unwrap_or(Value::Null),
        );
    }
    Value::Object(table)
}
