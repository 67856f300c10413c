use thiserror::Error;

/// Everything that can go wrong between the gateway and the model service.
///
/// These are carried inside failure results rather than propagated; the
/// `Display` text is what callers see in the `error` field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Model is not healthy")]
    Unhealthy,

    #[error("Request timeout - model is taking too long to respond")]
    Timeout,

    #[error("Connection error - cannot reach the model service")]
    Connection,

    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout
        } else if err.is_connect() {
            InferenceError::Connection
        } else {
            InferenceError::Unexpected(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct_per_cause() {
        let timeout = InferenceError::Timeout.to_string();
        let connection = InferenceError::Connection.to_string();
        assert!(timeout.starts_with("Request timeout"));
        assert!(connection.starts_with("Connection error"));
        assert_ne!(timeout, connection);
    }

    #[test]
    fn upstream_embeds_status_and_body() {
        let err = InferenceError::Upstream {
            status: 503,
            body: "model loading".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: model loading");
    }
}
