//! Standalone smoke test for a KServe-hosted translation model.
//!
//! Talks to the model service directly, bypassing the gateway: one health
//! probe, then one prediction per sample text.

use clap::Parser;
use reqwest::StatusCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use translation_gateway::inference::{InferenceClient, InferenceError};
use translation_gateway::translate::{TranslationRequest, AUTO_DETECT};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
const PREDICT_TIMEOUT: Duration = Duration::from_secs(30);

const SAMPLE_TEXTS: &[&str] = &[
    "नमस्ते, कैसे हो आप?",              // Hindi
    "Hello, how are you?",               // English
    "வணக்கம், எப்படி இருக்கிறீர்கள்?", // Tamil
    "नमस्कार, तुम्ही कसे आहात?",        // Marathi
];

#[derive(Parser, Debug)]
#[command(name = "test-model")]
#[command(about = "Check health and predictions of a KServe translation model")]
struct Args {
    /// Base URL of the inference service, e.g. http://localhost:8080
    service_url: Option<String>,

    /// Model name as registered with KServe
    #[arg(long, default_value = "ai4bharat-bert")]
    model_name: String,

    /// Suffix after the model URL for prediction calls (`/predict` matches the gateway)
    #[arg(long, default_value = ":predict")]
    predict_path: String,

    /// Pause after each successful prediction
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

/// Console line for a failed health check, or `None` when the model answered 200.
fn health_failure(result: &Result<StatusCode, InferenceError>) -> Option<String> {
    match result {
        Ok(status) if *status == StatusCode::OK => None,
        Ok(status) => Some(format!("Model health check failed: {}", status.as_u16())),
        Err(e) => Some(format!("Health check error: {}", e)),
    }
}

fn print_usage() {
    println!("Usage: test-model <service-url>");
    println!("Example: test-model http://localhost:8080");
    println!(
        "Or get the URL from: kubectl get inferenceservice ai4bharat-bert -n ai4bharat-serving"
    );
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("Testing {} on KServe", args.model_name);
    println!("{}", "=".repeat(40));

    let Some(service_url) = args.service_url else {
        print_usage();
        return;
    };

    let client = InferenceClient::new(service_url, args.model_name)
        .with_timeouts(HEALTH_TIMEOUT, PREDICT_TIMEOUT)
        .with_predict_path(args.predict_path);

    println!("\nChecking model health...");
    if let Some(message) = health_failure(&client.model_status().await) {
        println!("{}", message);
        println!("Model is not healthy. Please check the deployment.");
        return;
    }
    println!("Model health check passed");

    println!("\nTesting predictions with different languages...");
    for (i, text) in SAMPLE_TEXTS.iter().enumerate() {
        let n = i + 1;
        println!("\n--- Test {} ---", n);

        let request = TranslationRequest::new(*text, AUTO_DETECT, "");
        match client.predict(&request).await {
            Ok(prediction) => {
                let pretty = serde_json::to_string_pretty(&prediction.body)
                    .unwrap_or_else(|_| prediction.body.to_string());
                println!("Prediction successful ({:.0}ms)", prediction.response_time_ms);
                println!("Input text: {}", text);
                println!("Prediction: {}", pretty);
                tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
            }
            Err(e) => {
                println!("Prediction failed: {}", e);
                println!("Test {} failed", n);
            }
        }
    }

    println!("\nTesting completed!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_url_is_optional() {
        let args = Args::try_parse_from(["test-model"]).unwrap();
        assert!(args.service_url.is_none());
        assert_eq!(args.model_name, "ai4bharat-bert");
        assert_eq!(args.delay_ms, 1000);
        assert_eq!(args.predict_path, ":predict");
    }

    #[test]
    fn parses_url_and_overrides() {
        let args = Args::try_parse_from([
            "test-model",
            "http://localhost:8080",
            "--model-name",
            "indictrans2",
            "--delay-ms",
            "0",
            "--predict-path",
            "/predict",
        ])
        .unwrap();
        assert_eq!(args.service_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(args.model_name, "indictrans2");
        assert_eq!(args.delay_ms, 0);
        assert_eq!(args.predict_path, "/predict");
    }

    #[test]
    fn health_failure_reports_status_or_error() {
        assert_eq!(health_failure(&Ok(StatusCode::OK)), None);
        assert_eq!(
            health_failure(&Ok(StatusCode::NOT_FOUND)).as_deref(),
            Some("Model health check failed: 404")
        );
        assert_eq!(
            health_failure(&Err(InferenceError::Connection)).as_deref(),
            Some("Health check error: Connection error - cannot reach the model service")
        );
    }
}
