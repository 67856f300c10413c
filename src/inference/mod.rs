pub mod client;
pub mod error;
pub mod extract;
pub mod health;

pub use client::{InferenceClient, Prediction};
pub use error::InferenceError;
pub use health::{HealthSnapshot, HealthState};
