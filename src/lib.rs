//! Dashboard backend that proxies translation requests to a KServe-hosted
//! model, with a canned-translation fallback for disconnected setups.

pub mod config;
pub mod inference;
pub mod routes;
pub mod state;
pub mod translate;
