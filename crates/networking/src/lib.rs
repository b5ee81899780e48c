//! Cointrack Networking - HTTP client, cache, and API wrappers

pub mod api;
pub mod cache;
pub mod http;

pub use http::ApiClient;
