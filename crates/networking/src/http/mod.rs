//! HTTP transport for the cointrack backend

mod client;

pub use client::ApiClient;
