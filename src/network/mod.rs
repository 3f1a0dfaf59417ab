//! HTTP networking module
//!
//! Provides the HTTP client used to reach the search engine.

mod client;

pub use client::{HttpClient, HttpResponse};
