//! HTTP networking module
//!
//! Provides the pooled HTTP client shared by every outbound call.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::{accept_json, user_agent};
