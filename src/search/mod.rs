//! Research orchestration module
//!
//! Runs provider searches, applies the result limit, delegates summaries,
//! and assembles research responses.

mod client;
mod executor;
mod retry;

pub use client::SearchClient;
pub use executor::Research;
pub use retry::RetryPolicy;
