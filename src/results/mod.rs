//! Result types for research queries
//!
//! Defines the normalized search hit and the final research response.

mod types;

pub use types::*;
