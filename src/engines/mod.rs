//! Search engine module
//!
//! Defines the Engine trait and the Brave Search API engine.

mod traits;

pub mod brave;

pub use brave::BraveApi;
pub use traits::*;
