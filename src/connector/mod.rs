//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion (OpenAI-compatible chat endpoint, offline mock)
//! - Search (SerpAPI, offline mock)
//! - Intent classification (keyword rules)
//! - Shells (CLI controllers, HTTP server)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
