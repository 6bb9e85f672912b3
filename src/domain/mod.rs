//! # Domain Layer
//!
//! Conversation messages, search outcomes and the shared error type.
//! This layer is independent of providers and transport.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
