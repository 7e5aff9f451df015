//! # pantry-core
//!
//! Core types, traits, and abstractions for the pantry food search engine.
//!
//! This crate provides the food record model, the provider contracts the
//! search core consumes, the shared error type, and the constants every other
//! pantry crate references.

pub mod defaults;
pub mod error;
pub mod external;
pub mod logging;
pub mod models;
pub mod text;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use external::normalize_external;
pub use models::*;
pub use text::{normalize_text, tokenize};
pub use traits::*;
