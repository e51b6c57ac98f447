//! Domain model for paginated documents.
//!
//! # Responsibility
//! - Define page identity, content and focus records used by the engine.
//! - Define the uniform style state carried alongside the content.
//!
//! # Invariants
//! - Every page is identified by a stable `PageId`.
//! - No model type holds references to input handles or rendering state.

pub mod document;
pub mod page;
pub mod style;
