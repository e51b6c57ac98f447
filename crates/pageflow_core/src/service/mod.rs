//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate engine, store and repository calls into session-level APIs.
//! - Keep input surfaces decoupled from reflow and storage details.

pub mod document_service;
pub mod editor_service;
