//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from session orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `InvalidSlot`) in
//!   addition to DB transport errors.

pub mod document_repo;
