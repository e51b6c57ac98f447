//! In-memory page store.
//!
//! # Responsibility
//! - Hold the ordered page sequence of one open document.
//! - Keep structural mutations (insert/remove/replace) free of reflow logic.
//!
//! # Invariants
//! - A document always has at least one page.

pub mod page_store;
