//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the date-keyed entry store contract.
//! - Isolate SQLite query details from session orchestration.
//!
//! # Invariants
//! - Not-found is never an error: reads return empty results, deletes no-op.

pub mod entry_repo;
