//! Journal domain model.
//!
//! # Responsibility
//! - Define the transient Day/Month views used by calendar front ends.
//! - Define the persisted entry record shape.
//!
//! # Invariants
//! - Only `EntryRecord` values are durable; Day/Month are rebuilt on demand.
//! - A date is the sole identity of an entry.

pub mod day;
pub mod entry;
pub mod month;
