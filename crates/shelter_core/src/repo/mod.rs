//! Persistence layer for the pets table.
//!
//! # Responsibility
//! - Define the storage contract the provider dispatches to.
//! - Isolate SQL text and row decoding from routing and validation.
//!
//! # Invariants
//! - Callers validate payloads before writes; the store only checks column
//!   identifiers.

pub mod cursor;
pub mod pet_repo;
