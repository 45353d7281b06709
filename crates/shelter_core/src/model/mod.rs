//! Pet domain model.
//!
//! # Responsibility
//! - Define the table contract and validation rules used by the provider.
//! - Provide the column/value payload type used for writes.
//!
//! # Invariants
//! - Every stored pet is identified by a storage-assigned integer id.
//! - Validation rules live here; storage trusts validated input.

pub mod pet;
pub mod values;
