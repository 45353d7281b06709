//! Locator-routed CRUD dispatch.
//!
//! # Responsibility
//! - Expose query/insert/update/delete/get_type over pet locators.
//! - Enforce pet field rules at the dispatch boundary.

pub mod pet_provider;
mod validation;
