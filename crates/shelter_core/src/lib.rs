//! Data layer for the pet shelter.
//! This crate owns the pets table contract, locator routing, and the
//! validation applied before any write.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod route;

pub use config::{ConfigError, ShelterConfig, StorageLocation};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::pet::{is_valid_gender, Gender, Pet, PetValidationError};
pub use model::values::ContentValues;
pub use provider::pet_provider::{
    Operation, PetProvider, ProviderError, ProviderInitError, ProviderResult,
};
pub use repo::cursor::{Cursor, CursorRow};
pub use repo::pet_repo::{
    pets_from_cursor, PetStore, QueryRequest, RepoError, RepoResult, Selection, SqlitePetStore,
};
pub use route::{ContentUri, PetRoute, PetRouter, RouteError, UriMatcher};
