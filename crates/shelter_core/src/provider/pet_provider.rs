//! Locator-addressed CRUD entry points over the pets table.
//!
//! # Responsibility
//! - Classify each locator, rewrite item-scoped selections, validate write
//!   payloads, and delegate SQL to a `PetStore`.
//!
//! # Invariants
//! - Item locators always narrow to `_id=?`; caller selection is discarded.
//! - Validation runs before any storage call; a rejected payload writes
//!   nothing.
//! - Insert storage failures are logged and reported as `Ok(None)`; every
//!   other failure is an `Err`.

use super::validation::{validate_insert, validate_update};
use crate::config::{ConfigError, ShelterConfig};
use crate::db::ShelterDb;
use crate::model::pet::{PetValidationError, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE};
use crate::model::values::ContentValues;
use crate::repo::cursor::Cursor;
use crate::repo::pet_repo::{PetStore, QueryRequest, RepoError, Selection, SqlitePetStore};
use crate::route::{ContentUri, PetRoute, PetRouter, RouteError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider entry point, used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Insert,
    Update,
    Delete,
    GetType,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GetType => "get_type",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure surfaced by a provider call.
#[derive(Debug)]
pub enum ProviderError {
    /// Locator is unrecognized, or recognized but not valid for `operation`.
    UnsupportedOperation { operation: Operation, uri: String },
    /// Payload breaks a pet field rule. Nothing was written.
    InvalidArgument(PetValidationError),
    /// Storage rejected or failed a read, update or delete.
    Storage(RepoError),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOperation { operation, uri } => {
                write!(f, "{operation} is not supported for {uri}")
            }
            Self::InvalidArgument(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnsupportedOperation { .. } => None,
            Self::InvalidArgument(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<PetValidationError> for ProviderError {
    fn from(value: PetValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

impl From<RepoError> for ProviderError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Failure while building a provider from configuration.
#[derive(Debug)]
pub enum ProviderInitError {
    Config(ConfigError),
    Route(RouteError),
}

impl Display for ProviderInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Route(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Route(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ProviderInitError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RouteError> for ProviderInitError {
    fn from(value: RouteError) -> Self {
        Self::Route(value)
    }
}

/// CRUD dispatcher for pet locators.
pub struct PetProvider<S: PetStore> {
    router: PetRouter,
    store: S,
}

impl PetProvider<SqlitePetStore> {
    /// Builds a SQLite-backed provider. The database opens on first call.
    pub fn from_config(config: &ShelterConfig) -> Result<Self, ProviderInitError> {
        config.validate()?;
        let router = PetRouter::new(config.authority.trim())?;
        let store = SqlitePetStore::new(ShelterDb::new(config.storage_location()));
        Ok(Self::new(router, store))
    }
}

impl<S: PetStore> PetProvider<S> {
    pub fn new(router: PetRouter, store: S) -> Self {
        Self { router, store }
    }

    pub fn router(&self) -> &PetRouter {
        &self.router
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs `request` against the addressed rows.
    ///
    /// For an item locator the request's selection is replaced with the id
    /// filter; projection and sort order are kept.
    pub fn query(&self, uri: &ContentUri, request: &QueryRequest) -> ProviderResult<Cursor> {
        let route = self.route(Operation::Query, uri)?;
        let cursor = match route {
            PetRoute::Collection => self.store.query(request)?,
            PetRoute::Item(id) => {
                let narrowed = QueryRequest {
                    selection: Selection::by_id(id),
                    ..request.clone()
                };
                self.store.query(&narrowed)?
            }
        };

        debug!(
            "event=pet_query module=provider status=ok uri={uri} rows={}",
            cursor.count()
        );
        Ok(cursor)
    }

    /// Inserts one pet through a collection locator.
    ///
    /// Returns the new item locator, or `None` when storage wrote no row.
    pub fn insert(
        &self,
        uri: &ContentUri,
        values: &ContentValues,
    ) -> ProviderResult<Option<ContentUri>> {
        match self.route(Operation::Insert, uri)? {
            PetRoute::Collection => {}
            PetRoute::Item(_) => return Err(unsupported(Operation::Insert, uri)),
        }

        let values = validate_insert(values)?;

        match self.store.insert(&values) {
            Ok(id) => {
                debug!("event=pet_insert module=provider status=ok uri={uri} id={id}");
                Ok(Some(uri.with_appended_id(id)))
            }
            Err(err) => {
                error!(
                    "event=pet_insert module=provider status=error uri={uri} error_code=insert_failed error={err}"
                );
                Ok(None)
            }
        }
    }

    /// Updates the addressed rows and returns how many changed.
    ///
    /// Only columns present in `values` are validated. Empty `values` is a
    /// no-op that never touches storage.
    pub fn update(
        &self,
        uri: &ContentUri,
        values: &ContentValues,
        selection: &Selection,
    ) -> ProviderResult<usize> {
        let route = self.route(Operation::Update, uri)?;
        if values.is_empty() {
            return Ok(0);
        }

        let values = validate_update(values)?;

        let changed = match route {
            PetRoute::Collection => self.store.update(&values, selection)?,
            PetRoute::Item(id) => self.store.update(&values, &Selection::by_id(id))?,
        };
        debug!("event=pet_update module=provider status=ok uri={uri} changed={changed}");
        Ok(changed)
    }

    /// Deletes the addressed rows and returns how many were removed.
    ///
    /// A collection locator with an empty selection removes every row.
    pub fn delete(&self, uri: &ContentUri, selection: &Selection) -> ProviderResult<usize> {
        let removed = match self.route(Operation::Delete, uri)? {
            PetRoute::Collection => self.store.delete(selection)?,
            PetRoute::Item(id) => self.store.delete(&Selection::by_id(id))?,
        };
        debug!("event=pet_delete module=provider status=ok uri={uri} removed={removed}");
        Ok(removed)
    }

    /// MIME type of the data a locator addresses.
    pub fn get_type(&self, uri: &ContentUri) -> ProviderResult<&'static str> {
        match self.route(Operation::GetType, uri)? {
            PetRoute::Collection => Ok(CONTENT_LIST_TYPE),
            PetRoute::Item(_) => Ok(CONTENT_ITEM_TYPE),
        }
    }

    fn route(&self, operation: Operation, uri: &ContentUri) -> ProviderResult<PetRoute> {
        self.router.classify(uri).map_err(|err| {
            debug!(
                "event=pet_{operation} module=provider status=error uri={uri} error_code=unsupported_uri error={err}"
            );
            unsupported(operation, uri)
        })
    }
}

fn unsupported(operation: Operation, uri: &ContentUri) -> ProviderError {
    ProviderError::UnsupportedOperation {
        operation,
        uri: uri.to_string(),
    }
}
