//! Locator parsing and classification.
//!
//! # Responsibility
//! - Parse `content://` locators.
//! - Classify pet locators into collection or item routes.
//!
//! # Invariants
//! - Routing tables are plain values built by the caller; there is no
//!   process-wide matcher.
//! - Classification never touches storage.

use crate::model::pet::PATH_PETS;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod matcher;
mod uri;

pub use matcher::UriMatcher;
pub use uri::ContentUri;

pub type RouteResult<T> = Result<T, RouteError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Locator text is not a well-formed `content://` locator.
    InvalidUri { uri: String, reason: &'static str },
    /// A registered path pattern could not be compiled.
    InvalidPattern { pattern: String, message: String },
    /// Locator is well-formed but matches no registered route.
    UnrecognizedRoute(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUri { uri, reason } => write!(f, "invalid uri `{uri}`: {reason}"),
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid route pattern `{pattern}`: {message}")
            }
            Self::UnrecognizedRoute(uri) => write!(f, "unknown uri {uri}"),
        }
    }
}

impl Error for RouteError {}

/// Shape of a pet locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetRoute {
    /// `.../pets`
    Collection,
    /// `.../pets/<id>`
    Item(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PetMatch {
    Pets,
    PetId,
}

/// Routing table for one pets authority.
#[derive(Debug, Clone)]
pub struct PetRouter {
    authority: String,
    matcher: UriMatcher<PetMatch>,
}

impl PetRouter {
    pub fn new(authority: impl Into<String>) -> RouteResult<Self> {
        let authority = authority.into();
        let matcher = UriMatcher::new()
            .with_uri(&authority, PATH_PETS, PetMatch::Pets)?
            .with_uri(&authority, &format!("{PATH_PETS}/#"), PetMatch::PetId)?;
        Ok(Self { authority, matcher })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Collection locator served by this router.
    pub fn collection_uri(&self) -> RouteResult<ContentUri> {
        ContentUri::new(self.authority.as_str(), PATH_PETS)
    }

    /// Item locator for row `id`.
    pub fn item_uri(&self, id: i64) -> RouteResult<ContentUri> {
        Ok(self.collection_uri()?.with_appended_id(id))
    }

    pub fn classify(&self, uri: &ContentUri) -> RouteResult<PetRoute> {
        let unrecognized = || RouteError::UnrecognizedRoute(uri.to_string());
        match self.matcher.match_uri(uri).ok_or_else(unrecognized)? {
            PetMatch::Pets => Ok(PetRoute::Collection),
            // Digits that overflow i64 are not a valid id.
            PetMatch::PetId => uri.parse_id().map(PetRoute::Item).ok_or_else(unrecognized),
        }
    }
}
