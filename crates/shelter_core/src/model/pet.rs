//! Pet domain model and table contract.
//!
//! # Responsibility
//! - Declare table/column names and locator constants shared by all layers.
//! - Define the closed gender domain and field-level validation rules.
//!
//! # Invariants
//! - `name` is never empty or null for a stored pet.
//! - `gender` is always one of `Gender::{Unknown, Male, Female}`.
//! - `weight` is never negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authority segment of every pet locator.
pub const CONTENT_AUTHORITY: &str = "com.example.android.pets";
/// Path segment addressing the pets collection.
pub const PATH_PETS: &str = "pets";

pub const TABLE_NAME: &str = "pets";
pub const COLUMN_ID: &str = "_id";
pub const COLUMN_PET_NAME: &str = "name";
pub const COLUMN_PET_BREED: &str = "breed";
pub const COLUMN_PET_GENDER: &str = "gender";
pub const COLUMN_PET_WEIGHT: &str = "weight";

/// Column order used when a query has no explicit projection.
pub const ALL_COLUMNS: &[&str] = &[
    COLUMN_ID,
    COLUMN_PET_NAME,
    COLUMN_PET_BREED,
    COLUMN_PET_GENDER,
    COLUMN_PET_WEIGHT,
];

/// MIME type for a list of pets.
pub const CONTENT_LIST_TYPE: &str = "vnd.android.cursor.dir/com.example.android.pets/pets";
/// MIME type for a single pet.
pub const CONTENT_ITEM_TYPE: &str = "vnd.android.cursor.item/com.example.android.pets/pets";

/// Returns whether `column` is part of the pets table.
pub fn is_known_column(column: &str) -> bool {
    ALL_COLUMNS.contains(&column)
}

/// Stored gender code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub const UNKNOWN_CODE: i64 = 0;
    pub const MALE_CODE: i64 = 1;
    pub const FEMALE_CODE: i64 = 2;

    /// Integer persisted in the `gender` column.
    pub fn code(self) -> i64 {
        match self {
            Self::Unknown => Self::UNKNOWN_CODE,
            Self::Male => Self::MALE_CODE,
            Self::Female => Self::FEMALE_CODE,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::UNKNOWN_CODE => Some(Self::Unknown),
            Self::MALE_CODE => Some(Self::Male),
            Self::FEMALE_CODE => Some(Self::Female),
            _ => None,
        }
    }
}

impl From<Gender> for rusqlite::types::Value {
    fn from(value: Gender) -> Self {
        rusqlite::types::Value::Integer(value.code())
    }
}

/// Returns true iff `value` is one of the enumerated gender codes.
pub fn is_valid_gender(value: i64) -> bool {
    Gender::from_code(value).is_some()
}

/// Field-level rule violated by a pet payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetValidationError {
    MissingName,
    InvalidGender,
    /// Weight is negative or not a whole number.
    InvalidWeight,
}

impl PetValidationError {
    /// Column the violated rule belongs to.
    pub fn column(self) -> &'static str {
        match self {
            Self::MissingName => COLUMN_PET_NAME,
            Self::InvalidGender => COLUMN_PET_GENDER,
            Self::InvalidWeight => COLUMN_PET_WEIGHT,
        }
    }
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "Pet requires a name"),
            Self::InvalidGender => write!(f, "Pet requires a valid gender"),
            Self::InvalidWeight => write!(f, "Pet requires a valid weight"),
        }
    }
}

impl Error for PetValidationError {}

/// A persisted pet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Storage-assigned row id.
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub gender: Gender,
    /// Weight in whole kilograms. Defaults to 0.
    pub weight: i64,
}

impl Pet {
    /// Checks the row-level invariants on an already materialized pet.
    pub fn validate(&self) -> Result<(), PetValidationError> {
        if self.name.is_empty() {
            return Err(PetValidationError::MissingName);
        }
        if self.weight < 0 {
            return Err(PetValidationError::InvalidWeight);
        }
        Ok(())
    }
}
