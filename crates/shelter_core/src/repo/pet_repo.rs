//! Pet storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Turn projection/selection/value payloads into SQL against `pets`.
//! - Keep SQL text and column checks inside the persistence boundary.
//!
//! # Invariants
//! - Payload validation happens before these calls; the store trusts values.
//! - Column identifiers are checked against the table contract before they
//!   are spliced into SQL. Selection and sort clauses are caller-owned SQL.
//! - `_id` is assigned by SQLite and never written through the store.

use crate::db::{DbError, ShelterDb};
use crate::model::pet::{
    is_known_column, Gender, Pet, ALL_COLUMNS, COLUMN_ID, COLUMN_PET_BREED, COLUMN_PET_GENDER,
    COLUMN_PET_NAME, COLUMN_PET_WEIGHT, TABLE_NAME,
};
use crate::model::values::ContentValues;
use crate::repo::cursor::{Cursor, CursorRow};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer failure for pet persistence and reads.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Payload or projection names a column the table does not have.
    UnknownColumn(String),
    /// Payload tries to write a storage-owned column.
    ReadOnlyColumn(&'static str),
    /// Persisted row violates the pet invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownColumn(column) => write!(f, "unknown column `{column}` in {TABLE_NAME}"),
            Self::ReadOnlyColumn(column) => write!(f, "column `{column}` is read-only"),
            Self::InvalidData(message) => write!(f, "invalid persisted pet data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UnknownColumn(_) | Self::ReadOnlyColumn(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// WHERE clause with positional `?` arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub clause: Option<String>,
    pub args: Vec<Value>,
}

impl Selection {
    /// Matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(clause: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            clause: Some(clause.into()),
            args,
        }
    }

    /// Matches exactly the row with `_id = id`.
    pub fn by_id(id: i64) -> Self {
        Self::new(format!("{COLUMN_ID}=?"), vec![Value::Integer(id)])
    }

    fn push_where(&self, sql: &mut String) {
        if let Some(clause) = self.clause.as_deref().filter(|c| !c.trim().is_empty()) {
            sql.push_str(" WHERE (");
            sql.push_str(clause);
            sql.push(')');
        }
    }
}

/// Read request against the pets table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    /// Columns to return. `None` returns every column in table order.
    pub projection: Option<Vec<String>>,
    pub selection: Selection,
    /// Raw `ORDER BY` body, e.g. `name ASC`.
    pub sort_order: Option<String>,
}

/// SQL primitives the provider dispatches to.
pub trait PetStore {
    fn query(&self, request: &QueryRequest) -> RepoResult<Cursor>;
    /// Inserts one row and returns its assigned `_id`.
    fn insert(&self, values: &ContentValues) -> RepoResult<i64>;
    /// Returns the number of rows changed.
    fn update(&self, values: &ContentValues, selection: &Selection) -> RepoResult<usize>;
    /// Returns the number of rows removed.
    fn delete(&self, selection: &Selection) -> RepoResult<usize>;
}

/// SQLite-backed pet store.
pub struct SqlitePetStore {
    db: ShelterDb,
}

impl SqlitePetStore {
    pub fn new(db: ShelterDb) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &ShelterDb {
        &self.db
    }
}

impl PetStore for SqlitePetStore {
    fn query(&self, request: &QueryRequest) -> RepoResult<Cursor> {
        let columns = match &request.projection {
            Some(projection) => {
                for column in projection {
                    ensure_known_column(column)?;
                }
                projection.clone()
            }
            None => ALL_COLUMNS.iter().map(|column| column.to_string()).collect(),
        };

        let mut sql = format!("SELECT {} FROM {TABLE_NAME}", columns.join(", "));
        request.selection.push_where(&mut sql);
        if let Some(order) = request.sort_order.as_deref().filter(|o| !o.trim().is_empty()) {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let conn = self.db.readable()?;
        read_cursor(conn, &sql, &request.selection.args)
    }

    fn insert(&self, values: &ContentValues) -> RepoResult<i64> {
        let columns = writable_columns(values)?;

        let sql = if columns.is_empty() {
            format!("INSERT INTO {TABLE_NAME} DEFAULT VALUES;")
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {TABLE_NAME} ({}) VALUES ({placeholders});",
                columns.join(", ")
            )
        };

        let conn = self.db.writable()?;
        conn.execute(&sql, params_from_iter(values.iter().map(|(_, value)| value)))?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, values: &ContentValues, selection: &Selection) -> RepoResult<usize> {
        let columns = writable_columns(values)?;
        if columns.is_empty() {
            return Ok(0);
        }

        let assignments = columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {TABLE_NAME} SET {assignments}");
        selection.push_where(&mut sql);

        let bind_values = values
            .iter()
            .map(|(_, value)| value)
            .chain(selection.args.iter());
        let conn = self.db.writable()?;
        Ok(conn.execute(&sql, params_from_iter(bind_values))?)
    }

    fn delete(&self, selection: &Selection) -> RepoResult<usize> {
        let mut sql = format!("DELETE FROM {TABLE_NAME}");
        selection.push_where(&mut sql);

        let conn = self.db.writable()?;
        Ok(conn.execute(&sql, params_from_iter(selection.args.iter()))?)
    }
}

/// Decodes every row of a full-projection cursor into pets.
///
/// Fails when a column is missing or a persisted value breaks an invariant.
pub fn pets_from_cursor(cursor: &Cursor) -> RepoResult<Vec<Pet>> {
    cursor.rows().map(parse_pet_row).collect()
}

fn parse_pet_row(row: CursorRow<'_>) -> RepoResult<Pet> {
    let id = match row.get(COLUMN_ID) {
        Some(Value::Integer(id)) => *id,
        other => return Err(invalid_column(COLUMN_ID, other)),
    };
    let name = match row.get(COLUMN_PET_NAME) {
        Some(Value::Text(name)) => name.clone(),
        other => return Err(invalid_column(COLUMN_PET_NAME, other)),
    };
    let breed = match row.get(COLUMN_PET_BREED) {
        Some(Value::Text(breed)) => Some(breed.clone()),
        Some(Value::Null) => None,
        other => return Err(invalid_column(COLUMN_PET_BREED, other)),
    };
    let gender = match row.get(COLUMN_PET_GENDER) {
        Some(Value::Integer(code)) => Gender::from_code(*code).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid gender code `{code}` in pets.gender"))
        })?,
        other => return Err(invalid_column(COLUMN_PET_GENDER, other)),
    };
    let weight = match row.get(COLUMN_PET_WEIGHT) {
        Some(Value::Integer(weight)) => *weight,
        Some(Value::Null) => 0,
        other => return Err(invalid_column(COLUMN_PET_WEIGHT, other)),
    };

    let pet = Pet {
        id,
        name,
        breed,
        gender,
        weight,
    };
    pet.validate()
        .map_err(|err| RepoError::InvalidData(format!("pet {id}: {err}")))?;
    Ok(pet)
}

fn invalid_column(column: &str, value: Option<&Value>) -> RepoError {
    match value {
        None => RepoError::InvalidData(format!("missing column `{column}`")),
        Some(value) => RepoError::InvalidData(format!(
            "unexpected {:?} value in pets.{column}",
            value.data_type()
        )),
    }
}

fn ensure_known_column(column: &str) -> RepoResult<()> {
    if is_known_column(column) {
        Ok(())
    } else {
        Err(RepoError::UnknownColumn(column.to_string()))
    }
}

fn writable_columns(values: &ContentValues) -> RepoResult<Vec<&str>> {
    values
        .keys()
        .map(|column| {
            ensure_known_column(column)?;
            if column == COLUMN_ID {
                return Err(RepoError::ReadOnlyColumn(COLUMN_ID));
            }
            Ok(column)
        })
        .collect()
}

fn read_cursor(conn: &Connection, sql: &str, args: &[Value]) -> RepoResult<Cursor> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query(params_from_iter(args.iter()))?;
    let mut materialized = Vec::new();
    while let Some(row) = rows.next()? {
        let values = (0..columns.len())
            .map(|index| row.get::<_, Value>(index))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        materialized.push(values);
    }

    Ok(Cursor::new(columns, materialized))
}
