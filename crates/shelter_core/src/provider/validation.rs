//! Field checks applied to write payloads before they reach storage.
//!
//! Insert requires the full pet shape; update checks only the columns it
//! carries. Checks run in column order name, gender, weight and stop at the
//! first failure. Accepted gender and weight values are rewritten as
//! integers so storage never sees a text or real code.

use crate::model::pet::{
    is_valid_gender, PetValidationError, COLUMN_PET_GENDER, COLUMN_PET_NAME, COLUMN_PET_WEIGHT,
};
use crate::model::values::ContentValues;
use rusqlite::types::Value;

/// Checks an insert payload and returns it with gender and weight stored as
/// integers.
pub(crate) fn validate_insert(
    values: &ContentValues,
) -> Result<ContentValues, PetValidationError> {
    check_name(values)?;
    let gender = check_gender(values)?;
    let weight = if values.contains_key(COLUMN_PET_WEIGHT) {
        check_weight(values)?
    } else {
        None
    };
    Ok(normalized(values, Some(gender), weight))
}

/// Checks the columns an update payload carries and returns it with gender
/// and weight stored as integers.
pub(crate) fn validate_update(
    values: &ContentValues,
) -> Result<ContentValues, PetValidationError> {
    if values.contains_key(COLUMN_PET_NAME) {
        check_name(values)?;
    }
    let gender = if values.contains_key(COLUMN_PET_GENDER) {
        Some(check_gender(values)?)
    } else {
        None
    };
    let weight = if values.contains_key(COLUMN_PET_WEIGHT) {
        check_weight(values)?
    } else {
        None
    };
    Ok(normalized(values, gender, weight))
}

fn normalized(values: &ContentValues, gender: Option<i64>, weight: Option<i64>) -> ContentValues {
    let mut values = values.clone();
    if let Some(gender) = gender {
        values.put(COLUMN_PET_GENDER, gender);
    }
    if let Some(weight) = weight {
        values.put(COLUMN_PET_WEIGHT, weight);
    }
    values
}

fn check_name(values: &ContentValues) -> Result<(), PetValidationError> {
    match values.get_as_string(COLUMN_PET_NAME) {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(PetValidationError::MissingName),
    }
}

fn check_gender(values: &ContentValues) -> Result<i64, PetValidationError> {
    match values.get(COLUMN_PET_GENDER).and_then(whole_number) {
        Some(code) if is_valid_gender(code) => Ok(code),
        _ => Err(PetValidationError::InvalidGender),
    }
}

/// Null clears the weight; any other value must be a non-negative integer.
fn check_weight(values: &ContentValues) -> Result<Option<i64>, PetValidationError> {
    match values.get(COLUMN_PET_WEIGHT) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match whole_number(value) {
            Some(weight) if weight >= 0 => Ok(Some(weight)),
            _ => Err(PetValidationError::InvalidWeight),
        },
    }
}

/// Reads `value` as an integer without truncation. Reals with a fractional
/// part are not whole numbers.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(number) => Some(*number),
        Value::Text(text) => text.trim().parse::<i64>().ok(),
        Value::Real(number)
            if number.is_finite()
                && number.fract() == 0.0
                && *number >= i64::MIN as f64
                && *number < i64::MAX as f64 =>
        {
            Some(*number as i64)
        }
        Value::Real(_) | Value::Null | Value::Blob(_) => None,
    }
}
