/*
 * Responsibility
 * - request/response DTO
 * - 検証済み field map から typed DTO への変換 (型違いは field 名付きで 400)
 */
pub mod courses;
pub mod users;

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::AppError;

pub fn wrong_type_message(field: &str) -> String {
    format!("Please provide a text value for \"{field}\"")
}

/// Convert a validated field map into `T`.
///
/// `text_fields` lists the fields `T` reads as strings; a present, non-null
/// value of another JSON type is reported per field before serde runs.
pub fn from_fields<T: DeserializeOwned>(
    fields: Map<String, Value>,
    text_fields: &[&str],
) -> Result<T, AppError> {
    let errors: Vec<String> = text_fields
        .iter()
        .filter(|field| matches!(fields.get(**field), Some(v) if !v.is_string() && !v.is_null()))
        .map(|field| wrong_type_message(field))
        .collect();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::validation(vec![format!("Invalid request body: {e}")]))
}

/// Tri-state field: absent -> `None`, null -> `Some(None)`, value -> `Some(Some(v))`.
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
