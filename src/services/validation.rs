/*
 * Responsibility
 * - 必須フィールドの存在チェック (payload, required) -> 失敗メッセージ列
 * - 最初の失敗で止めず、required の順に全件集める
 */
use serde_json::{Map, Value};

use crate::error::AppError;

pub fn missing_field_message(field: &str) -> String {
    format!("Please provide a value for \"{field}\"")
}

/// JS-style falsiness: absent, null, false, 0 and "" all count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}

/// One message per missing field, in `required` order. Empty means valid.
pub fn missing_fields(payload: &Map<String, Value>, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| is_blank(payload.get(**field)))
        .map(|field| missing_field_message(field))
        .collect()
}

pub fn require(payload: &Map<String, Value>, required: &[&str]) -> Result<(), AppError> {
    let errors = missing_fields(payload, required);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const USER_FIELDS: &[&str] = &["firstName", "lastName", "emailAddress", "password"];

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn complete_payload_has_no_errors() {
        let payload = object(json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe@smith.com",
            "password": "joepassword",
        }));
        assert!(missing_fields(&payload, USER_FIELDS).is_empty());
        assert!(require(&payload, USER_FIELDS).is_ok());
    }

    #[test]
    fn collects_every_missing_field_in_order() {
        let payload = object(json!({ "lastName": "Smith" }));
        assert_eq!(
            missing_fields(&payload, USER_FIELDS),
            vec![
                r#"Please provide a value for "firstName""#,
                r#"Please provide a value for "emailAddress""#,
                r#"Please provide a value for "password""#,
            ]
        );
    }

    #[test]
    fn falsy_values_count_as_missing() {
        let payload = object(json!({
            "title": "",
            "description": null,
            "a": 0,
            "b": false,
            "c": "0",
            "d": [],
        }));
        assert_eq!(
            missing_fields(&payload, &["title", "description", "a", "b", "c", "d"]),
            vec![
                r#"Please provide a value for "title""#,
                r#"Please provide a value for "description""#,
                r#"Please provide a value for "a""#,
                r#"Please provide a value for "b""#,
            ]
        );
    }

    #[test]
    fn whitespace_is_a_value() {
        let payload = object(json!({ "title": " ", "description": "x" }));
        assert!(missing_fields(&payload, &["title", "description"]).is_empty());
    }

    #[test]
    fn require_reports_validation_failure() {
        let payload = Map::new();
        match require(&payload, &["title", "description"]) {
            Err(AppError::ValidationFailed { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }
}
