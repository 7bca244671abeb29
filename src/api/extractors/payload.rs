//! Request body as a flat field map.
//!
//! Parsing never rejects here: a body that is not valid JSON is remembered and
//! reported by `into_fields`, which handlers call at the field validation
//! stage. That keeps auth and ownership failures ahead of body complaints.
//!
//! Only `application/json` (or a `+json` suffix) is parsed, as with
//! `axum::Json`. Any other content type carries no fields.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use crate::error::AppError;

pub const MALFORMED_BODY: &str = "Request body must be a JSON object";

#[derive(Debug)]
pub struct Payload {
    // None: the body was not valid JSON
    fields: Option<Map<String, Value>>,
}

impl Payload {
    fn no_fields() -> Self {
        Self {
            fields: Some(Map::new()),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::no_fields();
        }

        let fields = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Some(map),
            // valid JSON but not an object: no fields were supplied
            Ok(_) => Some(Map::new()),
            Err(_) => None,
        };
        Self { fields }
    }

    pub fn into_fields(self) -> Result<Map<String, Value>, AppError> {
        self.fields
            .ok_or_else(|| AppError::validation(vec![MALFORMED_BODY.to_string()]))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self::no_fields());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self::from_bytes(&bytes))
    }
}
