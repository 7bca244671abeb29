//! `Authorization: Basic base64(name:secret)` parsing.
//!
//! Absent or malformed headers are not errors here: they yield `None`
//! ("no credentials") and the authenticator decides what that means.

use axum::http::{HeaderMap, header};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Candidate identity taken from the request. Not yet verified.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

pub fn from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    parse_basic(value)
}

pub fn parse_basic(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    // The secret may itself contain ':'; only the first one separates.
    let (name, secret) = decoded.split_once(':')?;

    Some(Credentials {
        name: name.to_string(),
        secret: secret.to_string(),
    })
}
