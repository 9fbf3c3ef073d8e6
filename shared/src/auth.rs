//! HTTP basic authentication gate.
//!
//! The service does not check credentials itself. The password is taken as
//! the caller's upstream API token and the upstream API decides whether it
//! is any good.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lambda_http::http::header::AUTHORIZATION;
use lambda_http::{Body, Request, Response};

use crate::http::challenge_response;

/// Credentials decoded from an `Authorization: Basic ...` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Username, not used for anything
    pub username: String,
    /// Password, forwarded upstream as the API token
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decode a basic-auth header value.
///
/// Returns `None` for anything that is not a well-formed basic header; a
/// malformed header is treated the same as a missing one.
pub fn parse_basic_auth(header_value: &str) -> Option<BasicCredentials> {
    let (scheme, payload) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Extract basic credentials from a request, if present and well-formed.
pub fn basic_credentials(event: &Request) -> Option<BasicCredentials> {
    event
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_auth)
}

/// Pipeline stage guarding every listing request.
///
/// Returns `Ok(Ok(credentials))` when basic credentials are present,
/// `Ok(Err(Response))` carrying the 401 challenge when they are not, or
/// `Err(lambda_http::Error)` if the challenge could not be built.
pub fn require_basic_auth(
    event: &Request,
) -> Result<Result<BasicCredentials, Response<Body>>, lambda_http::Error> {
    match basic_credentials(event) {
        Some(credentials) => Ok(Ok(credentials)),
        None => Ok(Err(challenge_response()?)),
    }
}
