//! HTTP helpers for the datasource handler.

use lambda_http::http::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use lambda_http::{Body, Response};
use serde::Serialize;

use crate::Error;

/// Realm advertised in the basic-auth challenge.
pub const AUTH_REALM: &str = "Login Required";

/// Body sent along with the basic-auth challenge.
pub const AUTH_CHALLENGE_BODY: &str =
    "Could not verify your access level for that URL.\nYou have to login with proper credentials";

/// Standard API error envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub error: String,
}

impl ApiResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;
    Ok(response)
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ApiResponse::error(message))
}

/// Create a response with no body.
pub fn empty_response(status: u16) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .body(Body::Empty)
        .map_err(Box::new)?;
    Ok(response)
}

/// The 401 response that asks the client for basic credentials.
pub fn challenge_response() -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(401)
        .header(WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", AUTH_REALM))
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(AUTH_CHALLENGE_BODY))
        .map_err(Box::new)?;
    Ok(response)
}

/// Convert a service error into the response the caller sees.
///
/// Unknown routes and datatypes get a bare 404; everything else gets the
/// JSON error envelope with the status from [`Error::status_code`].
pub fn error_to_response(error: &Error) -> Result<Response<Body>, lambda_http::Error> {
    match error {
        Error::NotFound(_) => empty_response(404),
        _ => error_response(error.status_code(), error.to_string()),
    }
}
