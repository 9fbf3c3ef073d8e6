//! Request handling: auth gate, fetch, normalize, respond.
//!
//! Endpoints:
//! - GET /{datatype}?since={ISO-8601} - List the caller's records of one datatype

use std::sync::Arc;

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use shared::http::error_to_response;
use shared::{json_response, Config};
use tracing::{error, info, warn};

use crate::records::{self, Record};
use crate::registry::Datatype;
use crate::since::SinceFilter;
use crate::upstream::{self, UpstreamClient};

/// Application state, built once per process.
pub struct AppState {
    upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: &Config) -> shared::Result<Self> {
        Ok(Self {
            upstream: UpstreamClient::new(config)?,
        })
    }
}

/// Datatype segment of a `/{datatype}` path, if the path has that shape.
fn datatype_segment(path: &str) -> Option<&str> {
    let segment = path.strip_prefix('/')?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    (!segment.is_empty() && !segment.contains('/')).then_some(segment)
}

/// Fetch, filter and order the records for one request.
///
/// The datatype is checked against the registry before anything else, and a
/// malformed `since` is rejected before the upstream call is made. The parsed
/// bound drives both the upstream filter and the client-side one.
async fn list_records(
    state: &AppState,
    datatype: &str,
    since: Option<&str>,
    credential: &str,
) -> shared::Result<Vec<Record>> {
    let datatype: Datatype = datatype.parse()?;
    let since = since.map(SinceFilter::parse).transpose()?;

    let fetched = upstream::fetch(&state.upstream, datatype, since.as_ref(), credential).await?;
    Ok(records::process(fetched, since.as_ref()))
}

pub async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    if event.method() != Method::GET {
        return error_to_response(&shared::Error::MethodNotAllowed(
            event.method().to_string(),
        ));
    }

    let credentials = match shared::require_basic_auth(&event)? {
        Ok(credentials) => credentials,
        Err(response) => {
            warn!("Rejected {} without basic credentials", path);
            return Ok(response);
        }
    };

    let Some(datatype) = datatype_segment(path) else {
        warn!("No route for {}", path);
        return error_to_response(&shared::Error::NotFound(path.to_string()));
    };

    let params = event.query_string_parameters();
    let since = params.first("since").filter(|since| !since.is_empty());

    match list_records(&state, datatype, since, &credentials.password).await {
        Ok(records) => {
            info!(
                datatype = datatype,
                since = since,
                count = records.len(),
                "Serving {} records",
                records.len()
            );
            json_response(200, &records)
        }
        Err(e) if e.is_client_error() => {
            warn!(datatype = datatype, "Request rejected: {}", e);
            error_to_response(&e)
        }
        Err(e) => {
            error!(datatype = datatype, "Failed to list records: {}", e);
            error_to_response(&e)
        }
    }
}
