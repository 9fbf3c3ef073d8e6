//! Client for the upstream event-management API.

use serde_json::Value;
use shared::{Config, Error, Result};
use tracing::{debug, info};

use crate::records::Record;
use crate::registry::Datatype;
use crate::since::SinceFilter;

/// Thin wrapper around one shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.upstream_base_url.clone(),
        })
    }

    /// List the caller's records of one datatype.
    ///
    /// `credential` is sent as the bearer token. A missing, null or empty
    /// collection in the response yields an empty list.
    pub async fn list(
        &self,
        datatype: Datatype,
        since: Option<&SinceFilter>,
        credential: &str,
    ) -> Result<Vec<Value>> {
        let mut url = format!("{}/users/me/{}/", self.base_url, datatype);
        if let Some(since) = since {
            url.push_str(&format!(
                "?changed_since={}",
                urlencoding::encode(&since.upstream_value())
            ));
        }

        debug!("Requesting {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", credential))
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("{} request failed: {}", datatype, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => Error::Auth(format!("Upstream rejected the credential: {}", error_text)),
                403 => Error::Unauthorized(format!("Upstream denied access: {}", error_text)),
                _ => Error::Upstream(format!("Upstream returned {}: {}", status, error_text)),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse {} response: {}", datatype, e)))?;

        collection(body, datatype.response_key())
    }
}

/// Pull the record list out of an upstream response body.
fn collection(body: Value, key: &str) -> Result<Vec<Value>> {
    let mut body = match body {
        Value::Object(body) => body,
        other => {
            return Err(Error::Upstream(format!(
                "Expected a JSON object from upstream, got {}",
                other
            )))
        }
    };

    match body.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Error::Upstream(format!(
            "Expected a list under {:?}, got {}",
            key, other
        ))),
    }
}

/// Fetch and normalize one collection.
pub async fn fetch(
    client: &UpstreamClient,
    datatype: Datatype,
    since: Option<&SinceFilter>,
    credential: &str,
) -> Result<Vec<Record>> {
    let raw = client.list(datatype, since, credential).await?;
    info!("Fetched {} {} records from upstream", raw.len(), datatype);

    raw.into_iter().map(Record::from_upstream).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_under_key() {
        let body = json!({
            "pagination": { "object_count": 1 },
            "attendees": [{ "id": "1", "changed": "2024-01-01T00:00:00Z" }],
        });
        let items = collection(body, "attendees").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_missing_or_null_collection_is_empty() {
        assert!(collection(json!({}), "events").unwrap().is_empty());
        assert!(collection(json!({ "events": null }), "events").unwrap().is_empty());
        assert!(collection(json!({ "events": [] }), "events").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_bodies() {
        assert!(matches!(collection(json!([]), "events"), Err(Error::Upstream(_))));
        assert!(matches!(
            collection(json!({ "events": "nope" }), "events"),
            Err(Error::Upstream(_))
        ));
    }
}
