//! HTTP JSON API client for the gbans backend.
//!
//! List endpoints all share the `{ "data": [...], "count": n }` envelope;
//! failures surface as error strings that callers turn into flash
//! notifications.

use crate::models::SlimServer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use url::Url;

/// Envelope returned by every list endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct ListResponse<T> {
    /// Rows returned.
    pub data: Vec<T>,
    /// Total number of records matching the query.
    pub count: i64,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        ListResponse {
            data: vec![],
            count: 0,
        }
    }
}

/// Server roster response.
pub type ServerData = ListResponse<SlimServer>;

/// Authenticated client for the backend HTTP API.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl ApiClient {
    /// Create a client for the given base URL and bearer token.
    pub fn new(base: &str, token: &str) -> Result<ApiClient, Box<dyn Error>> {
        let base = Url::parse(base).map_err(|e| format!("Invalid API base URL {base}: {e}"))?;
        Ok(ApiClient {
            http: reqwest::Client::new(),
            base,
            token: token.to_string(),
        })
    }

    /// Base URL the client was constructed with.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Bearer token used for authentication.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Fetch the full server roster.
    pub async fn fetch_servers(&self) -> Result<ServerData, Box<dyn Error>> {
        self.get_list("/api/servers").await
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ListResponse<T>, Box<dyn Error>> {
        let url = self
            .base
            .join(path)
            .map_err(|e| format!("Invalid API path {path}: {e}"))?;
        log::debug!("GET {url}");

        let resp = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| format!("Request failed {url}: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("API returned {status} for {url}").into());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| format!("Error reading response body from {url}: {e}"))?;

        parse_list(&body)
    }
}

/// Parse a list-envelope JSON body, reporting the failing path on error.
pub fn parse_list<T: DeserializeOwned>(body: &str) -> Result<ListResponse<T>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    let parsed: ListResponse<T> =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            log::error!("BODY START:\n\n{}\n\nBODY END\n", body);
            format!(
                "Error parsing list response: path={} error={}",
                e.path(),
                e
            )
        })?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_servers() {
        let body = r#"{"data":[{"server_id":1,"name":"us-1","addr":"10.0.0.1:27015","map":"pl_badwater","players":12,"max_players":24}],"count":1}"#;
        let parsed: ServerData = parse_list(body).expect("Error parsing server list");
        assert_eq!(parsed.count, 1);
        assert_eq!(parsed.data[0].name, "us-1");
        assert_eq!(parsed.data[0].game_types.len(), 0, "Missing tags default");
    }

    #[test]
    fn test_parse_list_reports_path() {
        let body = r#"{"data":[{"server_id":"oops"}],"count":1}"#;
        let err = parse_list::<SlimServer>(body).unwrap_err().to_string();
        assert!(err.contains("path="), "Error should carry the JSON path: {err}");
        assert!(err.contains("server_id"), "Path should name the bad field: {err}");
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        assert!(ApiClient::new("not a url", "").is_err());
    }
}
