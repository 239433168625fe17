// crates/citycompare-core/src/providers/http.rs
#![cfg(feature = "http")]

use crate::error::ProviderError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Shared blocking client; cloning is cheap (the pool is reference counted).
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` with `query` and return the body of a 2xx response.
    ///
    /// Only the URL without its query string is logged; some queries carry
    /// API keys.
    pub fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, ProviderError> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}
