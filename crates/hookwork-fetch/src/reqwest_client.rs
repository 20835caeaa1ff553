use async_trait::async_trait;

use crate::FetchError;
use crate::client::{Headers, HttpClient, Response};

/// Production client backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured client (proxies, TLS roots, pool limits).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn convert_error(err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Transport(format!("timed out: {err}"))
        } else {
            FetchError::Transport(err.to_string())
        }
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;
        log::debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(Response::with_headers(status, headers, body))
    }
}
