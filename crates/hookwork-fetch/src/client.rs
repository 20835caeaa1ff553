//! HTTP client seam.
//!
//! Views only ever issue GETs for JSON, so the trait is deliberately narrow.
//! It is `?Send`: clients live on the UI thread next to the views that use
//! them.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

use crate::FetchError;

pub type Headers = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

#[async_trait(?Send)]
pub trait HttpClient {
    /// Performs a GET and returns the full response, whatever its status.
    async fn get(&self, url: &str) -> Result<Response, FetchError>;
}
