//! Scripted HTTP client for tests.
//!
//! Responses are configured per URL (exact match first, then prefix, then
//! the default). A URL can also be *held*: the next request for it waits
//! until the returned [`MockGate`] is released, which lets tests interleave
//! overlapping requests deterministically.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::FetchError;
use crate::client::{HttpClient, Response};

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(FetchError),
}

impl MockResponse {
    /// A response with `status` and a raw JSON body.
    pub fn json(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, body.to_string()))
    }

    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, ""))
    }
}

#[derive(Default)]
struct MockState {
    responses: HashMap<String, MockResponse>,
    default_response: Option<MockResponse>,
    held: HashMap<String, VecDeque<oneshot::Receiver<MockResponse>>>,
    requests: Vec<String>,
}

/// Cheap to clone; clones share responses and the request log.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Rc<RefCell<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.state
            .borrow_mut()
            .responses
            .insert(url.to_string(), response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        self.state.borrow_mut().default_response = Some(response);
    }

    /// Holds the next request for `url` until the gate is released. Holding
    /// the same URL again queues another gate for the request after it.
    pub fn hold(&self, url: &str) -> MockGate {
        let (tx, rx) = oneshot::channel();
        self.state
            .borrow_mut()
            .held
            .entry(url.to_string())
            .or_default()
            .push_back(rx);
        MockGate {
            url: url.to_string(),
            tx,
        }
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|u| *u == url)
            .count()
    }

    fn scripted(&self, url: &str) -> Option<MockResponse> {
        let state = self.state.borrow();
        if let Some(response) = state.responses.get(url) {
            return Some(response.clone());
        }
        state
            .responses
            .iter()
            .find(|(pattern, _)| url.starts_with(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| state.default_response.clone())
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let gate = {
            let mut state = self.state.borrow_mut();
            state.requests.push(url.to_string());
            state.held.get_mut(url).and_then(|q| q.pop_front())
        };

        let scripted = match gate {
            Some(rx) => match rx.await {
                Ok(response) => Some(response),
                Err(_) => return Err(FetchError::Cancelled),
            },
            None => self.scripted(url),
        };

        match scripted {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(FetchError::Transport(format!("no mock response for {url}"))),
        }
    }
}

/// Releases one held request.
pub struct MockGate {
    url: String,
    tx: oneshot::Sender<MockResponse>,
}

impl MockGate {
    pub fn release(self, response: MockResponse) {
        if self.tx.send(response).is_err() {
            log::debug!("held request for {} was already dropped", self.url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn test_mock_exact_prefix_and_default() {
        let client = MockHttpClient::new();
        client.set_response("https://a.test/users", MockResponse::json(200, "[]"));
        client.set_response("https://b.test/", MockResponse::status(404));

        let exact = client.get("https://a.test/users").await.unwrap();
        assert_eq!(exact.status, 200);

        let prefixed = client.get("https://b.test/posts/1").await.unwrap();
        assert_eq!(prefixed.status, 404);

        let missing = client.get("https://c.test/").await;
        assert!(matches!(missing, Err(FetchError::Transport(_))));

        client.set_default_response(MockResponse::Error(FetchError::Transport("down".into())));
        assert_eq!(
            client.get("https://c.test/").await.unwrap_err(),
            FetchError::Transport("down".into())
        );
        assert_eq!(client.request_count("https://c.test/"), 2);
        assert_eq!(client.requests().len(), 4);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_held_request_waits_for_release() {
        let client = MockHttpClient::new();
        let gate = client.hold("https://a.test/");
        let pending = client.get("https://a.test/");
        gate.release(MockResponse::json(200, "{}"));
        let response = pending.await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_dropped_gate_cancels_request() {
        let client = MockHttpClient::new();
        drop(client.hold("https://a.test/"));
        assert_eq!(
            client.get("https://a.test/").await.unwrap_err(),
            FetchError::Cancelled
        );
    }
}
