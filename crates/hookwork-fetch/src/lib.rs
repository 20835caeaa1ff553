//! Fetching JSON from views.
//!
//! [`use_fetch`] is the reusable lifecycle: it starts a GET whenever its URL
//! changes and returns the current [`ResourceState`](hookwork_core::ResourceState).
//! Views that need custom handling call [`fetch_json`] from their own effect
//! instead.
//!
//! The HTTP client is taken from composition locals ([`with_http_client`]);
//! without one, a shared [`ReqwestClient`] is used.

pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod reqwest_client;

pub use client::{Headers, HttpClient, Response};
pub use config::FetchConfig;
pub use error::FetchError;
pub use hooks::{HttpHandle, fetch_json, http_client, use_fetch, with_http_client};
pub use reqwest_client::ReqwestClient;
