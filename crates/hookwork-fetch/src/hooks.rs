use std::rc::Rc;
use std::time::Duration;

use hookwork_core::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{FetchConfig, FetchError, HttpClient, ReqwestClient};

/// Composition-local handle to the HTTP client.
#[derive(Clone)]
pub struct HttpHandle(pub Rc<dyn HttpClient>);

thread_local! {
    static DEFAULT_CLIENT: Rc<dyn HttpClient> = Rc::new(ReqwestClient::new());
}

/// Makes `client` the HTTP client for everything composed in `f`.
pub fn with_http_client<R>(client: Rc<dyn HttpClient>, f: impl FnOnce() -> R) -> R {
    provide(HttpHandle(client), f)
}

/// The provided client, or the shared default reqwest client.
pub fn http_client() -> Rc<dyn HttpClient> {
    match local::<HttpHandle>() {
        Some(HttpHandle(client)) => client,
        None => DEFAULT_CLIENT.with(Rc::clone),
    }
}

/// GETs `url` and decodes the body as `T`.
///
/// Non-2xx statuses fail with [`FetchError::Status`] before the body is
/// looked at. A body that is not JSON is [`FetchError::Decode`]; JSON that
/// does not fit `T` is [`FetchError::Shape`].
pub async fn fetch_json<T: DeserializeOwned>(
    client: &dyn HttpClient,
    url: &str,
    timeout: Option<Duration>,
) -> Result<T, FetchError> {
    let request = client.get(url);
    let response = match timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| FetchError::Timeout(limit))??,
        None => request.await?,
    };

    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }

    let value: Value =
        serde_json::from_slice(&response.body).map_err(|e| FetchError::Decode(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| FetchError::Shape(e.to_string()))
}

/// Fetches `url` as JSON and returns the request's current state.
///
/// A request starts after the first composition and again whenever `url`
/// changes; composing with the same URL never refetches. Starting a request
/// clears the previous error but keeps the previous data. Which of several
/// overlapping requests may settle follows [`FetchConfig::policy`], and
/// nothing settles once the calling component has unmounted.
pub fn use_fetch(url: impl Into<String>) -> ResourceState<Value, FetchError> {
    let url = url.into();
    let config = local_or_default::<FetchConfig>();
    let resource = remember_resource::<Value, FetchError>(config.policy);
    let client = http_client();

    let res = resource.clone();
    launched_effect(url.clone(), move || {
        let ticket = res.begin();
        log::debug!("use_fetch: loading {url}");
        spawn(async move {
            let outcome = fetch_json::<Value>(client.as_ref(), &url, config.timeout).await;
            if let Err(err) = &outcome {
                log::warn!("use_fetch: {url}: {err}");
            }
            ticket.settle(outcome);
        });
    });

    resource.get()
}
