use hookwork_core::*;
use hookwork_fetch::{FetchConfig, FetchError, fetch_json, http_client};
use hookwork_ui::{List, Text, ViewExt};
use serde_json::Value;

use crate::Endpoints;

/// Shows the title and body of one post. Nothing is shown until it
/// arrives; failures are only logged.
pub fn DisplayPost() -> View {
    let endpoints = local_or_default::<Endpoints>();
    let config = local_or_default::<FetchConfig>();
    let client = http_client();
    let post = remember_resource::<Value, FetchError>(config.policy);

    let p = post.clone();
    launched_effect((), move || {
        let ticket = p.begin();
        spawn(async move {
            match fetch_json::<Value>(client.as_ref(), &endpoints.post, config.timeout).await {
                Ok(value) => {
                    log::info!("post: {value}");
                    ticket.settle(Ok(value));
                }
                Err(err) => {
                    log::warn!("post fetch failed: {err}");
                    drop(ticket);
                }
            }
        });
    });

    let state = post.get();
    let field = |name: &str| {
        state
            .data()
            .and_then(|v| v.get(name))
            .map(display_value)
            .unwrap_or_default()
    };

    List().child((Text(field("title")), Text(field("body"))))
}

/// Strings print bare, numbers as written; anything else prints nothing.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
