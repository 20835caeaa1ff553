use hookwork_core::*;
use hookwork_fetch::{FetchConfig, FetchError, fetch_json, http_client};
use hookwork_ui::{Fragment, List, ListItem, Text, TextField, ViewExt};
use serde_json::Value;

use crate::author::Author;
use crate::{Endpoints, models};

pub const LOADING: &str = "Loading...";
pub const FAILURE_ALERT: &str = "Something went wrong...";

/// Fetches the authors once on mount and lists them twice: once inline,
/// once through the `Author` component.
///
/// Any array body is stored. A body that is not an array, or a failed
/// request, raises an alert and leaves both lists on the loading
/// placeholder.
pub fn AuthorList() -> View {
    let endpoints = local_or_default::<Endpoints>();
    let config = local_or_default::<FetchConfig>();
    let client = http_client();

    let authors = remember(|| signal(None::<Vec<models::Author>>));
    // Written by the text field, never read.
    let input = remember(|| signal(String::new()));
    // Raw response body, kept alongside the parsed authors.
    let value = remember_resource::<Value, FetchError>(config.policy);

    {
        let authors = authors.as_ref().clone();
        let value = value.clone();
        launched_effect((), move || {
            let ticket = value.begin();
            spawn(async move {
                let request = fetch_json::<Value>(client.as_ref(), &endpoints.authors, config.timeout);
                let raw = match request.await {
                    Ok(raw) => raw,
                    Err(err) => {
                        if ticket.is_alive() {
                            report(&err);
                        }
                        return;
                    }
                };
                log::info!("authors response: {raw}");

                let parsed = parse_authors(&raw);
                if !ticket.settle(Ok(raw)) {
                    return;
                }
                match parsed {
                    Ok(list) => authors.set(Some(list)),
                    Err(err) => report(&err),
                }
            });
        });
    }

    launched_effect((), || log::debug!("AuthorList mounted"));

    let list = authors.get();
    let inline: Vec<View> = match &list {
        Some(list) => list
            .iter()
            .enumerate()
            .map(|(i, a)| ListItem(a.key(i)).child(Text(a.name())))
            .collect(),
        None => vec![Text(LOADING)],
    };
    let delegated: Vec<View> = match &list {
        Some(list) => list
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let key = a.key(i);
                component(format!("author-{key}"), || Author(a.name(), key))
            })
            .collect(),
        None => vec![Text(LOADING)],
    };

    Fragment().child((
        TextField("", move |text| input.set(text)).key("author-list/input"),
        List().child(inline),
        List().child(delegated),
    ))
}

fn parse_authors(raw: &Value) -> Result<Vec<models::Author>, FetchError> {
    let Some(items) = raw.as_array() else {
        return Err(FetchError::Shape("expected an array of authors".to_string()));
    };
    Ok(items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone()).unwrap_or_else(|e| {
                log::debug!("author entry {item} read as empty: {e}");
                models::Author::default()
            })
        })
        .collect())
}

fn report(err: &FetchError) {
    log::warn!("authors: {err}");
    alert(FAILURE_ALERT);
}
