use std::rc::Rc;

use hookwork_core::*;
use hookwork_fetch::{FetchConfig, HttpClient, use_fetch, with_http_client};
use hookwork_ui::{Button, Column, Fragment, Text, TextField, ViewExt};

use crate::author_list::{AuthorList, LOADING};
use crate::display_post::DisplayPost;
use crate::Endpoints;

pub const ERROR_TEXT: &str = "Error occurred";
pub const FOCUS_LABEL: &str = "Click to focus on input field";
pub const COUNTER_LABEL: &str = "Click to Update Counter";
pub const REF_COUNTER_LABEL: &str = "Click to Update Ref Counter";

/// Root view: both fetching views, a focusable input, an observed counter,
/// a ref counter that never recomposes, the raw lifecycle value and its
/// status line.
pub fn App() -> View {
    let endpoints = local_or_default::<Endpoints>();

    let counter = remember(|| signal(0i32));
    let fetch = use_fetch(endpoints.lifecycle.as_str());
    let count_ref = remember_ref(|| 0i32);
    let input_element = remember_node_ref();

    log::info!("App rendered");

    let mut status = "";
    if fetch.loading() {
        status = LOADING;
    }
    if fetch.error().is_some() {
        status = ERROR_TEXT;
    }

    let raw = serde_json::to_string(&fetch.data()).unwrap_or_else(|e| {
        log::warn!("cannot serialize fetched value: {e}");
        String::new()
    });

    let focus_on_input = {
        let input_element = input_element.clone();
        move || {
            input_element.focus();
        }
    };

    // Handlers see the value from the composition that built them.
    let rendered = counter.get();
    let update_counter = {
        let counter = counter.as_ref().clone();
        move || {
            log::info!("Before {rendered}");
            counter.update(|prev| {
                let new_value = *prev + 1;
                log::info!("During {new_value}");
                *prev = new_value;
            });
            log::info!("After {rendered}");
        }
    };

    let update_ref = {
        let count_ref = count_ref.clone();
        move || {
            count_ref.update(|c| *c += 1);
            log::info!("ref counter = {}", count_ref.get());
        }
    };

    Fragment().child((
        component("author-list", AuthorList),
        component("display-post", DisplayPost),
        TextField("", |_| {})
            .key("app/input")
            .node_ref(&input_element),
        Button(FOCUS_LABEL, focus_on_input),
        Button(COUNTER_LABEL, update_counter),
        Button(REF_COUNTER_LABEL, update_ref),
        Text(rendered.to_string()),
        Column().child(Text(raw)),
        Text(status),
    ))
}

/// Root builder for a host: provides the HTTP client, endpoints and fetch
/// settings, then composes [`App`].
pub fn root(
    client: Rc<dyn HttpClient>,
    endpoints: Endpoints,
    fetch: FetchConfig,
) -> impl FnMut(&mut Scheduler) -> View + 'static {
    move |_: &mut Scheduler| {
        with_http_client(client.clone(), || {
            provide(endpoints.clone(), || provide(fetch, || component("app", App)))
        })
    }
}
