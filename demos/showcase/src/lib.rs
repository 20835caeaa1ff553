#![allow(non_snake_case)]
//! The hooks demo as Hookwork views.
//!
//! - [`AuthorList`](author_list::AuthorList): fetches authors on mount and
//!   lists them twice.
//! - [`DisplayPost`](display_post::DisplayPost): fetches and shows one post.
//! - [`App`](app::App): composes both, runs `use_fetch` against a third
//!   endpoint and demonstrates an observed counter, a ref counter and focus
//!   through a node ref.

pub mod app;
pub mod author;
pub mod author_list;
pub mod config;
pub mod display_post;
pub mod models;

pub use app::{App, root};
pub use config::Endpoints;
