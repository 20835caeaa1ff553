//! Hosts for Hookwork apps.
//!
//! - [`Harness`]: composes in-process for tests and exposes what a user
//!   would see and do (rendered text, clicks, typing, alerts).
//! - [`run_terminal_app`]: single-threaded terminal runner. It prints each
//!   painted frame and reads line commands from stdin.
//!
//! Both drive a [`Host`], which owns the scheduler, the last frame, text
//! field states, focus and pending alerts.

mod common;
pub mod harness;
pub mod host;
pub mod terminal;

pub use harness::Harness;
pub use host::{A11yBridge, Host};
pub use terminal::{Command, RunConfig, run_terminal_app};

use thiserror::Error;

/// A user action the host could not carry out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("no button {0}")]
    NoSuchButton(String),

    #[error("no text field {0}")]
    NoSuchField(usize),

    #[error("acknowledge the alert first (`ok`): {0}")]
    AlertPending(String),

    #[error("no alert to acknowledge")]
    NoAlert,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("nothing has been composed yet")]
    NotComposed,
}
