use hookwork_core::runtime::SemNode;
use hookwork_core::*;

use crate::{Host, RunError};

/// Upper bound on compose/yield rounds in [`Harness::settle`]; an app that
/// invalidates itself forever would otherwise hang the test.
const MAX_SETTLE_ROUNDS: usize = 256;
const YIELDS_PER_ROUND: usize = 16;

/// Headless host for tests.
///
/// Must be used inside a `tokio::task::LocalSet`: views spawn their async
/// work onto it, and [`settle`](Harness::settle) yields to it.
///
/// ```rust,ignore
/// let mut h = Harness::new(|_| App());
/// h.compose();
/// h.settle().await;
/// h.click("Count")?;
/// h.settle().await;
/// assert!(h.text().contains("Count = 1"));
/// ```
pub struct Harness {
    host: Host,
}

impl Harness {
    pub fn new(root: impl FnMut(&mut Scheduler) -> View + 'static) -> Self {
        Self {
            host: Host::new(root),
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn compose(&mut self) {
        self.host.compose();
    }

    /// Recomposes while invalidated and lets spawned tasks run, until a
    /// round ends with nothing left to do.
    pub async fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_ROUNDS {
            while take_recompose_request() {
                self.host.compose();
            }
            for _ in 0..YIELDS_PER_ROUND {
                tokio::task::yield_now().await;
            }
            if !recompose_requested() {
                return;
            }
        }
        log::warn!("harness: still invalidated after {MAX_SETTLE_ROUNDS} rounds");
    }

    /// Rendered text of the current frame.
    pub fn text(&self) -> String {
        self.host.text()
    }

    pub fn click(&mut self, label: &str) -> Result<(), RunError> {
        self.host.click_label(label)
    }

    /// Clicks the first button whose label starts with `prefix`.
    pub fn click_prefix(&mut self, prefix: &str) -> Result<(), RunError> {
        let label = self
            .host
            .frame()
            .and_then(|f| {
                f.nodes(Role::Button)
                    .filter_map(|n| n.label.clone())
                    .find(|l| l.starts_with(prefix))
            })
            .ok_or_else(|| RunError::NoSuchButton(prefix.to_string()))?;
        self.host.click_label(&label)
    }

    /// Types into the `index`-th (1-based) text field.
    pub fn type_into(&mut self, index: usize, text: &str) -> Result<(), RunError> {
        self.host.type_into(index, text)
    }

    pub fn backspace(&mut self, index: usize) -> Result<(), RunError> {
        self.host.backspace(index)
    }

    pub fn focused(&self) -> Option<&SemNode> {
        self.host.focused()
    }

    pub fn focused_field(&self) -> Option<&str> {
        self.host.focused_field()
    }

    /// Every alert raised so far.
    pub fn alerts(&self) -> Vec<String> {
        self.host.alert_log()
    }

    pub fn acknowledge_alert(&mut self) -> Option<String> {
        self.host.acknowledge_alert()
    }

    pub fn compositions(&self) -> u64 {
        self.host.compositions()
    }

    pub fn paints(&self) -> u64 {
        self.host.paints()
    }
}
