//! # Async resources
//!
//! A [`Resource`] tracks one keyed async request: `Idle -> Pending ->
//! (Resolved | Rejected)`. Callers never write the state directly; they
//! [`begin`](Resource::begin) a request, receive a [`Ticket`], and
//! [`settle`](Ticket::settle) it exactly once.
//!
//! ```rust
//! use hookwork_core::*;
//!
//! let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
//! let ticket = res.begin();
//! assert!(res.get().loading());
//! ticket.settle(Ok(7));
//! assert_eq!(res.get().data(), Some(&7));
//! assert!(!res.get().loading());
//! ```
//!
//! Data survives failures: a rejected request keeps whatever the previous
//! successful one stored, and starting a new request clears only the error.

use std::cell::Cell;
use std::rc::Rc;

use crate::scope::Lifetime;
use crate::{Signal, current_scope, remember, signal};

#[derive(Clone, Debug, PartialEq)]
pub enum Phase<E> {
    Idle,
    Pending,
    Resolved,
    Rejected(E),
}

/// Snapshot of a resource: the last good value plus the current phase.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<T, E> {
    data: Option<T>,
    phase: Phase<E>,
}

impl<T, E> Default for ResourceState<T, E> {
    fn default() -> Self {
        Self {
            data: None,
            phase: Phase::Idle,
        }
    }
}

impl<T, E> ResourceState<T, E> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    pub fn error(&self) -> Option<&E> {
        match &self.phase {
            Phase::Rejected(e) => Some(e),
            _ => None,
        }
    }

    pub fn phase(&self) -> &Phase<E> {
        &self.phase
    }

    fn start(&mut self) {
        self.phase = Phase::Pending;
    }

    fn resolve(&mut self, value: T) {
        self.data = Some(value);
        self.phase = Phase::Resolved;
    }

    fn reject(&mut self, error: E) {
        self.phase = Phase::Rejected(error);
    }

    /// A request ended without an outcome (dropped future). Leave pending
    /// without inventing an error.
    fn abandon(&mut self) {
        if self.loading() {
            self.phase = if self.data.is_some() {
                Phase::Resolved
            } else {
                Phase::Idle
            };
        }
    }
}

/// How settlements of overlapping requests are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Only the most recently started request may settle; older ones are
    /// discarded.
    #[default]
    Latest,
    /// Every request settles in the order it finishes, so a slow superseded
    /// request can overwrite a newer result.
    LastSettled,
}

pub struct Resource<T: 'static, E: 'static> {
    state: Signal<ResourceState<T, E>>,
    generation: Rc<Cell<u64>>,
    policy: SettlePolicy,
}

impl<T, E> Clone for Resource<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            generation: self.generation.clone(),
            policy: self.policy,
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Resource<T, E> {
    pub fn new(policy: SettlePolicy) -> Self {
        Self {
            state: signal(ResourceState::default()),
            generation: Rc::new(Cell::new(0)),
            policy,
        }
    }

    pub fn get(&self) -> ResourceState<T, E> {
        self.state.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&ResourceState<T, E>) -> R) -> R {
        self.state.with(f)
    }

    pub fn policy(&self) -> SettlePolicy {
        self.policy
    }

    /// Observes every state transition (tests, devtools).
    pub fn subscribe(&self, f: impl Fn(&ResourceState<T, E>) + 'static) {
        self.state.subscribe(f);
    }

    /// Starts a request: marks the resource pending, clears the error and
    /// supersedes any request still in flight.
    ///
    /// The ticket is tied to the current scope, if any; once that scope is
    /// disposed the ticket's outcome is dropped.
    pub fn begin(&self) -> Ticket<T, E> {
        let lifetime = current_scope().map(|s| s.lifetime());
        self.begin_with(lifetime)
    }

    pub fn begin_with(&self, lifetime: Option<Lifetime>) -> Ticket<T, E> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.state.update(|s| s.start());
        Ticket {
            resource: self.clone(),
            generation,
            lifetime,
            settled: false,
        }
    }
}

/// One in-flight request. Settle it once; dropping it unsettled ends the
/// pending phase without an outcome.
pub struct Ticket<T: Clone + 'static, E: Clone + 'static> {
    resource: Resource<T, E>,
    generation: u64,
    lifetime: Option<Lifetime>,
    settled: bool,
}

impl<T: Clone + 'static, E: Clone + 'static> Ticket<T, E> {
    /// Whether no newer request has started since this one.
    pub fn is_current(&self) -> bool {
        self.resource.generation.get() == self.generation
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime.as_ref().is_none_or(|l| l.is_alive())
    }

    fn accepts(&self) -> bool {
        if !self.is_alive() {
            log::debug!("request #{} settled after its view unmounted", self.generation);
            return false;
        }
        match self.resource.policy {
            SettlePolicy::Latest if !self.is_current() => {
                log::debug!(
                    "request #{} superseded by #{}; dropping its outcome",
                    self.generation,
                    self.resource.generation.get()
                );
                false
            }
            _ => true,
        }
    }

    /// Applies the outcome if this ticket may still write. Returns whether it
    /// was applied.
    pub fn settle(mut self, outcome: Result<T, E>) -> bool {
        self.settled = true;
        if !self.accepts() {
            return false;
        }
        match outcome {
            Ok(value) => self.resource.state.update(|s| s.resolve(value)),
            Err(error) => self.resource.state.update(|s| s.reject(error)),
        }
        true
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Drop for Ticket<T, E> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if !self.is_alive() {
            log::debug!("request #{} dropped after its view unmounted", self.generation);
            return;
        }
        // A newer request owns the pending phase, whatever the policy.
        if !self.is_current() {
            log::debug!("superseded request #{} dropped unsettled", self.generation);
            return;
        }
        log::debug!("request #{} dropped before settling", self.generation);
        self.resource.state.update(|s| s.abandon());
    }
}

/// Remembers a resource in the current component.
pub fn remember_resource<T: Clone + 'static, E: Clone + 'static>(
    policy: SettlePolicy,
) -> Resource<T, E> {
    remember(|| Resource::new(policy)).as_ref().clone()
}
