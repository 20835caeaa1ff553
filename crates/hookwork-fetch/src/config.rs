use std::time::Duration;

use hookwork_core::SettlePolicy;

/// Request settings read by `use_fetch` through composition locals.
///
/// ```rust
/// use std::time::Duration;
/// use hookwork_core::{SettlePolicy, provide};
/// use hookwork_fetch::FetchConfig;
///
/// let config = FetchConfig::default()
///     .policy(SettlePolicy::LastSettled)
///     .timeout(Some(Duration::from_secs(5)));
/// provide(config, || {
///     // views composed here fetch with the settings above
/// });
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub policy: SettlePolicy,
    /// `None` waits as long as the client does.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            policy: SettlePolicy::Latest,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl FetchConfig {
    pub fn policy(mut self, policy: SettlePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
