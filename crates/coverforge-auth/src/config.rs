//! Coordinator configuration.

use std::time::Duration;

/// Configuration for the session/role coordinator.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Delay between a subscription-delivered session change and the role
    /// fetch it triggers.
    ///
    /// Newly created accounts can hit the role store before their role
    /// rows have replicated; the delay tolerates that lag. It is a
    /// heuristic, not a correctness guarantee — the stale-fetch epoch
    /// guard is what keeps results consistent.
    ///
    /// The initial-session check at startup fetches without delay: that
    /// session existed long before this process started, so its role rows
    /// already have.
    ///
    /// Default: 50 ms. Set to zero to fetch immediately.
    pub role_fetch_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            role_fetch_delay: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay_is_short() {
        let config = AuthConfig::default();
        assert_eq!(config.role_fetch_delay, Duration::from_millis(50));
    }
}
