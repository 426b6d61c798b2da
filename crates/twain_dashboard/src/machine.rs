//! Live-connection state machine.
//!
//! Pure state transitions; the dashboard drives it and owns all timers.

use std::time::Duration;
use twain_error::{RetryableError, StoreError};

/// Shown when the store rejects the credential.
pub const AUTH_ERROR_MESSAGE: &str = "Authentication error. Please try logging out and back in.";

/// Shown when retries are exhausted.
pub const RETRIES_EXHAUSTED_MESSAGE: &str =
    "Failed to connect after multiple attempts. Please refresh the page.";

/// Shown when a fresh token could not be obtained.
pub const TOKEN_FAILURE_MESSAGE: &str = "Failed to authenticate. Please try again.";

/// Where the live view currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_more::Display)]
pub enum ConnectionState {
    /// Not connected
    #[default]
    Idle,
    /// Refreshing the bearer token
    TokenRefresh,
    /// Waiting for the first snapshot
    Subscribing,
    /// Receiving snapshots
    Live,
    /// Waiting out retry `n` (0-based)
    #[display("Retrying({})", _0)]
    Retrying(u32),
    /// Gave up; carries the user-facing message
    #[display("Errored({})", _0)]
    Errored(String),
}

impl ConnectionState {
    /// Whether the state is terminal until an explicit reset.
    pub fn is_errored(&self) -> bool {
        matches!(self, ConnectionState::Errored(_))
    }
}

/// Retry budget and backoff base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries scheduled before giving up
    pub max_retries: u32,
    /// Delay before the first retry; doubles each time
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `attempt` (0-based): `base · 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// What to do after a feed error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Re-subscribe after `delay`
    Retry {
        /// 0-based retry number
        attempt: u32,
        /// How long to wait first
        delay: Duration,
    },
    /// Stop with this user-facing message
    GiveUp(String),
}

/// Tracks connection state and the retry counter.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use twain_dashboard::{ConnectionMachine, ConnectionState, RetryDecision, RetryPolicy};
///
/// let mut machine = ConnectionMachine::new(RetryPolicy::default());
/// let decision = machine.on_error("unavailable", "backend offline");
/// assert_eq!(decision, RetryDecision::Retry { attempt: 0, delay: Duration::from_secs(1) });
/// assert_eq!(machine.state(), &ConnectionState::Retrying(0));
///
/// machine.on_snapshot();
/// assert_eq!(machine.state(), &ConnectionState::Live);
/// assert_eq!(machine.retry_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionMachine {
    policy: RetryPolicy,
    state: ConnectionState,
    retries: u32,
}

impl ConnectionMachine {
    /// Start idle with a zero retry counter.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: ConnectionState::Idle,
            retries: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Retries scheduled since the last snapshot.
    pub fn retry_count(&self) -> u32 {
        self.retries
    }

    /// The policy in force.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// A connection attempt is refreshing its token.
    pub fn on_token_refresh(&mut self) -> &ConnectionState {
        self.state = ConnectionState::TokenRefresh;
        &self.state
    }

    /// The token could not be refreshed.
    pub fn on_token_failure(&mut self) -> &ConnectionState {
        self.state = ConnectionState::Errored(TOKEN_FAILURE_MESSAGE.to_string());
        &self.state
    }

    /// A subscription was requested.
    pub fn on_subscribing(&mut self) -> &ConnectionState {
        self.state = ConnectionState::Subscribing;
        &self.state
    }

    /// A snapshot arrived.
    pub fn on_snapshot(&mut self) -> &ConnectionState {
        self.retries = 0;
        self.state = ConnectionState::Live;
        &self.state
    }

    /// Classify a feed error by its code.
    pub fn on_error(&mut self, code: &str, message: &str) -> RetryDecision {
        match code {
            "permission-denied" => self.give_up(AUTH_ERROR_MESSAGE.to_string()),
            "unavailable" | "deadline-exceeded" => self.schedule_retry(),
            _ => self.give_up(format!("Connection error: {}", message)),
        }
    }

    /// Classify a store error.
    pub fn on_store_error(&mut self, error: &StoreError) -> RetryDecision {
        if error.is_retryable() {
            self.schedule_retry()
        } else {
            self.on_error(error.kind.code(), &error.kind.detail())
        }
    }

    /// Back to idle with a fresh retry budget.
    pub fn reset(&mut self) -> &ConnectionState {
        self.retries = 0;
        self.state = ConnectionState::Idle;
        &self.state
    }

    fn schedule_retry(&mut self) -> RetryDecision {
        if self.retries >= self.policy.max_retries {
            return self.give_up(RETRIES_EXHAUSTED_MESSAGE.to_string());
        }
        let attempt = self.retries;
        self.retries += 1;
        self.state = ConnectionState::Retrying(attempt);
        RetryDecision::Retry {
            attempt,
            delay: self.policy.delay_for(attempt),
        }
    }

    fn give_up(&mut self, message: String) -> RetryDecision {
        self.state = ConnectionState::Errored(message.clone());
        RetryDecision::GiveUp(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twain_error::StoreErrorKind;

    #[test]
    fn test_backoff_doubles_from_one_second() {
        let mut machine = ConnectionMachine::new(RetryPolicy::default());
        let delays: Vec<_> = (0..3)
            .map(|_| match machine.on_error("unavailable", "down") {
                RetryDecision::Retry { delay, .. } => delay,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[test]
    fn test_error_after_three_retries_gives_up() {
        let mut machine = ConnectionMachine::new(RetryPolicy::default());
        for _ in 0..3 {
            machine.on_error("deadline-exceeded", "slow");
        }
        assert_eq!(machine.state(), &ConnectionState::Retrying(2));

        let decision = machine.on_error("unavailable", "down");
        assert_eq!(
            decision,
            RetryDecision::GiveUp(RETRIES_EXHAUSTED_MESSAGE.to_string())
        );
        assert!(machine.state().is_errored());
    }

    #[test]
    fn test_snapshot_resets_counter() {
        let mut machine = ConnectionMachine::new(RetryPolicy::default());
        machine.on_error("unavailable", "down");
        machine.on_error("unavailable", "down");
        assert_eq!(machine.retry_count(), 2);

        machine.on_snapshot();
        assert_eq!(machine.retry_count(), 0);
        assert_eq!(
            machine.on_error("unavailable", "down"),
            RetryDecision::Retry {
                attempt: 0,
                delay: Duration::from_secs(1)
            }
        );
    }

    #[test]
    fn test_permission_denied_is_not_retried() {
        let mut machine = ConnectionMachine::new(RetryPolicy::default());
        let decision = machine.on_error("permission-denied", "Missing or insufficient permissions.");
        assert_eq!(decision, RetryDecision::GiveUp(AUTH_ERROR_MESSAGE.to_string()));
        assert_eq!(machine.retry_count(), 0);
    }

    #[test]
    fn test_other_codes_surface_raw_message() {
        let mut machine = ConnectionMachine::new(RetryPolicy::default());
        let err = StoreError::new(StoreErrorKind::Backend("index missing".to_string()));
        assert_eq!(
            machine.on_store_error(&err),
            RetryDecision::GiveUp("Connection error: index missing".to_string())
        );
    }

    #[test]
    fn test_token_failure_and_reset() {
        let mut machine = ConnectionMachine::new(RetryPolicy::default());
        machine.on_token_failure();
        assert_eq!(
            machine.state(),
            &ConnectionState::Errored(TOKEN_FAILURE_MESSAGE.to_string())
        );
        assert_eq!(machine.reset(), &ConnectionState::Idle);
    }
}
