//! Error types surfaced by the broker layer.
//!
//! Stale targets and repeated disposal are normal conditions and never show up
//! here. What remains are wiring mistakes: a payload published through a broker
//! whose subscribers expect a different type, or a publish issued from inside a
//! handler of the same broker.

use crate::subscription::SubscriptionId;

pub type Result<T> = std::result::Result<T, BrokerError>;

/// Severity level of a broker error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The caller broke a usage contract (e.g. re-entrant publish).
    ///
    /// Only the offending call failed; the broker and the in-flight publish
    /// are intact, and the call can be reissued outside the handler.
    Internal,

    /// The broker wiring itself is corrupted (e.g. payload type mismatch).
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the broker is still usable after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BrokerError {
    /// A subscription received a payload of a type other than the one it was
    /// registered for.
    #[error("subscription {subscription} expected payload of type `{expected}`")]
    InvariantViolation {
        subscription: SubscriptionId,
        expected: &'static str,
    },

    /// A handler passed the payload it is processing back to `publish` on the
    /// same broker.
    #[error("re-entrant publish on event `{event}`")]
    ReentrancyViolation { event: &'static str },
}

impl BrokerError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvariantViolation { .. } => ErrorSeverity::Fatal,
            Self::ReentrancyViolation { .. } => ErrorSeverity::Internal,
        }
    }

    /// Static identifier for this variant, useful in logs and assertions.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvariantViolation { .. } => "broker.invariant_violation",
            Self::ReentrancyViolation { .. } => "broker.reentrancy_violation",
        }
    }
}
