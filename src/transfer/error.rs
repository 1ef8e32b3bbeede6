//! Transfer error taxonomy
//!
//! A closed set of failure kinds, one per gate plus the commit and
//! timeout paths. The upstream layer maps these to its protocol;
//! message text here is diagnostic, not presentation.

use std::fmt;

use thiserror::Error;

use super::state::TransferState;
use super::types::Side;
use crate::account::models::Capability;
use crate::account::store::StoreError;
use crate::core_types::AccountId;

/// Why a request was malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Sender and receiver are the same account
    SelfTransfer,
    /// Amount is zero (amounts are unsigned, so "non-positive" means zero)
    NonPositiveAmount,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::SelfTransfer => write!(f, "sender and receiver must differ"),
            InvalidReason::NonPositiveAmount => write!(f, "amount must be greater than zero"),
        }
    }
}

/// Transfer failure kinds
///
/// Validation kinds (`InvalidRequest`, `AccountNotFound`,
/// `InsufficientFunds`, `PermissionDenied`) are deterministic and not
/// worth retrying. `TransferFailed` is retry-safe: the engine guarantees
/// no partial mutation happened. `Timeout` means the caller stopped
/// waiting; the in-flight commit still runs to completion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("invalid transfer request: {0}")]
    InvalidRequest(InvalidReason),

    #[error("{0} account not found: {1}")]
    AccountNotFound(Side, AccountId),

    #[error("sender balance does not pass the funds gate")]
    InsufficientFunds,

    #[error("{side} account lacks the '{capability}' capability")]
    PermissionDenied { side: Side, capability: Capability },

    #[error("transfer commit failed: {0}")]
    TransferFailed(String),

    #[error("timed out waiting for the transfer result")]
    Timeout,
}

impl TransferError {
    /// Stable tag for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidRequest(_) => "INVALID_REQUEST",
            TransferError::AccountNotFound(..) => "ACCOUNT_NOT_FOUND",
            TransferError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            TransferError::PermissionDenied { .. } => "PERMISSION_DENIED",
            TransferError::TransferFailed(_) => "TRANSFER_FAILED",
            TransferError::Timeout => "TIMEOUT",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidRequest(_) => 400,
            TransferError::AccountNotFound(..) => 404,
            TransferError::PermissionDenied { .. } => 403,
            TransferError::InsufficientFunds => 422,
            TransferError::TransferFailed(_) => 500,
            TransferError::Timeout => 504,
        }
    }

    /// The terminal state this failure leaves the request in.
    ///
    /// `None` for `Timeout`: the caller abandoned the wait and cannot
    /// know whether the commit landed.
    pub fn terminal_state(&self) -> Option<TransferState> {
        match self {
            TransferError::InvalidRequest(_)
            | TransferError::AccountNotFound(..)
            | TransferError::InsufficientFunds
            | TransferError::PermissionDenied { .. } => Some(TransferState::Rejected),
            TransferError::TransferFailed(_) => Some(TransferState::Failed),
            TransferError::Timeout => None,
        }
    }

    /// Deterministic validation failure, safe to surface verbatim
    pub fn is_rejection(&self) -> bool {
        self.terminal_state() == Some(TransferState::Rejected)
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        TransferError::TransferFailed(e.to_string())
    }
}

impl From<anyhow::Error> for TransferError {
    fn from(e: anyhow::Error) -> Self {
        TransferError::TransferFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TransferError::InvalidRequest(InvalidReason::SelfTransfer).code(),
            "INVALID_REQUEST"
        );
        assert_eq!(TransferError::InsufficientFunds.code(), "INSUFFICIENT_FUNDS");
        assert_eq!(
            TransferError::PermissionDenied {
                side: Side::Sender,
                capability: Capability::Send,
            }
            .code(),
            "PERMISSION_DENIED"
        );
        assert_eq!(TransferError::Timeout.code(), "TIMEOUT");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            TransferError::InvalidRequest(InvalidReason::NonPositiveAmount).http_status(),
            400
        );
        assert_eq!(TransferError::AccountNotFound(Side::Sender, 7).http_status(), 404);
        assert_eq!(TransferError::InsufficientFunds.http_status(), 422);
        assert_eq!(
            TransferError::TransferFailed("boom".into()).http_status(),
            500
        );
        assert_eq!(TransferError::Timeout.http_status(), 504);
    }

    #[test]
    fn test_terminal_states() {
        assert_eq!(
            TransferError::InsufficientFunds.terminal_state(),
            Some(TransferState::Rejected)
        );
        assert_eq!(
            TransferError::TransferFailed("x".into()).terminal_state(),
            Some(TransferState::Failed)
        );
        assert_eq!(TransferError::Timeout.terminal_state(), None);

        assert!(TransferError::InsufficientFunds.is_rejection());
        assert!(!TransferError::TransferFailed("x".into()).is_rejection());
    }

    #[test]
    fn test_display_carries_side_and_capability() {
        let err = TransferError::PermissionDenied {
            side: Side::Receiver,
            capability: Capability::Receive,
        };
        assert_eq!(
            err.to_string(),
            "receiver account lacks the 'receive' capability"
        );
    }

    #[test]
    fn test_from_store_error() {
        let err = TransferError::from(StoreError::Database("connection reset".into()));
        assert!(matches!(err, TransferError::TransferFailed(_)));
        assert_eq!(err.code(), "TRANSFER_FAILED");
    }

    #[test]
    fn test_from_anyhow() {
        let err = TransferError::from(anyhow::anyhow!("embedder store exploded"));
        assert!(matches!(err, TransferError::TransferFailed(_)));
    }
}
