//! Transfer request state machine
//!
//! `Received -> Validating -> (Rejected | Committing) -> (Committed | Failed)`
//!
//! `Rejected` is a validation failure (client error), `Failed` a commit
//! failure (system error). `Committed` is the sole terminal success.

use std::fmt;

/// States of a single transfer request.
///
/// State IDs are i16 so an upstream layer can persist them as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum TransferState {
    /// Request accepted by the engine, nothing checked yet
    Received = 0,

    /// Gate chain is being evaluated
    Validating = 10,

    /// Validation passed; the atomic mutation is in progress
    Committing = 20,

    /// Terminal: balances moved and the ledger entry is durable
    Committed = 30,

    /// Terminal: a gate failed; nothing was mutated
    Rejected = -10,

    /// Terminal: commit-phase failure; the store was left unchanged
    Failed = -20,
}

impl TransferState {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferState::Committed | TransferState::Rejected | TransferState::Failed
        )
    }

    /// Terminal failure, as opposed to terminal success
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, TransferState::Rejected | TransferState::Failed)
    }

    /// Get the numeric state ID for storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from a stored state ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TransferState::Received),
            10 => Some(TransferState::Validating),
            20 => Some(TransferState::Committing),
            30 => Some(TransferState::Committed),
            -10 => Some(TransferState::Rejected),
            -20 => Some(TransferState::Failed),
            _ => None,
        }
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Received => "RECEIVED",
            TransferState::Validating => "VALIDATING",
            TransferState::Committing => "COMMITTING",
            TransferState::Committed => "COMMITTED",
            TransferState::Rejected => "REJECTED",
            TransferState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for TransferState {
    type Error = ();

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TransferState::from_id(value).ok_or(())
    }
}
