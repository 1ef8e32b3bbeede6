//! Transfer request types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, Amount};

/// Which side of a transfer an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Sender,
    Receiver,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Sender => "sender",
            Side::Receiver => "receiver",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to move `amount` from `sender_id` to `receiver_id`.
///
/// No idempotency key: two identical requests are two transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    pub amount: Amount,
}

impl TransferRequest {
    pub fn new(sender_id: AccountId, receiver_id: AccountId, amount: Amount) -> Self {
        Self {
            sender_id,
            receiver_id,
            amount,
        }
    }
}

impl fmt::Display for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} amount={}",
            self.sender_id, self.receiver_id, self.amount
        )
    }
}
