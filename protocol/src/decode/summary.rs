//! One-shot decoding of every field of a transaction.
//!
//! [`TxSummary`] runs each decoder independently and records its outcome.
//! A failure in one field (say, a jetton transfer body that is not a
//! comment) never hides the others.

use serde::Serialize;

use super::{amount, comment, direction, sender};
use crate::transaction::{MessageDirection, Transaction};

/// Outcome of a single field decode, in a shape that serialises cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOutcome {
    Ok(String),
    Absent,
    Error(String),
}

impl FieldOutcome {
    /// The decoded value, if there is one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Ok(v) => Some(v),
            Self::Absent | Self::Error(_) => None,
        }
    }
}

/// All decoded fields of one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxSummary {
    pub lt: u64,
    pub hash: String,
    pub direction: Option<MessageDirection>,
    /// Raw `workchain:hex` form of the sender.
    pub sender: FieldOutcome,
    /// Value in TON.
    pub amount: FieldOutcome,
    pub comment: FieldOutcome,
    /// Representation hash of the incoming body, hex-encoded.
    pub body_hash: Option<String>,
}

impl TxSummary {
    /// Decodes every field of `tx`.
    pub fn from_transaction(tx: &Transaction) -> Self {
        let sender = match sender::tx_sender_address(tx) {
            Some(addr) => FieldOutcome::Ok(addr.to_raw_string()),
            None => FieldOutcome::Absent,
        };

        let amount = match amount::get_tx_value_amount(tx, amount::AmountOptions::ton()) {
            Ok(v) => FieldOutcome::Ok(v.to_string()),
            Err(super::DecodeError::AmountUnavailable) => FieldOutcome::Absent,
            Err(e) => FieldOutcome::Error(e.to_string()),
        };

        let comment = match comment::get_tx_comment(tx) {
            Ok(text) if text.is_empty() => FieldOutcome::Absent,
            Ok(text) => FieldOutcome::Ok(text),
            Err(e) => FieldOutcome::Error(e.to_string()),
        };

        Self {
            lt: tx.lt,
            hash: tx.hash_hex(),
            direction: direction::tx_direction(tx),
            sender,
            amount,
            comment,
            body_hash: tx.in_message.as_ref().map(|m| m.body.hash_hex()),
        }
    }
}
