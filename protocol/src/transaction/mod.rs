//! # Transaction Module
//!
//! The read-only transaction model the decoders work on. Transactions are
//! produced by whatever RPC client the caller uses; this crate never fetches,
//! validates or mutates them.
//!
//! ## Architecture
//!
//! ```text
//! message.rs — Message, MessageInfo (internal / external-in / external-out), Coins
//! builder.rs — Fluent TransactionBuilder for fixtures and tests
//! ```
//!
//! ## Design Decisions
//!
//! - The incoming message is an `Option`. Tick-tock and other system
//!   transactions have none, and every decoder treats that as "no value"
//!   rather than an error.
//! - Bodies are `Arc<Cell>`: cloning a transaction is cheap and two decoders
//!   can read the same body at once, each through its own cursor.
//! - All amounts are `u128` nanotons. No floating point anywhere near
//!   monetary values.

pub mod builder;
pub mod message;

use serde::{Deserialize, Serialize};

pub use builder::TransactionBuilder;
pub use message::{
    Coins, ExternalInMessageInfo, ExternalOutMessageInfo, InternalMessageInfo, Message,
    MessageDirection, MessageInfo,
};

/// A single on-chain transaction, reduced to what the decoders read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Logical time of the transaction.
    #[serde(default)]
    pub lt: u64,

    /// Transaction hash.
    #[serde(default, with = "hex::serde")]
    pub hash: [u8; 32],

    /// Unix time (seconds) the transaction was executed.
    #[serde(default)]
    pub now: u32,

    /// The message that triggered this transaction, if any.
    #[serde(default)]
    pub in_message: Option<Message>,

    /// Messages emitted by this transaction.
    #[serde(default)]
    pub out_messages: Vec<Message>,
}

impl Transaction {
    /// Hex-encoded transaction hash.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Info header of the incoming message, if there is one.
    pub fn in_message_info(&self) -> Option<&MessageInfo> {
        self.in_message.as_ref().map(|m| &m.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::cell::Cell;

    #[test]
    fn default_transaction_has_no_incoming_message() {
        let tx = Transaction::default();
        assert!(tx.in_message.is_none());
        assert!(tx.in_message_info().is_none());
        assert_eq!(tx.hash_hex(), "00".repeat(32));
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let tx: Transaction = serde_json::from_str(r#"{"lt": 7}"#).unwrap();
        assert_eq!(tx.lt, 7);
        assert!(tx.in_message.is_none());
        assert!(tx.out_messages.is_empty());
    }

    #[test]
    fn json_trip_keeps_the_incoming_message() {
        let tx = TransactionBuilder::new()
            .lt(42)
            .hash([0xEE; 32])
            .in_message(Message::internal(
                Address::new(0, [1; 32]),
                Address::new(0, [2; 32]),
                1_000,
                Cell::from_bytes(b"\0\0\0\0hi").unwrap(),
            ))
            .build();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
        assert_eq!(back.in_message_info().and_then(MessageInfo::value), Some(1_000));
    }
}
