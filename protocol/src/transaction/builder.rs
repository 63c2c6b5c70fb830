//! Transaction construction via the builder pattern.
//!
//! Real transactions come from an RPC client. The builder exists for the
//! other places that need one: tests, fixtures, and the CLI's sample data.

use super::message::Message;
use super::Transaction;

/// Fluent builder for [`Transaction`].
///
/// ```
/// use ton_txfields::address::Address;
/// use ton_txfields::cell::Cell;
/// use ton_txfields::transaction::{Message, TransactionBuilder};
///
/// let tx = TransactionBuilder::new()
///     .lt(1)
///     .in_message(Message::internal(
///         Address::new(0, [1; 32]),
///         Address::new(0, [2; 32]),
///         50_000_000,
///         Cell::empty(),
///     ))
///     .build();
/// assert!(tx.in_message.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    /// Starts from an empty transaction (no messages, zero lt/hash/time).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logical time.
    pub fn lt(mut self, lt: u64) -> Self {
        self.tx.lt = lt;
        self
    }

    /// Sets the transaction hash.
    pub fn hash(mut self, hash: [u8; 32]) -> Self {
        self.tx.hash = hash;
        self
    }

    /// Sets the execution time (unix seconds).
    pub fn now(mut self, now: u32) -> Self {
        self.tx.now = now;
        self
    }

    /// Sets the incoming message.
    pub fn in_message(mut self, message: Message) -> Self {
        self.tx.in_message = Some(message);
        self
    }

    /// Appends an outgoing message.
    pub fn out_message(mut self, message: Message) -> Self {
        self.tx.out_messages.push(message);
        self
    }

    /// Consumes the builder and returns the transaction.
    pub fn build(self) -> Transaction {
        self.tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn builder_sets_every_field() {
        let tx = TransactionBuilder::new()
            .lt(10)
            .hash([7; 32])
            .now(1_700_000_000)
            .out_message(Message::external_out(Cell::empty()))
            .out_message(Message::external_out(Cell::empty()))
            .build();
        assert_eq!(tx.lt, 10);
        assert_eq!(tx.hash, [7; 32]);
        assert_eq!(tx.now, 1_700_000_000);
        assert!(tx.in_message.is_none());
        assert_eq!(tx.out_messages.len(), 2);
    }
}
