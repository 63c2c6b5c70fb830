//! Direction classification of a transaction's incoming message.
//!
//! For any transaction exactly one of the three predicates is true, or all
//! three are false when there is no incoming message.

use crate::transaction::{MessageDirection, MessageInfo, Transaction};

/// Direction of the incoming message, or `None` when there isn't one.
pub fn tx_direction(tx: &Transaction) -> Option<MessageDirection> {
    tx.in_message_info().map(MessageInfo::direction)
}

/// `true` if the incoming message is internal.
pub fn is_internal(tx: &Transaction) -> bool {
    match tx.in_message_info() {
        Some(MessageInfo::Internal(_)) => true,
        Some(MessageInfo::ExternalIn(_) | MessageInfo::ExternalOut(_)) | None => false,
    }
}

/// `true` if the incoming message is external-out.
pub fn is_external_out(tx: &Transaction) -> bool {
    match tx.in_message_info() {
        Some(MessageInfo::ExternalOut(_)) => true,
        Some(MessageInfo::Internal(_) | MessageInfo::ExternalIn(_)) | None => false,
    }
}

/// `true` if the incoming message is external-in.
pub fn is_external_in(tx: &Transaction) -> bool {
    match tx.in_message_info() {
        Some(MessageInfo::ExternalIn(_)) => true,
        Some(MessageInfo::Internal(_) | MessageInfo::ExternalOut(_)) | None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::cell::Cell;
    use crate::transaction::{Message, TransactionBuilder};

    fn with(message: Message) -> Transaction {
        TransactionBuilder::new().in_message(message).build()
    }

    fn flags(tx: &Transaction) -> [bool; 3] {
        [is_internal(tx), is_external_in(tx), is_external_out(tx)]
    }

    #[test]
    fn no_incoming_message_is_all_false() {
        let tx = Transaction::default();
        assert_eq!(flags(&tx), [false; 3]);
        assert_eq!(tx_direction(&tx), None);
    }

    #[test]
    fn exactly_one_predicate_holds() {
        let a = Address::new(0, [1; 32]);
        let b = Address::new(0, [2; 32]);

        let int = with(Message::internal(a, b, 1, Cell::empty()));
        assert_eq!(flags(&int), [true, false, false]);
        assert_eq!(tx_direction(&int), Some(MessageDirection::Internal));

        let ext_in = with(Message::external_in(b, Cell::empty()));
        assert_eq!(flags(&ext_in), [false, true, false]);
        assert_eq!(tx_direction(&ext_in), Some(MessageDirection::ExternalIn));

        let ext_out = with(Message::external_out(Cell::empty()));
        assert_eq!(flags(&ext_out), [false, false, true]);
        assert_eq!(tx_direction(&ext_out), Some(MessageDirection::ExternalOut));
    }
}
