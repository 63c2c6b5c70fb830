//! Sender resolution.
//!
//! Only internal messages have a source address. Asking for the sender of
//! anything else yields `None` in native form. Asking for it in raw string
//! form is treated as a contract violation and fails with
//! [`DecodeError::SenderUnavailable`]: a caller that wants a string to put
//! somewhere should not silently get an empty one.

use std::fmt;

use super::DecodeError;
use crate::address::Address;
use crate::transaction::Transaction;

/// Requested output form of [`get_tx_sender`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SenderFormat {
    /// The [`Address`] value itself.
    #[default]
    Native,
    /// The raw `workchain:hex` string.
    Hex,
}

/// A resolved sender, in the form that was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxSender {
    Address(Address),
    Raw(String),
}

impl fmt::Display for TxSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "{}", addr),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Resolves the sender of a transaction's incoming message.
///
/// | incoming message | `Native`                     | `Hex`                     |
/// |------------------|------------------------------|---------------------------|
/// | internal         | `Some(TxSender::Address(_))` | `Some(TxSender::Raw(_))`  |
/// | external / none  | `None`                       | `Err(SenderUnavailable)`  |
pub fn get_tx_sender(
    tx: &Transaction,
    format: SenderFormat,
) -> Result<Option<TxSender>, DecodeError> {
    let src = tx.in_message_info().and_then(|info| info.src());
    match (src, format) {
        (Some(addr), SenderFormat::Native) => Ok(Some(TxSender::Address(*addr))),
        (Some(addr), SenderFormat::Hex) => Ok(Some(TxSender::Raw(addr.to_raw_string()))),
        (None, SenderFormat::Native) => Ok(None),
        (None, SenderFormat::Hex) => Err(DecodeError::SenderUnavailable),
    }
}

/// Native-form shorthand: the source address, if any.
pub fn tx_sender_address(tx: &Transaction) -> Option<Address> {
    tx.in_message_info().and_then(|info| info.src()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::transaction::{Message, TransactionBuilder};

    fn alice() -> Address {
        Address::new(0, [0xA1; 32])
    }

    fn internal_tx() -> Transaction {
        TransactionBuilder::new()
            .in_message(Message::internal(alice(), Address::new(0, [0xB0; 32]), 1, Cell::empty()))
            .build()
    }

    #[test]
    fn internal_sender_native_and_hex() {
        let tx = internal_tx();
        assert_eq!(
            get_tx_sender(&tx, SenderFormat::Native).unwrap(),
            Some(TxSender::Address(alice()))
        );
        assert_eq!(
            get_tx_sender(&tx, SenderFormat::Hex).unwrap(),
            Some(TxSender::Raw(format!("0:{}", "a1".repeat(32))))
        );
        assert_eq!(tx_sender_address(&tx), Some(alice()));
    }

    #[test]
    fn missing_message_is_none_natively() {
        let tx = Transaction::default();
        assert_eq!(get_tx_sender(&tx, SenderFormat::default()).unwrap(), None);
        assert_eq!(tx_sender_address(&tx), None);
    }

    #[test]
    fn missing_source_fails_loudly_in_hex() {
        let none = Transaction::default();
        assert_eq!(
            get_tx_sender(&none, SenderFormat::Hex),
            Err(DecodeError::SenderUnavailable)
        );

        let ext = TransactionBuilder::new()
            .in_message(Message::external_in(alice(), Cell::empty()))
            .build();
        assert_eq!(get_tx_sender(&ext, SenderFormat::Native).unwrap(), None);
        assert_eq!(
            get_tx_sender(&ext, SenderFormat::Hex),
            Err(DecodeError::SenderUnavailable)
        );
    }

    #[test]
    fn display_prints_raw_form_either_way() {
        let raw = alice().to_raw_string();
        assert_eq!(TxSender::Address(alice()).to_string(), raw);
        assert_eq!(TxSender::Raw(raw.clone()).to_string(), raw);
    }
}
