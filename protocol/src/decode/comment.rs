//! Text comment extraction.
//!
//! A comment is a message body laid out as:
//!
//! ```text
//! +------------------+----------------------------------------------+
//! | op: u32 BE == 0  | UTF-8 text, snake-continued through ref #0   |
//! +------------------+----------------------------------------------+
//! ```
//!
//! Outcomes, in order of checks:
//!
//! | body                         | result                          |
//! |------------------------------|---------------------------------|
//! | no incoming message          | `Ok("")`                        |
//! | fewer than 32 bits           | `Ok("")`                        |
//! | op != 0                      | `Err(NotACommentPayload)`       |
//! | op == 0                      | `Ok(text)`, NULs trimmed        |
//!
//! Absence is normal, a present-but-foreign payload is the caller's call.
//! Text is decoded lossily: invalid sequences become U+FFFD instead of
//! failing the whole comment, since wallets in the wild pad and truncate.

use super::DecodeError;
use crate::cell::{Cell, CellBuilder, CellError, Slice};
use crate::config::{COMMENT_OP, OP_CODE_BITS};
use crate::transaction::Transaction;

/// Extracts the text comment from a transaction's incoming message.
///
/// The body is read through a forked cursor, so calling this any number of
/// times on the same transaction (or concurrently with other decoders)
/// always sees the same bytes.
pub fn get_tx_comment(tx: &Transaction) -> Result<String, DecodeError> {
    match &tx.in_message {
        Some(message) => decode_comment(&message.body),
        None => Ok(String::new()),
    }
}

/// Decodes a bare body cell as a comment. Same rules as [`get_tx_comment`].
pub fn decode_comment(body: &Cell) -> Result<String, DecodeError> {
    read_comment(body.as_slice())
}

/// Decodes a comment starting at the cursor's current position without
/// moving the cursor.
pub fn read_comment(cursor: Slice<'_>) -> Result<String, DecodeError> {
    let mut cursor = cursor.fork();
    if cursor.remaining_bits() < OP_CODE_BITS {
        return Ok(String::new());
    }

    let op = cursor.load_u32()?;
    if op != COMMENT_OP {
        return Err(DecodeError::NotACommentPayload { op });
    }

    let bytes = cursor.load_bytes_tail()?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_matches('\0').to_string())
}

/// Builds a comment body: op `0` followed by `text` in snake layout.
pub fn build_comment_body(text: &str) -> Result<Cell, CellError> {
    let mut builder = CellBuilder::new();
    builder
        .store_uint(u64::from(COMMENT_OP), OP_CODE_BITS)?
        .store_string_tail(text)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::transaction::{Message, TransactionBuilder};

    fn tx_with_body(body: Cell) -> Transaction {
        TransactionBuilder::new()
            .in_message(Message::internal(
                Address::new(0, [1; 32]),
                Address::new(0, [2; 32]),
                1,
                body,
            ))
            .build()
    }

    #[test]
    fn hello() {
        let body =
            Cell::from_bytes(&[0x00, 0x00, 0x00, 0x00, 0x48, 0x65, 0x6C, 0x6C, 0x6F]).unwrap();
        assert_eq!(get_tx_comment(&tx_with_body(body)).unwrap(), "Hello");
    }

    #[test]
    fn no_incoming_message_is_empty() {
        assert_eq!(get_tx_comment(&Transaction::default()).unwrap(), "");
    }

    #[test]
    fn short_bodies_are_empty() {
        assert_eq!(decode_comment(&Cell::empty()).unwrap(), "");
        assert_eq!(decode_comment(&Cell::from_bytes(&[0xFF, 0xFF, 0xFF]).unwrap()).unwrap(), "");

        let mut b = CellBuilder::new();
        b.store_uint(0x7FFF_FFFF, 31).unwrap();
        assert_eq!(decode_comment(&b.build()).unwrap(), "");
    }

    #[test]
    fn op_code_alone_is_an_empty_comment() {
        assert_eq!(decode_comment(&Cell::from_bytes(&[0; 4]).unwrap()).unwrap(), "");
    }

    #[test]
    fn non_zero_op_is_rejected_with_the_op() {
        let tx = tx_with_body(Cell::from_bytes(&[0x0F, 0x8A, 0x7E, 0xA5, 0x01]).unwrap());
        let err = get_tx_comment(&tx).unwrap_err();
        assert_eq!(err, DecodeError::NotACommentPayload { op: 0x0F8A_7EA5 });
        assert!(err.to_string().contains("0x0f8a7ea5"));
    }

    #[test]
    fn repeated_decodes_agree() {
        let tx = tx_with_body(Cell::from_bytes(&[0, 0, 0, 1, b'x']).unwrap());
        let first = get_tx_comment(&tx);
        let second = get_tx_comment(&tx);
        assert_eq!(first, second);
        assert!(first.is_err());

        let tx = tx_with_body(Cell::from_bytes(b"\0\0\0\0gm").unwrap());
        assert_eq!(get_tx_comment(&tx).unwrap(), "gm");
        assert_eq!(get_tx_comment(&tx).unwrap(), "gm");
    }

    #[test]
    fn read_comment_leaves_the_caller_cursor_alone() {
        let body = Cell::from_bytes(b"\0\0\0\0hey").unwrap();
        let cursor = body.as_slice();
        assert_eq!(read_comment(cursor).unwrap(), "hey");
        assert_eq!(cursor.remaining_bits(), 7 * 8);
    }

    #[test]
    fn nul_padding_is_trimmed_on_both_ends() {
        let body = Cell::from_bytes(b"\0\0\0\0\0\0pad\0me\0\0\0").unwrap();
        assert_eq!(decode_comment(&body).unwrap(), "pad\0me");
    }

    #[test]
    fn invalid_utf8_passes_through_lossily() {
        let body = Cell::from_bytes(&[0, 0, 0, 0, b'o', b'k', 0xFF, 0xFE, b'!']).unwrap();
        assert_eq!(decode_comment(&body).unwrap(), "ok\u{FFFD}\u{FFFD}!");
    }

    #[test]
    fn multibyte_text_and_snake_continuation() {
        let text = "привет, мир! ".repeat(30);
        let body = build_comment_body(&text).unwrap();
        assert!(!body.refs().is_empty());
        assert_eq!(decode_comment(&body).unwrap(), text.trim_matches('\0'));
    }

    #[test]
    fn unaligned_bodies_still_decode() {
        // Some contracts prepend a flag bit before the payload.
        let mut b = CellBuilder::new();
        b.store_bit(true).unwrap().store_uint(0, 32).unwrap().store_bytes(b"odd").unwrap();
        let cell = b.build();
        let mut cursor = cell.as_slice();
        assert!(cursor.load_bit().unwrap());
        assert_eq!(read_comment(cursor).unwrap(), "odd");
    }
}
