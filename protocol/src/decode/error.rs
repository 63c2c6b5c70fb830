//! Error types for the field decoders.
//!
//! Every decoder that can fail returns a [`DecodeError`]. Absence is not an
//! error anywhere in this module: a missing incoming message or an empty
//! body resolves to `None` or `""`. Errors are reserved for data that is
//! present but unusable, and for requests that cannot be satisfied.

use thiserror::Error;

use crate::cell::CellError;

/// Errors that can occur while decoding transaction fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The incoming message carries no coin value, or a value of zero.
    #[error("cannot get amount: transaction has no incoming value")]
    AmountUnavailable,

    /// The caller asked for a currency unit the resolver does not know.
    #[error("unknown currency: {0:?}")]
    UnknownCurrency(String),

    /// The body starts with an operation code other than the comment marker.
    #[error("not a comment-tagged payload: op {op:#010x}")]
    NotACommentPayload {
        /// The operation code that was found instead of `0`.
        op: u32,
    },

    /// A raw sender address was requested but the message has no source.
    #[error("sender unavailable: incoming message has no source address")]
    SenderUnavailable,

    /// A decimal amount string could not be converted to nanotons.
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount {
        /// The string that failed to parse.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Reading the message body failed.
    #[error("body read failed: {0}")]
    Cell(#[from] CellError),
}
