//! # Field Decoders
//!
//! Pure functions that project a [`Transaction`](crate::transaction::Transaction)
//! onto user-facing values. None of them keep state, log, or mutate their
//! input, so they are safe to call from anywhere, in any order, any number
//! of times.
//!
//! ```text
//! direction.rs — is_internal / is_external_in / is_external_out
//! sender.rs    — get_tx_sender (native Address or raw string)
//! amount.rs    — get_tx_value_amount, from_nano / to_nano
//! comment.rs   — get_tx_comment, the op-0 text payload decoder
//! summary.rs   — TxSummary, every field at once with per-field outcomes
//! error.rs     — DecodeError
//! ```

pub mod amount;
pub mod comment;
pub mod direction;
pub mod sender;
pub mod summary;

mod error;

pub use amount::{from_nano, get_tx_value_amount, to_nano, AmountOptions, Currency, TxAmount};
pub use comment::{build_comment_body, decode_comment, get_tx_comment, read_comment};
pub use direction::{is_external_in, is_external_out, is_internal, tx_direction};
pub use error::DecodeError;
pub use sender::{get_tx_sender, tx_sender_address, SenderFormat, TxSender};
pub use summary::{FieldOutcome, TxSummary};
