// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # ton-txfields — Transaction Field Decoders
//!
//! Turns a TON transaction into the handful of values a wallet, explorer or
//! payment backend actually shows: who sent it, how much, which way it went,
//! and the text comment attached to it. Plus a small retry helper for the
//! RPC calls that fetch those transactions in the first place.
//!
//! ## Architecture
//!
//! - **config** — Wire constants and retry defaults. One place, no magic numbers.
//! - **cell** — Cells, a builder, and a forward-only cursor with explicit forking.
//! - **address** — Internal addresses in raw and user-friendly form.
//! - **transaction** — The read-only transaction / message model.
//! - **decode** — Direction, sender, amount and comment decoders.
//! - **retry** — Bounded constant-delay retry for async operations.
//!
//! ## Ground Rules
//!
//! 1. Decoders are pure. They never mutate their input or log.
//! 2. Absence is a value (`None`, `""`), not an error.
//! 3. Money is integers. `u128` nanotons in, decimal strings out.
//! 4. Reading a body never disturbs another reader of the same body.
//!
//! ## Quick Start
//!
//! ```
//! use ton_txfields::address::Address;
//! use ton_txfields::decode::{
//!     build_comment_body, get_tx_comment, get_tx_value_amount, AmountOptions,
//! };
//! use ton_txfields::transaction::{Message, TransactionBuilder};
//!
//! let tx = TransactionBuilder::new()
//!     .in_message(Message::internal(
//!         Address::new(0, [1; 32]),
//!         Address::new(0, [2; 32]),
//!         50_000_000,
//!         build_comment_body("coffee").unwrap(),
//!     ))
//!     .build();
//!
//! assert_eq!(get_tx_comment(&tx).unwrap(), "coffee");
//! assert_eq!(get_tx_value_amount(&tx, AmountOptions::ton()).unwrap().to_string(), "0.05");
//! ```

pub mod address;
pub mod cell;
pub mod config;
pub mod decode;
pub mod retry;
pub mod transaction;
