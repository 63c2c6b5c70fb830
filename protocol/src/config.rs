//! # Decoder Configuration & Constants
//!
//! Every magic number the decoders rely on lives here. If you're hardcoding
//! a constant somewhere else, you're doing it wrong.
//!
//! Most of these are fixed by the TON wire format and cannot be tuned. The
//! retry defaults are the only knobs a caller is expected to override, and
//! they do so through [`crate::retry::RetryPolicy`] rather than by editing
//! this file.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Currency Units
// ---------------------------------------------------------------------------

/// Decimal exponent between TON and its smallest unit (the nanoton).
pub const NANOTON_DECIMALS: u32 = 9;

/// Nanotons in one TON. `10^NANOTON_DECIMALS`, spelled out so it can be
/// used in const contexts.
pub const NANOTONS_PER_TON: u128 = 1_000_000_000;

/// Display ticker for the chain's native currency.
pub const TON_TICKER: &str = "TON";

// ---------------------------------------------------------------------------
// Message Body Conventions
// ---------------------------------------------------------------------------

/// Width of the operation code that prefixes a message body.
pub const OP_CODE_BITS: usize = 32;

/// Operation code marking a body as a plain-text comment.
pub const COMMENT_OP: u32 = 0;

// ---------------------------------------------------------------------------
// Cell Limits
// ---------------------------------------------------------------------------

/// Maximum number of data bits in a single cell. Not 1024. 1023.
pub const CELL_MAX_BITS: usize = 1023;

/// Maximum number of child references in a single cell.
pub const CELL_MAX_REFS: usize = 4;

// ---------------------------------------------------------------------------
// Address Encoding
// ---------------------------------------------------------------------------

/// Length of an account hash inside an internal address.
pub const ADDRESS_HASH_LENGTH: usize = 32;

/// Length of a decoded user-friendly address:
/// flags (1) + workchain (1) + hash (32) + crc16 (2).
pub const FRIENDLY_ADDRESS_LENGTH: usize = 36;

/// Length of a user-friendly address once base64-encoded.
pub const FRIENDLY_ADDRESS_ENCODED_LENGTH: usize = 48;

/// Tag byte for bounceable user-friendly addresses.
pub const BOUNCEABLE_TAG: u8 = 0x11;

/// Tag byte for non-bounceable user-friendly addresses.
pub const NON_BOUNCEABLE_TAG: u8 = 0x51;

/// Flag OR-ed into the tag byte for testnet-only addresses.
pub const TEST_ONLY_FLAG: u8 = 0x80;

/// The basechain. Where every regular wallet lives.
pub const BASECHAIN: i8 = 0;

/// The masterchain. Validators, config, elector.
pub const MASTERCHAIN: i8 = -1;

// ---------------------------------------------------------------------------
// Retry Defaults
// ---------------------------------------------------------------------------

/// Default number of attempts for [`crate::retry::with_retry`].
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default constant delay between attempts. No exponential growth: public
/// TON endpoints rate-limit per second, so a flat delay is what they want.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);
