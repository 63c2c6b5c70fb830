//! # Addresses
//!
//! TON has two ways of writing the same internal address:
//!
//! - **raw**: `<workchain>:<64 hex chars>`, e.g. `0:83df...a1c4`. This is the
//!   canonical form and what [`Address`] prints with `Display`.
//! - **user-friendly**: 48 base64url characters wrapping
//!   `[tag, workchain, hash(32), crc16(2)]`, where the tag carries the
//!   bounceable and test-only flags.
//!
//! [`Address`] parses both. External addresses (the optional source of an
//! external-in message) are a different beast and get their own type.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    ADDRESS_HASH_LENGTH, BASECHAIN, BOUNCEABLE_TAG, FRIENDLY_ADDRESS_ENCODED_LENGTH,
    FRIENDLY_ADDRESS_LENGTH, MASTERCHAIN, NON_BOUNCEABLE_TAG, TEST_ONLY_FLAG,
};

// ---------------------------------------------------------------------------
// AddressError
// ---------------------------------------------------------------------------

/// Errors from parsing an address string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Raw form without a `workchain:hash` separator, or with a bad part.
    #[error("malformed raw address: {0}")]
    MalformedRaw(String),

    /// The workchain id does not fit in an `i8`.
    #[error("invalid workchain: {0}")]
    InvalidWorkchain(String),

    /// The account hash is not 32 bytes of hex.
    #[error("invalid account hash: {0}")]
    InvalidHash(String),

    /// A user-friendly address that does not decode to 36 bytes.
    #[error("malformed friendly address: {0}")]
    MalformedFriendly(String),

    /// Unknown tag byte in a user-friendly address.
    #[error("unknown address tag: {0:#04x}")]
    UnknownTag(u8),

    /// The embedded checksum does not match.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An internal (`addr_std`) address: workchain plus 256-bit account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    /// Workchain id. `0` for the basechain, `-1` for the masterchain.
    pub workchain: i8,
    /// Account id within the workchain.
    pub hash: [u8; ADDRESS_HASH_LENGTH],
}

/// Flags carried by a user-friendly address string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendlyFlags {
    /// Whether funds sent to this address should bounce on failure.
    pub bounceable: bool,
    /// Whether the address is meant for testnet only.
    pub test_only: bool,
}

impl Address {
    /// Creates an address from its parts.
    pub fn new(workchain: i8, hash: [u8; ADDRESS_HASH_LENGTH]) -> Self {
        Self { workchain, hash }
    }

    /// `true` for accounts on the masterchain (workchain `-1`).
    pub fn is_masterchain(&self) -> bool {
        self.workchain == MASTERCHAIN
    }

    /// Human name of the workchain: `basechain`, `masterchain`, or the id.
    pub fn workchain_name(&self) -> String {
        match self.workchain {
            BASECHAIN => "basechain".to_string(),
            MASTERCHAIN => "masterchain".to_string(),
            other => other.to_string(),
        }
    }

    /// Canonical raw form: `workchain:hex(hash)`.
    pub fn to_raw_string(&self) -> String {
        self.to_string()
    }

    /// User-friendly base64url form.
    pub fn to_friendly(&self, flags: FriendlyFlags) -> String {
        let mut tag = if flags.bounceable {
            BOUNCEABLE_TAG
        } else {
            NON_BOUNCEABLE_TAG
        };
        if flags.test_only {
            tag |= TEST_ONLY_FLAG;
        }

        let mut buf = Vec::with_capacity(FRIENDLY_ADDRESS_LENGTH);
        buf.push(tag);
        buf.push(self.workchain as u8);
        buf.extend_from_slice(&self.hash);
        let crc = crc16(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        URL_SAFE.encode(buf)
    }

    /// Parses the raw `workchain:hex` form.
    pub fn parse_raw(s: &str) -> Result<Self, AddressError> {
        let (wc, hash_hex) = s
            .split_once(':')
            .ok_or_else(|| AddressError::MalformedRaw(s.to_string()))?;
        let workchain = wc
            .parse::<i8>()
            .map_err(|_| AddressError::InvalidWorkchain(wc.to_string()))?;
        let bytes =
            hex::decode(hash_hex).map_err(|_| AddressError::InvalidHash(hash_hex.to_string()))?;
        let hash: [u8; ADDRESS_HASH_LENGTH] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidHash(hash_hex.to_string()))?;
        Ok(Self { workchain, hash })
    }

    /// Parses a user-friendly address, returning the flags it carried.
    ///
    /// Both the url-safe and the standard base64 alphabets are accepted.
    pub fn parse_friendly(s: &str) -> Result<(Self, FriendlyFlags), AddressError> {
        if s.len() != FRIENDLY_ADDRESS_ENCODED_LENGTH {
            return Err(AddressError::MalformedFriendly(s.to_string()));
        }
        let normalized = s.replace('+', "-").replace('/', "_");
        let bytes = URL_SAFE
            .decode(normalized)
            .map_err(|_| AddressError::MalformedFriendly(s.to_string()))?;
        if bytes.len() != FRIENDLY_ADDRESS_LENGTH {
            return Err(AddressError::MalformedFriendly(s.to_string()));
        }

        let (body, checksum) = bytes.split_at(FRIENDLY_ADDRESS_LENGTH - 2);
        if crc16(body).to_be_bytes() != checksum {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut tag = body[0];
        let test_only = tag & TEST_ONLY_FLAG != 0;
        tag &= !TEST_ONLY_FLAG;
        let bounceable = match tag {
            BOUNCEABLE_TAG => true,
            NON_BOUNCEABLE_TAG => false,
            other => return Err(AddressError::UnknownTag(other)),
        };

        let mut hash = [0u8; ADDRESS_HASH_LENGTH];
        hash.copy_from_slice(&body[2..]);
        Ok((
            Self {
                workchain: body[1] as i8,
                hash,
            },
            FriendlyFlags {
                bounceable,
                test_only,
            },
        ))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            Self::parse_raw(s)
        } else {
            Self::parse_friendly(s).map(|(addr, _)| addr)
        }
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ExternalAddress
// ---------------------------------------------------------------------------

/// An `addr_extern` value: an arbitrary bit string naming something
/// outside the blockchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalAddress {
    /// Significant bit length of `value`.
    pub bits: u16,
    /// Payload bytes, MSB-first.
    #[serde(with = "hex::serde")]
    pub value: Vec<u8>,
}

impl fmt::Display for ExternalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "External<{}:{}>", self.bits, hex::encode(&self.value))
    }
}

/// CRC-16/XMODEM (poly 0x1021, init 0), as used by friendly addresses.
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
