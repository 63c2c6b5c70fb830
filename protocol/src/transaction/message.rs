//! Messages and their info headers.
//!
//! A message is an info header plus a body cell. The header comes in three
//! shapes, and [`MessageInfo`] is a closed enum over them so every decoder
//! has to handle all three explicitly.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::address::{Address, ExternalAddress};
use crate::cell::Cell;

/// Amount in nanotons. Coins are a `VarUInteger 16` on the wire, which
/// always fits in 120 bits.
pub type Coins = u128;

// ---------------------------------------------------------------------------
// MessageDirection
// ---------------------------------------------------------------------------

/// Which of the three message kinds a header belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageDirection {
    /// Contract-to-contract message; carries value.
    Internal,
    /// Inbound message from outside the chain (e.g. a wallet signature).
    ExternalIn,
    /// Outbound log-style message to outside the chain.
    ExternalOut,
}

impl fmt::Display for MessageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::ExternalIn => write!(f, "external-in"),
            Self::ExternalOut => write!(f, "external-out"),
        }
    }
}

// ---------------------------------------------------------------------------
// Info headers
// ---------------------------------------------------------------------------

/// Header of an internal message (`int_msg_info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalMessageInfo {
    pub src: Address,
    pub dest: Address,
    /// Attached value in nanotons.
    #[serde(with = "coins_serde")]
    pub value: Coins,
    #[serde(default)]
    pub bounce: bool,
    #[serde(default)]
    pub bounced: bool,
    #[serde(default = "default_true")]
    pub ihr_disabled: bool,
    #[serde(default, with = "coins_serde")]
    pub ihr_fee: Coins,
    #[serde(default, with = "coins_serde")]
    pub fwd_fee: Coins,
    #[serde(default)]
    pub created_lt: u64,
    #[serde(default)]
    pub created_at: u32,
}

/// Header of an inbound external message (`ext_in_msg_info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalInMessageInfo {
    #[serde(default)]
    pub src: Option<ExternalAddress>,
    pub dest: Address,
    #[serde(default, with = "coins_serde")]
    pub import_fee: Coins,
}

/// Header of an outbound external message (`ext_out_msg_info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalOutMessageInfo {
    #[serde(default)]
    pub dest: Option<ExternalAddress>,
    #[serde(default)]
    pub created_lt: u64,
    #[serde(default)]
    pub created_at: u32,
}

fn default_true() -> bool {
    true
}

/// Coins travel as decimal strings in JSON (API responses do the same,
/// since JavaScript numbers lose precision past 2^53). Plain integers are
/// accepted on input.
mod coins_serde {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::Coins;

    pub fn serialize<S: Serializer>(value: &Coins, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coins, D::Error> {
        deserializer.deserialize_any(CoinsVisitor)
    }

    struct CoinsVisitor;

    impl<'de> Visitor<'de> for CoinsVisitor {
        type Value = Coins;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Coins, E> {
            Ok(Coins::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Coins, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Coins, E> {
            u64::try_from(v)
                .map(Coins::from)
                .map_err(|_| E::custom(format!("negative coin amount: {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Coins, E> {
            v.parse::<Coins>()
                .map_err(|_| E::custom(format!("invalid coin amount: {v:?}")))
        }
    }
}

/// Message header, tagged by direction.
///
/// In JSON the tag is a `type` field: `"internal"`, `"external-in"` or
/// `"external-out"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessageInfo {
    Internal(InternalMessageInfo),
    ExternalIn(ExternalInMessageInfo),
    ExternalOut(ExternalOutMessageInfo),
}

impl MessageInfo {
    /// Direction of this header.
    pub fn direction(&self) -> MessageDirection {
        match self {
            Self::Internal(_) => MessageDirection::Internal,
            Self::ExternalIn(_) => MessageDirection::ExternalIn,
            Self::ExternalOut(_) => MessageDirection::ExternalOut,
        }
    }

    /// Source address, present only on internal messages.
    pub fn src(&self) -> Option<&Address> {
        match self {
            Self::Internal(info) => Some(&info.src),
            Self::ExternalIn(_) | Self::ExternalOut(_) => None,
        }
    }

    /// Attached value, present only on internal messages.
    pub fn value(&self) -> Option<Coins> {
        match self {
            Self::Internal(info) => Some(info.value),
            Self::ExternalIn(_) | Self::ExternalOut(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A message: header plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub info: MessageInfo,
    #[serde(default)]
    pub body: Arc<Cell>,
}

impl Message {
    /// Creates a message from a header and body.
    pub fn new(info: MessageInfo, body: impl Into<Arc<Cell>>) -> Self {
        Self {
            info,
            body: body.into(),
        }
    }

    /// Internal message with default flags (bounce off, IHR disabled, no fees).
    pub fn internal(src: Address, dest: Address, value: Coins, body: impl Into<Arc<Cell>>) -> Self {
        Self::new(
            MessageInfo::Internal(InternalMessageInfo {
                src,
                dest,
                value,
                bounce: false,
                bounced: false,
                ihr_disabled: true,
                ihr_fee: 0,
                fwd_fee: 0,
                created_lt: 0,
                created_at: 0,
            }),
            body,
        )
    }

    /// Inbound external message without a source.
    pub fn external_in(dest: Address, body: impl Into<Arc<Cell>>) -> Self {
        Self::new(
            MessageInfo::ExternalIn(ExternalInMessageInfo {
                src: None,
                dest,
                import_fee: 0,
            }),
            body,
        )
    }

    /// Outbound external message without a destination.
    pub fn external_out(body: impl Into<Arc<Cell>>) -> Self {
        Self::new(
            MessageInfo::ExternalOut(ExternalOutMessageInfo {
                dest: None,
                created_lt: 0,
                created_at: 0,
            }),
            body,
        )
    }
}
