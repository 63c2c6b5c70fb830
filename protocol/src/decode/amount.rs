//! Value amount resolution and nanoton/TON conversion.
//!
//! All conversions are integer arithmetic on `u128`. A TON amount is never
//! routed through `f64`: 2^53 nanotons is only about nine million TON, and
//! wallets hold more than that.

use std::fmt;
use std::str::FromStr;

use super::DecodeError;
use crate::config::{NANOTONS_PER_TON, NANOTON_DECIMALS};
use crate::transaction::{Coins, MessageInfo, Transaction};

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Unit to express an amount in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// Display unit: a decimal string in TON.
    #[default]
    Ton,
    /// Smallest unit: an integer count of nanotons.
    Nano,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ton => write!(f, "ton"),
            Self::Nano => write!(f, "nano"),
        }
    }
}

impl FromStr for Currency {
    type Err = DecodeError;

    /// Accepts `ton` and `nano`, case-insensitively. Anything else is an
    /// [`DecodeError::UnknownCurrency`] naming the rejected value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ton" => Ok(Self::Ton),
            "nano" => Ok(Self::Nano),
            _ => Err(DecodeError::UnknownCurrency(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AmountOptions / TxAmount
// ---------------------------------------------------------------------------

/// Options for [`get_tx_value_amount`]. Defaults to TON as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountOptions {
    pub currency: Currency,
    /// With [`Currency::Nano`], return the integer itself instead of its
    /// decimal string. Ignored for TON.
    pub return_bigint: bool,
}

impl AmountOptions {
    /// TON as a decimal string.
    pub fn ton() -> Self {
        Self::default()
    }

    /// Nanotons, as an integer or as a decimal string.
    pub fn nano(return_bigint: bool) -> Self {
        Self {
            currency: Currency::Nano,
            return_bigint,
        }
    }

    /// Builds options from a currency name, e.g. one taken from user input.
    pub fn parse(currency: &str, return_bigint: bool) -> Result<Self, DecodeError> {
        Ok(Self {
            currency: currency.parse()?,
            return_bigint,
        })
    }
}

/// A resolved amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxAmount {
    /// Decimal string, either TON (`"0.05"`) or nanotons (`"50000000"`).
    Decimal(String),
    /// Integer nanotons.
    Nano(Coins),
}

impl fmt::Display for TxAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(s) => f.write_str(s),
            Self::Nano(v) => write!(f, "{}", v),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolves the value carried by a transaction's incoming message.
///
/// Fails with [`DecodeError::AmountUnavailable`] when there is no incoming
/// message, when it is not internal, or when its value is zero. The zero
/// case is deliberate: existing callers rely on zero-value transfers being
/// rejected here.
pub fn get_tx_value_amount(
    tx: &Transaction,
    options: AmountOptions,
) -> Result<TxAmount, DecodeError> {
    let value = match tx.in_message_info().and_then(MessageInfo::value) {
        Some(v) if v != 0 => v,
        _ => return Err(DecodeError::AmountUnavailable),
    };

    Ok(match options.currency {
        Currency::Ton => TxAmount::Decimal(from_nano(value)),
        Currency::Nano if options.return_bigint => TxAmount::Nano(value),
        Currency::Nano => TxAmount::Decimal(value.to_string()),
    })
}

/// Formats nanotons as a TON decimal string with no trailing zeros.
///
/// `50_000_000` → `"0.05"`, `1_000_000_000` → `"1"`, `1` → `"0.000000001"`.
pub fn from_nano(nano: Coins) -> String {
    let whole = nano / NANOTONS_PER_TON;
    let frac = nano % NANOTONS_PER_TON;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = NANOTON_DECIMALS as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parses a TON decimal string into nanotons.
///
/// Accepts `"1"`, `"0.05"`, `".5"` and `"12."`; at most nine fractional
/// digits. No signs, exponents or separators.
pub fn to_nano(ton: &str) -> Result<Coins, DecodeError> {
    let invalid = |reason: &str| DecodeError::InvalidAmount {
        value: ton.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = ton.trim();
    let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("only digits and a single '.' are allowed"));
    }
    if frac.len() > NANOTON_DECIMALS as usize {
        return Err(invalid("more than 9 fractional digits"));
    }

    let whole: Coins = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("amount too large"))?
    };
    let frac: Coins = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = NANOTON_DECIMALS as usize);
        padded.parse().map_err(|_| invalid("bad fraction"))?
    };

    whole
        .checked_mul(NANOTONS_PER_TON)
        .and_then(|n| n.checked_add(frac))
        .ok_or_else(|| invalid("amount too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::cell::Cell;
    use crate::transaction::{Message, TransactionBuilder};

    fn tx_with_value(value: Coins) -> Transaction {
        TransactionBuilder::new()
            .in_message(Message::internal(
                Address::new(0, [1; 32]),
                Address::new(0, [2; 32]),
                value,
                Cell::empty(),
            ))
            .build()
    }

    #[test]
    fn fifty_million_nano_in_every_form() {
        let tx = tx_with_value(50_000_000);
        assert_eq!(
            get_tx_value_amount(&tx, AmountOptions::nano(true)).unwrap(),
            TxAmount::Nano(50_000_000)
        );
        assert_eq!(
            get_tx_value_amount(&tx, AmountOptions::nano(false)).unwrap(),
            TxAmount::Decimal("50000000".into())
        );
        assert_eq!(
            get_tx_value_amount(&tx, AmountOptions::default()).unwrap(),
            TxAmount::Decimal("0.05".into())
        );
    }

    #[test]
    fn bigint_flag_is_ignored_for_ton() {
        let tx = tx_with_value(2_500_000_000);
        let opts = AmountOptions {
            currency: Currency::Ton,
            return_bigint: true,
        };
        assert_eq!(get_tx_value_amount(&tx, opts).unwrap().to_string(), "2.5");
    }

    #[test]
    fn zero_value_is_unavailable() {
        let tx = tx_with_value(0);
        assert_eq!(
            get_tx_value_amount(&tx, AmountOptions::ton()),
            Err(DecodeError::AmountUnavailable)
        );
    }

    #[test]
    fn missing_or_external_message_is_unavailable() {
        assert_eq!(
            get_tx_value_amount(&Transaction::default(), AmountOptions::ton()),
            Err(DecodeError::AmountUnavailable)
        );
        let ext = TransactionBuilder::new()
            .in_message(Message::external_in(Address::new(0, [2; 32]), Cell::empty()))
            .build();
        let err = get_tx_value_amount(&ext, AmountOptions::nano(true)).unwrap_err();
        assert!(err.to_string().contains("cannot get amount"));
    }

    #[test]
    fn unknown_currency_names_the_value() {
        let err = AmountOptions::parse("usd", false).unwrap_err();
        assert_eq!(err, DecodeError::UnknownCurrency("usd".into()));
        assert!(err.to_string().contains("usd"));
        assert_eq!("NANO".parse::<Currency>().unwrap(), Currency::Nano);
    }

    #[test]
    fn from_nano_formats_without_trailing_zeros() {
        assert_eq!(from_nano(0), "0");
        assert_eq!(from_nano(1), "0.000000001");
        assert_eq!(from_nano(1_000_000_000), "1");
        assert_eq!(from_nano(1_230_000_000), "1.23");
        assert_eq!(
            from_nano(u128::MAX),
            "340282366920938463463374607431.768211455"
        );
    }

    #[test]
    fn to_nano_parses_decimal_strings() {
        assert_eq!(to_nano("0.05").unwrap(), 50_000_000);
        assert_eq!(to_nano("1").unwrap(), 1_000_000_000);
        assert_eq!(to_nano(".5").unwrap(), 500_000_000);
        assert_eq!(to_nano("12.").unwrap(), 12_000_000_000);
        assert_eq!(to_nano(" 0.000000001 ").unwrap(), 1);
    }

    #[test]
    fn to_nano_rejects_bad_input() {
        for bad in ["", ".", "-1", "1e9", "1.2.3", "0.0000000001", "abc"] {
            assert!(
                matches!(to_nano(bad), Err(DecodeError::InvalidAmount { .. })),
                "accepted {bad:?}"
            );
        }
        assert!(to_nano("340282366920938463463374607432").is_err());
    }
}
