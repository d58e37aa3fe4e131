//! Parsing and serialization helpers for integer quantities.
//!
//! Node RPCs encode integers as hex strings, usually with a `0x` prefix but not
//! always. Values handed to API consumers are encoded as decimal strings.

use alloy_primitives::{U256, ruint::ParseError};
use thiserror::Error;

/// Errors raised while parsing a hex quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexQuantityError {
    /// The input had no digits.
    #[error("empty hex quantity")]
    Empty,
    /// The input contained non-hex characters or exceeded 256 bits.
    #[error("invalid hex quantity {input:?}: {source}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
    /// The quantity does not fit in a `u64`.
    #[error("hex quantity {0:?} does not fit in 64 bits")]
    Overflow(String),
}

/// Parses a hex encoded quantity with an optional `0x`/`0X` prefix.
pub fn parse_hex_quantity(input: &str) -> Result<U256, HexQuantityError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if digits.is_empty() {
        return Err(HexQuantityError::Empty);
    }

    U256::from_str_radix(digits, 16)
        .map_err(|source| HexQuantityError::Invalid { input: input.to_string(), source })
}

/// Parses a hex encoded quantity that must fit in a `u64`, such as a block number.
pub fn parse_hex_u64(input: &str) -> Result<u64, HexQuantityError> {
    let value = parse_hex_quantity(input)?;
    u64::try_from(value).map_err(|_| HexQuantityError::Overflow(input.to_string()))
}

/// Serde adapter encoding a [`U256`] as a base 10 string.
pub mod decimal {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serializes the value as a decimal string.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserializes a decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_str_radix(&raw, 10).map_err(D::Error::custom)
    }
}
