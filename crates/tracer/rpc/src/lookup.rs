use alloy_primitives::{B256, hex::FromHexError};
use std::{num::ParseIntError, str::FromStr};
use thiserror::Error;

/// How a `mev_rpc_block` argument addresses a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLookup {
    /// A decimal block number.
    Number(u64),
    /// A `0x`-prefixed block hash.
    Hash(B256),
}

/// A `mev_rpc_block` argument that addresses no block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockLookupError {
    /// The argument starts with `0x` but is not a 32 byte hash.
    #[error("invalid block hash {input:?}: {source}")]
    InvalidHash {
        /// The rejected argument.
        input: String,
        /// Why it was rejected.
        #[source]
        source: FromHexError,
    },
    /// The argument is not a decimal block number.
    #[error("invalid block number {input:?}: {source}")]
    InvalidNumber {
        /// The rejected argument.
        input: String,
        /// Why it was rejected.
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for BlockLookup {
    type Err = BlockLookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            return B256::from_str(s)
                .map(Self::Hash)
                .map_err(|source| BlockLookupError::InvalidHash { input: s.to_string(), source });
        }

        s.parse::<u64>()
            .map(Self::Number)
            .map_err(|source| BlockLookupError::InvalidNumber { input: s.to_string(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::number("21000001", BlockLookup::Number(21_000_001))]
    #[case::zero("0", BlockLookup::Number(0))]
    #[case::hash(
        "0x1111111111111111111111111111111111111111111111111111111111111111",
        BlockLookup::Hash(B256::repeat_byte(0x11))
    )]
    fn test_parse(#[case] input: &str, #[case] expected: BlockLookup) {
        assert_eq!(input.parse::<BlockLookup>().unwrap(), expected);
    }

    #[rstest]
    #[case::short_hash("0x1234")]
    #[case::bad_hash("0xzz11111111111111111111111111111111111111111111111111111111111111")]
    fn test_invalid_hash(#[case] input: &str) {
        assert!(matches!(
            input.parse::<BlockLookup>(),
            Err(BlockLookupError::InvalidHash { .. })
        ));
    }

    #[rstest]
    #[case::empty("")]
    #[case::negative("-1")]
    #[case::hex_without_prefix("1406f41")]
    #[case::uppercase_prefix("0X1406f41")]
    fn test_invalid_number(#[case] input: &str) {
        assert!(matches!(
            input.parse::<BlockLookup>(),
            Err(BlockLookupError::InvalidNumber { .. })
        ));
    }
}
