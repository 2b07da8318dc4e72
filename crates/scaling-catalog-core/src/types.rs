//! Strong type definitions for the scaling catalog.
//!
//! Identifiers and on-chain values are newtypes to prevent misuse at compile
//! time. Hex-valued types serialize as strings, the way they are authored.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseHexError;

macro_rules! impl_string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Parse a `0x`-prefixed hex string of exactly `N` bytes.
fn parse_prefixed_hex<const N: usize>(s: &str) -> Result<[u8; N], ParseHexError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or(ParseHexError::MissingPrefix)?;
    let bytes = hex::decode(digits)?;
    if bytes.len() != N {
        return Err(ParseHexError::InvalidLength {
            expected: N,
            got: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// Identifier of a scaling project, e.g. `arbitrum`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectId({})", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Numeric chain identifier (EIP-155).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const ETHEREUM: Self = Self(1);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTime(i64);

impl UnixTime {
    pub const fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn to_seconds(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 20-byte Ethereum account address.
///
/// Parsing is case-insensitive; display is lowercase with a `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EthereumAddress(pub [u8; 20]);

impl EthereumAddress {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for EthereumAddress {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed_hex::<20>(s).map(Self)
    }
}

impl fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthereumAddress({})", self)
    }
}

impl_string_serde!(EthereumAddress);

/// A 4-byte function selector, e.g. `0x8f111f3c`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionSelector(pub [u8; 4]);

impl FunctionSelector {
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl FromStr for FunctionSelector {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed_hex::<4>(s).map(Self)
    }
}

impl fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionSelector({})", self)
    }
}

impl_string_serde!(FunctionSelector);

/// A 32-byte tracked transaction identifier.
///
/// Computed as Blake3(domain || canonical_bytes(entry)), so two entries with
/// the same content always share an id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackedTxId(pub [u8; 32]);

impl TrackedTxId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from an unprefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self, ParseHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(ParseHexError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Placeholder used before the id of an entry has been derived.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl FromStr for TrackedTxId {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for TrackedTxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackedTxId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for TrackedTxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for TrackedTxId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for TrackedTxId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl_string_serde!(TrackedTxId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_is_case_insensitive() {
        let lower: EthereumAddress = "0x8315177ab297ba92a06054ce80a67ed4dbd7ed3a".parse().unwrap();
        let mixed: EthereumAddress = "0x8315177aB297bA92A06054cE80a67Ed4DBd7ed3a".parse().unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(mixed.to_string(), "0x8315177ab297ba92a06054ce80a67ed4dbd7ed3a");
    }

    #[test]
    fn test_address_requires_prefix() {
        let result = "8315177ab297ba92a06054ce80a67ed4dbd7ed3a".parse::<EthereumAddress>();
        assert_eq!(result, Err(ParseHexError::MissingPrefix));
    }

    #[test]
    fn test_selector_wrong_length() {
        let result = "0x8f111f".parse::<FunctionSelector>();
        assert_eq!(
            result,
            Err(ParseHexError::InvalidLength {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_address_invalid_digit() {
        let result = "0x8315177ab297ba92a06054ce80a67ed4dbd7ed3g".parse::<EthereumAddress>();
        assert!(matches!(result, Err(ParseHexError::InvalidHex(_))));
        assert_eq!(
            result.unwrap_err(),
            ParseHexError::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: 'g', index: 39 })
        );
    }

    #[test]
    fn test_tracked_tx_id_hex_roundtrip() {
        let id = TrackedTxId::from_bytes([0x42; 32]);
        let recovered = TrackedTxId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_tracked_tx_id_debug() {
        let id = TrackedTxId::from_bytes([0xab; 32]);
        assert_eq!(format!("{:?}", id), "TrackedTxId(abababababababab)");
    }

    #[test]
    fn test_serde_as_strings() {
        let selector: FunctionSelector = "0x8f111f3c".parse().unwrap();
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, "\"0x8f111f3c\"");

        let back: FunctionSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);

        let bad = serde_json::from_str::<EthereumAddress>("\"0x1234\"");
        assert!(bad.is_err());
    }
}
