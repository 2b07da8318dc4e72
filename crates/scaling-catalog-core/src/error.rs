//! Error types for the scaling catalog core.

use thiserror::Error;

use crate::types::{ChainId, EthereumAddress, TrackedTxId, UnixTime};

/// Core errors raised while normalizing authored data.
///
/// Every variant is an authoring defect. None of them are transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("unknown chain: {0}")]
    UnknownChain(String),

    #[error("duplicate chain in registry: {name} ({chain_id})")]
    DuplicateChainName { name: String, chain_id: ChainId },

    #[error("token with symbol {symbol} not found on {chain} @ {escrow}")]
    TokenNotFound {
        symbol: String,
        chain: String,
        escrow: EthereumAddress,
    },

    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Validation errors for tracked transaction declarations and entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("tracked transaction declaration has no uses")]
    EmptyUses,

    #[error("invalid time window: until {until} is not after since {since}")]
    InvalidTimeWindow { since: UnixTime, until: UnixTime },

    #[error("invalid cost multiplier: {0}")]
    InvalidCostMultiplier(f64),

    #[error("cost multiplier presence does not match type for entry {0}")]
    CostMultiplierMismatch(TrackedTxId),

    #[error("tracked transaction id mismatch: expected {expected}, got {got}")]
    IdMismatch {
        expected: TrackedTxId,
        got: TrackedTxId,
    },

    #[error("structural error: {0}")]
    StructuralError(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Encoding(msg) => ValidationError::StructuralError(msg),
            other => ValidationError::StructuralError(other.to_string()),
        }
    }
}

/// Errors parsing `0x`-prefixed hex values such as addresses and selectors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParseHexError {
    #[error("missing 0x prefix")]
    MissingPrefix,

    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
