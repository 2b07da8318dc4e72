//! # Scaling Catalog Core
//!
//! Pure primitives for normalizing authored scaling-project descriptors:
//! chains, tokens, escrows, and tracked transactions.
//!
//! This crate contains no I/O, no storage, no networking. Everything is
//! synchronous computation over in-memory data built once at startup.
//!
//! ## Key Types
//!
//! - [`ChainRegistry`] - Bidirectional chain name <-> chain id table
//! - [`TokenRegistry`] - Read-only token list queried by (symbol, chain id)
//! - [`ProjectEscrow`] - An escrow with its token set resolved
//! - [`TrackedTxConfigEntry`] - A flat tracked transaction record
//! - [`TrackedTxId`] - Content-addressed identifier (Blake3 hash)
//!
//! ## Canonicalization
//!
//! Tracked transaction ids hash a deterministic CBOR encoding of the entry.
//! See [`canonical`] module.

pub mod canonical;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod escrow;
pub mod token;
pub mod tracked_tx;
pub mod types;
pub mod validation;

pub use canonical::{canonical_entry_bytes, tracked_tx_id, TRACKED_TX_ID_DOMAIN};
pub use chain::{ChainDescriptor, ChainRegistry};
pub use crypto::Blake3Hash;
pub use error::{CoreError, ParseHexError, ValidationError};
pub use escrow::{
    normalize_tokens, resolve_escrow, EscrowBridge, EscrowSource, ProjectEscrow, RawEscrow,
    TokenSelection,
};
pub use token::{Token, TokenRegistry};
pub use tracked_tx::{
    build_tracked_txs, expand_declaration, QueryFormula, TrackedTxConfigEntry,
    TrackedTxDeclaration, TrackedTxParams, TrackedTxQuery, TrackedTxSubtype, TrackedTxType,
    TrackedTxUse, DEFAULT_COST_MULTIPLIER, SHARP_SUBMISSION_ADDRESS, SHARP_SUBMISSION_SELECTOR,
};
pub use types::{ChainId, EthereumAddress, FunctionSelector, ProjectId, TrackedTxId, UnixTime};
pub use validation::{validate_declaration, validate_entry};
