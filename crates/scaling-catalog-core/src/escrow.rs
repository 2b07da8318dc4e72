//! Escrow normalization: resolving an authored token specification into
//! concrete token records for one chain.

use serde::{Deserialize, Serialize};

use crate::chain::ChainRegistry;
use crate::error::{CoreError, Result};
use crate::token::{Token, TokenRegistry};
use crate::types::{ChainId, EthereumAddress, UnixTime};

/// Which tokens an escrow holds.
///
/// Authored either as the wildcard string `"*"` or as a list of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TokenSelectionRepr", into = "TokenSelectionRepr")]
pub enum TokenSelection {
    /// Every registry token on the escrow's chain.
    All,
    /// Exactly these symbols, in this order.
    Symbols(Vec<String>),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TokenSelectionRepr {
    Wildcard(String),
    Symbols(Vec<String>),
}

impl TryFrom<TokenSelectionRepr> for TokenSelection {
    type Error = String;

    fn try_from(repr: TokenSelectionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            TokenSelectionRepr::Wildcard(s) if s == "*" => Ok(TokenSelection::All),
            TokenSelectionRepr::Wildcard(s) => {
                Err(format!("expected \"*\" or a list of symbols, got {s:?}"))
            }
            TokenSelectionRepr::Symbols(symbols) => Ok(TokenSelection::Symbols(symbols)),
        }
    }
}

impl From<TokenSelection> for TokenSelectionRepr {
    fn from(selection: TokenSelection) -> Self {
        match selection {
            TokenSelection::All => TokenSelectionRepr::Wildcard("*".to_string()),
            TokenSelection::Symbols(symbols) => TokenSelectionRepr::Symbols(symbols),
        }
    }
}

/// Where escrowed value originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EscrowSource {
    Canonical,
    External,
    Native,
}

/// The bridge an escrow belongs to, when it is not the project's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowBridge {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// An escrow as authored in a project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEscrow {
    pub address: EthereumAddress,
    /// Chain name, resolved through the [`ChainRegistry`].
    pub chain: String,
    pub since_timestamp: UnixTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_timestamp: Option<UnixTime>,
    pub tokens: TokenSelection,
    /// Only consulted for [`TokenSelection::All`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_total: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EscrowSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<EscrowBridge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_historical: Option<bool>,
}

/// An escrow with its token set resolved against the registry.
///
/// Every token in `tokens` exists in the registry under the chain id `chain`
/// resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEscrow {
    pub address: EthereumAddress,
    pub since_timestamp: UnixTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_timestamp: Option<UnixTime>,
    pub tokens: Vec<Token>,
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_total: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EscrowSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<EscrowBridge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_historical: Option<bool>,
}

/// Resolve the token specification of `raw` on `chain_id`.
///
/// - [`TokenSelection::All`]: every registry token on the chain whose symbol is
///   not excluded, in registry order.
/// - [`TokenSelection::Symbols`]: one token per symbol, in input order.
///   Exclusions are ignored. A symbol missing on the chain fails with
///   [`CoreError::TokenNotFound`].
pub fn normalize_tokens(
    raw: &RawEscrow,
    chain_id: ChainId,
    registry: &TokenRegistry,
) -> Result<Vec<Token>> {
    match &raw.tokens {
        TokenSelection::All => Ok(registry
            .on_chain(chain_id)
            .filter(|t| !raw.excluded_tokens.contains(&t.symbol))
            .cloned()
            .collect()),
        TokenSelection::Symbols(symbols) => symbols
            .iter()
            .map(|symbol| {
                registry
                    .find(symbol, chain_id)
                    .cloned()
                    .ok_or_else(|| CoreError::TokenNotFound {
                        symbol: symbol.clone(),
                        chain: raw.chain.clone(),
                        escrow: raw.address,
                    })
            })
            .collect(),
    }
}

/// Resolve `raw` into a [`ProjectEscrow`].
///
/// The chain name is resolved through `chains`; all fields other than the
/// token set pass through unchanged.
pub fn resolve_escrow(
    raw: &RawEscrow,
    chains: &ChainRegistry,
    tokens: &TokenRegistry,
) -> Result<ProjectEscrow> {
    let chain_id = chains.to_chain_id(&raw.chain)?;
    let resolved = normalize_tokens(raw, chain_id, tokens)?;

    Ok(ProjectEscrow {
        address: raw.address,
        since_timestamp: raw.since_timestamp,
        until_timestamp: raw.until_timestamp,
        tokens: resolved,
        chain: raw.chain.clone(),
        include_in_total: raw.include_in_total,
        source: raw.source,
        bridge: raw.bridge.clone(),
        is_historical: raw.is_historical,
    })
}
