//! Token registry: the static list of tokens escrows may hold.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{ChainId, EthereumAddress, UnixTime};

/// A token known to the catalog.
///
/// Supplied externally and never mutated. Queried only by (symbol, chain id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub chain_id: ChainId,
    /// Contract address; absent for the chain's native asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<EthereumAddress>,
    pub decimals: u8,
    pub since_timestamp: UnixTime,
}

/// Ordered, read-only token list.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    /// Wrap a token list, keeping its order.
    ///
    /// A repeated (symbol, chain id) pair is accepted but logged: lookups
    /// resolve to the first occurrence.
    pub fn new(tokens: Vec<Token>) -> Self {
        {
            let mut seen = HashSet::with_capacity(tokens.len());
            for token in &tokens {
                if !seen.insert((token.symbol.as_str(), token.chain_id)) {
                    tracing::warn!(
                        symbol = %token.symbol,
                        chain_id = %token.chain_id,
                        "duplicate token in registry, later entry is unreachable by symbol"
                    );
                }
            }
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// All tokens on `chain_id`, in registry order.
    pub fn on_chain(&self, chain_id: ChainId) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.chain_id == chain_id)
    }

    /// The token with `symbol` on `chain_id`, if any.
    pub fn find(&self, symbol: &str, chain_id: ChainId) -> Option<&Token> {
        self.on_chain(chain_id).find(|t| t.symbol == symbol)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for TokenRegistry {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
