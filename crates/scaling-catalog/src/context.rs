//! The catalog context: registries built once at startup.

use scaling_catalog_core::{ChainDescriptor, ChainRegistry, Token, TokenRegistry};

use crate::error::Result;
use crate::loader;

/// Immutable registries threaded into every assembly.
///
/// Built exactly once; afterwards it is only read, so a shared reference can
/// be handed to any number of threads.
#[derive(Debug, Clone)]
pub struct CatalogContext {
    chains: ChainRegistry,
    tokens: TokenRegistry,
}

impl CatalogContext {
    /// Build the chain table and wrap the token list.
    ///
    /// Fails if the chain list contains a duplicate name or id. Tokens on
    /// chains missing from the table are kept, but logged.
    pub fn new(chains: Vec<ChainDescriptor>, tokens: Vec<Token>) -> Result<Self> {
        let chains = ChainRegistry::build(chains)?;

        for token in &tokens {
            if !chains.contains_id(token.chain_id) {
                tracing::warn!(
                    symbol = %token.symbol,
                    chain_id = %token.chain_id,
                    "token references a chain missing from the chain registry"
                );
            }
        }

        let tokens = TokenRegistry::new(tokens);
        tracing::debug!(
            chains = chains.len(),
            tokens = tokens.len(),
            "catalog context built"
        );

        Ok(Self { chains, tokens })
    }

    /// Build from JSON documents: an array of chains and an array of tokens.
    pub fn from_json(chains_json: &str, tokens_json: &str) -> Result<Self> {
        Self::new(
            loader::parse_chains(chains_json)?,
            loader::parse_tokens(tokens_json)?,
        )
    }

    pub fn chains(&self) -> &ChainRegistry {
        &self.chains
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }
}
