//! Project assembly: one entry point per project kind.
//!
//! Every entry point is total on well-formed descriptors and fails on the
//! first escrow that references an unregistered chain or an unresolvable
//! token symbol. Errors are attributed to the descriptor's project id.
//!
//! Tracked transaction declarations are expanded as authored. Structural
//! checks on them belong to [`Catalog`](crate::Catalog), which runs them when
//! `validate_entries` is set.

use scaling_catalog_core::{
    build_tracked_txs, resolve_escrow, ProjectEscrow, ProjectId, RawEscrow, TrackedTxConfigEntry,
    TrackedTxDeclaration,
};

use crate::context::CatalogContext;
use crate::descriptor::{BridgeDescriptor, Layer2Descriptor, Layer3Descriptor};
use crate::error::{CatalogError, Result};
use crate::project::{BridgeProject, Layer2Project, Layer3Project, Project};

/// Assemble a layer2 project.
///
/// Tracked transactions are expanded only when declared: an absent list stays
/// absent rather than becoming empty. A `"coming soon"` finality is dropped.
pub fn layer2_to_project(ctx: &CatalogContext, layer2: &Layer2Descriptor) -> Result<Project> {
    let config = &layer2.config;
    let attribute = |e| CatalogError::in_project(&layer2.id, e);

    let escrows = map_escrows(ctx, &config.escrows).map_err(attribute)?;
    let tracked_txs_config = config
        .tracked_txs
        .as_deref()
        .map(|declarations| map_tracked_txs(&layer2.id, declarations))
        .transpose()
        .map_err(attribute)?;
    let finality_config = config
        .finality
        .as_ref()
        .and_then(|f| f.configured())
        .cloned();

    Ok(Project::Layer2(Layer2Project {
        project_id: layer2.id.clone(),
        slug: layer2.display.slug.clone(),
        is_upcoming: layer2.is_upcoming,
        is_archived: layer2.is_archived,
        escrows,
        associated_tokens: config.associated_tokens.clone(),
        transaction_api: config.transaction_api.clone(),
        tracked_txs_config,
        liveness_config: config.liveness.clone(),
        finality_config,
    }))
}

/// Assemble a bridge project: escrows and associated tokens only.
pub fn bridge_to_project(ctx: &CatalogContext, bridge: &BridgeDescriptor) -> Result<Project> {
    let escrows = map_escrows(ctx, &bridge.config.escrows)
        .map_err(|e| CatalogError::in_project(&bridge.id, e))?;

    Ok(Project::Bridge(BridgeProject {
        project_id: bridge.id.clone(),
        slug: bridge.display.slug.clone(),
        escrows,
        associated_tokens: bridge.config.associated_tokens.clone(),
    }))
}

/// Assemble a layer3 project: like a bridge, plus the upcoming flag.
pub fn layer3_to_project(ctx: &CatalogContext, layer3: &Layer3Descriptor) -> Result<Project> {
    let escrows = map_escrows(ctx, &layer3.config.escrows)
        .map_err(|e| CatalogError::in_project(&layer3.id, e))?;

    Ok(Project::Layer3(Layer3Project {
        project_id: layer3.id.clone(),
        slug: layer3.display.slug.clone(),
        is_upcoming: layer3.is_upcoming,
        escrows,
        associated_tokens: layer3.config.associated_tokens.clone(),
    }))
}

fn map_escrows(ctx: &CatalogContext, escrows: &[RawEscrow]) -> Result<Vec<ProjectEscrow>> {
    escrows
        .iter()
        .map(|escrow| {
            resolve_escrow(escrow, ctx.chains(), ctx.tokens()).map_err(CatalogError::from)
        })
        .collect()
}

fn map_tracked_txs(
    project_id: &ProjectId,
    declarations: &[TrackedTxDeclaration],
) -> Result<Vec<TrackedTxConfigEntry>> {
    Ok(build_tracked_txs(project_id, declarations)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::descriptor::{
        AuthoredFinality, EscrowConfig, FinalityConfig, FinalityMethod, Layer2Config,
        LivenessConfig, ProjectDisplay, StateUpdateMode,
    };
    use scaling_catalog_core::{
        ChainDescriptor, ChainId, CoreError, EthereumAddress, FunctionSelector, QueryFormula,
        Token, TokenSelection, TrackedTxQuery, TrackedTxSubtype, TrackedTxType, TrackedTxUse,
        UnixTime,
    };

    fn token(symbol: &str, chain_id: u64) -> Token {
        Token {
            symbol: symbol.into(),
            name: symbol.into(),
            chain_id: ChainId(chain_id),
            address: None,
            decimals: 18,
            since_timestamp: UnixTime::new(0),
        }
    }

    fn ctx() -> CatalogContext {
        CatalogContext::new(
            vec![
                ChainDescriptor::new("ethereum", ChainId(1)),
                ChainDescriptor::new("arbitrum", ChainId(42161)),
            ],
            vec![token("ETH", 1), token("DAI", 1), token("USDC", 1), token("ARB", 42161)],
        )
        .unwrap()
    }

    fn display(slug: &str) -> ProjectDisplay {
        ProjectDisplay {
            name: slug.to_uppercase(),
            slug: slug.into(),
            description: None,
        }
    }

    fn escrow(chain: &str, tokens: TokenSelection) -> RawEscrow {
        RawEscrow {
            address: EthereumAddress::from_bytes([0x83; 20]),
            chain: chain.into(),
            since_timestamp: UnixTime::new(1622243344),
            until_timestamp: None,
            tokens,
            excluded_tokens: vec![],
            include_in_total: None,
            source: None,
            bridge: None,
            is_historical: None,
        }
    }

    fn declaration() -> TrackedTxDeclaration {
        TrackedTxDeclaration {
            uses: vec![
                TrackedTxUse::new(TrackedTxType::Liveness, TrackedTxSubtype::BatchSubmissions),
                TrackedTxUse::new(TrackedTxType::L2Costs, TrackedTxSubtype::BatchSubmissions),
            ],
            query: TrackedTxQuery {
                formula: QueryFormula::FunctionCall {
                    address: EthereumAddress::from_bytes([0x1c; 20]),
                    selector: FunctionSelector::from_bytes([0x8f, 0x11, 0x1f, 0x3c]),
                    function_signature: None,
                },
                since_timestamp: UnixTime::new(1661457944),
                until_timestamp: None,
            },
            cost_multiplier: None,
        }
    }

    fn layer2() -> Layer2Descriptor {
        Layer2Descriptor {
            id: ProjectId::new("arbitrum"),
            display: display("arbitrum"),
            is_upcoming: None,
            is_archived: Some(false),
            config: Layer2Config {
                escrows: vec![escrow("ethereum", TokenSelection::All)],
                associated_tokens: Some(vec!["ARB".into()]),
                transaction_api: None,
                tracked_txs: Some(vec![declaration()]),
                liveness: Some(LivenessConfig::default()),
                finality: Some(AuthoredFinality::Configured(FinalityConfig {
                    method: FinalityMethod::Arbitrum,
                    min_timestamp: UnixTime::new(1710427823),
                    lag: 0,
                    state_update: StateUpdateMode::Disabled,
                })),
            },
        }
    }

    #[test]
    fn test_layer2_full() {
        let project = layer2_to_project(&ctx(), &layer2()).unwrap();
        let p = project.as_layer2().unwrap();
        assert_eq!(p.slug, "arbitrum");
        assert_eq!(p.escrows[0].tokens.len(), 3);
        assert_eq!(p.tracked_txs_config.as_ref().unwrap().len(), 2);
        assert!(p.finality_config.is_some());
        assert!(p.liveness_config.is_some());
        assert_eq!(p.is_archived, Some(false));
    }

    #[test]
    fn test_layer2_absent_tracked_txs_stay_absent() {
        let mut d = layer2();
        d.config.tracked_txs = None;
        let project = layer2_to_project(&ctx(), &d).unwrap();
        assert!(project.tracked_txs_config().is_none());

        d.config.tracked_txs = Some(vec![]);
        let project = layer2_to_project(&ctx(), &d).unwrap();
        assert_eq!(project.tracked_txs_config(), Some(&[][..]));
    }

    #[test]
    fn test_layer2_coming_soon_finality_omitted() {
        let mut d = layer2();
        d.config.finality = Some(AuthoredFinality::ComingSoon);
        let project = layer2_to_project(&ctx(), &d).unwrap();
        assert!(project.as_layer2().unwrap().finality_config.is_none());
    }

    #[test]
    fn test_layer2_declarations_expanded_as_authored() {
        let mut d = layer2();
        let mut empty = declaration();
        empty.uses.clear();
        let mut zero = declaration();
        zero.cost_multiplier = Some(0.0);
        zero.query.until_timestamp = Some(zero.query.since_timestamp);
        d.config.tracked_txs = Some(vec![empty, zero]);

        let project = layer2_to_project(&ctx(), &d).unwrap();
        let entries = project.tracked_txs_config().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].cost_multiplier, Some(0.0));
        assert_eq!(entries[1].until_timestamp, Some(entries[1].since_timestamp));
    }

    #[test]
    fn test_bridge_has_only_escrows() {
        let bridge = BridgeDescriptor {
            id: ProjectId::new("hop"),
            display: display("hop"),
            config: EscrowConfig {
                escrows: vec![escrow(
                    "ethereum",
                    TokenSelection::Symbols(vec!["USDC".into(), "ETH".into()]),
                )],
                associated_tokens: Some(vec!["HOP".into()]),
            },
        };
        let project = bridge_to_project(&ctx(), &bridge).unwrap();
        assert!(matches!(project, Project::Bridge(_)));
        assert!(project.tracked_txs_config().is_none());
        let symbols: Vec<_> = project.escrows()[0]
            .tokens
            .iter()
            .map(|t| t.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["USDC", "ETH"]);
        assert_eq!(project.associated_tokens(), Some(&["HOP".to_string()][..]));
    }

    #[test]
    fn test_layer3_upcoming() {
        let layer3 = Layer3Descriptor {
            id: ProjectId::new("xai"),
            display: display("xai"),
            is_upcoming: Some(true),
            config: EscrowConfig {
                escrows: vec![escrow("arbitrum", TokenSelection::Symbols(vec!["ARB".into()]))],
                associated_tokens: None,
            },
        };
        let project = layer3_to_project(&ctx(), &layer3).unwrap();
        match project {
            Project::Layer3(p) => {
                assert_eq!(p.is_upcoming, Some(true));
                assert_eq!(p.escrows[0].tokens[0].chain_id, ChainId(42161));
            }
            other => panic!("expected layer3, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_chain_attributed_to_project() {
        let layer3 = Layer3Descriptor {
            id: ProjectId::new("orphan"),
            display: display("orphan"),
            is_upcoming: None,
            config: EscrowConfig {
                escrows: vec![escrow("fantom", TokenSelection::All)],
                associated_tokens: None,
            },
        };
        let err = layer3_to_project(&ctx(), &layer3).unwrap_err();
        assert_eq!(err.project_id().map(ProjectId::as_str), Some("orphan"));
        assert!(matches!(
            err.root(),
            CatalogError::Core(CoreError::UnknownChain(name)) if name == "fantom"
        ));
    }

    #[test]
    fn test_missing_token_attributed_to_project() {
        let mut d = layer2();
        d.config.escrows = vec![escrow("ethereum", TokenSelection::Symbols(vec!["ARB".into()]))];
        let err = layer2_to_project(&ctx(), &d).unwrap_err();
        assert!(matches!(
            err.root(),
            CatalogError::Core(CoreError::TokenNotFound { .. })
        ));
        assert!(err.to_string().starts_with("project arbitrum: token with symbol ARB"));
    }

    proptest! {
        #[test]
        fn test_exclusion_order_irrelevant(
            excluded in proptest::sample::subsequence(vec!["ETH", "DAI", "USDC"], 0..=3),
            seed in any::<u64>(),
            repeat in any::<bool>(),
        ) {
            let as_strings = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
            let mut shuffled = as_strings(&excluded);
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left((seed as usize) % len);
                if repeat {
                    shuffled.push(shuffled[0].clone());
                }
            }

            let mut a = layer2();
            a.config.escrows[0].excluded_tokens = as_strings(&excluded);
            let mut b = layer2();
            b.config.escrows[0].excluded_tokens = shuffled;

            let pa = layer2_to_project(&ctx(), &a).unwrap();
            let pb = layer2_to_project(&ctx(), &b).unwrap();
            prop_assert_eq!(&pa.escrows()[0].tokens, &pb.escrows()[0].tokens);
            prop_assert_eq!(pa.escrows()[0].tokens.len(), 3 - excluded.len());
        }
    }
}
