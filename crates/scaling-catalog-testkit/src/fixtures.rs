//! Test fixtures and helpers.
//!
//! A small but realistic catalog: three chains, a handful of tokens, and one
//! descriptor of each project kind, authored as JSON the way descriptor files
//! are written.

use scaling_catalog::{
    loader, Catalog, CatalogConfig, CatalogContext, FailurePolicy, Project, ProjectDescriptor,
};

/// Chains known to the fixture catalog.
pub const CHAINS_JSON: &str = r#"[
    { "name": "ethereum", "chainId": 1 },
    { "name": "arbitrum", "chainId": 42161 },
    { "name": "optimism", "chainId": 10 }
]"#;

/// Tokens known to the fixture catalog.
pub const TOKENS_JSON: &str = r#"[
    { "symbol": "ETH", "name": "Ether", "chainId": 1, "decimals": 18, "sinceTimestamp": 1438269973 },
    { "symbol": "USDC", "name": "USD Coin", "chainId": 1, "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "decimals": 6, "sinceTimestamp": 1533324504 },
    { "symbol": "DAI", "name": "Dai Stablecoin", "chainId": 1, "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F", "decimals": 18, "sinceTimestamp": 1573672677 },
    { "symbol": "WBTC", "name": "Wrapped BTC", "chainId": 1, "address": "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599", "decimals": 8, "sinceTimestamp": 1543095952 },
    { "symbol": "ARB", "name": "Arbitrum", "chainId": 42161, "address": "0x912CE59144191C1204E64559FE8253a0e49E6548", "decimals": 18, "sinceTimestamp": 1678968000 },
    { "symbol": "USDC", "name": "USD Coin", "chainId": 42161, "address": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831", "decimals": 6, "sinceTimestamp": 1667248932 }
]"#;

/// A rollup with every optional section populated.
pub const LAYER2_JSON: &str = r#"{
    "type": "layer2",
    "id": "arbitrum",
    "display": {
        "name": "Arbitrum One",
        "slug": "arbitrum",
        "description": "Optimistic rollup settling on Ethereum."
    },
    "isArchived": false,
    "config": {
        "associatedTokens": ["ARB"],
        "escrows": [
            {
                "address": "0x8315177aB297bA92A06054cE80a67Ed4DBd7ed3a",
                "chain": "ethereum",
                "sinceTimestamp": 1622243344,
                "tokens": ["ETH"],
                "source": "canonical"
            },
            {
                "address": "0xcEe284F754E854890e311e3280b767F80797180d",
                "chain": "ethereum",
                "sinceTimestamp": 1623867835,
                "tokens": "*",
                "excludedTokens": ["ETH"],
                "bridge": { "name": "Arbitrum Gateway", "slug": "arbitrum-gateway" }
            }
        ],
        "transactionApi": {
            "type": "rpc",
            "defaultUrl": "https://arb1.arbitrum.io/rpc",
            "startBlock": 1
        },
        "trackedTxs": [
            {
                "uses": [
                    { "type": "liveness", "subtype": "batchSubmissions" },
                    { "type": "l2costs", "subtype": "batchSubmissions" }
                ],
                "query": {
                    "formula": "functionCall",
                    "address": "0x1c479675ad559DC151F6Ec7ed3FbF8ceE79582B6",
                    "selector": "0x8f111f3c",
                    "functionSignature": "function addSequencerL2BatchFromOrigin(uint256,bytes,uint256,address,uint256,uint256)",
                    "sinceTimestamp": 1661457944
                }
            },
            {
                "uses": [
                    { "type": "liveness", "subtype": "stateUpdates" },
                    { "type": "l2costs", "subtype": "stateUpdates" }
                ],
                "query": {
                    "formula": "transfer",
                    "from": "0x0000000000000000000000000000000000000a11",
                    "to": "0x0000000000000000000000000000000000000b22",
                    "sinceTimestamp": 1661457944,
                    "untilTimestamp": 1700000000
                },
                "costMultiplier": 0.5
            }
        ],
        "liveness": {
            "duplicateData": [{ "from": "stateUpdates", "to": "proofSubmissions" }]
        },
        "finality": {
            "type": "Arbitrum",
            "minTimestamp": 1710427823,
            "lag": 0,
            "stateUpdate": "disabled"
        }
    }
}"#;

/// A validity rollup settling through SHARP, with finality not yet measured.
pub const STARK_LAYER2_JSON: &str = r#"{
    "type": "layer2",
    "id": "paradex",
    "display": { "name": "Paradex", "slug": "paradex" },
    "config": {
        "escrows": [
            {
                "address": "0xE3cbE3A636AB6A754e9e41B12b09d09Ce9E53Db3",
                "chain": "ethereum",
                "sinceTimestamp": 1696291200,
                "tokens": ["USDC"]
            }
        ],
        "trackedTxs": [
            {
                "uses": [{ "type": "l2costs", "subtype": "proofSubmissions" }],
                "query": {
                    "formula": "sharpSubmission",
                    "programHashes": ["3258367057337572248818716706664617507069572185152472941975080959568140437920"],
                    "sinceTimestamp": 1696291200
                },
                "costMultiplier": 0.2
            }
        ],
        "finality": "coming soon"
    }
}"#;

/// A bridge with one escrow on ethereum.
pub const BRIDGE_JSON: &str = r#"{
    "type": "bridge",
    "id": "hop",
    "display": { "name": "Hop", "slug": "hop" },
    "config": {
        "associatedTokens": ["HOP"],
        "escrows": [
            {
                "address": "0x3666f603Cc164936C1b87e207F36BEBa4AC5f18a",
                "chain": "ethereum",
                "sinceTimestamp": 1624060800,
                "tokens": ["USDC", "DAI"],
                "includeInTotal": false
            }
        ]
    }
}"#;

/// A layer3 with its escrow on arbitrum.
pub const LAYER3_JSON: &str = r#"{
    "type": "layer3",
    "id": "xai",
    "display": { "name": "Xai", "slug": "xai" },
    "isUpcoming": true,
    "config": {
        "escrows": [
            {
                "address": "0xb591cE747CF19cF30e11d656EB94134F523A9e77",
                "chain": "arbitrum",
                "sinceTimestamp": 1701993600,
                "tokens": "*"
            }
        ]
    }
}"#;

/// A bridge whose escrow names a chain that is not registered.
pub const UNKNOWN_CHAIN_JSON: &str = r#"{
    "type": "bridge",
    "id": "orbiter",
    "display": { "name": "Orbiter", "slug": "orbiter" },
    "config": {
        "escrows": [
            {
                "address": "0x80C67432656d59144cEFf962E8fAF8926599bCF8",
                "chain": "fantom",
                "sinceTimestamp": 1650000000,
                "tokens": "*"
            }
        ]
    }
}"#;

/// Build the fixture context.
pub fn context() -> CatalogContext {
    CatalogContext::from_json(CHAINS_JSON, TOKENS_JSON).expect("fixture context is valid")
}

/// Parse a fixture descriptor.
pub fn descriptor(json: &str) -> ProjectDescriptor {
    loader::parse_descriptor(json).expect("fixture descriptor is valid")
}

/// Every well-formed fixture descriptor, in a stable order.
pub fn descriptors() -> Vec<ProjectDescriptor> {
    [LAYER2_JSON, STARK_LAYER2_JSON, BRIDGE_JSON, LAYER3_JSON]
        .into_iter()
        .map(descriptor)
        .collect()
}

/// A catalog over the fixture context.
pub struct TestCatalog {
    pub catalog: Catalog,
}

impl TestCatalog {
    /// Create a catalog with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create a catalog that isolates failing descriptors.
    pub fn isolating() -> Self {
        Self::with_config(CatalogConfig {
            failure_policy: FailurePolicy::Isolate,
            ..CatalogConfig::default()
        })
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            catalog: Catalog::new(context(), config),
        }
    }

    /// Assemble one fixture descriptor from its JSON.
    pub fn assemble_json(&self, json: &str) -> scaling_catalog::Result<Project> {
        self.catalog.assemble(&loader::parse_descriptor(json)?)
    }

    /// Assemble every well-formed fixture descriptor.
    pub fn assemble_fixtures(&self) -> Vec<Project> {
        self.catalog
            .assemble_all(&descriptors())
            .and_then(|report| report.into_result())
            .expect("fixture descriptors assemble")
    }
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}
