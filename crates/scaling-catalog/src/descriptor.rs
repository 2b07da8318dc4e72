//! Authored project descriptors.
//!
//! Descriptors are plain data written by hand, one per project. Everything
//! the pipeline does not interpret (display text, liveness aliasing,
//! transaction API settings, finality tuning) is carried as pre-shaped
//! sub-objects and passed through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use scaling_catalog_core::{ProjectId, RawEscrow, TrackedTxDeclaration, TrackedTxSubtype, UnixTime};

/// The three kinds of scaling project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectKind {
    Layer2,
    Bridge,
    Layer3,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectKind::Layer2 => "layer2",
            ProjectKind::Bridge => "bridge",
            ProjectKind::Layer3 => "layer3",
        })
    }
}

/// Display metadata. Only the slug is consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDisplay {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A pair of subtypes whose liveness data is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateData {
    pub from: TrackedTxSubtype,
    pub to: TrackedTxSubtype,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicate_data: Vec<DuplicateData>,
}

/// How finality is measured for a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalityMethod {
    Arbitrum,
    Linea,
    #[serde(rename = "zkSyncEra")]
    ZkSyncEra,
    Scroll,
    Starknet,
    #[serde(rename = "OPStack")]
    OpStack,
    #[serde(rename = "OPStack-blob")]
    OpStackBlob,
    Loopring,
    Degate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateUpdateMode {
    #[default]
    Disabled,
    Analyze,
    ZeroLag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalityConfig {
    #[serde(rename = "type")]
    pub method: FinalityMethod,
    pub min_timestamp: UnixTime,
    #[serde(default)]
    pub lag: u64,
    #[serde(default)]
    pub state_update: StateUpdateMode,
}

/// Finality as authored: a concrete configuration, or the `"coming soon"`
/// marker for projects whose finality is not yet measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthoredFinalityRepr", into = "AuthoredFinalityRepr")]
pub enum AuthoredFinality {
    ComingSoon,
    Configured(FinalityConfig),
}

const COMING_SOON: &str = "coming soon";

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AuthoredFinalityRepr {
    Marker(String),
    Configured(FinalityConfig),
}

impl TryFrom<AuthoredFinalityRepr> for AuthoredFinality {
    type Error = String;

    fn try_from(repr: AuthoredFinalityRepr) -> Result<Self, Self::Error> {
        match repr {
            AuthoredFinalityRepr::Marker(s) if s == COMING_SOON => Ok(AuthoredFinality::ComingSoon),
            AuthoredFinalityRepr::Marker(s) => Err(format!("unknown finality marker: {s:?}")),
            AuthoredFinalityRepr::Configured(config) => Ok(AuthoredFinality::Configured(config)),
        }
    }
}

impl From<AuthoredFinality> for AuthoredFinalityRepr {
    fn from(finality: AuthoredFinality) -> Self {
        match finality {
            AuthoredFinality::ComingSoon => AuthoredFinalityRepr::Marker(COMING_SOON.to_string()),
            AuthoredFinality::Configured(config) => AuthoredFinalityRepr::Configured(config),
        }
    }
}

impl AuthoredFinality {
    /// The concrete configuration, if one has been authored.
    pub fn configured(&self) -> Option<&FinalityConfig> {
        match self {
            AuthoredFinality::ComingSoon => None,
            AuthoredFinality::Configured(config) => Some(config),
        }
    }
}

/// Where transaction counts for a project are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TransactionApi {
    Rpc {
        default_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_block: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        calls_per_minute: Option<u32>,
    },
    Starkex {
        product: Vec<String>,
        since_timestamp: UnixTime,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resync_last_days: Option<u32>,
    },
    Starknet {
        default_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        calls_per_minute: Option<u32>,
    },
    Zksync {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        calls_per_minute: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer2Config {
    #[serde(default)]
    pub escrows: Vec<RawEscrow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_tokens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_api: Option<TransactionApi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_txs: Option<Vec<TrackedTxDeclaration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<LivenessConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finality: Option<AuthoredFinality>,
}

/// Escrow-only configuration shared by bridges and layer3s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowConfig {
    #[serde(default)]
    pub escrows: Vec<RawEscrow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_tokens: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer2Descriptor {
    pub id: ProjectId,
    pub display: ProjectDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    pub config: Layer2Config,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDescriptor {
    pub id: ProjectId,
    pub display: ProjectDisplay,
    pub config: EscrowConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer3Descriptor {
    pub id: ProjectId,
    pub display: ProjectDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
    pub config: EscrowConfig,
}

/// Any authored project, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProjectDescriptor {
    Layer2(Layer2Descriptor),
    Bridge(BridgeDescriptor),
    Layer3(Layer3Descriptor),
}

impl ProjectDescriptor {
    pub fn id(&self) -> &ProjectId {
        match self {
            ProjectDescriptor::Layer2(d) => &d.id,
            ProjectDescriptor::Bridge(d) => &d.id,
            ProjectDescriptor::Layer3(d) => &d.id,
        }
    }

    pub fn kind(&self) -> ProjectKind {
        match self {
            ProjectDescriptor::Layer2(_) => ProjectKind::Layer2,
            ProjectDescriptor::Bridge(_) => ProjectKind::Bridge,
            ProjectDescriptor::Layer3(_) => ProjectKind::Layer3,
        }
    }
}

impl From<Layer2Descriptor> for ProjectDescriptor {
    fn from(d: Layer2Descriptor) -> Self {
        ProjectDescriptor::Layer2(d)
    }
}

impl From<BridgeDescriptor> for ProjectDescriptor {
    fn from(d: BridgeDescriptor) -> Self {
        ProjectDescriptor::Bridge(d)
    }
}

impl From<Layer3Descriptor> for ProjectDescriptor {
    fn from(d: Layer3Descriptor) -> Self {
        ProjectDescriptor::Layer3(d)
    }
}
