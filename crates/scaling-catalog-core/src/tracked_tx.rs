//! Tracked transactions: declarations of on-chain function calls and
//! transfers monitored for liveness and cost accounting.
//!
//! Each declaration pairs one query with one or more uses. The builder fans
//! every (declaration, use) pair out into a flat [`TrackedTxConfigEntry`]
//! whose id is derived from its content.

use serde::{Deserialize, Serialize};

use crate::canonical::tracked_tx_id;
use crate::error::Result;
use crate::types::{EthereumAddress, FunctionSelector, ProjectId, TrackedTxId, UnixTime};

/// Address of the SHARP verifier that Starknet-style provers submit to.
pub const SHARP_SUBMISSION_ADDRESS: EthereumAddress = EthereumAddress::from_bytes([
    0x47, 0x31, 0x24, 0x50, 0xb3, 0xac, 0x8b, 0x5b, 0x8e, 0x24, 0x7a, 0x6b, 0xb6, 0xd5, 0x23, 0xe7,
    0x60, 0x5b, 0xdb, 0x60,
]);

/// Selector of the SHARP fact registration call.
pub const SHARP_SUBMISSION_SELECTOR: FunctionSelector =
    FunctionSelector::from_bytes([0x9b, 0x3b, 0x76, 0xcc]);

/// Multiplier applied to `l2costs` entries whose declaration has no override.
pub const DEFAULT_COST_MULTIPLIER: f64 = 1.0;

/// What a tracked transaction is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackedTxType {
    #[serde(rename = "liveness")]
    Liveness,
    #[serde(rename = "l2costs")]
    L2Costs,
}

impl TrackedTxType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Liveness => "liveness",
            Self::L2Costs => "l2costs",
        }
    }
}

/// Which activity of the project a tracked transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedTxSubtype {
    BatchSubmissions,
    StateUpdates,
    ProofSubmissions,
}

impl TrackedTxSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BatchSubmissions => "batchSubmissions",
            Self::StateUpdates => "stateUpdates",
            Self::ProofSubmissions => "proofSubmissions",
        }
    }
}

/// One usage purpose of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedTxUse {
    #[serde(rename = "type")]
    pub tx_type: TrackedTxType,
    pub subtype: TrackedTxSubtype,
}

impl TrackedTxUse {
    pub const fn new(tx_type: TrackedTxType, subtype: TrackedTxSubtype) -> Self {
        Self { tx_type, subtype }
    }
}

/// The on-chain pattern a declaration matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "formula",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum QueryFormula {
    /// Calls of `selector` on `address`.
    FunctionCall {
        address: EthereumAddress,
        selector: FunctionSelector,
        /// Human-readable signature; informational only.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        function_signature: Option<String>,
    },
    /// Value transfers from `from` to `to`.
    Transfer {
        from: EthereumAddress,
        to: EthereumAddress,
    },
    /// SHARP proof submissions for the given program hashes.
    SharpSubmission { program_hashes: Vec<String> },
}

/// A query with its active time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTxQuery {
    #[serde(flatten)]
    pub formula: QueryFormula,
    pub since_timestamp: UnixTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_timestamp: Option<UnixTime>,
}

/// A tracked transaction declaration as authored for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTxDeclaration {
    pub uses: Vec<TrackedTxUse>,
    pub query: TrackedTxQuery,
    /// Override for the cost multiplier of `l2costs` uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_multiplier: Option<f64>,
}

/// Variant-specific payload of a resolved entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "formula",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum TrackedTxParams {
    FunctionCall {
        address: EthereumAddress,
        selector: FunctionSelector,
    },
    Transfer {
        from: EthereumAddress,
        to: EthereumAddress,
    },
    SharpSubmission {
        address: EthereumAddress,
        selector: FunctionSelector,
        program_hashes: Vec<String>,
    },
}

impl From<&QueryFormula> for TrackedTxParams {
    fn from(formula: &QueryFormula) -> Self {
        match formula {
            QueryFormula::FunctionCall {
                address, selector, ..
            } => TrackedTxParams::FunctionCall {
                address: *address,
                selector: *selector,
            },
            QueryFormula::Transfer { from, to } => TrackedTxParams::Transfer {
                from: *from,
                to: *to,
            },
            QueryFormula::SharpSubmission { program_hashes } => TrackedTxParams::SharpSubmission {
                address: SHARP_SUBMISSION_ADDRESS,
                selector: SHARP_SUBMISSION_SELECTOR,
                program_hashes: program_hashes.clone(),
            },
        }
    }
}

/// A flat, resolved tracked transaction record.
///
/// `cost_multiplier` is present iff `tx_type` is [`TrackedTxType::L2Costs`],
/// and `id` is a pure function of every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTxConfigEntry {
    pub id: TrackedTxId,
    pub project_id: ProjectId,
    pub since_timestamp: UnixTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_timestamp: Option<UnixTime>,
    #[serde(rename = "type")]
    pub tx_type: TrackedTxType,
    pub subtype: TrackedTxSubtype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_multiplier: Option<f64>,
    pub params: TrackedTxParams,
}

impl TrackedTxConfigEntry {
    /// Derive the id from the entry's content. The current `id` is ignored.
    pub fn compute_id(&self) -> Result<TrackedTxId> {
        tracked_tx_id(self)
    }
}

/// Expand one declaration into an entry per use.
pub fn expand_declaration(
    project_id: &ProjectId,
    declaration: &TrackedTxDeclaration,
) -> Result<Vec<TrackedTxConfigEntry>> {
    let params = TrackedTxParams::from(&declaration.query.formula);

    declaration
        .uses
        .iter()
        .map(|usage| -> Result<TrackedTxConfigEntry> {
            let cost_multiplier = match usage.tx_type {
                TrackedTxType::L2Costs => Some(
                    declaration
                        .cost_multiplier
                        .unwrap_or(DEFAULT_COST_MULTIPLIER),
                ),
                TrackedTxType::Liveness => None,
            };

            let mut entry = TrackedTxConfigEntry {
                id: TrackedTxId::ZERO,
                project_id: project_id.clone(),
                since_timestamp: declaration.query.since_timestamp,
                until_timestamp: declaration.query.until_timestamp,
                tx_type: usage.tx_type,
                subtype: usage.subtype,
                cost_multiplier,
                params: params.clone(),
            };
            entry.id = entry.compute_id()?;
            Ok(entry)
        })
        .collect()
}

/// Expand every declaration of a project, keeping declaration then use order.
pub fn build_tracked_txs(
    project_id: &ProjectId,
    declarations: &[TrackedTxDeclaration],
) -> Result<Vec<TrackedTxConfigEntry>> {
    let mut entries = Vec::with_capacity(declarations.iter().map(|d| d.uses.len()).sum());
    for declaration in declarations {
        entries.extend(expand_declaration(project_id, declaration)?);
    }
    Ok(entries)
}
