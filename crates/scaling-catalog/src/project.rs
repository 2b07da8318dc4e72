//! Canonical project records handed to downstream indexing jobs.
//!
//! A [`Project`] is a union keyed by kind. Each arm declares only the fields
//! that kind carries: bridges and layer3s have no tracked transactions,
//! liveness, finality or transaction API to speak of.

use serde::{Deserialize, Serialize};

use scaling_catalog_core::{ProjectEscrow, ProjectId, TrackedTxConfigEntry};

use crate::descriptor::{FinalityConfig, LivenessConfig, ProjectKind, TransactionApi};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer2Project {
    pub project_id: ProjectId,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    pub escrows: Vec<ProjectEscrow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_tokens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_api: Option<TransactionApi>,
    /// `None` when the descriptor declares no tracked transactions at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_txs_config: Option<Vec<TrackedTxConfigEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_config: Option<LivenessConfig>,
    /// `None` when finality is absent or not yet available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finality_config: Option<FinalityConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeProject {
    pub project_id: ProjectId,
    pub slug: String,
    pub escrows: Vec<ProjectEscrow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_tokens: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer3Project {
    pub project_id: ProjectId,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
    pub escrows: Vec<ProjectEscrow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_tokens: Option<Vec<String>>,
}

/// A normalized project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Project {
    Layer2(Layer2Project),
    Bridge(BridgeProject),
    Layer3(Layer3Project),
}

impl Project {
    pub fn kind(&self) -> ProjectKind {
        match self {
            Project::Layer2(_) => ProjectKind::Layer2,
            Project::Bridge(_) => ProjectKind::Bridge,
            Project::Layer3(_) => ProjectKind::Layer3,
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        match self {
            Project::Layer2(p) => &p.project_id,
            Project::Bridge(p) => &p.project_id,
            Project::Layer3(p) => &p.project_id,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Project::Layer2(p) => &p.slug,
            Project::Bridge(p) => &p.slug,
            Project::Layer3(p) => &p.slug,
        }
    }

    pub fn escrows(&self) -> &[ProjectEscrow] {
        match self {
            Project::Layer2(p) => &p.escrows,
            Project::Bridge(p) => &p.escrows,
            Project::Layer3(p) => &p.escrows,
        }
    }

    pub fn associated_tokens(&self) -> Option<&[String]> {
        match self {
            Project::Layer2(p) => p.associated_tokens.as_deref(),
            Project::Bridge(p) => p.associated_tokens.as_deref(),
            Project::Layer3(p) => p.associated_tokens.as_deref(),
        }
    }

    /// Tracked transaction entries; only layer2 projects can carry them.
    pub fn tracked_txs_config(&self) -> Option<&[TrackedTxConfigEntry]> {
        match self {
            Project::Layer2(p) => p.tracked_txs_config.as_deref(),
            Project::Bridge(_) | Project::Layer3(_) => None,
        }
    }

    pub fn as_layer2(&self) -> Option<&Layer2Project> {
        match self {
            Project::Layer2(p) => Some(p),
            _ => None,
        }
    }
}
