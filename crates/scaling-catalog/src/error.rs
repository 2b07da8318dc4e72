//! Error types for the catalog.

use scaling_catalog_core::{CoreError, ProjectId, ValidationError};
use thiserror::Error;

/// Errors that can occur while building the catalog or assembling projects.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Registry or normalization error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Tracked transaction validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed JSON document.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An error attributed to one project descriptor.
    #[error("project {project_id}: {source}")]
    Project {
        project_id: ProjectId,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Attribute `error` to `project_id`, unless it already is.
    pub fn in_project(project_id: &ProjectId, error: impl Into<CatalogError>) -> Self {
        match error.into() {
            attributed @ CatalogError::Project { .. } => attributed,
            other => CatalogError::Project {
                project_id: project_id.clone(),
                source: Box::new(other),
            },
        }
    }

    /// The project this error is attributed to, if any.
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            CatalogError::Project { project_id, .. } => Some(project_id),
            _ => None,
        }
    }

    /// The underlying error with project attribution stripped.
    pub fn root(&self) -> &CatalogError {
        match self {
            CatalogError::Project { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
