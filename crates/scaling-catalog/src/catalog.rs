//! The Catalog: unified API over the context and the assemblers.
//!
//! The Catalog owns the immutable context and a configuration deciding how a
//! batch reacts to a malformed descriptor.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use scaling_catalog_core::{validate_declaration, validate_entry, ProjectId};

use crate::assembler::{bridge_to_project, layer2_to_project, layer3_to_project};
use crate::context::CatalogContext;
use crate::descriptor::{ProjectDescriptor, ProjectKind};
use crate::error::{CatalogError, Result};
use crate::project::Project;

/// What a batch does when one descriptor fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Stop at the first failing descriptor and return its error.
    #[default]
    AbortOnFirst,
    /// Skip failing descriptors and report them alongside the successes.
    Isolate,
}

/// Configuration for the Catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    pub failure_policy: FailurePolicy,
    /// Check tracked transaction declarations before expansion and re-check
    /// every emitted entry before returning it. When off, declarations are
    /// expanded exactly as authored.
    pub validate_entries: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::AbortOnFirst,
            validate_entries: true,
        }
    }
}

/// A descriptor that failed to assemble under [`FailurePolicy::Isolate`].
#[derive(Debug)]
pub struct ProjectFailure {
    pub project_id: ProjectId,
    pub kind: ProjectKind,
    pub error: CatalogError,
}

/// Outcome of assembling a batch.
#[derive(Debug, Default)]
pub struct AssemblyReport {
    /// Assembled projects, in input order.
    pub projects: Vec<Project>,
    /// Failed descriptors, in input order. Always empty under
    /// [`FailurePolicy::AbortOnFirst`].
    pub failures: Vec<ProjectFailure>,
}

impl AssemblyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The projects, or the first failure if there was any.
    pub fn into_result(self) -> Result<Vec<Project>> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(self.projects),
        }
    }
}

/// The main Catalog struct.
pub struct Catalog {
    context: Arc<CatalogContext>,
    config: CatalogConfig,
}

impl Catalog {
    pub fn new(context: impl Into<Arc<CatalogContext>>, config: CatalogConfig) -> Self {
        Self {
            context: context.into(),
            config,
        }
    }

    pub fn context(&self) -> &CatalogContext {
        &self.context
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Single projects
    // ─────────────────────────────────────────────────────────────────────────

    /// Assemble one descriptor, dispatching on its kind.
    pub fn assemble(&self, descriptor: &ProjectDescriptor) -> Result<Project> {
        if self.config.validate_entries {
            check_declarations(descriptor)?;
        }

        let project = match descriptor {
            ProjectDescriptor::Layer2(d) => layer2_to_project(&self.context, d)?,
            ProjectDescriptor::Bridge(d) => bridge_to_project(&self.context, d)?,
            ProjectDescriptor::Layer3(d) => layer3_to_project(&self.context, d)?,
        };

        if self.config.validate_entries {
            self.check_entries(&project)?;
        }

        tracing::debug!(
            project = %project.project_id(),
            kind = %project.kind(),
            escrows = project.escrows().len(),
            tracked_txs = project.tracked_txs_config().map_or(0, |e| e.len()),
            "project assembled"
        );

        Ok(project)
    }

    fn check_entries(&self, project: &Project) -> Result<()> {
        let Some(entries) = project.tracked_txs_config() else {
            return Ok(());
        };

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in entries {
            validate_entry(entry).map_err(|e| CatalogError::in_project(project.project_id(), e))?;
            if !seen.insert(entry.id) {
                tracing::warn!(
                    project = %project.project_id(),
                    id = %entry.id,
                    "duplicate tracked transaction declaration"
                );
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Batches
    // ─────────────────────────────────────────────────────────────────────────

    /// Assemble a batch of descriptors under the configured failure policy.
    ///
    /// With [`FailurePolicy::AbortOnFirst`] the first failure is returned as
    /// the error. With [`FailurePolicy::Isolate`] every failure is collected
    /// into the report and the remaining descriptors are still assembled.
    pub fn assemble_all(&self, descriptors: &[ProjectDescriptor]) -> Result<AssemblyReport> {
        let mut report = AssemblyReport {
            projects: Vec::with_capacity(descriptors.len()),
            failures: Vec::new(),
        };
        let mut ids = HashSet::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if !ids.insert(descriptor.id()) {
                tracing::warn!(project = %descriptor.id(), "duplicate project id in batch");
            }

            match self.assemble(descriptor) {
                Ok(project) => report.projects.push(project),
                Err(error) => match self.config.failure_policy {
                    FailurePolicy::AbortOnFirst => return Err(error),
                    FailurePolicy::Isolate => {
                        tracing::warn!(
                            project = %descriptor.id(),
                            error = %error,
                            "project skipped"
                        );
                        report.failures.push(ProjectFailure {
                            project_id: descriptor.id().clone(),
                            kind: descriptor.kind(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::debug!(
            assembled = report.projects.len(),
            failed = report.failures.len(),
            "batch assembled"
        );

        Ok(report)
    }
}

/// Structural checks on a layer2's declarations: non-empty uses, an ordered
/// time window and a finite positive multiplier.
fn check_declarations(descriptor: &ProjectDescriptor) -> Result<()> {
    let ProjectDescriptor::Layer2(layer2) = descriptor else {
        return Ok(());
    };
    for declaration in layer2.config.tracked_txs.iter().flatten() {
        validate_declaration(declaration).map_err(|e| CatalogError::in_project(&layer2.id, e))?;
    }
    Ok(())
}
