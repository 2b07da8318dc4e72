//! # Scaling Catalog
//!
//! The unified API for normalizing hand-authored scaling project descriptors
//! (layer2 rollups, bridges and layer3s) into canonical [`Project`] records.
//!
//! ## Overview
//!
//! - **Context**: chain and token registries, built once at startup
//! - **Escrows**: token specifications resolved against the token registry
//! - **Tracked transactions**: declarations fanned out into flat entries with
//!   content-addressed ids
//! - **Assembly**: one entry point per project kind, plus batch assembly with
//!   a configurable failure policy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scaling_catalog::{loader, Catalog, CatalogConfig, CatalogContext};
//!
//! fn example(chains: &str, tokens: &str, descriptors: &str) -> scaling_catalog::Result<()> {
//!     let context = CatalogContext::from_json(chains, tokens)?;
//!     let catalog = Catalog::new(context, CatalogConfig::default());
//!
//!     let descriptors = loader::parse_descriptors(descriptors)?;
//!     let projects = catalog.assemble_all(&descriptors)?.into_result()?;
//!
//!     println!("{}", loader::projects_to_json(&projects)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `scaling_catalog::core` - Core primitives (registries, escrows, tracked transactions)

pub mod assembler;
pub mod catalog;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod project;

// Re-export component crates
pub use scaling_catalog_core as core;

pub use assembler::{bridge_to_project, layer2_to_project, layer3_to_project};
pub use catalog::{AssemblyReport, Catalog, CatalogConfig, FailurePolicy, ProjectFailure};
pub use context::CatalogContext;
pub use descriptor::{
    AuthoredFinality, BridgeDescriptor, EscrowConfig, FinalityConfig, Layer2Config,
    Layer2Descriptor, Layer3Descriptor, LivenessConfig, ProjectDescriptor, ProjectKind,
    TransactionApi,
};
pub use error::{CatalogError, Result};
pub use project::{BridgeProject, Layer2Project, Layer3Project, Project};

// Re-export commonly used core types
pub use scaling_catalog_core::{
    ChainDescriptor, ChainId, ProjectEscrow, ProjectId, Token, TrackedTxConfigEntry, TrackedTxId,
};
