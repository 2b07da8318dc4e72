//! # Scaling Catalog Testkit
//!
//! Testing utilities for the scaling catalog.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Authored declarations with their recorded tracked transaction ids
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A small chain and token set plus one descriptor per project kind
//!
//! ## Golden Vectors
//!
//! ```rust
//! use scaling_catalog_testkit::vectors::{all_vectors, entries_from_vector};
//!
//! for vector in all_vectors() {
//!     for entry in entries_from_vector(&vector) {
//!         println!("{}: {}", vector.name, entry.id);
//!     }
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use scaling_catalog_testkit::generators::{declaration_from_params, DeclarationParams};
//!
//! proptest! {
//!     #[test]
//!     fn declarations_validate(params: DeclarationParams) {
//!         let decl = declaration_from_params(&params);
//!         prop_assert!(scaling_catalog_core::validate_declaration(&decl).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use scaling_catalog_testkit::fixtures::{TestCatalog, LAYER2_JSON};
//!
//! let catalog = TestCatalog::new();
//! let project = catalog.assemble_json(LAYER2_JSON).unwrap();
//! assert_eq!(project.project_id().as_str(), "arbitrum");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestCatalog;
pub use generators::{declaration_from_params, DeclarationParams};
pub use vectors::{all_vectors, entries_from_vector, verify_all_vectors, GoldenVector};
