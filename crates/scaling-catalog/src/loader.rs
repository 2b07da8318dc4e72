//! JSON loading for authored documents and JSON rendering of projects.
//!
//! Documents use the authored camelCase field names. Nothing here touches the
//! filesystem; callers hand in the document text.

use scaling_catalog_core::{ChainDescriptor, Token};

use crate::descriptor::ProjectDescriptor;
use crate::error::Result;
use crate::project::Project;

/// Parse an array of `{ "name", "chainId" }` objects.
pub fn parse_chains(json: &str) -> Result<Vec<ChainDescriptor>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an array of token records.
pub fn parse_tokens(json: &str) -> Result<Vec<Token>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a single project descriptor tagged by `"type"`.
pub fn parse_descriptor(json: &str) -> Result<ProjectDescriptor> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an array of project descriptors.
pub fn parse_descriptors(json: &str) -> Result<Vec<ProjectDescriptor>> {
    Ok(serde_json::from_str(json)?)
}

/// Render projects as a pretty-printed JSON array.
pub fn projects_to_json(projects: &[Project]) -> Result<String> {
    Ok(serde_json::to_string_pretty(projects)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_parse_chains() {
        let chains = parse_chains(r#"[{ "name": "base", "chainId": 8453 }]"#).unwrap();
        assert_eq!(chains[0].name, "base");
        assert_eq!(chains[0].chain_id.get(), 8453);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{ "type": "sidechain", "id": "x", "display": { "name": "X", "slug": "x" }, "config": {} }"#;
        assert!(matches!(parse_descriptor(json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_bad_address_rejected() {
        let json = r#"{
            "type": "bridge",
            "id": "x",
            "display": { "name": "X", "slug": "x" },
            "config": {
                "escrows": [{
                    "address": "0x1234",
                    "chain": "ethereum",
                    "sinceTimestamp": 1,
                    "tokens": "*"
                }]
            }
        }"#;
        let err = parse_descriptor(json).unwrap_err();
        assert!(err.to_string().contains("expected 20 bytes"));
    }

    #[test]
    fn test_parse_descriptors_array() {
        let json = r#"[
            { "type": "bridge", "id": "a", "display": { "name": "A", "slug": "a" }, "config": {} },
            { "type": "layer3", "id": "b", "display": { "name": "B", "slug": "b" }, "isUpcoming": true, "config": {} }
        ]"#;
        let descriptors = parse_descriptors(json).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[1].id().as_str(), "b");
    }
}
