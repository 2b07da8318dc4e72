//! Tracked transaction validation: declaration checks and entry integrity.

use crate::error::ValidationError;
use crate::tracked_tx::{TrackedTxConfigEntry, TrackedTxDeclaration, TrackedTxType};

/// Validate an authored declaration before it is expanded.
///
/// This checks:
/// - At least one use
/// - `until_timestamp`, when present, is after `since_timestamp`
/// - The cost multiplier override, when present, is finite and positive
pub fn validate_declaration(declaration: &TrackedTxDeclaration) -> Result<(), ValidationError> {
    if declaration.uses.is_empty() {
        return Err(ValidationError::EmptyUses);
    }

    let query = &declaration.query;
    if let Some(until) = query.until_timestamp {
        if until <= query.since_timestamp {
            return Err(ValidationError::InvalidTimeWindow {
                since: query.since_timestamp,
                until,
            });
        }
    }

    if let Some(multiplier) = declaration.cost_multiplier {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ValidationError::InvalidCostMultiplier(multiplier));
        }
    }

    Ok(())
}

/// Validate a resolved entry.
///
/// The cost multiplier must be present exactly for `l2costs` entries, and the
/// stored id must match the id recomputed from the entry's content.
pub fn validate_entry(entry: &TrackedTxConfigEntry) -> Result<(), ValidationError> {
    let is_costs = entry.tx_type == TrackedTxType::L2Costs;
    if is_costs != entry.cost_multiplier.is_some() {
        return Err(ValidationError::CostMultiplierMismatch(entry.id));
    }

    let expected = entry.compute_id()?;
    if expected != entry.id {
        return Err(ValidationError::IdMismatch {
            expected,
            got: entry.id,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracked_tx::{
        build_tracked_txs, QueryFormula, TrackedTxQuery, TrackedTxSubtype, TrackedTxUse,
    };
    use crate::types::{EthereumAddress, ProjectId, TrackedTxId, UnixTime};

    fn declaration() -> TrackedTxDeclaration {
        TrackedTxDeclaration {
            uses: vec![
                TrackedTxUse::new(TrackedTxType::Liveness, TrackedTxSubtype::StateUpdates),
                TrackedTxUse::new(TrackedTxType::L2Costs, TrackedTxSubtype::StateUpdates),
            ],
            query: TrackedTxQuery {
                formula: QueryFormula::Transfer {
                    from: EthereumAddress::from_bytes([0x01; 20]),
                    to: EthereumAddress::from_bytes([0x02; 20]),
                },
                since_timestamp: UnixTime::new(1000),
                until_timestamp: None,
            },
            cost_multiplier: None,
        }
    }

    #[test]
    fn test_valid_declaration() {
        assert!(validate_declaration(&declaration()).is_ok());
    }

    #[test]
    fn test_empty_uses() {
        let mut d = declaration();
        d.uses.clear();
        assert_eq!(validate_declaration(&d), Err(ValidationError::EmptyUses));
    }

    #[test]
    fn test_inverted_window() {
        let mut d = declaration();
        d.query.until_timestamp = Some(UnixTime::new(1000));
        assert!(matches!(
            validate_declaration(&d),
            Err(ValidationError::InvalidTimeWindow { .. })
        ));
    }

    #[test]
    fn test_bad_cost_multiplier() {
        for bad in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let mut d = declaration();
            d.cost_multiplier = Some(bad);
            assert!(matches!(
                validate_declaration(&d),
                Err(ValidationError::InvalidCostMultiplier(_))
            ));
        }
    }

    #[test]
    fn test_built_entries_validate() {
        let entries = build_tracked_txs(&ProjectId::new("p"), &[declaration()]).unwrap();
        for entry in &entries {
            assert!(validate_entry(entry).is_ok());
        }
    }

    #[test]
    fn test_tampered_entry_id_mismatch() {
        let mut entries = build_tracked_txs(&ProjectId::new("p"), &[declaration()]).unwrap();
        entries[0].subtype = TrackedTxSubtype::BatchSubmissions;
        assert!(matches!(
            validate_entry(&entries[0]),
            Err(ValidationError::IdMismatch { .. })
        ));
    }

    #[test]
    fn test_liveness_with_multiplier_rejected() {
        let mut entries = build_tracked_txs(&ProjectId::new("p"), &[declaration()]).unwrap();
        entries[0].cost_multiplier = Some(2.0);
        assert_eq!(
            validate_entry(&entries[0]),
            Err(ValidationError::CostMultiplierMismatch(entries[0].id))
        );
    }

    #[test]
    fn test_zero_id_rejected() {
        let mut entries = build_tracked_txs(&ProjectId::new("p"), &[declaration()]).unwrap();
        entries[1].id = TrackedTxId::ZERO;
        assert!(validate_entry(&entries[1]).is_err());
    }
}
