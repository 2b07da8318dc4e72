//! Golden test vectors for tracked transaction ids.
//!
//! Each vector is an authored declaration for a project. Expanding it must
//! produce the same ids on every platform and in every release; a changed id
//! means every downstream record keyed by it is orphaned.
//!
//! The recorded ids and canonical bytes pin the encoding itself. Any change to
//! the id domain, key names, integer or float encoding, or key ordering breaks
//! these vectors and must be treated as a versioned migration.

use scaling_catalog_core::{
    build_tracked_txs, canonical_entry_bytes, ProjectId, TrackedTxConfigEntry,
    TrackedTxDeclaration,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Project the declaration belongs to.
    pub project_id: &'static str,
    /// The declaration as authored.
    pub declaration_json: &'static str,
    /// Expected entry ids (hex), one per use, in use order.
    pub expected_ids: &'static [&'static str],
    /// Expected canonical CBOR of each entry (hex), in use order.
    pub expected_canonical: &'static [&'static str],
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "function call, liveness and costs",
            project_id: "arbitrum",
            declaration_json: r#"{
                "uses": [
                    { "type": "liveness", "subtype": "batchSubmissions" },
                    { "type": "l2costs", "subtype": "batchSubmissions" }
                ],
                "query": {
                    "formula": "functionCall",
                    "address": "0x1c479675ad559DC151F6Ec7ed3FbF8ceE79582B6",
                    "selector": "0x8f111f3c",
                    "sinceTimestamp": 1661457944
                }
            }"#,
            expected_ids: &[
                "994b8ffd721cde4fb9de66b3c282953f1d1c3d2ea73cd9c3c496424756f61cfd",
                "598e12334490d1d4c34b898103d0367516bb75790982f5fcb3c6384e6fe8783a",
            ],
            expected_canonical: &[
                "a56474797065686c6976656e65737366706172616d73a36761646472657373541c479675ad559dc151f6ec7ed3fbf8cee79582b667666f726d756c616c66756e6374696f6e43616c6c6873656c6563746f72448f111f3c67737562747970657062617463685375626d697373696f6e736970726f6a656374496468617262697472756d6e73696e636554696d657374616d701a6307d618",
                "a66474797065676c32636f73747366706172616d73a36761646472657373541c479675ad559dc151f6ec7ed3fbf8cee79582b667666f726d756c616c66756e6374696f6e43616c6c6873656c6563746f72448f111f3c67737562747970657062617463685375626d697373696f6e736970726f6a656374496468617262697472756d6e636f73744d756c7469706c696572fb3ff00000000000006e73696e636554696d657374616d701a6307d618",
            ],
        },
        GoldenVector {
            name: "transfer with closed window and multiplier",
            project_id: "zksync-lite",
            declaration_json: r#"{
                "uses": [{ "type": "l2costs", "subtype": "stateUpdates" }],
                "query": {
                    "formula": "transfer",
                    "from": "0x0000000000000000000000000000000000000a11",
                    "to": "0x0000000000000000000000000000000000000b22",
                    "sinceTimestamp": 1592218707,
                    "untilTimestamp": 1700000000
                },
                "costMultiplier": 0.6
            }"#,
            expected_ids: &[
                "3d662b02ae964312c16f99663b5fff98ab92c7888e3d048b36e4416048f4930d",
            ],
            expected_canonical: &[
                "a76474797065676c32636f73747366706172616d73a362746f540000000000000000000000000000000000000b226466726f6d540000000000000000000000000000000000000a1167666f726d756c61687472616e7366657267737562747970656c7374617465557064617465736970726f6a65637449646b7a6b73796e632d6c6974656e636f73744d756c7469706c696572fb3fe33333333333336e73696e636554696d657374616d701a5ee754536e756e74696c54696d657374616d701a6553f100",
            ],
        },
        GoldenVector {
            name: "sharp submission",
            project_id: "paradex",
            declaration_json: r#"{
                "uses": [
                    { "type": "liveness", "subtype": "proofSubmissions" },
                    { "type": "l2costs", "subtype": "proofSubmissions" }
                ],
                "query": {
                    "formula": "sharpSubmission",
                    "programHashes": ["3258367057337572248818716706664617507069572185152472941975080959568140437920"],
                    "sinceTimestamp": 1696291200
                }
            }"#,
            expected_ids: &[
                "d14e34de358f81ccf0749c495850042542bdae4d5b70e71196bf9cda09fbcf13",
                "d1ffb0e4a18f52efa42e38684ada5104a7a23f78439b7ac7c69ad387026f5e96",
            ],
            expected_canonical: &[
                "a56474797065686c6976656e65737366706172616d73a467616464726573735447312450b3ac8b5b8e247a6bb6d523e7605bdb6067666f726d756c616f73686172705375626d697373696f6e6873656c6563746f72449b3b76cc6d70726f6772616d48617368657381784c3332353833363730353733333735373232343838313837313637303636363436313735303730363935373231383531353234373239343139373530383039353935363831343034333739323067737562747970657070726f6f665375626d697373696f6e736970726f6a656374496467706172616465786e73696e636554696d657374616d701a651b5980",
                "a66474797065676c32636f73747366706172616d73a467616464726573735447312450b3ac8b5b8e247a6bb6d523e7605bdb6067666f726d756c616f73686172705375626d697373696f6e6873656c6563746f72449b3b76cc6d70726f6772616d48617368657381784c3332353833363730353733333735373232343838313837313637303636363436313735303730363935373231383531353234373239343139373530383039353935363831343034333739323067737562747970657070726f6f665375626d697373696f6e736970726f6a656374496467706172616465786e636f73744d756c7469706c696572fb3ff00000000000006e73696e636554696d657374616d701a651b5980",
            ],
        },
    ]
}

/// Expand a golden vector into its entries.
pub fn entries_from_vector(vector: &GoldenVector) -> Vec<TrackedTxConfigEntry> {
    let declaration: TrackedTxDeclaration =
        serde_json::from_str(vector.declaration_json).expect("golden declaration parses");
    build_tracked_txs(&ProjectId::new(vector.project_id), &[declaration])
        .expect("golden declaration expands")
}

/// Hex of the canonical bytes of every entry of a vector, for diffing
/// encodings across builds.
pub fn canonical_hex(vector: &GoldenVector) -> Vec<String> {
    entries_from_vector(vector)
        .iter()
        .map(|e| hex::encode(canonical_entry_bytes(e).expect("golden entry encodes")))
        .collect()
}

/// Verify all golden vectors produce their recorded ids and canonical bytes.
///
/// Returns `(name, matches, computed ids)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, Vec<String>)> {
    all_vectors()
        .iter()
        .map(|v| {
            let ids: Vec<String> = entries_from_vector(v)
                .iter()
                .map(|e| e.id.to_hex())
                .collect();

            let matches = ids == v.expected_ids && canonical_hex(v) == v.expected_canonical;

            (v.name.to_string(), matches, ids)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_verify() {
        for (name, matches, ids) in verify_all_vectors() {
            assert!(matches, "vector '{name}' produced {ids:?}");
        }
    }

    #[test]
    fn test_every_vector_is_recorded() {
        for vector in all_vectors() {
            let entries = entries_from_vector(&vector);
            assert_eq!(vector.expected_ids.len(), entries.len(), "{}", vector.name);
            assert_eq!(vector.expected_canonical.len(), entries.len(), "{}", vector.name);
        }
    }

    #[test]
    fn test_recorded_ids_per_entry() {
        for vector in all_vectors() {
            for (entry, expected) in entries_from_vector(&vector).iter().zip(vector.expected_ids) {
                assert_eq!(entry.id.to_hex(), *expected, "vector '{}'", vector.name);
                assert_eq!(entry.compute_id().unwrap(), entry.id);
            }
        }
    }

    #[test]
    fn test_recorded_canonical_bytes() {
        for vector in all_vectors() {
            assert_eq!(canonical_hex(&vector), vector.expected_canonical, "vector '{}'", vector.name);
        }
    }

    #[test]
    fn test_mismatched_recording_is_detected() {
        let mut vector = all_vectors().remove(0);
        vector.expected_ids = &[
            "0000000000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000000",
        ];
        let ids: Vec<String> = entries_from_vector(&vector)
            .iter()
            .map(|e| e.id.to_hex())
            .collect();
        assert_ne!(ids, vector.expected_ids);
    }

    #[test]
    fn test_vector_ids_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for vector in all_vectors() {
            for entry in entries_from_vector(&vector) {
                assert!(seen.insert(entry.id), "duplicate id in '{}'", vector.name);
            }
        }
    }
}
