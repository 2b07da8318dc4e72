//! Proptest generators for property-based testing.

use proptest::prelude::*;

use scaling_catalog_core::{
    ChainDescriptor, ChainId, EthereumAddress, FunctionSelector, ProjectId, QueryFormula,
    TrackedTxDeclaration, TrackedTxQuery, TrackedTxSubtype, TrackedTxType, TrackedTxUse, UnixTime,
};

/// Generate a random EthereumAddress.
pub fn address() -> impl Strategy<Value = EthereumAddress> {
    any::<[u8; 20]>().prop_map(EthereumAddress::from_bytes)
}

/// Generate a random FunctionSelector.
pub fn selector() -> impl Strategy<Value = FunctionSelector> {
    any::<[u8; 4]>().prop_map(FunctionSelector::from_bytes)
}

/// Generate a project id shaped like a slug.
pub fn project_id() -> impl Strategy<Value = ProjectId> {
    "[a-z][a-z0-9-]{0,23}".prop_map(ProjectId::new)
}

/// Generate a timestamp between 2015 and 2033.
pub fn timestamp() -> impl Strategy<Value = UnixTime> {
    (1_438_269_973i64..2_000_000_000i64).prop_map(UnixTime::new)
}

pub fn tx_type() -> impl Strategy<Value = TrackedTxType> {
    prop_oneof![Just(TrackedTxType::Liveness), Just(TrackedTxType::L2Costs)]
}

pub fn subtype() -> impl Strategy<Value = TrackedTxSubtype> {
    prop_oneof![
        Just(TrackedTxSubtype::BatchSubmissions),
        Just(TrackedTxSubtype::StateUpdates),
        Just(TrackedTxSubtype::ProofSubmissions),
    ]
}

/// Generate a non-empty list of uses.
pub fn uses() -> impl Strategy<Value = Vec<TrackedTxUse>> {
    prop::collection::vec(
        (tx_type(), subtype()).prop_map(|(t, s)| TrackedTxUse::new(t, s)),
        1..=6,
    )
}

/// Generate a query formula of any variant.
pub fn formula() -> impl Strategy<Value = QueryFormula> {
    prop_oneof![
        (address(), selector(), proptest::option::of("[a-zA-Z]{1,16}\\(\\)")).prop_map(
            |(address, selector, function_signature)| QueryFormula::FunctionCall {
                address,
                selector,
                function_signature,
            }
        ),
        (address(), address()).prop_map(|(from, to)| QueryFormula::Transfer { from, to }),
        prop::collection::vec("[0-9]{10,76}", 1..=3)
            .prop_map(|program_hashes| QueryFormula::SharpSubmission { program_hashes }),
    ]
}

/// Generate a cost multiplier override in `(0, 4]`.
pub fn cost_multiplier() -> impl Strategy<Value = f64> {
    (1u32..=400).prop_map(|n| f64::from(n) / 100.0)
}

/// Parameters for generating a well-formed declaration.
#[derive(Debug, Clone)]
pub struct DeclarationParams {
    pub uses: Vec<TrackedTxUse>,
    pub formula: QueryFormula,
    pub since: UnixTime,
    /// Seconds between `since` and `until`, if the window is closed.
    pub window: Option<i64>,
    pub cost_multiplier: Option<f64>,
}

impl Arbitrary for DeclarationParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            uses(),
            formula(),
            timestamp(),
            proptest::option::of(1i64..=100_000_000),
            proptest::option::of(cost_multiplier()),
        )
            .prop_map(|(uses, formula, since, window, cost_multiplier)| {
                DeclarationParams {
                    uses,
                    formula,
                    since,
                    window,
                    cost_multiplier,
                }
            })
            .boxed()
    }
}

/// Build a declaration from parameters.
pub fn declaration_from_params(params: &DeclarationParams) -> TrackedTxDeclaration {
    TrackedTxDeclaration {
        uses: params.uses.clone(),
        query: TrackedTxQuery {
            formula: params.formula.clone(),
            since_timestamp: params.since,
            until_timestamp: params
                .window
                .map(|w| UnixTime::new(params.since.to_seconds() + w)),
        },
        cost_multiplier: params.cost_multiplier,
    }
}

/// Generate a list of chains with distinct names and distinct ids.
pub fn chains(max_len: usize) -> impl Strategy<Value = Vec<ChainDescriptor>> {
    prop::collection::btree_map("[a-z]{3,12}", any::<u64>(), 0..=max_len).prop_map(|by_name| {
        let mut seen = std::collections::HashSet::new();
        by_name
            .into_iter()
            .filter(|(_, id)| seen.insert(*id))
            .map(|(name, id)| ChainDescriptor::new(name, ChainId(id)))
            .collect()
    })
}
