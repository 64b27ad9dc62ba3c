//! Vector search gateway: thin glue around the external Qdrant index.
//!
//! The index itself (storage, ANN algorithm, ingest) is owned by the remote
//! service. This crate only knows how to:
//! - load connection settings once at startup ([`GatewayConfig`]),
//! - validate a precomputed query embedding before any network call,
//! - run a single top-k search and map the response into [`SearchMatch`].
//!
//! A failed search surfaces as [`GatewayError::Upstream`] rather than an
//! empty result, since "no matches" and "index unreachable" must stay
//! distinguishable for callers.

pub mod errors;
pub mod search;
pub mod structs;

pub use errors::gateway_error::GatewayError;
pub use search::VectorIndexClient;
pub use structs::gateway_config::GatewayConfig;
pub use structs::search_match::SearchMatch;
