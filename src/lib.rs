//! CLOB Signer: authenticated request signing and order construction for the
//! Polymarket CLOB.
//!
//! This is the root crate that ties the workspace together for integration
//! tests, benchmarks and demos. The functionality lives in the member crates:
//!
//! - `auth`: wallet key material and API credential state
//! - `clob-core`: L1/L2 signing, market parameter cache, order builder, API client

pub use auth;
pub use clob_core as core;
