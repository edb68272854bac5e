//! CLOB Core Library
//!
//! Request authentication (L1 wallet signatures, L2 HMAC), market parameter
//! caching and signed order construction for the Polymarket CLOB.

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod orders;
pub mod signing;

pub use error::{Error, ErrorKind, RequestStep, Result};
