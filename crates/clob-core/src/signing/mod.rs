//! Signing module for Polymarket CLOB requests and orders.
//!
//! Two authentication tiers exist. L1 signs an EIP-712 `ClobAuth` message
//! with the wallet key and is used to mint or retrieve API credentials. L2
//! HMAC-signs every trading request with the issued API secret. Orders are
//! signed with EIP-712 against one of two exchange contracts.
//!
//! # Architecture
//!
//! ```text
//! TradingWallet (auth crate)
//!       │
//!       ▼
//! OrderSigner ─── sign_order ──► SignedOrder
//!       │                             │
//!       ├── sign_l1 ──► L1AuthHeaders │
//!       │                             ▼
//!       └── sign_l2 ──► L2AuthHeaders ──► AuthenticatedClobClient
//!                                             │
//!                                             ▼
//!                                     Polymarket CLOB API
//! ```
//!
//! # Example
//!
//! ```ignore
//! use auth::TradingWallet;
//! use clob_core::signing::{OrderSigner, POLYGON_CHAIN_ID};
//!
//! let wallet = TradingWallet::from_env()?;
//! let signer = OrderSigner::new(wallet, POLYGON_CHAIN_ID)?;
//!
//! let headers = signer
//!     .sign_l1(&signer.address_string(), current_timestamp(), 0)
//!     .await?;
//! ```

pub mod domain;
pub mod headers;
pub mod l2;
pub mod order_types;
pub mod signer;

pub use domain::{
    ClobAuthDomain, ContractConfig, Eip712Domain, ExchangeContract, OrderSide, SignatureType,
    POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID,
};

pub use headers::{AuthHeaders, L1AuthHeaders, L2AuthHeaders};

pub use l2::build_hmac_signature;

pub use order_types::{generate_salt, OrderData, SignedOrder};

pub use signer::{current_timestamp, OrderSigner, CLOB_AUTH_MESSAGE};
