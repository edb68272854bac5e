//! Wallet and Credential State
//!
//! Private key custody for the trading wallet and the process-scoped API
//! credentials issued by the CLOB registration flow.

pub mod credentials;
pub mod wallet;

pub use credentials::{to_base64, to_url_safe_base64, ApiCredentials, CredentialStore};
pub use wallet::TradingWallet;
