//! Authentication header bundles attached to outgoing CLOB requests.

/// Header carrying the checksummed wallet address.
pub const POLY_ADDRESS: &str = "POLY_ADDRESS";
/// Header carrying the L1 or L2 signature.
pub const POLY_SIGNATURE: &str = "POLY_SIGNATURE";
/// Header carrying the signing timestamp (unix seconds).
pub const POLY_TIMESTAMP: &str = "POLY_TIMESTAMP";
/// Header carrying the L1 nonce.
pub const POLY_NONCE: &str = "POLY_NONCE";
/// Header carrying the L2 API key.
pub const POLY_API_KEY: &str = "POLY_API_KEY";
/// Header carrying the L2 passphrase.
pub const POLY_PASSPHRASE: &str = "POLY_PASSPHRASE";

/// L1 headers proving wallet custody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1AuthHeaders {
    pub address: String,
    /// EIP-712 signature, lowercase hex with 0x prefix.
    pub signature: String,
    pub timestamp: String,
    pub nonce: String,
}

impl L1AuthHeaders {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (POLY_ADDRESS, self.address.clone()),
            (POLY_SIGNATURE, self.signature.clone()),
            (POLY_TIMESTAMP, self.timestamp.clone()),
            (POLY_NONCE, self.nonce.clone()),
        ]
    }
}

/// L2 headers proving possession of issued API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct L2AuthHeaders {
    pub address: String,
    /// HMAC-SHA256 signature, URL-safe base64.
    pub signature: String,
    pub timestamp: String,
    pub api_key: String,
    pub passphrase: String,
}

impl L2AuthHeaders {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (POLY_ADDRESS, self.address.clone()),
            (POLY_SIGNATURE, self.signature.clone()),
            (POLY_TIMESTAMP, self.timestamp.clone()),
            (POLY_API_KEY, self.api_key.clone()),
            (POLY_PASSPHRASE, self.passphrase.clone()),
        ]
    }
}

impl std::fmt::Debug for L2AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("L2AuthHeaders")
            .field("address", &self.address)
            .field("timestamp", &self.timestamp)
            .field("api_key", &self.api_key)
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Authentication attached to a raw request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthHeaders {
    /// Public endpoint.
    #[default]
    None,
    L1(L1AuthHeaders),
    L2(L2AuthHeaders),
}

impl AuthHeaders {
    /// Header name/value pairs in transmission order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            AuthHeaders::None => Vec::new(),
            AuthHeaders::L1(headers) => headers.to_pairs(),
            AuthHeaders::L2(headers) => headers.to_pairs(),
        }
    }
}
