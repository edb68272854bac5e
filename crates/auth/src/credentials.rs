//! API credential state for L2 authentication.
//!
//! Credentials are minted once per process by the registration flow and
//! replaced wholesale by any later registration. They are never persisted.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Convert a standard base64 string to the URL-safe alphabet.
///
/// `+` becomes `-` and `/` becomes `_`; `=` padding is kept.
pub fn to_url_safe_base64(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Convert a URL-safe base64 string back to the standard alphabet.
pub fn to_base64(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect()
}

/// API credentials for authenticated CLOB requests.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// API key (sent verbatim as `POLY_API_KEY`).
    pub api_key: String,
    /// Shared HMAC secret, URL-safe base64.
    pub api_secret: String,
    /// Passphrase (sent verbatim as `POLY_PASSPHRASE`).
    pub api_passphrase: String,
}

impl ApiCredentials {
    /// Create new API credentials, normalizing the secret to URL-safe base64.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl AsRef<str>,
        api_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: to_url_safe_base64(api_secret.as_ref()),
            api_passphrase: api_passphrase.into(),
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("api_passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Process-scoped holder for the current API credentials.
///
/// Cloning the store shares the same underlying slot.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<ApiCredentials>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds credentials.
    pub fn with_credentials(credentials: ApiCredentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(credentials))),
        }
    }

    /// Replace the held credentials wholesale.
    pub async fn set(&self, credentials: ApiCredentials) {
        let mut slot = self.inner.write().await;
        let replaced = slot.is_some();
        *slot = Some(credentials);
        info!(replaced, "API credentials stored");
    }

    /// Snapshot of the current credentials, if any.
    pub async fn get(&self) -> Option<ApiCredentials> {
        self.inner.read().await.clone()
    }

    pub async fn is_set(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Drop the held credentials.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let has_credentials = self
            .inner
            .try_read()
            .map(|slot| slot.is_some())
            .unwrap_or(false);
        f.debug_struct("CredentialStore")
            .field("has_credentials", &has_credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_round_trip() {
        for s in ["ab+c/d==", "++//", "plain", "", "YQ=="] {
            assert_eq!(to_base64(&to_url_safe_base64(s)), s);
        }
    }

    #[test]
    fn test_url_safe_translation() {
        assert_eq!(to_url_safe_base64("a+b/c="), "a-b_c=");
        assert_eq!(to_base64("a-b_c="), "a+b/c=");
    }

    #[test]
    fn test_new_normalizes_secret() {
        let creds = ApiCredentials::new("key", "c2Vj+cmV0/==", "pass");
        assert_eq!(creds.api_secret, "c2Vj-cmV0_==");
    }

    #[test]
    fn test_debug_does_not_expose_credentials() {
        let creds = ApiCredentials::new("secret-key", "c2VjcmV0", "secret-pass");
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("secret-key"));
        assert!(!debug_str.contains("secret-pass"));
        assert!(!debug_str.contains("c2VjcmV0"));
    }

    #[tokio::test]
    async fn test_store_overwrites_wholesale() {
        let store = CredentialStore::new();
        assert!(!store.is_set().await);

        store.set(ApiCredentials::new("k1", "czE=", "p1")).await;
        store.set(ApiCredentials::new("k2", "czI=", "p2")).await;

        let creds = store.get().await.unwrap();
        assert_eq!(creds.api_key, "k2");
        assert_eq!(creds.api_secret, "czI=");
        assert_eq!(creds.api_passphrase, "p2");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = CredentialStore::new();
        let clone = store.clone();
        clone.set(ApiCredentials::new("k", "cw==", "p")).await;
        assert!(store.is_set().await);

        store.clear().await;
        assert!(!clone.is_set().await);
    }

    #[test]
    fn test_with_credentials_starts_populated() {
        let store = CredentialStore::with_credentials(ApiCredentials::new("k", "cw==", "p"));
        assert!(tokio_test::block_on(store.is_set()));
        assert!(format!("{:?}", store).contains("has_credentials: true"));
    }
}
