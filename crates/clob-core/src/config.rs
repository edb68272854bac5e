//! Configuration for the CLOB signer.

use std::env;

use alloy_primitives::Address;
use auth::ApiCredentials;
use serde::Deserialize;

use crate::signing::{ContractConfig, SignatureType, POLYGON_CHAIN_ID};
use crate::{Error, Result};

/// Prefix of every environment variable read by [`ClobConfig::from_file`].
pub const ENV_PREFIX: &str = "POLY";

fn default_host() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_chain_id() -> u64 {
    POLYGON_CHAIN_ID
}

fn default_timeout_secs() -> u64 {
    30
}

/// CLOB client configuration.
#[derive(Clone, Deserialize)]
pub struct ClobConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Hex-encoded wallet private key.
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// 0 = EOA, 1 = Polymarket proxy, 2 = Gnosis safe.
    #[serde(default)]
    pub signature_type: u8,
    /// Address holding the funds. Defaults to the signer's own address.
    #[serde(default)]
    pub funder: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub api_passphrase: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClobConfig {
    /// Configuration with defaults for everything but the key.
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            host: default_host(),
            private_key: private_key.into(),
            chain_id: default_chain_id(),
            signature_type: 0,
            funder: None,
            api_key: None,
            api_secret: None,
            api_passphrase: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through a variable lookup.
    #[allow(clippy::result_large_err)]
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let private_key = var("POLY_PRIVATE_KEY").ok_or_else(|| {
            Error::config("POLY_PRIVATE_KEY environment variable not set")
        })?;

        let mut config = Self::new(private_key);

        if let Some(host) = var("POLYMARKET_CLOB_URL") {
            config.host = host;
        }
        if let Some(chain_id) = var("POLY_CHAIN_ID") {
            config.chain_id = parse_var("POLY_CHAIN_ID", &chain_id)?;
        }
        if let Some(signature_type) = var("POLY_SIGNATURE_TYPE") {
            config.signature_type = parse_var("POLY_SIGNATURE_TYPE", &signature_type)?;
        }
        if let Some(timeout) = var("POLY_TIMEOUT_SECS") {
            config.timeout_secs = parse_var("POLY_TIMEOUT_SECS", &timeout)?;
        }
        config.funder = var("POLY_FUNDER").filter(|s| !s.trim().is_empty());
        config.api_key = var("POLY_API_KEY");
        config.api_secret = var("POLY_API_SECRET");
        config.api_passphrase = var("POLY_API_PASSPHRASE");

        Ok(config)
    }

    /// Load configuration from a file, with `POLY_`-prefixed environment
    /// variables taking precedence.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &str) -> Result<Self> {
        Self::from_source(config::File::with_name(path))
    }

    #[allow(clippy::result_large_err)]
    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check the configuration before any key material is used.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.private_key.trim().is_empty() {
            return Err(Error::config("private key is required"));
        }

        ContractConfig::for_chain(self.chain_id)?;
        SignatureType::try_from(self.signature_type)?;
        self.funder_address()?;

        let set = [&self.api_key, &self.api_secret, &self.api_passphrase]
            .iter()
            .filter(|v| v.is_some())
            .count();
        if set != 0 && set != 3 {
            return Err(Error::config(
                "api_key, api_secret and api_passphrase must be set together",
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be positive"));
        }

        Ok(())
    }

    /// Parsed funder address, if configured.
    #[allow(clippy::result_large_err)]
    pub fn funder_address(&self) -> Result<Option<Address>> {
        self.funder
            .as_deref()
            .map(|funder| {
                funder
                    .trim()
                    .parse::<Address>()
                    .map_err(|_| Error::config(format!("Invalid funder address: {}", funder)))
            })
            .transpose()
    }

    /// Pre-issued API credentials, if all three parts are configured.
    pub fn api_credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret, &self.api_passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => {
                Some(ApiCredentials::new(key.clone(), secret, passphrase.clone()))
            }
            _ => None,
        }
    }
}

#[allow(clippy::result_large_err)]
fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{} has an invalid value: {}", name, value)))
}

impl std::fmt::Debug for ClobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClobConfig")
            .field("host", &self.host)
            .field("private_key", &"[REDACTED]")
            .field("chain_id", &self.chain_id)
            .field("signature_type", &self.signature_type)
            .field("funder", &self.funder)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field(
                "api_passphrase",
                &self.api_passphrase.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
