//! Error types for CLOB authentication and order construction.

use thiserror::Error;

/// The remote call an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStep {
    FetchTickSize,
    FetchFeeRate,
    FetchNegRisk,
    CreateApiKey,
    DeriveApiKey,
    SubmitOrder,
    CancelOrder,
    FetchOrders,
    CheckScoring,
}

impl std::fmt::Display for RequestStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = match self {
            RequestStep::FetchTickSize => "fetch-tick-size",
            RequestStep::FetchFeeRate => "fetch-fee-rate",
            RequestStep::FetchNegRisk => "fetch-neg-risk",
            RequestStep::CreateApiKey => "create-api-key",
            RequestStep::DeriveApiKey => "derive-api-key",
            RequestStep::SubmitOrder => "submit-order",
            RequestStep::CancelOrder => "cancel-order",
            RequestStep::FetchOrders => "fetch-orders",
            RequestStep::CheckScoring => "check-scoring",
        };
        f.write_str(step)
    }
}

/// Coarse classification used by callers to decide on retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid key material or credentials. Not retryable.
    Configuration,
    /// Malformed input rejected before any network or crypto work.
    Validation,
    /// A market parameter could not be resolved. The whole build may be retried.
    Resolution,
    /// The signature primitive failed.
    Signing,
    /// An injected collaborator failed to complete a request.
    Transport,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("API credentials not set - register or derive an API key first")]
    MissingCredentials,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Invalid token id: {0}")]
    InvalidTokenId(String),

    #[error("Invalid tick size: {0}")]
    InvalidTickSize(String),

    #[error("Invalid API secret encoding: {0}")]
    InvalidSecretEncoding(String),

    #[error("Could not resolve tick size for token {token_id}: {source}")]
    MissingTickSize {
        token_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Could not resolve fee rate for token {token_id}: {source}")]
    MissingFeeRate {
        token_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Could not resolve neg-risk flag for token {token_id}: {source}")]
    MissingNegRiskFlag {
        token_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Transport error during {step}: {source}")]
    Transport {
        step: RequestStep,
        #[source]
        source: Box<Error>,
    },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },
}

impl Error {
    /// Wrap a collaborator failure with the step it happened in.
    pub fn transport(step: RequestStep, source: Error) -> Self {
        Error::Transport {
            step,
            source: Box::new(source),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Error::Signing {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } | Error::ConfigFile(_) | Error::MissingCredentials => {
                ErrorKind::Configuration
            }
            Error::InvalidAddress(_)
            | Error::InvalidPrice(_)
            | Error::InvalidSize(_)
            | Error::InvalidTokenId(_)
            | Error::InvalidTickSize(_)
            | Error::InvalidSecretEncoding(_) => ErrorKind::Validation,
            Error::MissingTickSize { .. }
            | Error::MissingFeeRate { .. }
            | Error::MissingNegRiskFlag { .. } => ErrorKind::Resolution,
            Error::Signing { .. } => ErrorKind::Signing,
            Error::Transport { .. } | Error::Http(_) | Error::Json(_) | Error::Api { .. } => {
                ErrorKind::Transport
            }
        }
    }

    /// The request step for transport failures, looking through resolution wrappers.
    pub fn step(&self) -> Option<RequestStep> {
        match self {
            Error::Transport { step, .. } => Some(*step),
            Error::MissingTickSize { source, .. }
            | Error::MissingFeeRate { source, .. }
            | Error::MissingNegRiskFlag { source, .. } => source.step(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
