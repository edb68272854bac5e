//! L2 request signing with HMAC-SHA256.

use auth::{to_base64, to_url_safe_base64};
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Error, Result};

/// Sign a request with HMAC-SHA256 for L2 authentication.
///
/// The message is `timestamp + method + path + body`. An absent body
/// contributes nothing to the message. The secret is URL-safe base64 and the
/// returned signature is URL-safe base64 as well.
#[allow(clippy::result_large_err)]
pub fn build_hmac_signature(
    secret: &str,
    timestamp: &str,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<String> {
    let message = match body {
        Some(b) => format!("{}{}{}{}", timestamp, method, path, b),
        None => format!("{}{}{}", timestamp, method, path),
    };

    let secret_bytes = base64::engine::general_purpose::STANDARD
        .decode(to_base64(secret))
        .map_err(|e| Error::InvalidSecretEncoding(e.to_string()))?;

    let mut mac = Hmac::<Sha256>::new_from_slice(&secret_bytes)
        .map_err(|e| Error::signing(format!("Failed to create HMAC: {}", e)))?;

    mac.update(message.as_bytes());
    let result = mac.finalize();

    let encoded = base64::engine::general_purpose::STANDARD.encode(result.into_bytes());
    Ok(to_url_safe_base64(&encoded))
}
