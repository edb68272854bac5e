//! Register API credentials and place a limit order.
//!
//! Run with:
//! ```
//! POLY_PRIVATE_KEY=0x... DEMO_TOKEN_ID=... cargo run --example place_order
//! ```
//!
//! The order is only built and signed unless `DEMO_SUBMIT=1` is set.

use std::str::FromStr;

use clob_core::api::AuthenticatedClobClient;
use clob_core::config::ClobConfig;
use clob_core::orders::{OrderIntent, OrderOverrides, OrderType};
use clob_core::signing::OrderSide;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Place Order ===\n");

    // Step 1: Load configuration
    println!("1. Loading configuration from environment...");
    let config = ClobConfig::from_env()?;
    config.validate()?;
    println!("   ✓ Chain {} at {}", config.chain_id, config.host);

    // Step 2: Create authenticated client
    println!("\n2. Creating authenticated CLOB client...");
    let client = AuthenticatedClobClient::from_config(&config)?;
    println!("   ✓ Signer address: {}", client.address());
    println!("   ✓ Maker address:  {}", client.maker().to_checksum(None));

    // Step 3: Register or derive API credentials (L1)
    if !client.credentials().is_set().await {
        println!("\n3. Creating or deriving API credentials...");
        let creds = client.create_or_derive_api_key().await?;
        println!(
            "   ✓ API Key: {}...",
            &creds.api_key[..8.min(creds.api_key.len())]
        );
    } else {
        println!("\n3. Using API credentials from configuration");
    }

    // Step 4: Build and sign the order
    let token_id = std::env::var("DEMO_TOKEN_ID")?;
    let price = Decimal::from_str(&std::env::var("DEMO_PRICE").unwrap_or_else(|_| "0.50".into()))?;
    let size = Decimal::from_str(&std::env::var("DEMO_SIZE").unwrap_or_else(|_| "5".into()))?;

    println!("\n4. Building BUY {} @ {} on {}...", size, price, token_id);
    let intent = OrderIntent::new(token_id, price, OrderSide::Buy, size);
    let overrides = OrderOverrides::default();
    let signed = client
        .create_order(&intent, &overrides, OrderType::Gtc)
        .await?;
    println!("   ✓ makerAmount={} takerAmount={}", signed.maker_amount, signed.taker_amount);
    println!("   ✓ Signed order:\n{}", serde_json::to_string_pretty(&signed)?);

    // Step 5: Submit (L2)
    if std::env::var("DEMO_SUBMIT").as_deref() == Ok("1") {
        println!("\n5. Submitting order...");
        let response = client.post_order(signed, OrderType::Gtc).await?;
        println!("   ✓ Order {} status {}", response.order_id, response.status);
    } else {
        println!("\n5. Skipping submission (set DEMO_SUBMIT=1 to post)");
    }

    println!("\n=== Done ===");
    Ok(())
}
