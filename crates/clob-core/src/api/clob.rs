//! Authenticated Polymarket CLOB client.
//!
//! Registers API credentials with L1 wallet signatures, then signs order
//! submission, queries and cancellation with L2 HMAC headers.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use alloy_primitives::Address;
use auth::{ApiCredentials, CredentialStore, TradingWallet};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::params::ClobMarketParams;
use super::requests::{
    ActiveOrdersQuery, ActiveOrdersResponse, ApiKeyResponse, CancelMarketOrdersRequest,
    CancelOrderRequest, CancelOrderResponse, CreateApiKeyRequest, OpenOrder,
    OrderScoringResponse, OrdersScoringRequest, OrdersScoringResponse, PostOrderRequest,
    PostOrderResponse,
};
use super::transport::{ClobClient, HttpMethod, RawRequest, RequestExecutor};
use crate::config::ClobConfig;
use crate::market::MarketParamsCache;
use crate::orders::{OrderBuilder, OrderIntent, OrderOverrides, OrderType};
use crate::signing::{current_timestamp, AuthHeaders, OrderSigner, SignatureType, SignedOrder};
use crate::{Error, RequestStep, Result};

/// Authenticated CLOB client for credential registration and order management.
pub struct AuthenticatedClobClient {
    executor: Arc<dyn RequestExecutor>,
    builder: OrderBuilder,
    /// API credentials for L2 authentication (empty until registered).
    credentials: CredentialStore,
}

impl AuthenticatedClobClient {
    /// Create a new authenticated client without credentials.
    pub fn new(executor: Arc<dyn RequestExecutor>, builder: OrderBuilder) -> Self {
        Self {
            executor,
            builder,
            credentials: CredentialStore::new(),
        }
    }

    /// Create with an existing credential store.
    pub fn with_credentials(
        executor: Arc<dyn RequestExecutor>,
        builder: OrderBuilder,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            executor,
            builder,
            credentials,
        }
    }

    /// Wire up the HTTP client, signer, cache and builder from configuration.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &ClobConfig) -> Result<Self> {
        config.validate()?;

        let wallet = TradingWallet::from_private_key(&config.private_key)
            .map_err(|e| Error::config(format!("{:#}", e)))?;
        let signer = OrderSigner::new(wallet, config.chain_id)?;

        let executor: Arc<dyn RequestExecutor> = Arc::new(ClobClient::new(
            Some(&config.host),
            StdDuration::from_secs(config.timeout_secs),
        )?);
        let cache = Arc::new(MarketParamsCache::new(Arc::new(ClobMarketParams::new(
            executor.clone(),
        ))));

        let mut builder = OrderBuilder::new(signer, cache)
            .with_signature_type(SignatureType::try_from(config.signature_type)?);
        if let Some(funder) = config.funder_address()? {
            builder = builder.with_funder(funder);
        }

        let credentials = match config.api_credentials() {
            Some(credentials) => CredentialStore::with_credentials(credentials),
            None => CredentialStore::new(),
        };

        Ok(Self::with_credentials(executor, builder, credentials))
    }

    /// Get the signer's wallet address (EIP-55 checksummed).
    pub fn address(&self) -> String {
        self.builder.signer().address_string()
    }

    /// Get the maker address orders are placed for.
    pub fn maker(&self) -> Address {
        self.builder.maker()
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn order_builder(&self) -> &OrderBuilder {
        &self.builder
    }

    /// Create new API credentials via POST /auth/api-key (L1 authentication).
    pub async fn create_api_key(&self) -> Result<ApiCredentials> {
        let headers = self
            .builder
            .signer()
            .sign_l1(&self.address(), current_timestamp(), 0)
            .await?;
        let body = serde_json::to_string(&CreateApiKeyRequest::from(&headers))?;

        let request = RawRequest::new(HttpMethod::Post, "/auth/api-key")
            .body(body)
            .headers(AuthHeaders::L1(headers));
        let response: ApiKeyResponse = self.send(RequestStep::CreateApiKey, request).await?;

        let credentials = self.store_credentials(response).await;
        info!(address = %self.address(), "Successfully created API credentials");
        Ok(credentials)
    }

    /// Derive existing API credentials via GET /auth/derive-api-key (L1 authentication).
    pub async fn derive_api_key(&self) -> Result<ApiCredentials> {
        let headers = self
            .builder
            .signer()
            .sign_l1(&self.address(), current_timestamp(), 0)
            .await?;

        let request = RawRequest::new(HttpMethod::Get, "/auth/derive-api-key")
            .headers(AuthHeaders::L1(headers));
        let response: ApiKeyResponse = self.send(RequestStep::DeriveApiKey, request).await?;

        let credentials = self.store_credentials(response).await;
        info!(address = %self.address(), "Successfully derived API credentials");
        Ok(credentials)
    }

    /// Create or derive API credentials (tries create first, then derive).
    pub async fn create_or_derive_api_key(&self) -> Result<ApiCredentials> {
        match self.create_api_key().await {
            Ok(creds) => Ok(creds),
            Err(create_err) => {
                warn!(error = %create_err, "create_api_key failed, trying derive");
                self.derive_api_key().await
            }
        }
    }

    /// Build and sign an order without submitting it.
    pub async fn create_order(
        &self,
        intent: &OrderIntent,
        overrides: &OrderOverrides,
        order_type: OrderType,
    ) -> Result<SignedOrder> {
        self.builder
            .build_and_sign(intent, overrides, order_type)
            .await
    }

    /// Post a signed order to the CLOB.
    pub async fn post_order(
        &self,
        signed_order: SignedOrder,
        order_type: OrderType,
    ) -> Result<PostOrderResponse> {
        let credentials = self.require_credentials().await?;

        let body = serde_json::to_string(&PostOrderRequest {
            order: signed_order,
            owner: credentials.api_key.clone(),
            order_type,
        })?;

        let request = self.l2_request(HttpMethod::Post, "/order", Some(body), &credentials)?;
        let result: PostOrderResponse = self.send(RequestStep::SubmitOrder, request).await?;

        if !result.success || !result.error_msg.is_empty() {
            warn!(
                order_id = %result.order_id,
                status = %result.status,
                error = %result.error_msg,
                "Order rejected"
            );
            return Err(Error::Api {
                message: format!("Order rejected: {}", result.error_msg),
                status: None,
            });
        }

        info!(order_id = %result.order_id, status = %result.status, "Order posted successfully");
        Ok(result)
    }

    /// Build, sign and post an order in one call.
    pub async fn create_and_post_order(
        &self,
        intent: &OrderIntent,
        overrides: &OrderOverrides,
        order_type: OrderType,
    ) -> Result<PostOrderResponse> {
        let signed = self.create_order(intent, overrides, order_type).await?;
        self.post_order(signed, order_type).await
    }

    /// Fetch a single order by ID via GET /orders/{id}.
    pub async fn get_order(&self, order_id: &str) -> Result<OpenOrder> {
        let path = format!("/orders/{}", order_id);
        self.l2_send(RequestStep::FetchOrders, HttpMethod::Get, &path, None)
            .await
    }

    /// List open orders via GET /data/orders, optionally filtered.
    ///
    /// The query string is part of the signed path.
    pub async fn get_active_orders(&self, query: &ActiveOrdersQuery) -> Result<ActiveOrdersResponse> {
        let path = match query.to_query() {
            Some(query) => format!("/data/orders?{}", query),
            None => "/data/orders".to_string(),
        };
        let result: ActiveOrdersResponse = self
            .l2_send(RequestStep::FetchOrders, HttpMethod::Get, &path, None)
            .await?;

        debug!(count = result.data.len(), next_cursor = %result.next_cursor, "Fetched active orders");
        Ok(result)
    }

    /// Check whether an order is scoring for rewards.
    pub async fn is_order_scoring(&self, order_id: &str) -> Result<OrderScoringResponse> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("order_id", order_id)
            .finish();
        let path = format!("/order-scoring?{}", query);
        self.l2_send(RequestStep::CheckScoring, HttpMethod::Get, &path, None)
            .await
    }

    /// Check several orders at once; returns order id -> scoring.
    pub async fn are_orders_scoring(&self, order_ids: &[String]) -> Result<OrdersScoringResponse> {
        let body = serde_json::to_string(&OrdersScoringRequest {
            order_ids: order_ids.to_vec(),
        })?;
        self.l2_send(RequestStep::CheckScoring, HttpMethod::Post, "/orders-scoring", Some(body))
            .await
    }

    /// Cancel an order by ID.
    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelOrderResponse> {
        let body = serde_json::to_string(&CancelOrderRequest {
            order_id: order_id.to_string(),
        })?;
        self.cancel("/order", Some(body)).await
    }

    /// Cancel several orders by ID.
    pub async fn cancel_orders(&self, order_ids: &[String]) -> Result<CancelOrderResponse> {
        let body = serde_json::to_string(order_ids)?;
        self.cancel("/orders", Some(body)).await
    }

    /// Cancel all open orders.
    pub async fn cancel_all(&self) -> Result<CancelOrderResponse> {
        self.cancel("/cancel-all", None).await
    }

    /// Cancel all orders for a market and/or asset.
    pub async fn cancel_market_orders(
        &self,
        params: &CancelMarketOrdersRequest,
    ) -> Result<CancelOrderResponse> {
        let body = if params.is_empty() {
            None
        } else {
            Some(serde_json::to_string(params)?)
        };
        self.cancel("/cancel-market-orders", body).await
    }

    async fn cancel(&self, path: &str, body: Option<String>) -> Result<CancelOrderResponse> {
        let result: CancelOrderResponse = self
            .l2_send(RequestStep::CancelOrder, HttpMethod::Delete, path, body)
            .await?;

        info!(
            path = path,
            canceled = result.canceled.len(),
            not_canceled = result.not_canceled.len(),
            "Cancel request completed"
        );
        Ok(result)
    }

    async fn store_credentials(&self, response: ApiKeyResponse) -> ApiCredentials {
        let credentials =
            ApiCredentials::new(response.api_key, &response.secret, response.passphrase);
        self.credentials.set(credentials.clone()).await;
        credentials
    }

    async fn require_credentials(&self) -> Result<ApiCredentials> {
        self.credentials.get().await.ok_or(Error::MissingCredentials)
    }

    async fn l2_send<T: DeserializeOwned>(
        &self,
        step: RequestStep,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T> {
        let credentials = self.require_credentials().await?;
        let request = self.l2_request(method, path, body, &credentials)?;
        self.send(step, request).await
    }

    /// Sign a request with L2 headers over the exact path and body that will be sent.
    #[allow(clippy::result_large_err)]
    fn l2_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        credentials: &ApiCredentials,
    ) -> Result<RawRequest> {
        let headers = self.builder.signer().sign_l2(
            &self.address(),
            method.as_str(),
            path,
            body.as_deref(),
            current_timestamp(),
            credentials,
        )?;

        let mut request = RawRequest::new(method, path).headers(AuthHeaders::L2(headers));
        request.body = body;
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(&self, step: RequestStep, request: RawRequest) -> Result<T> {
        let bytes = self
            .executor
            .execute(request)
            .await
            .map_err(|e| Error::transport(step, e))?;

        serde_json::from_slice(&bytes).map_err(|e| Error::transport(step, e.into()))
    }
}

impl std::fmt::Debug for AuthenticatedClobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClobClient")
            .field("address", &self.address())
            .field("builder", &self.builder)
            .field("credentials", &self.credentials)
            .finish()
    }
}
