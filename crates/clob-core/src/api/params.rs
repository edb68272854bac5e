//! Market parameter endpoints, used as the cache's fetch collaborator.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::requests::{FeeRateResponse, NegRiskResponse, TickSizeResponse};
use super::transport::{HttpMethod, RawRequest, RequestExecutor};
use crate::market::MarketParamsSource;
use crate::{Error, RequestStep, Result};

/// Fetches tick size, fee rate and neg-risk flag from the public CLOB endpoints.
#[derive(Clone)]
pub struct ClobMarketParams {
    executor: Arc<dyn RequestExecutor>,
}

impl ClobMarketParams {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        step: RequestStep,
        endpoint: &str,
        token_id: &str,
    ) -> Result<T> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("token_id", token_id)
            .finish();
        let request = RawRequest::new(HttpMethod::Get, format!("{}?{}", endpoint, query));

        let bytes = self
            .executor
            .execute(request)
            .await
            .map_err(|e| Error::transport(step, e))?;

        serde_json::from_slice(&bytes).map_err(|e| Error::transport(step, e.into()))
    }
}

#[async_trait::async_trait]
impl MarketParamsSource for ClobMarketParams {
    async fn fetch_tick_size(&self, token_id: &str) -> Result<String> {
        let response: TickSizeResponse = self
            .get(RequestStep::FetchTickSize, "/tick-size", token_id)
            .await?;
        Ok(response.minimum_tick_size.to_string())
    }

    async fn fetch_fee_rate(&self, token_id: &str) -> Result<u64> {
        let response: FeeRateResponse = self
            .get(RequestStep::FetchFeeRate, "/fee-rate", token_id)
            .await?;
        Ok(response.base_fee)
    }

    async fn fetch_neg_risk(&self, token_id: &str) -> Result<bool> {
        let response: NegRiskResponse = self
            .get(RequestStep::FetchNegRisk, "/neg-risk", token_id)
            .await?;
        Ok(response.neg_risk)
    }
}

impl std::fmt::Debug for ClobMarketParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClobMarketParams").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::MockRequestExecutor;
    use crate::signing::AuthHeaders;

    #[tokio::test]
    async fn test_fetch_tick_size() {
        let mut executor = MockRequestExecutor::new();
        executor
            .expect_execute()
            .withf(|req| {
                req.method == HttpMethod::Get
                    && req.path == "/tick-size?token_id=123"
                    && req.headers == AuthHeaders::None
                    && req.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(br#"{"minimum_tick_size":0.001}"#.to_vec()));

        let source = ClobMarketParams::new(Arc::new(executor));
        assert_eq!(source.fetch_tick_size("123").await.unwrap(), "0.001");
    }

    #[tokio::test]
    async fn test_fetch_fee_rate_and_neg_risk() {
        let mut executor = MockRequestExecutor::new();
        executor
            .expect_execute()
            .withf(|req| req.path == "/fee-rate?token_id=123")
            .times(1)
            .returning(|_| Ok(br#"{"base_fee":100}"#.to_vec()));
        executor
            .expect_execute()
            .withf(|req| req.path == "/neg-risk?token_id=123")
            .times(1)
            .returning(|_| Ok(br#"{"neg_risk":true}"#.to_vec()));

        let source = ClobMarketParams::new(Arc::new(executor));
        assert_eq!(source.fetch_fee_rate("123").await.unwrap(), 100);
        assert!(source.fetch_neg_risk("123").await.unwrap());
    }

    #[tokio::test]
    async fn test_errors_carry_step() {
        let mut executor = MockRequestExecutor::new();
        executor.expect_execute().times(1).returning(|_| {
            Err(Error::Api {
                message: "bad gateway".to_string(),
                status: Some(502),
            })
        });

        let source = ClobMarketParams::new(Arc::new(executor));
        let err = source.fetch_fee_rate("123").await.unwrap_err();
        assert_eq!(err.step(), Some(RequestStep::FetchFeeRate));
    }

    #[tokio::test]
    async fn test_malformed_response_carries_step() {
        let mut executor = MockRequestExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .returning(|_| Ok(b"not json".to_vec()));

        let source = ClobMarketParams::new(Arc::new(executor));
        let err = source.fetch_neg_risk("123").await.unwrap_err();
        assert_eq!(err.step(), Some(RequestStep::FetchNegRisk));
    }
}
