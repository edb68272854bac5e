//! Typed request and response bodies for the CLOB endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::orders::OrderType;
use crate::signing::{L1AuthHeaders, SignedOrder};

/// Request body for creating an API key.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyRequest {
    pub address: String,
    pub timestamp: String,
    pub nonce: String,
    pub signature: String,
}

impl From<&L1AuthHeaders> for CreateApiKeyRequest {
    fn from(headers: &L1AuthHeaders) -> Self {
        Self {
            address: headers.address.clone(),
            timestamp: headers.timestamp.clone(),
            nonce: headers.nonce.clone(),
            signature: headers.signature.clone(),
        }
    }
}

/// Response from creating or deriving API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub secret: String,
    pub passphrase: String,
}

/// Request body for posting an order.
#[derive(Debug, Clone, Serialize)]
pub struct PostOrderRequest {
    pub order: SignedOrder,
    /// API key of the order owner.
    pub owner: String,
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
}

/// Response from posting an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostOrderResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: String,
    /// Order ID assigned by the CLOB.
    #[serde(rename = "orderID", default)]
    pub order_id: String,
    #[serde(rename = "orderHashes", default)]
    pub order_hashes: Vec<String>,
    /// Status of the order (e.g. "matched", "live", "delayed", "unmatched").
    #[serde(default)]
    pub status: String,
}

/// Request body for cancelling a single order.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    #[serde(rename = "orderID")]
    pub order_id: String,
}

/// Request body for cancelling all orders in a market or for an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CancelMarketOrdersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

impl CancelMarketOrdersRequest {
    pub fn is_empty(&self) -> bool {
        self.market.is_none() && self.asset_id.is_none()
    }
}

/// Response from any cancel endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(default)]
    pub canceled: Vec<String>,
    /// order id -> reason
    #[serde(default)]
    pub not_canceled: HashMap<String, String>,
}

/// Filters for `/data/orders`. Unset filters are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOrdersQuery {
    pub id: Option<String>,
    pub market: Option<String>,
    pub asset_id: Option<String>,
}

impl ActiveOrdersQuery {
    /// Encoded query string with keys in sorted order, or `None` when no
    /// filter is set.
    pub fn to_query(&self) -> Option<String> {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in [
            ("asset_id", &self.asset_id),
            ("id", &self.id),
            ("market", &self.market),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.append_pair(key, value);
                any = true;
            }
        }
        any.then(|| query.finish())
    }
}

/// An order as reported by the CLOB.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenOrder {
    pub id: String,
    pub status: String,
    /// API key of the owner.
    pub owner: String,
    pub maker_address: String,
    /// Condition id.
    pub market: String,
    pub asset_id: String,
    pub side: String,
    pub original_size: String,
    pub size_matched: String,
    pub price: String,
    pub outcome: String,
    pub expiration: String,
    pub order_type: String,
    pub created_at: i64,
}

/// One page of `/data/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActiveOrdersResponse {
    pub data: Vec<OpenOrder>,
    pub next_cursor: String,
    pub limit: u32,
    pub count: u32,
}

/// Response from `/order-scoring`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderScoringResponse {
    #[serde(default)]
    pub scoring: bool,
}

/// Request body for `/orders-scoring`.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersScoringRequest {
    #[serde(rename = "orderIds")]
    pub order_ids: Vec<String>,
}

/// order id -> scoring
pub type OrdersScoringResponse = HashMap<String, bool>;

/// Response from `/tick-size`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TickSizeResponse {
    pub minimum_tick_size: f64,
}

/// Response from `/fee-rate`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FeeRateResponse {
    pub base_fee: u64,
}

/// Response from `/neg-risk`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NegRiskResponse {
    pub neg_risk: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_order_response() {
        let json = r#"{"success":true,"errorMsg":"","orderID":"0xabc","orderHashes":["0x1"],"status":"live"}"#;
        let resp: PostOrderResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.order_id, "0xabc");
        assert_eq!(resp.order_hashes, vec!["0x1".to_string()]);
        assert_eq!(resp.status, "live");
    }

    #[test]
    fn test_active_orders_query() {
        assert_eq!(ActiveOrdersQuery::default().to_query(), None);

        let query = ActiveOrdersQuery {
            id: None,
            market: Some("0xcond".to_string()),
            asset_id: Some("123".to_string()),
        };
        assert_eq!(query.to_query().unwrap(), "asset_id=123&market=0xcond");

        let blank = ActiveOrdersQuery {
            id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(blank.to_query(), None);
    }

    #[test]
    fn test_active_orders_response() {
        let json = r#"{"data":[{"id":"0xabc","status":"LIVE","side":"BUY","price":"0.5","created_at":1700000000,"associate_trades":[]}],"next_cursor":"LTE=","limit":500,"count":1}"#;
        let resp: ActiveOrdersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.count, 1);
        assert_eq!(resp.next_cursor, "LTE=");
        assert_eq!(resp.data[0].id, "0xabc");
        assert_eq!(resp.data[0].created_at, 1700000000);
        assert!(resp.data[0].asset_id.is_empty());
    }

    #[test]
    fn test_orders_scoring_body() {
        let body = OrdersScoringRequest {
            order_ids: vec!["0x1".to_string(), "0x2".to_string()],
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"orderIds":["0x1","0x2"]}"#);

        let resp: OrdersScoringResponse =
            serde_json::from_str(r#"{"0x1":true,"0x2":false}"#).unwrap();
        assert!(resp["0x1"]);
        assert!(!resp["0x2"]);
    }

    #[test]
    fn test_cancel_market_orders_body() {
        let empty = CancelMarketOrdersRequest::default();
        assert!(empty.is_empty());

        let by_asset = CancelMarketOrdersRequest {
            market: None,
            asset_id: Some("123".to_string()),
        };
        assert_eq!(serde_json::to_string(&by_asset).unwrap(), r#"{"asset_id":"123"}"#);
    }

    #[test]
    fn test_cancel_response() {
        let json = r#"{"canceled":["a"],"not_canceled":{"b":"order not found"}}"#;
        let resp: CancelOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.canceled, vec!["a".to_string()]);
        assert_eq!(resp.not_canceled["b"], "order not found");
    }

    #[test]
    fn test_market_param_responses() {
        let tick: TickSizeResponse = serde_json::from_str(r#"{"minimum_tick_size":0.01}"#).unwrap();
        assert_eq!(tick.minimum_tick_size.to_string(), "0.01");

        let tick: TickSizeResponse =
            serde_json::from_str(r#"{"minimum_tick_size":0.0001}"#).unwrap();
        assert_eq!(tick.minimum_tick_size.to_string(), "0.0001");

        let fee: FeeRateResponse = serde_json::from_str(r#"{"base_fee":0}"#).unwrap();
        assert_eq!(fee.base_fee, 0);

        let neg: NegRiskResponse = serde_json::from_str(r#"{"neg_risk":true}"#).unwrap();
        assert!(neg.neg_risk);
    }
}
