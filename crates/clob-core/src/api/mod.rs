//! CLOB API surface: raw request execution, typed bodies and the
//! authenticated client.

pub mod clob;
pub mod params;
pub mod requests;
pub mod transport;

pub use clob::AuthenticatedClobClient;
pub use params::ClobMarketParams;
pub use requests::{
    ActiveOrdersQuery, ActiveOrdersResponse, ApiKeyResponse, CancelMarketOrdersRequest,
    CancelOrderResponse, OpenOrder, OrderScoringResponse, OrdersScoringResponse,
    PostOrderResponse,
};
pub use transport::{ClobClient, HttpMethod, RawRequest, RequestExecutor};
