use crate::client::trading::OrderRequest;
use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{ApiFamily, Params, Request, RestClient};
use serde_json::Value;
use tracing::instrument;

/// USD-margined futures endpoints. The venue signs every call in this
/// family, including the nominally public market data.
impl<R: RestClient> BinanceClient<R> {
    pub async fn futures_account(&self) -> Result<Value, BinanceError> {
        self.rest()
            .dispatch(Request::get(ApiFamily::Futures, "account").signed())
            .await
    }

    pub async fn futures_balance(&self) -> Result<Value, BinanceError> {
        self.rest()
            .dispatch(Request::get(ApiFamily::Futures, "balance").signed())
            .await
    }

    pub async fn futures_exchange_info(&self) -> Result<Value, BinanceError> {
        self.rest()
            .dispatch(Request::get(ApiFamily::Futures, "exchangeInfo").signed())
            .await
    }

    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn create_futures_order(&self, order: &OrderRequest) -> Result<Value, BinanceError> {
        self.rest()
            .dispatch(
                Request::post(ApiFamily::Futures, "order")
                    .params(order.to_params())
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn cancel_futures_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("orderId", order_id)
            .with_opt("origClientOrderId", orig_client_order_id);
        self.rest()
            .dispatch(
                Request::delete(ApiFamily::Futures, "order")
                    .params(params)
                    .signed(),
            )
            .await
    }

    /// Current position risk, optionally filtered to one symbol.
    pub async fn futures_position(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "positionRisk")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn open_futures_orders(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "openOrders")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn futures_account_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "userTrades")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn futures_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "depth")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn futures_price_ticker(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "ticker/price")
                    .params(params)
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol, leverage))]
    pub async fn change_futures_leverage(
        &self,
        symbol: &str,
        leverage: u8,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol).with("leverage", leverage);
        self.rest()
            .dispatch(
                Request::post(ApiFamily::Futures, "leverage")
                    .params(params)
                    .signed(),
            )
            .await
    }

    /// Mark price and premium index for a symbol.
    pub async fn futures_premium_index(
        &self,
        symbol: Option<&str>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "premiumIndex")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn futures_funding_rate(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "fundingRate")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn futures_open_interest(&self, symbol: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Futures, "openInterest")
                    .params(params)
                    .signed(),
            )
            .await
    }
}
