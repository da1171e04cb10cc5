use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{ApiFamily, Params, Request, RestClient};
use crate::core::types::{
    AccountInfo, Balance, MyTrade, OrderResponse, OrderResponseType, OrderSide, OrderType,
    TimeInForce,
};
use rust_decimal::Decimal;
use tracing::instrument;

/// Parameters for a new spot or margin order.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
    pub stop_price: Option<Decimal>,
    pub iceberg_qty: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    pub new_order_resp_type: Option<OrderResponseType>,
}

impl OrderRequest {
    /// Limit order, good-till-cancelled unless overridden.
    pub fn limit(symbol: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            stop_price: None,
            iceberg_qty: None,
            new_client_order_id: None,
            new_order_resp_type: None,
        }
    }

    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: None,
            stop_price: None,
            iceberg_qty: None,
            new_client_order_id: None,
            new_order_resp_type: None,
        }
    }

    #[must_use]
    pub const fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    #[must_use]
    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    #[must_use]
    pub const fn response_type(mut self, resp: OrderResponseType) -> Self {
        self.new_order_resp_type = Some(resp);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side)
            .with("type", self.order_type)
            .with("quantity", self.quantity)
            .with_opt("price", self.price)
            .with_opt("timeInForce", self.time_in_force)
            .with_opt("stopPrice", self.stop_price)
            .with_opt("icebergQty", self.iceberg_qty)
            .with_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .with_opt("newOrderRespType", self.new_order_resp_type)
    }
}

/// Authenticated spot trading and account endpoints.
impl<R: RestClient> BinanceClient<R> {
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, BinanceError> {
        self.rest()
            .dispatch_json(
                Request::post(ApiFamily::Api, "order")
                    .params(order.to_params())
                    .signed(),
            )
            .await
    }

    /// Validate an order against the matching engine without placing it.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn create_test_order(&self, order: &OrderRequest) -> Result<(), BinanceError> {
        self.rest()
            .dispatch(
                Request::post(ApiFamily::Api, "order/test")
                    .params(order.to_params())
                    .signed(),
            )
            .await?;
        Ok(())
    }

    pub async fn limit_buy(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderResponse, BinanceError> {
        self.create_order(&OrderRequest::limit(symbol, OrderSide::Buy, quantity, price))
            .await
    }

    pub async fn limit_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderResponse, BinanceError> {
        self.create_order(&OrderRequest::limit(symbol, OrderSide::Sell, quantity, price))
            .await
    }

    pub async fn market_buy(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResponse, BinanceError> {
        self.create_order(&OrderRequest::market(symbol, OrderSide::Buy, quantity))
            .await
    }

    pub async fn market_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResponse, BinanceError> {
        self.create_order(&OrderRequest::market(symbol, OrderSide::Sell, quantity))
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn get_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
    ) -> Result<OrderResponse, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("orderId", order_id)
            .with_opt("origClientOrderId", orig_client_order_id);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "order").params(params).signed())
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn all_orders(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch_json(
                Request::get(ApiFamily::Api, "allOrders")
                    .params(params)
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
    ) -> Result<OrderResponse, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("orderId", order_id)
            .with_opt("origClientOrderId", orig_client_order_id);
        self.rest()
            .dispatch_json(
                Request::delete(ApiFamily::Api, "order")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn open_orders(
        &self,
        symbol: Option<&str>,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.rest()
            .dispatch_json(
                Request::get(ApiFamily::Api, "openOrders")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn account(&self) -> Result<AccountInfo, BinanceError> {
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "account").signed())
            .await
    }

    /// Balance for one asset, or `None` if the account does not hold it.
    pub async fn asset_balance(&self, asset: &str) -> Result<Option<Balance>, BinanceError> {
        let account = self.account().await?;
        Ok(account
            .balances
            .into_iter()
            .find(|b| b.asset.eq_ignore_ascii_case(asset)))
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn my_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<MyTrade>, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch_json(
                Request::get(ApiFamily::Api, "myTrades")
                    .params(params)
                    .signed(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_order_params_carry_wire_names() {
        let order = OrderRequest::limit(
            "BTCUSDT",
            OrderSide::Buy,
            Decimal::new(1, 0),
            Decimal::new(42_000, 0),
        );
        let params = order.to_params();
        let query = {
            let mut p = params;
            p.canonicalize();
            p.to_query_string()
        };
        assert_eq!(
            query,
            "price=42000&quantity=1&side=BUY&symbol=BTCUSDT&timeInForce=GTC&type=LIMIT"
        );
    }

    #[test]
    fn market_order_omits_price_and_tif() {
        let order = OrderRequest::market("ETHUSDT", OrderSide::Sell, Decimal::new(5, 1));
        let params = order.to_params();
        assert!(!params.contains_key("price"));
        assert!(!params.contains_key("timeInForce"));
        assert!(params.contains_key("quantity"));
    }
}
