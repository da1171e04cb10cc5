use crate::client::trading::OrderRequest;
use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{ApiFamily, Params, Request, RestClient};
use crate::core::types::{ListenKey, OrderResponse};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

/// Transfer directions between the spot and margin wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferDirection {
    SpotToMargin,
    MarginToSpot,
}

impl TransferDirection {
    const fn type_code(self) -> u8 {
        match self {
            Self::SpotToMargin => 1,
            Self::MarginToSpot => 2,
        }
    }
}

/// Margin trading endpoints.
impl<R: RestClient> BinanceClient<R> {
    pub async fn margin_account(&self) -> Result<Value, BinanceError> {
        self.rest()
            .dispatch(Request::get(ApiFamily::Margin, "margin/account").signed())
            .await
    }

    pub async fn margin_asset(&self, asset: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("asset", asset);
        self.rest()
            .dispatch(Request::get(ApiFamily::Margin, "margin/asset").params(params))
            .await
    }

    pub async fn margin_pair(&self, symbol: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.rest()
            .dispatch(Request::get(ApiFamily::Margin, "margin/pair").params(params))
            .await
    }

    pub async fn margin_price_index(&self, symbol: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.rest()
            .dispatch(Request::get(ApiFamily::Margin, "margin/priceIndex").params(params))
            .await
    }

    async fn margin_transfer(
        &self,
        asset: &str,
        amount: Decimal,
        direction: TransferDirection,
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("asset", asset)
            .with("amount", amount)
            .with("type", direction.type_code());
        self.rest()
            .dispatch(
                Request::post(ApiFamily::Margin, "margin/transfer")
                    .params(params)
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(asset = %asset))]
    pub async fn transfer_spot_to_margin(
        &self,
        asset: &str,
        amount: Decimal,
    ) -> Result<Value, BinanceError> {
        self.margin_transfer(asset, amount, TransferDirection::SpotToMargin)
            .await
    }

    #[instrument(skip(self), fields(asset = %asset))]
    pub async fn transfer_margin_to_spot(
        &self,
        asset: &str,
        amount: Decimal,
    ) -> Result<Value, BinanceError> {
        self.margin_transfer(asset, amount, TransferDirection::MarginToSpot)
            .await
    }

    #[instrument(skip(self), fields(asset = %asset))]
    pub async fn create_margin_loan(
        &self,
        asset: &str,
        amount: Decimal,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("asset", asset).with("amount", amount);
        self.rest()
            .dispatch(
                Request::post(ApiFamily::Margin, "margin/loan")
                    .params(params)
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(asset = %asset))]
    pub async fn repay_margin_loan(
        &self,
        asset: &str,
        amount: Decimal,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("asset", asset).with("amount", amount);
        self.rest()
            .dispatch(
                Request::post(ApiFamily::Margin, "margin/repay")
                    .params(params)
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn create_margin_order(
        &self,
        order: &OrderRequest,
    ) -> Result<OrderResponse, BinanceError> {
        self.rest()
            .dispatch_json(
                Request::post(ApiFamily::Margin, "margin/order")
                    .params(order.to_params())
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn cancel_margin_order(
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
                Request::delete(ApiFamily::Margin, "margin/order")
                    .params(params)
                    .signed(),
            )
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn get_margin_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
    ) -> Result<OrderResponse, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("orderId", order_id);
        self.rest()
            .dispatch_json(
                Request::get(ApiFamily::Margin, "margin/order")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn open_margin_orders(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Margin, "margin/openOrders")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn all_margin_orders(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Margin, "margin/allOrders")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn margin_my_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Margin, "margin/myTrades")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn max_margin_loan(&self, asset: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("asset", asset);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Margin, "margin/maxBorrowable")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn max_margin_transfer(&self, asset: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("asset", asset);
        self.rest()
            .dispatch(
                Request::get(ApiFamily::Margin, "margin/maxTransferable")
                    .params(params)
                    .signed(),
            )
            .await
    }

    /// Obtain a listen key for the margin user-data stream.
    pub async fn margin_stream_start(&self) -> Result<String, BinanceError> {
        let res: ListenKey = self
            .rest()
            .dispatch_json(Request::post(ApiFamily::Margin, "userDataStream").signed())
            .await?;
        Ok(res.listen_key)
    }

    pub async fn margin_stream_keepalive(&self, listen_key: &str) -> Result<(), BinanceError> {
        let params = Params::new().with("listenKey", listen_key);
        self.rest()
            .dispatch(
                Request::put(ApiFamily::Margin, "userDataStream")
                    .params(params)
                    .signed(),
            )
            .await?;
        Ok(())
    }

    pub async fn margin_stream_close(&self, listen_key: &str) -> Result<(), BinanceError> {
        let params = Params::new().with("listenKey", listen_key);
        self.rest()
            .dispatch(
                Request::delete(ApiFamily::Margin, "userDataStream")
                    .params(params)
                    .signed(),
            )
            .await?;
        Ok(())
    }
}
