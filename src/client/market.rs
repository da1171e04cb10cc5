use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{ApiFamily, ApiVersion, Params, Request, RestClient};
use crate::core::types::{
    AggTrade, BookTicker, ExchangeInfo, Kline, OrderBook, PriceTicker, ServerTime, SymbolInfo,
    Ticker24hr, Trade,
};
use crate::core::types::KlineInterval;
use serde_json::Value;
use tracing::instrument;

/// Public market data endpoints.
impl<R: RestClient> BinanceClient<R> {
    /// Liveness probe against the public API.
    pub async fn ping(&self) -> Result<(), BinanceError> {
        self.rest()
            .dispatch(Request::get(ApiFamily::Api, "ping"))
            .await?;
        Ok(())
    }

    pub async fn server_time(&self) -> Result<ServerTime, BinanceError> {
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "time"))
            .await
    }

    pub async fn exchange_info(&self) -> Result<ExchangeInfo, BinanceError> {
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "exchangeInfo"))
            .await
    }

    /// Metadata for one symbol, or `None` if the venue does not list it.
    pub async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, BinanceError> {
        let info = self.exchange_info().await?;
        let wanted = symbol.to_uppercase();
        Ok(info.symbols.into_iter().find(|s| s.symbol == wanted))
    }

    /// Product listing metadata from the website-scoped API.
    pub async fn products(&self) -> Result<Value, BinanceError> {
        self.rest()
            .dispatch(Request::get(ApiFamily::Website, "exchange/public/product"))
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "depth").params(params))
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, BinanceError> {
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "trades").params(params))
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn historical_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
        from_id: Option<u64>,
    ) -> Result<Vec<Trade>, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("limit", limit)
            .with_opt("fromId", from_id);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "historicalTrades").params(params))
            .await
    }

    /// One page of aggregate trades. The pagination engine in
    /// `crate::history` layers the cursor logic on top of this call.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn agg_trades(
        &self,
        symbol: &str,
        from_id: Option<u64>,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<AggTrade>, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("fromId", from_id)
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time)
            .with_opt("limit", limit);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "aggTrades").params(params))
            .await
    }

    /// One page of klines. The backfill engine in `crate::history` layers
    /// the windowed cursor on top of this call.
    #[instrument(skip(self), fields(symbol = %symbol, interval = %interval))]
    pub async fn klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Vec<Kline>, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("interval", interval)
            .with_opt("limit", limit)
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "klines").params(params))
            .await
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn ticker_24hr(&self, symbol: &str) -> Result<Ticker24hr, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "ticker/24hr").params(params))
            .await
    }

    pub async fn all_tickers_24hr(&self) -> Result<Vec<Ticker24hr>, BinanceError> {
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "ticker/24hr"))
            .await
    }

    pub async fn all_prices(&self) -> Result<Vec<PriceTicker>, BinanceError> {
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "ticker/allPrices"))
            .await
    }

    pub async fn all_book_tickers(&self) -> Result<Vec<BookTicker>, BinanceError> {
        self.rest()
            .dispatch_json(Request::get(ApiFamily::Api, "ticker/allBookTickers"))
            .await
    }

    /// Latest price for one symbol (v3 endpoint).
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn price_ticker(&self, symbol: &str) -> Result<PriceTicker, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.rest()
            .dispatch_json(
                Request::get(ApiFamily::Api, "ticker/price")
                    .version(ApiVersion::V3)
                    .params(params),
            )
            .await
    }

    /// Best bid/ask for one symbol (v3 endpoint).
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn book_ticker(&self, symbol: &str) -> Result<BookTicker, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.rest()
            .dispatch_json(
                Request::get(ApiFamily::Api, "ticker/bookTicker")
                    .version(ApiVersion::V3)
                    .params(params),
            )
            .await
    }
}
