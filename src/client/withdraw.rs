use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{ApiFamily, Params, Request, RestClient};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

/// Surface a legacy business failure embedded in a 2xx body.
///
/// The withdraw family reports failures through a `success` flag inside an
/// otherwise successful response; a false flag is a business-level failure,
/// distinct from any transport error.
fn require_success(value: Value) -> Result<Value, BinanceError> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown withdraw failure")
            .to_string();
        return Err(BinanceError::Business(msg));
    }
    Ok(value)
}

/// Legacy withdraw/account endpoints. All requests in this family carry
/// their parameters in the query string regardless of method.
impl<R: RestClient> BinanceClient<R> {
    fn withdraw_get(&self, path: &str) -> Request {
        Request::get(ApiFamily::Withdraw, path).force_query()
    }

    pub async fn system_status(&self) -> Result<Value, BinanceError> {
        self.rest().dispatch(self.withdraw_get("systemStatus.html")).await
    }

    pub async fn account_status(&self) -> Result<Value, BinanceError> {
        let res = self
            .rest()
            .dispatch(self.withdraw_get("accountStatus.html").signed())
            .await?;
        require_success(res)
    }

    /// Log of small-balance conversions to BNB.
    pub async fn dust_log(&self) -> Result<Value, BinanceError> {
        let res = self
            .rest()
            .dispatch(self.withdraw_get("userAssetDribbletLog.html").signed())
            .await?;
        require_success(res)
    }

    pub async fn trade_fee(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        let res = self
            .rest()
            .dispatch(self.withdraw_get("tradeFee.html").params(params).signed())
            .await?;
        require_success(res)
    }

    pub async fn asset_detail(&self) -> Result<Value, BinanceError> {
        let res = self
            .rest()
            .dispatch(self.withdraw_get("assetDetail.html").signed())
            .await?;
        require_success(res)
    }

    /// Submit a withdrawal. The venue requires a display name for the
    /// destination; it defaults to the asset code when not supplied.
    #[instrument(skip(self), fields(asset = %asset))]
    pub async fn withdraw(
        &self,
        asset: &str,
        address: &str,
        amount: Decimal,
        name: Option<&str>,
        address_tag: Option<&str>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("asset", asset)
            .with("address", address)
            .with("amount", amount)
            .with("name", name.unwrap_or(asset))
            .with_opt("addressTag", address_tag);
        let res = self
            .rest()
            .dispatch(
                Request::post(ApiFamily::Withdraw, "withdraw.html")
                    .force_query()
                    .params(params)
                    .signed(),
            )
            .await?;
        require_success(res)
    }

    pub async fn deposit_history(&self, asset: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("asset", asset);
        self.rest()
            .dispatch(
                self.withdraw_get("depositHistory.html")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn withdraw_history(&self, asset: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("asset", asset);
        self.rest()
            .dispatch(
                self.withdraw_get("withdrawHistory.html")
                    .params(params)
                    .signed(),
            )
            .await
    }

    pub async fn deposit_address(&self, asset: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("asset", asset);
        self.rest()
            .dispatch(
                self.withdraw_get("depositAddress.html")
                    .params(params)
                    .signed(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_flag_false_becomes_business_error() {
        let err = require_success(json!({"success": false, "msg": "timestamp outside recvWindow"}))
            .unwrap_err();
        match err {
            BinanceError::Business(msg) => assert_eq!(msg, "timestamp outside recvWindow"),
            other => panic!("expected Business, got {:?}", other),
        }
    }

    #[test]
    fn success_flag_true_passes_body_through() {
        let body = json!({"success": true, "tradeFee": []});
        let value = require_success(body.clone()).unwrap();
        assert_eq!(value, body);
    }

    #[test]
    fn bodies_without_the_flag_pass_through() {
        let body = json!({"status": 0, "msg": "normal"});
        assert!(require_success(body).is_ok());
    }
}
