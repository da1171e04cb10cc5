use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{ApiFamily, Params, Request, RestClient};
use crate::core::types::ListenKey;

/// Spot user-data stream lifecycle. These calls authenticate with the API
/// key header alone and are never signed.
impl<R: RestClient> BinanceClient<R> {
    /// Obtain a listen key. The venue expires it after an hour unless kept
    /// alive.
    pub async fn stream_start(&self) -> Result<String, BinanceError> {
        let res: ListenKey = self
            .rest()
            .dispatch_json(Request::post(ApiFamily::Api, "userDataStream"))
            .await?;
        Ok(res.listen_key)
    }

    pub async fn stream_keepalive(&self, listen_key: &str) -> Result<(), BinanceError> {
        let params = Params::new().with("listenKey", listen_key);
        self.rest()
            .dispatch(Request::put(ApiFamily::Api, "userDataStream").params(params))
            .await?;
        Ok(())
    }

    pub async fn stream_close(&self, listen_key: &str) -> Result<(), BinanceError> {
        let params = Params::new().with("listenKey", listen_key);
        self.rest()
            .dispatch(Request::delete(ApiFamily::Api, "userDataStream").params(params))
            .await?;
        Ok(())
    }
}
