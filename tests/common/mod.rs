//! Scripted transport for exercising the client without a network.

use async_trait::async_trait;
use binax::core::errors::BinanceError;
use binax::core::kernel::{Request, RestClient};
use binax::{BinanceClient, BinanceConfig};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// `RestClient` that replays queued responses and records every request.
pub struct MockRest {
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<Request>>,
}

impl MockRest {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn dispatch(&self, request: Request) -> Result<Value, BinanceError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BinanceError::Other("no scripted response left".to_string()))
    }
}

/// Session over a scripted transport, no credentials.
pub fn client(responses: Vec<Value>) -> BinanceClient<MockRest> {
    BinanceClient::with_rest(MockRest::new(responses), BinanceConfig::read_only())
}

/// Session over a scripted transport with dummy credentials.
#[allow(dead_code)]
pub fn signed_client(responses: Vec<Value>) -> BinanceClient<MockRest> {
    BinanceClient::with_rest(
        MockRest::new(responses),
        BinanceConfig::new("test-key".to_string(), "test-secret".to_string()),
    )
}

/// Value of a named parameter on a recorded request.
pub fn param<'a>(request: &'a Request, key: &str) -> Option<&'a str> {
    request
        .params
        .as_pairs()
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// One positional kline row opening at `open_time`.
#[allow(dead_code)]
pub fn kline_row(open_time: i64, interval_ms: i64) -> Value {
    json!([
        open_time,
        "1.0",
        "2.0",
        "0.5",
        "1.5",
        "100.0",
        open_time + interval_ms - 1,
        "150.0",
        10,
        "60.0",
        "90.0",
        "0"
    ])
}

/// A page of `count` consecutive kline rows starting at `start`.
#[allow(dead_code)]
pub fn kline_page(start: i64, interval_ms: i64, count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| kline_row(start + i as i64 * interval_ms, interval_ms))
            .collect(),
    )
}

/// A page of aggregate trades with the given ids.
#[allow(dead_code)]
pub fn agg_page(ids: &[u64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                json!({
                    "a": id,
                    "p": "0.01633102",
                    "q": "4.70443515",
                    "f": id,
                    "l": id,
                    "T": 1_498_793_709_153_i64 + *id as i64,
                    "m": false,
                    "M": true
                })
            })
            .collect(),
    )
}
