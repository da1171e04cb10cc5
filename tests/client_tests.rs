mod common;

use binax::core::kernel::{ApiFamily, ApiVersion};
use binax::core::types::OrderSide;
use binax::{BinanceError, OrderRequest};
use common::{client, param, signed_client};
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn withdraw_failure_flag_surfaces_as_business_error() {
    let client = signed_client(vec![json!({
        "success": false,
        "msg": "Insufficient balance."
    })]);

    let err = client
        .withdraw("ETH", "0xdeadbeef", Decimal::new(5, 1), None, None)
        .await
        .unwrap_err();

    match err {
        BinanceError::Business(msg) => assert_eq!(msg, "Insufficient balance."),
        other => panic!("expected Business, got {:?}", other),
    }

    let requests = client.rest().requests();
    let request = &requests[0];
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.family, ApiFamily::Withdraw);
    assert_eq!(request.path, "withdraw.html");
    assert!(request.signed);
    // legacy family carries parameters in the query string even on POST
    assert!(request.force_query);
    // destination name defaults to the asset code
    assert_eq!(param(request, "name"), Some("ETH"));
}

#[tokio::test]
async fn spot_listen_key_lifecycle_is_never_signed() {
    let client = signed_client(vec![
        json!({"listenKey": "pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1"}),
        json!({}),
        json!({}),
    ]);

    let key = client.stream_start().await.unwrap();
    client.stream_keepalive(&key).await.unwrap();
    client.stream_close(&key).await.unwrap();

    let requests = client.rest().requests();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(request.family, ApiFamily::Api);
        assert_eq!(request.path, "userDataStream");
        assert!(!request.signed);
    }
    assert_eq!(requests[0].method.as_str(), "POST");
    assert_eq!(requests[1].method.as_str(), "PUT");
    assert_eq!(requests[2].method.as_str(), "DELETE");
    assert_eq!(param(&requests[1], "listenKey"), Some(key.as_str()));
}

#[tokio::test]
async fn margin_listen_key_is_signed_and_routed_to_margin() {
    let client = signed_client(vec![json!({"listenKey": "mk"})]);

    let key = client.margin_stream_start().await.unwrap();

    assert_eq!(key, "mk");
    let requests = client.rest().requests();
    assert_eq!(requests[0].family, ApiFamily::Margin);
    assert!(requests[0].signed);
}

#[tokio::test]
async fn price_ticker_requests_the_private_version() {
    let client = client(vec![json!({"symbol": "BTCUSDT", "price": "42000.00"})]);

    let ticker = client.price_ticker("BTCUSDT").await.unwrap();

    assert_eq!(ticker.price, Decimal::new(42_000, 0));
    let requests = client.rest().requests();
    assert_eq!(requests[0].version, Some(ApiVersion::V3));
    assert!(!requests[0].signed);
}

#[tokio::test]
async fn create_order_sends_wire_parameter_names() {
    let client = signed_client(vec![json!({
        "symbol": "BTCUSDT",
        "orderId": 28,
        "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
        "transactTime": 1_507_725_176_595_i64,
        "status": "FILLED"
    })]);

    let order = OrderRequest::limit("BTCUSDT", OrderSide::Buy, Decimal::ONE, Decimal::new(42_000, 0));
    let response = client.create_order(&order).await.unwrap();

    assert_eq!(response.order_id, 28);
    let requests = client.rest().requests();
    let request = &requests[0];
    assert_eq!(request.family, ApiFamily::Api);
    assert_eq!(request.path, "order");
    assert!(request.signed);
    assert_eq!(param(request, "symbol"), Some("BTCUSDT"));
    assert_eq!(param(request, "side"), Some("BUY"));
    assert_eq!(param(request, "type"), Some("LIMIT"));
    assert_eq!(param(request, "timeInForce"), Some("GTC"));
}

#[tokio::test]
async fn unexpected_body_shape_is_a_malformed_response() {
    let client = client(vec![json!("maintenance")]);

    let err = client.server_time().await.unwrap_err();
    assert!(matches!(err, BinanceError::MalformedResponse(_)));
}

#[tokio::test]
async fn asset_balance_filters_case_insensitively() {
    let client = signed_client(vec![json!({
        "makerCommission": 15,
        "takerCommission": 15,
        "buyerCommission": 0,
        "sellerCommission": 0,
        "canTrade": true,
        "canWithdraw": true,
        "canDeposit": true,
        "balances": [
            {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
            {"asset": "LTC", "free": "4763368.68006011", "locked": "0.00000000"}
        ]
    })]);

    let balance = client.asset_balance("ltc").await.unwrap().unwrap();
    assert_eq!(balance.asset, "LTC");
}
