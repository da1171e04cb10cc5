mod common;

use binax::core::time::HOUR_MS;
use binax::{AggTradeCursor, BinanceError};
use common::{agg_page, client, param};
use futures::TryStreamExt;
use serde_json::json;

#[tokio::test]
async fn both_anchors_is_an_error_before_any_request() {
    let client = client(vec![]);

    let err = AggTradeCursor::new(&client, "BTCUSDT")
        .start_time(1_000)
        .from_id(7)
        .collect()
        .await
        .unwrap_err();

    assert!(matches!(err, BinanceError::InvalidArgument(_)));
    assert!(client.rest().requests().is_empty());
}

#[tokio::test]
async fn default_anchor_walks_from_the_first_trade() {
    let client = client(vec![agg_page(&[0, 1, 2]), agg_page(&[2])]);

    let trades = client.agg_trade_history("BTCUSDT").collect().await.unwrap();

    // the opening page is kept whole; the follow-up page held only the
    // cursor trade, so the walk ended
    assert_eq!(
        trades.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    let requests = client.rest().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(param(&requests[0], "fromId"), Some("0"));
    assert_eq!(param(&requests[1], "fromId"), Some("2"));
}

#[tokio::test]
async fn id_resume_skips_the_trade_already_seen() {
    let client = client(vec![agg_page(&[10, 11, 12]), agg_page(&[12])]);

    let trades = AggTradeCursor::new(&client, "BTCUSDT")
        .from_id(10)
        .collect()
        .await
        .unwrap();

    assert_eq!(trades.iter().map(|t| t.id).collect::<Vec<_>>(), vec![11, 12]);

    let requests = client.rest().requests();
    assert_eq!(param(&requests[0], "fromId"), Some("10"));
    assert_eq!(param(&requests[1], "fromId"), Some("12"));
}

#[tokio::test]
async fn time_anchor_scans_hour_windows_until_trades_appear() {
    let start = chrono::Utc::now().timestamp_millis() - 10 * HOUR_MS;
    let client = client(vec![
        json!([]),
        json!([]),
        agg_page(&[40, 41]),
        agg_page(&[41]),
    ]);

    let trades = AggTradeCursor::new(&client, "BTCUSDT")
        .start_time(start)
        .collect()
        .await
        .unwrap();

    assert_eq!(trades.iter().map(|t| t.id).collect::<Vec<_>>(), vec![40, 41]);

    let requests = client.rest().requests();
    assert_eq!(requests.len(), 4);
    for (i, request) in requests.iter().take(3).enumerate() {
        let window_start = start + i as i64 * HOUR_MS;
        assert_eq!(
            param(request, "startTime"),
            Some(window_start.to_string().as_str())
        );
        assert_eq!(
            param(request, "endTime"),
            Some((window_start + HOUR_MS).to_string().as_str())
        );
    }
    // discovery done, the walk continues by id
    assert_eq!(param(&requests[3], "fromId"), Some("41"));
}

#[tokio::test]
async fn time_anchor_past_the_present_is_empty_not_an_error() {
    let start = chrono::Utc::now().timestamp_millis();
    let client = client(vec![json!([])]);

    let trades = AggTradeCursor::new(&client, "BTCUSDT")
        .start_time(start)
        .collect()
        .await
        .unwrap();

    assert!(trades.is_empty());
    assert_eq!(client.rest().requests().len(), 1);
}

#[tokio::test]
async fn stream_ids_are_strictly_increasing_across_page_boundaries() {
    let client = client(vec![
        agg_page(&[0, 1, 2, 3, 4]),
        agg_page(&[4, 5, 6]),
        agg_page(&[6]),
    ]);

    let trades: Vec<_> = AggTradeCursor::new(&client, "BTCUSDT")
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<u64> = trades.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
