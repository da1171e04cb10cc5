mod common;

use binax::core::types::KlineInterval;
use binax::{BinanceError, KlineBackfill};
use common::{client, kline_page, param};
use futures::{StreamExt, TryStreamExt};
use serde_json::json;

const MINUTE: i64 = 60_000;

#[tokio::test]
async fn short_page_ends_the_walk() {
    let client = client(vec![
        // earliest-data probe
        kline_page(1_000_000, MINUTE, 1),
        kline_page(1_000_000, MINUTE, 3),
    ]);

    let bars = KlineBackfill::new(&client, "BTCUSDT", KlineInterval::Minutes1, 0)
        .collect()
        .await
        .unwrap();

    assert_eq!(bars.len(), 3);
    let requests = client.rest().requests();
    assert_eq!(requests.len(), 2);

    // the probe asks for the oldest bar the venue holds
    assert_eq!(param(&requests[0], "startTime"), Some("0"));
    assert_eq!(param(&requests[0], "limit"), Some("1"));

    // the requested start is clamped forward to the earliest data point
    assert_eq!(param(&requests[1], "startTime"), Some("1000000"));
    assert_eq!(param(&requests[1], "limit"), Some("500"));
}

#[tokio::test]
async fn full_page_advances_cursor_past_the_last_bar() {
    let client = client(vec![
        kline_page(0, MINUTE, 1),
        kline_page(0, MINUTE, 500),
        kline_page(500 * MINUTE, MINUTE, 2),
    ]);

    let bars = KlineBackfill::new(&client, "BTCUSDT", KlineInterval::Minutes1, 0)
        .collect()
        .await
        .unwrap();

    assert_eq!(bars.len(), 502);
    assert!(bars.windows(2).all(|w| w[0].open_time < w[1].open_time));

    let requests = client.rest().requests();
    assert_eq!(requests.len(), 3);
    // last bar of the full page opened at 499 minutes; the next fetch
    // starts one interval past it
    assert_eq!(
        param(&requests[2], "startTime"),
        Some((500 * MINUTE).to_string().as_str())
    );
}

#[tokio::test]
async fn end_bound_is_forwarded_to_every_page() {
    let client = client(vec![kline_page(0, MINUTE, 1), kline_page(0, MINUTE, 2)]);

    let bars = client
        .historical_klines("BTCUSDT", KlineInterval::Minutes1, 0, Some(10 * MINUTE))
        .await
        .unwrap();

    assert_eq!(bars.len(), 2);
    let requests = client.rest().requests();
    assert_eq!(param(&requests[1], "endTime"), Some("600000"));
}

#[tokio::test(start_paused = true)]
async fn every_third_page_is_followed_by_a_pause() {
    let client = client(vec![
        kline_page(0, MINUTE, 1),
        kline_page(0, MINUTE, 500),
        kline_page(500 * MINUTE, MINUTE, 500),
        kline_page(1000 * MINUTE, MINUTE, 500),
        kline_page(1500 * MINUTE, MINUTE, 500),
        kline_page(2000 * MINUTE, MINUTE, 1),
    ]);

    let started = tokio::time::Instant::now();
    let bars = KlineBackfill::new(&client, "BTCUSDT", KlineInterval::Minutes1, 0)
        .collect()
        .await
        .unwrap();

    assert_eq!(bars.len(), 2001);
    // five page fetches, one pause before the fourth
    assert_eq!(started.elapsed(), std::time::Duration::from_secs(1));
}

#[tokio::test]
async fn calendar_month_interval_is_rejected_without_a_request() {
    let client = client(vec![]);

    let err = KlineBackfill::new(&client, "BTCUSDT", KlineInterval::Months1, 0)
        .collect()
        .await
        .unwrap_err();

    assert!(matches!(err, BinanceError::InvalidArgument(_)));
    assert!(client.rest().requests().is_empty());
}

#[tokio::test]
async fn symbol_with_no_data_yields_nothing() {
    let client = client(vec![json!([]), json!([])]);

    let bars = KlineBackfill::new(&client, "NEWUSDT", KlineInterval::Hours1, 0)
        .collect()
        .await
        .unwrap();

    assert!(bars.is_empty());
}

#[tokio::test]
async fn dropping_the_stream_stops_fetching() {
    let client = client(vec![kline_page(0, MINUTE, 1), kline_page(0, MINUTE, 500)]);

    let bars: Vec<_> = KlineBackfill::new(&client, "BTCUSDT", KlineInterval::Minutes1, 0)
        .into_stream()
        .take(3)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(bars.len(), 3);
    // probe plus one page; the second page was never requested
    assert_eq!(client.rest().requests().len(), 2);
}

#[tokio::test]
async fn stream_and_collect_agree() {
    let pages = vec![
        kline_page(0, MINUTE, 1),
        kline_page(0, MINUTE, 500),
        kline_page(500 * MINUTE, MINUTE, 3),
    ];

    let eager = client(pages.clone());
    let collected = KlineBackfill::new(&eager, "BTCUSDT", KlineInterval::Minutes1, 0)
        .collect()
        .await
        .unwrap();

    let lazy = client(pages);
    let streamed: Vec<_> = KlineBackfill::new(&lazy, "BTCUSDT", KlineInterval::Minutes1, 0)
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(collected.len(), streamed.len());
    assert_eq!(
        collected.iter().map(|k| k.open_time).collect::<Vec<_>>(),
        streamed.iter().map(|k| k.open_time).collect::<Vec<_>>()
    );
}
