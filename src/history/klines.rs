use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::RestClient;
use crate::core::types::{Kline, KlineInterval};
use futures_util::stream::{self, Stream, TryStreamExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Bars fetched per page.
pub const PAGE_SIZE: u32 = 500;

/// Pause inserted after every third page fetch.
const PACING_DELAY: Duration = Duration::from_secs(1);
const PAGES_PER_PAUSE: u32 = 3;

/// Windowed candle backfill.
///
/// Fetches pages of up to [`PAGE_SIZE`] bars starting at a timestamp cursor.
/// After each full page the cursor moves to the last bar's open time plus one
/// interval step, so the next page starts strictly past everything already
/// returned. An empty or short page ends the walk.
pub struct KlineBackfill<'a, R: RestClient> {
    client: &'a BinanceClient<R>,
    symbol: String,
    interval: KlineInterval,
    start_time: i64,
    end_time: Option<i64>,
}

impl<'a, R: RestClient> KlineBackfill<'a, R> {
    pub fn new(
        client: &'a BinanceClient<R>,
        symbol: impl Into<String>,
        interval: KlineInterval,
        start_time: i64,
    ) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            interval,
            start_time,
            end_time: None,
        }
    }

    /// Bound the walk; bars opening at or after this timestamp are excluded
    /// by the venue.
    #[must_use]
    pub const fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// The interval step in milliseconds, or `InvalidArgument` for calendar
    /// intervals with no fixed length.
    fn step(&self) -> Result<i64, BinanceError> {
        self.interval.to_millis().ok_or_else(|| {
            BinanceError::InvalidArgument(format!(
                "interval {} has no fixed millisecond length",
                self.interval
            ))
        })
    }

    /// Open time of the oldest bar the venue holds for this symbol and
    /// interval. One-row probe from the epoch.
    async fn earliest_timestamp(&self) -> Result<Option<i64>, BinanceError> {
        let bars = self
            .client
            .klines(&self.symbol, self.interval, Some(1), Some(0), None)
            .await?;
        Ok(bars.first().map(|bar| bar.open_time))
    }

    /// Fetch the whole window eagerly.
    #[instrument(skip(self), fields(symbol = %self.symbol, interval = %self.interval))]
    pub async fn collect(&self) -> Result<Vec<Kline>, BinanceError> {
        let step = self.step()?;

        let mut cursor = self.start_time;
        if let Some(earliest) = self.earliest_timestamp().await? {
            cursor = cursor.max(earliest);
        }

        let mut out = Vec::new();
        let mut pages = 0u32;
        loop {
            if pages > 0 && pages % PAGES_PER_PAUSE == 0 {
                sleep(PACING_DELAY).await;
            }
            let page = self
                .client
                .klines(
                    &self.symbol,
                    self.interval,
                    Some(PAGE_SIZE),
                    Some(cursor),
                    self.end_time,
                )
                .await?;
            pages += 1;
            if page.is_empty() {
                break;
            }
            let short = (page.len() as u32) < PAGE_SIZE;
            // Last bar's open time, stepped past so the next page cannot
            // return it again.
            if let Some(last) = page.last() {
                cursor = last.open_time + step;
            }
            debug!(page = pages, bars = page.len(), cursor, "kline page");
            out.extend(page);
            if short {
                break;
            }
        }
        Ok(out)
    }

    /// Walk the window lazily, one bar at a time. Dropping the stream stops
    /// the walk; no further requests are made.
    pub fn into_stream(self) -> impl Stream<Item = Result<Kline, BinanceError>> + 'a {
        struct WalkState<'a, R: RestClient> {
            backfill: KlineBackfill<'a, R>,
            cursor: i64,
            step: i64,
            pages: u32,
            started: bool,
            done: bool,
        }

        let state = WalkState {
            cursor: self.start_time,
            step: 0,
            pages: 0,
            started: false,
            done: false,
            backfill: self,
        };

        let pages = stream::try_unfold(state, |mut st| async move {
            if st.done {
                return Ok(None);
            }
            if !st.started {
                st.step = st.backfill.step()?;
                if let Some(earliest) = st.backfill.earliest_timestamp().await? {
                    st.cursor = st.cursor.max(earliest);
                }
                st.started = true;
            }
            if st.pages > 0 && st.pages % PAGES_PER_PAUSE == 0 {
                sleep(PACING_DELAY).await;
            }
            let page = st
                .backfill
                .client
                .klines(
                    &st.backfill.symbol,
                    st.backfill.interval,
                    Some(PAGE_SIZE),
                    Some(st.cursor),
                    st.backfill.end_time,
                )
                .await?;
            st.pages += 1;
            if page.is_empty() {
                return Ok(None);
            }
            if (page.len() as u32) < PAGE_SIZE {
                st.done = true;
            }
            if let Some(last) = page.last() {
                st.cursor = last.open_time + st.step;
            }
            Ok::<_, BinanceError>(Some((page, st)))
        });

        pages
            .map_ok(|page| stream::iter(page.into_iter().map(Ok)))
            .try_flatten()
    }
}

impl<R: RestClient> BinanceClient<R> {
    /// All candles from `start_time` forward, optionally bounded by
    /// `end_time`. See [`KlineBackfill`] for the paging behavior.
    pub async fn historical_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: i64,
        end_time: Option<i64>,
    ) -> Result<Vec<Kline>, BinanceError> {
        let mut backfill = KlineBackfill::new(self, symbol, interval, start_time);
        if let Some(end) = end_time {
            backfill = backfill.end_time(end);
        }
        backfill.collect().await
    }
}
