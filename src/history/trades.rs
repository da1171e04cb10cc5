use crate::client::BinanceClient;
use crate::core::errors::BinanceError;
use crate::core::kernel::{get_timestamp, RestClient};
use crate::core::time::HOUR_MS;
use crate::core::types::AggTrade;
use futures_util::stream::{self, Stream, TryStreamExt};
use tracing::{debug, instrument};

/// Id-anchored walk over the aggregate trade log.
///
/// The venue's `fromId` query is inclusive, so every page after the first
/// starts with a trade already returned; that row is dropped before yielding.
/// The cursor is the id of the last trade handed out, making the sequence
/// strictly increasing with no gaps. An empty continuation page ends the
/// walk.
pub struct AggTradeCursor<'a, R: RestClient> {
    client: &'a BinanceClient<R>,
    symbol: String,
    start_time: Option<i64>,
    from_id: Option<u64>,
    state: CursorState,
}

enum CursorState {
    Start,
    Continue { last_id: u64 },
    Done,
}

impl<'a, R: RestClient> AggTradeCursor<'a, R> {
    pub fn new(client: &'a BinanceClient<R>, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            start_time: None,
            from_id: None,
            state: CursorState::Start,
        }
    }

    /// Anchor at a timestamp. The first trade at or after this moment opens
    /// the sequence. Mutually exclusive with [`Self::from_id`].
    #[must_use]
    pub const fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Resume after a known trade id. The sequence opens with the trade
    /// following `id`. Mutually exclusive with [`Self::start_time`].
    #[must_use]
    pub const fn from_id(mut self, id: u64) -> Self {
        self.from_id = Some(id);
        self
    }

    /// Scan one-hour windows forward from `start_ts` until one holds a
    /// trade. Passing the present moment without finding any means there is
    /// nothing to iterate.
    async fn discover_first_page(
        &self,
        mut start_ts: i64,
    ) -> Result<Option<Vec<AggTrade>>, BinanceError> {
        loop {
            let end_ts = start_ts + HOUR_MS;
            let page = self
                .client
                .agg_trades(&self.symbol, None, Some(start_ts), Some(end_ts), None)
                .await?;
            if !page.is_empty() {
                return Ok(Some(page));
            }
            if end_ts > get_timestamp()? as i64 {
                return Ok(None);
            }
            start_ts = end_ts;
        }
    }

    /// Fetch the next page of unseen trades, or `None` when the log is
    /// exhausted.
    #[instrument(skip(self), fields(symbol = %self.symbol))]
    pub async fn next_batch(&mut self) -> Result<Option<Vec<AggTrade>>, BinanceError> {
        loop {
            match self.state {
                CursorState::Done => return Ok(None),
                CursorState::Start => {
                    if self.start_time.is_some() && self.from_id.is_some() {
                        self.state = CursorState::Done;
                        return Err(BinanceError::InvalidArgument(
                            "start_time and from_id may not be simultaneously specified"
                                .to_string(),
                        ));
                    }
                    if let Some(id) = self.from_id {
                        // A caller-supplied id is one we have already seen;
                        // the continuation loop drops it.
                        self.state = CursorState::Continue { last_id: id };
                        continue;
                    }
                    let page = match self.start_time {
                        Some(start_ts) => self.discover_first_page(start_ts).await?,
                        None => {
                            let page =
                                self.client.agg_trades(&self.symbol, Some(0), None, None, None).await?;
                            (!page.is_empty()).then_some(page)
                        }
                    };
                    let Some(page) = page else {
                        self.state = CursorState::Done;
                        return Ok(None);
                    };
                    if let Some(last) = page.last() {
                        debug!(last_id = last.id, trades = page.len(), "first page");
                        self.state = CursorState::Continue { last_id: last.id };
                    }
                    return Ok(Some(page));
                }
                CursorState::Continue { last_id } => {
                    let page = self
                        .client
                        .agg_trades(&self.symbol, Some(last_id), None, None, None)
                        .await?;
                    // fromId is inclusive; the first row is the cursor trade
                    // itself.
                    let fresh: Vec<AggTrade> = page.into_iter().skip(1).collect();
                    if fresh.is_empty() {
                        self.state = CursorState::Done;
                        return Ok(None);
                    }
                    if let Some(last) = fresh.last() {
                        debug!(last_id = last.id, trades = fresh.len(), "page");
                        self.state = CursorState::Continue { last_id: last.id };
                    }
                    return Ok(Some(fresh));
                }
            }
        }
    }

    /// Drain the whole log from the anchor forward. Unbounded on an active
    /// symbol; prefer [`Self::into_stream`] unless the caller knows the log
    /// is finite.
    pub async fn collect(mut self) -> Result<Vec<AggTrade>, BinanceError> {
        let mut out = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            out.extend(batch);
        }
        Ok(out)
    }

    /// Walk the log lazily, one trade at a time. Dropping the stream stops
    /// the walk; no further requests are made.
    pub fn into_stream(self) -> impl Stream<Item = Result<AggTrade, BinanceError>> + 'a {
        stream::try_unfold(self, |mut cursor| async move {
            match cursor.next_batch().await? {
                Some(batch) => Ok::<_, BinanceError>(Some((batch, cursor))),
                None => Ok(None),
            }
        })
        .map_ok(|batch| stream::iter(batch.into_iter().map(Ok)))
        .try_flatten()
    }
}

impl<R: RestClient> BinanceClient<R> {
    /// Cursor over the aggregate trade log for `symbol`, anchored at id 0
    /// until repositioned. See [`AggTradeCursor`].
    pub fn agg_trade_history(&self, symbol: &str) -> AggTradeCursor<'_, R> {
        AggTradeCursor::new(self, symbol)
    }
}
