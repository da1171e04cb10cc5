//! Historical backfill over the paged market-data endpoints.
//!
//! Two engines live here. [`KlineBackfill`] walks a time window in pages of
//! candles, advancing a timestamp cursor. [`AggTradeCursor`] walks the
//! aggregate trade log by trade id. Both are forward-only, buffer one page,
//! and stop cleanly on the venue's end-of-data signals, so neither can loop
//! forever or fetch the same row twice.

pub mod klines;
pub mod trades;

pub use klines::KlineBackfill;
pub use trades::AggTradeCursor;
