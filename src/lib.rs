//! Typed REST client for a Binance-style exchange.
//!
//! The crate splits into three layers:
//!
//! - [`core`] holds the kernel: endpoint routing across the venue's API
//!   families, canonical parameter ordering, HMAC-SHA256 request signing,
//!   the reqwest transport, and the error taxonomy.
//! - [`client`] is the typed endpoint surface over that kernel: market
//!   data, spot trading, margin, futures, the legacy withdraw family, and
//!   user-data stream listen keys.
//! - [`history`] backfills unbounded historical series (candles, aggregate
//!   trades) with cursor-based pagination that cannot gap, duplicate, or
//!   loop forever.
//!
//! ```no_run
//! use binax::{BinanceClient, BinanceConfig};
//!
//! # async fn run() -> Result<(), binax::BinanceError> {
//! let config = BinanceConfig::from_env()?;
//! let client = BinanceClient::connect(config).await?;
//! let time = client.server_time().await?;
//! println!("venue clock: {}", time.server_time);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod core;
pub mod history;

pub use client::{BinanceClient, OrderRequest};
pub use core::config::BinanceConfig;
pub use core::errors::{BinanceError, ConfigError};
pub use history::{AggTradeCursor, KlineBackfill};
