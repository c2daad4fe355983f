//! # manseryeok-client
//!
//! 만세력(한국 음력) 조회를 위한 계층형 폴백 캐시 클라이언트.
//!
//! Tiered-fallback lookup client for Korean lunar calendar (manseryeok)
//! records. A `get()` resolves a solar date through three tiers in strict
//! order, short-circuiting on the first success:
//!
//! 1. **Cache**: bounded in-memory map with TTL and FIFO eviction
//! 2. **Remote**: the manseryeok HTTP API, under a hard per-call deadline
//! 3. **Local**: a fallback dataset loaded lazily, at most once per client
//!
//! Remote and local failures never reach the caller; the only `get()` error
//! is [`Error::NotFound`] when all three tiers come up empty. Every returned
//! record carries a [`Source`] tag naming the tier that produced it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use manseryeok_client::{
//!     ClientConfig, DateKey, HttpRemoteFetcher, JsonFileDataset, ManseryeokClient,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> manseryeok_client::Result<()> {
//!     let client = ManseryeokClient::new(
//!         ClientConfig::default(),
//!         Arc::new(HttpRemoteFetcher::new()?),
//!         Arc::new(JsonFileDataset::new("data/manseryeok.json")),
//!     )?;
//!
//!     let day = client.get(DateKey::new(2024, 1, 1)).await?;
//!     println!("{} ({}): {}", day.solar.year, day.ganji.year, day.source);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The tiered-fallback client itself |
//! | [`config`] | Configuration defaults, builder, and runtime patches |
//! | [`key`] | Date keys and canonicalization |
//! | [`types`] | Wire records, normalized records, provenance tags |
//! | [`remote`] | `RemoteFetcher` trait and the HTTP implementation |
//! | [`local`] | `LocalDatasetProvider` trait and file/static datasets |
//! | [`metrics`] | Lifetime counters and snapshots |
//! | [`clock`] | Injectable monotonic clock |
//! | [`error`] | Crate error type |

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod key;
pub mod local;
pub mod metrics;
pub mod remote;
mod store;
pub mod types;

pub use client::{ManseryeokClient, StatusReport};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClientConfig, ConfigPatch};
pub use error::{Error, Result};
pub use key::DateKey;
pub use local::{JsonFileDataset, LocalDatasetProvider, StaticDataset};
pub use metrics::MetricsSnapshot;
pub use remote::{HttpRemoteFetcher, RemoteFetcher};
pub use types::{CalendarDay, Ganji, LunarDate, RawCalendarRecord, SolarDate, Source};
