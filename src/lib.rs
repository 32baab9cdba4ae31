//! wbi_context
//!
//! Fetches the latest GDP, inflation and population figures for one country from
//! the World Bank and turns them into a small, human-readable context block.
//! Pairs with the `wbi-context` CLI.
//!
//! ### Features
//! - Three indicator lookups through a pluggable [`IndicatorSource`]
//! - Latest non-empty year per indicator from sparse year series
//! - Locale-aware display strings (`$124,209,000,000 USD (2022)`, `21.36% (2022)`, ...)
//! - Market insights derived from the context
//! - Save contexts as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use wbi_context::{Client, ContextConfig, get_context};
//!
//! let client = Client::default();
//! if let Some(ctx) = get_context(&client, &ContextConfig::default()) {
//!     for line in wbi_context::context::render_lines(&ctx) {
//!         println!("{}", line);
//!     }
//! }
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod fetch;
pub mod format;
pub mod insights;
pub mod models;
pub mod select;
pub mod storage;

pub use api::{Client, IndicatorSource, StaticSource};
pub use config::{ContextConfig, CountryProfile};
pub use context::{build_context, get_context};
pub use fetch::{FetchPolicy, RawIndicators, fetch_indicators};
pub use models::{Context, ContextEntry, Indicator, LatestObservation, SeriesPayload};
pub use select::latest_observation;
