//! Regional aggregation and statistics for geolocated project portfolios.
//!
//! Addresses are resolved to regions ([`region`]), projects are folded into
//! per-region rollups ([`aggregate`]), bucketed by category
//! ([`distribution`]) and ranked ([`ranking`]). All of these are pure
//! functions over a `&[ProjectRecord]` snapshot; loading ([`loader`]) and
//! presentation ([`reports`], [`output`]) sit around them.
pub mod aggregate;
pub mod config;
pub mod distribution;
pub mod error;
pub mod loader;
pub mod output;
pub mod ranking;
pub mod region;
pub mod reports;
pub mod types;
pub mod util;

pub use aggregate::{aggregate_by_region, portfolio_totals};
pub use error::{Error, Result};
pub use ranking::{rank_regions, RankingKey};
pub use region::{resolve_region, DEFAULT_REGIONS, OTHER_REGION};
pub use types::{ProjectRecord, RegionStatistic};
