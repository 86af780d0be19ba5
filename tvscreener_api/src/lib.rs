//! Typed query builder and result mapper for the TradingView screener API.
//!
//! Fields come from build-time catalogs ([`StockField`], [`CryptoField`],
//! [`ForexField`], [`FuturesField`]); comparisons on them produce
//! [`FieldCondition`]s that a [`ScreenerQuery`] turns into a scan request.

mod client;
pub mod columns;
mod errors;
pub mod fields;
pub mod filters;
mod query;
pub mod types;
mod user_agent;

pub use self::client::Client;
pub use self::errors::Error;
pub use self::fields::{
    Catalog, CatalogId, CryptoField, Field, FieldFormat, FieldRef, ForexField, FuturesField,
    Interval, StockField,
};
pub use self::filters::{Comparisons, FieldCondition, Filter, FilterOperator};
pub use self::query::{
    default_fields, default_options, poll, ScreenerQuery, Sort, SortDirection, StreamOptions,
    DEFAULT_RANGE, MIN_STREAM_INTERVAL,
};
