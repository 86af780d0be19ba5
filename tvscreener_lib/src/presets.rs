//! Canned stock and crypto searches with simple numeric bounds.
//!
//! The argument structs deserialize from camelCase JSON
//! (`{"minPrice": 10, "limit": 5}`) so they can be fed straight from a tool
//! call or a config file.

use serde::{Deserialize, Serialize};
use tvscreener_api::{Comparisons, CryptoField, Field, ScreenerQuery, StockField};

use crate::error::ScreenerError;
use crate::validation::page_range;

pub const DEFAULT_PRESET_LIMIT: u32 = 20;

const STOCK_COLUMNS: [&Field; 5] = [
    StockField::NAME,
    StockField::PRICE,
    StockField::CHANGE_PERCENT,
    StockField::VOLUME,
    StockField::MARKET_CAP,
];

const CRYPTO_COLUMNS: [&Field; 5] = [
    CryptoField::NAME,
    CryptoField::PRICE,
    CryptoField::CHANGE_PERCENT,
    CryptoField::VOLUME_24H_IN_USD,
    CryptoField::MARKET_CAP,
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockSearch {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_volume: Option<f64>,
    pub min_market_cap: Option<f64>,
    pub max_market_cap: Option<f64>,
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CryptoSearch {
    pub min_price: Option<f64>,
    #[serde(rename = "minVolume24h")]
    pub min_volume_24h: Option<f64>,
    pub min_market_cap: Option<f64>,
    pub limit: Option<u32>,
}

/// Adds `field op bound` for each bound that is set.
fn apply_bounds(
    mut query: ScreenerQuery,
    bounds: &[(&'static Field, Bound, Option<f64>)],
) -> Result<ScreenerQuery, ScreenerError> {
    for (field, bound, value) in bounds {
        let Some(value) = *value else { continue };
        let condition = match bound {
            Bound::Min => field.gte(value)?,
            Bound::Max => field.lte(value)?,
        };
        query = query.with_filter(condition)?;
    }
    Ok(query)
}

#[derive(Clone, Copy, Debug)]
enum Bound {
    Min,
    Max,
}

fn limited(query: ScreenerQuery, limit: Option<u32>) -> Result<ScreenerQuery, ScreenerError> {
    let [from, to] = page_range(0, limit.unwrap_or(DEFAULT_PRESET_LIMIT))?;
    Ok(query.with_range(from, to))
}

impl StockSearch {
    pub fn to_query(&self) -> Result<ScreenerQuery, ScreenerError> {
        let query = apply_bounds(
            ScreenerQuery::stocks(),
            &[
                (StockField::PRICE, Bound::Min, self.min_price),
                (StockField::PRICE, Bound::Max, self.max_price),
                (StockField::VOLUME, Bound::Min, self.min_volume),
                (StockField::MARKET_CAP, Bound::Min, self.min_market_cap),
                (StockField::MARKET_CAP, Bound::Max, self.max_market_cap),
            ],
        )?
        .with_fields(STOCK_COLUMNS)?;
        limited(query, self.limit)
    }
}

impl CryptoSearch {
    pub fn to_query(&self) -> Result<ScreenerQuery, ScreenerError> {
        let query = apply_bounds(
            ScreenerQuery::crypto(),
            &[
                (CryptoField::PRICE, Bound::Min, self.min_price),
                (CryptoField::VOLUME_24H_IN_USD, Bound::Min, self.min_volume_24h),
                (CryptoField::MARKET_CAP, Bound::Min, self.min_market_cap),
            ],
        )?
        .with_fields(CRYPTO_COLUMNS)?;
        limited(query, self.limit)
    }
}
