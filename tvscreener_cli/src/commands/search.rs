//! Canned stock and crypto searches.

use anyhow::Result;
use clap::Args;
use tvscreener_lib::{Client, CryptoSearch, StockSearch};

use super::scan::run_query;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct StocksArgs {
    /// Minimum price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum daily volume
    #[arg(long)]
    pub min_volume: Option<f64>,

    /// Minimum market capitalization
    #[arg(long)]
    pub min_market_cap: Option<f64>,

    /// Maximum market capitalization
    #[arg(long)]
    pub max_market_cap: Option<f64>,

    /// Rows to return
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<&StocksArgs> for StockSearch {
    fn from(args: &StocksArgs) -> Self {
        StockSearch {
            min_price: args.min_price,
            max_price: args.max_price,
            min_volume: args.min_volume,
            min_market_cap: args.min_market_cap,
            max_market_cap: args.max_market_cap,
            limit: args.limit,
        }
    }
}

#[derive(Args)]
pub struct CryptoArgs {
    /// Minimum price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Minimum 24h volume in USD
    #[arg(long = "min-volume-24h")]
    pub min_volume_24h: Option<f64>,

    /// Minimum market capitalization
    #[arg(long)]
    pub min_market_cap: Option<f64>,

    /// Rows to return
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<&CryptoArgs> for CryptoSearch {
    fn from(args: &CryptoArgs) -> Self {
        CryptoSearch {
            min_price: args.min_price,
            min_volume_24h: args.min_volume_24h,
            min_market_cap: args.min_market_cap,
            limit: args.limit,
        }
    }
}

pub async fn run_stocks(args: &StocksArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = StockSearch::from(args).to_query()?;
    run_query(&query, client, format).await
}

pub async fn run_crypto(args: &CryptoArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = CryptoSearch::from(args).to_query()?;
    run_query(&query, client, format).await
}
