use anyhow::Result;
use clap::Args;
use tvscreener_lib::validation::parse_catalog;
use tvscreener_lib::{Client, ScanRequest, ScreenerQuery};

use crate::output::{print_result, OutputFormat, ResultColumns};

/// Query arguments shared by `scan` and `stream`.
#[derive(Args)]
pub struct QueryArgs {
    /// Asset class: stock, crypto, forex, futures
    pub catalog: String,

    /// Filter condition, e.g. PRICE>10, SECTOR=Finance,Utilities, VOLUME=1e6..5e6 (repeatable)
    #[arg(long = "filter", short = 'f')]
    pub filters: Vec<String>,

    /// Column to return: NAME, RSI|1W, PRICE[1] (repeatable; default set when omitted)
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Rows to skip
    #[arg(long, default_value = "0")]
    pub offset: u32,

    /// Rows to return
    #[arg(long, default_value = "150")]
    pub limit: u32,

    /// Index symbol set, e.g. SYML:SP;SPX (repeatable)
    #[arg(long)]
    pub index: Vec<String>,

    /// Restrict to tickers such as NASDAQ:AAPL (repeatable)
    #[arg(long = "ticker")]
    pub tickers: Vec<String>,

    /// Restrict to symbol types: stock, fund, dr, ... (repeatable)
    #[arg(long = "symbol-type")]
    pub symbol_types: Vec<String>,
}

impl QueryArgs {
    pub fn to_request(&self) -> Result<ScanRequest> {
        Ok(ScanRequest {
            catalog: parse_catalog(&self.catalog)?,
            filters: self.filters.clone(),
            fields: self.fields.clone(),
            sort: self.sort.clone(),
            ascending: self.asc,
            offset: self.offset,
            limit: self.limit,
            index: self.index.clone(),
            tickers: self.tickers.clone(),
            symbol_types: self.symbol_types.clone(),
        })
    }

    pub fn to_query(&self) -> Result<ScreenerQuery> {
        Ok(self.to_request()?.to_query()?)
    }
}

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Print the request payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: &ScanArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.query.to_query()?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&query.payload())?);
        return Ok(());
    }

    run_query(&query, client, format).await
}

/// Sends one scan and prints it; shared with the canned searches.
pub async fn run_query(query: &ScreenerQuery, client: &Client, format: &OutputFormat) -> Result<()> {
    let columns = ResultColumns::new(&query.fields());
    let result = query.get(client).await?;

    eprintln!(
        "Showing {} of {} {} results",
        result.data.len(),
        result.total_count,
        query.catalog()
    );

    print_result(&result, &columns, format)
}
