mod commands;
mod output;
mod xml_output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tvscreener_lib::ClientConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "tvscreener")]
#[command(about = "Query the TradingView stock, crypto, forex and futures screeners")]
struct Cli {
    /// Output format: table, json, csv, md, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a screener query once
    Scan(commands::scan::ScanArgs),
    /// Re-run a screener query at a fixed interval
    Stream(commands::stream::StreamArgs),
    /// List the fields of a catalog
    Fields(commands::fields::FieldsArgs),
    /// Search stocks by price, volume and market cap
    Stocks(commands::search::StocksArgs),
    /// Search crypto by price, 24h volume and market cap
    Crypto(commands::search::CryptoArgs),
}

fn parse_format(output: &str) -> OutputFormat {
    match output {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "md" | "markdown" => OutputFormat::Markdown,
        "xml" => OutputFormat::Xml,
        _ => OutputFormat::Table,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tvscreener=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = parse_format(&cli.output);
    let client = ClientConfig::from_env().build_client();

    match &cli.command {
        Commands::Scan(args) => commands::scan::run(args, &client, &format).await?,
        Commands::Stream(args) => commands::stream::run(args, &client, &format).await?,
        Commands::Fields(args) => commands::fields::run(args, &format)?,
        Commands::Stocks(args) => commands::search::run_stocks(args, &client, &format).await?,
        Commands::Crypto(args) => commands::search::run_crypto(args, &client, &format).await?,
    }

    Ok(())
}
