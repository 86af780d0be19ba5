use anyhow::Result;
use clap::Args;
use tvscreener_lib::tvscreener_api::Catalog;
use tvscreener_lib::validation::parse_catalog;

use crate::output::{build_field_rows, print_fields, OutputFormat};

#[derive(Args)]
pub struct FieldsArgs {
    /// Asset class: stock, crypto, forex, futures
    pub catalog: String,

    /// Only fields whose key or label contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Only fields that accept a timeframe suffix (e.g. RSI|1W)
    #[arg(long)]
    pub intervals: bool,
}

pub fn run(args: &FieldsArgs, format: &OutputFormat) -> Result<()> {
    let catalog = Catalog::get(parse_catalog(&args.catalog)?);

    let mut fields = match &args.search {
        Some(text) => catalog.search(text),
        None => catalog.fields().to_vec(),
    };
    if args.intervals {
        fields.retain(|f| f.supports_interval());
    }

    eprintln!("{} of {} {} fields", fields.len(), catalog.len(), catalog.id());
    print_fields(&build_field_rows(&fields), format)
}
