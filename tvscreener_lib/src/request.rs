//! Building a [`ScreenerQuery`] from loosely typed scan arguments.

use serde::{Deserialize, Serialize};
use tvscreener_api::types::SymbolType;
use tvscreener_api::{CatalogId, ScreenerQuery};

use crate::error::ScreenerError;
use crate::validation::{page_range, parse_condition, resolve_field};

pub const DEFAULT_LIMIT: u32 = 150;

/// Text form of a scan, as given on a command line or in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRequest {
    pub catalog: CatalogId,
    /// Conditions such as `PRICE>10` or `SECTOR=Finance,Utilities`.
    pub filters: Vec<String>,
    /// Columns to request; empty means the catalog defaults.
    pub fields: Vec<String>,
    pub sort: Option<String>,
    pub ascending: bool,
    pub offset: u32,
    pub limit: u32,
    /// Index symbol sets, e.g. `SYML:SP;SPX`.
    pub index: Vec<String>,
    pub tickers: Vec<String>,
    pub symbol_types: Vec<String>,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            catalog: CatalogId::Stock,
            filters: Vec::new(),
            fields: Vec::new(),
            sort: None,
            ascending: false,
            offset: 0,
            limit: DEFAULT_LIMIT,
            index: Vec::new(),
            tickers: Vec::new(),
            symbol_types: Vec::new(),
        }
    }
}

impl ScanRequest {
    pub fn new(catalog: CatalogId) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Result<ScreenerQuery, ScreenerError> {
        let catalog = self.catalog;
        let mut query = ScreenerQuery::new(catalog);

        for expr in &self.filters {
            query = query.with_filter(parse_condition(catalog, expr)?)?;
        }
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|spec| resolve_field(catalog, spec))
                .collect::<Result<Vec<_>, _>>()?;
            query = query.with_fields(fields)?;
        }
        if let Some(sort) = &self.sort {
            query = query.with_sort_by(resolve_field(catalog, sort)?, self.ascending)?;
        }

        let [from, to] = page_range(self.offset, self.limit)?;
        query = query.with_range(from, to).with_index(self.index.as_slice());

        if !self.symbol_types.is_empty() {
            let types = self
                .symbol_types
                .iter()
                .map(|raw| parse_symbol_type(raw))
                .collect::<Result<Vec<_>, _>>()?;
            query = query.with_symbol_types(&types);
        }
        if !self.tickers.is_empty() {
            query = query.with_tickers(self.tickers.iter().map(|t| t.trim().to_uppercase()));
        }
        Ok(query)
    }
}

/// Validate a symbol type such as `stock`, `fund`, or `dr`.
pub fn parse_symbol_type(input: &str) -> Result<SymbolType, ScreenerError> {
    input.trim().to_lowercase().parse::<SymbolType>().map_err(|_| {
        ScreenerError::invalid(format!(
            "unknown symbol type '{}'. Valid values: stock, fund, dr, bond, warrant, \
             structured, right, crypto, index, economic, forex, futures, spread, swap",
            input
        ))
    })
}
