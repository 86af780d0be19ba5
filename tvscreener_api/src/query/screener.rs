use std::collections::BTreeMap;

use futures::Stream;
use serde_json::Value;

use crate::columns::resolve_columns;
use crate::fields::{CatalogId, CryptoField, Field, FieldRef, ForexField, FuturesField, StockField};
use crate::filters::{FieldCondition, Filter};
use crate::types::{Payload, ScreenerResult, SymbolQuery, SymbolType, Symbols};
use crate::{Client, Error};

use super::common::{default_options, Sort, SortDirection, DEFAULT_RANGE};
use super::stream::{poll, StreamOptions};

const STOCK_DEFAULTS: &[&Field] = &[
    StockField::NAME,
    StockField::DESCRIPTION,
    StockField::PRICE,
    StockField::CHANGE_PERCENT,
    StockField::VOLUME,
    StockField::RELATIVE_VOLUME,
    StockField::MARKET_CAP,
    StockField::PRICE_TO_EARNINGS_TTM,
    StockField::SECTOR,
    StockField::TECHNICAL_RATING,
];

const CRYPTO_DEFAULTS: &[&Field] = &[
    CryptoField::NAME,
    CryptoField::DESCRIPTION,
    CryptoField::PRICE,
    CryptoField::CHANGE_PERCENT,
    CryptoField::VOLUME_24H_IN_USD,
    CryptoField::MARKET_CAP,
    CryptoField::TECHNICAL_RATING,
];

const FOREX_DEFAULTS: &[&Field] = &[
    ForexField::NAME,
    ForexField::DESCRIPTION,
    ForexField::PRICE,
    ForexField::CHANGE_PERCENT,
    ForexField::BID,
    ForexField::ASK,
    ForexField::HIGH,
    ForexField::LOW,
    ForexField::TECHNICAL_RATING,
];

const FUTURES_DEFAULTS: &[&Field] = &[
    FuturesField::NAME,
    FuturesField::DESCRIPTION,
    FuturesField::CLOSE,
    FuturesField::CHANGE,
    FuturesField::VOLUME,
    FuturesField::OPEN_INTEREST,
    FuturesField::RECOMMEND_ALL,
];

/// Columns requested when a query has no explicit field selection.
pub fn default_fields(catalog: CatalogId) -> &'static [&'static Field] {
    match catalog {
        CatalogId::Stock => STOCK_DEFAULTS,
        CatalogId::Crypto => CRYPTO_DEFAULTS,
        CatalogId::Forex => FOREX_DEFAULTS,
        CatalogId::Futures => FUTURES_DEFAULTS,
    }
}

/// A scan over one catalog, built up with consuming `with_*` calls.
///
/// Every field that enters the query (filter, selection, sort) is checked
/// against the query's catalog as it is added, so a built query can always
/// be sent. The query is not consumed by [`ScreenerQuery::get`]; calling it
/// again re-sends the same state.
///
/// ```no_run
/// use tvscreener_api::{Client, Comparisons, ScreenerQuery, StockField};
///
/// # async fn run() -> Result<(), tvscreener_api::Error> {
/// let query = ScreenerQuery::stocks()
///     .with_filter(StockField::PRICE.gt(10)?)?
///     .with_fields([StockField::NAME, StockField::PRICE])?
///     .with_sort_by(StockField::MARKET_CAP, false)?
///     .with_range(0, 20);
/// let result = query.get(&Client::new()).await?;
/// println!("{} matches", result.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ScreenerQuery {
    catalog: CatalogId,
    filters: Vec<Filter>,
    fields: Vec<FieldRef>,
    sort: Option<Sort>,
    range: [u32; 2],
    options: BTreeMap<String, Value>,
    symbols: Symbols,
}

impl ScreenerQuery {
    pub fn new(catalog: CatalogId) -> Self {
        Self {
            catalog,
            filters: Vec::new(),
            fields: Vec::new(),
            sort: None,
            range: DEFAULT_RANGE,
            options: default_options(),
            symbols: Symbols::default(),
        }
    }

    pub fn stocks() -> Self {
        Self::new(CatalogId::Stock)
    }

    pub fn crypto() -> Self {
        Self::new(CatalogId::Crypto)
    }

    pub fn forex() -> Self {
        Self::new(CatalogId::Forex)
    }

    pub fn futures() -> Self {
        Self::new(CatalogId::Futures)
    }

    pub fn catalog(&self) -> CatalogId {
        self.catalog
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    fn check_catalog(&self, field: FieldRef) -> Result<(), Error> {
        let found = field.catalog();
        if found == self.catalog {
            Ok(())
        } else {
            Err(Error::CatalogMismatch {
                field: field.to_string(),
                expected: self.catalog,
                found,
            })
        }
    }

    /// Appends a condition. Conditions are AND-ed by the remote service.
    pub fn with_filter(mut self, condition: FieldCondition) -> Result<Self, Error> {
        self.check_catalog(condition.field())?;
        tracing::debug!("Adding filter {}", condition);
        self.filters.push(condition.to_filter());
        Ok(self)
    }

    /// Replaces the column selection. An empty selection falls back to the
    /// catalog defaults.
    pub fn with_fields<I, F>(mut self, fields: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldRef>,
    {
        let fields: Vec<FieldRef> = fields.into_iter().map(Into::into).collect();
        for field in &fields {
            self.check_catalog(*field)?;
        }
        self.fields = fields;
        Ok(self)
    }

    /// Sets the single sort key, replacing any previous one.
    pub fn with_sort_by(mut self, field: impl Into<FieldRef>, ascending: bool) -> Result<Self, Error> {
        let field = field.into();
        self.check_catalog(field)?;
        self.sort = Some(Sort {
            sort_by: field.wire_name().into_owned(),
            sort_order: SortDirection::from_ascending(ascending),
        });
        Ok(self)
    }

    /// Result window `[from, to)`. Not validated here.
    pub fn with_range(mut self, from: u32, to: u32) -> Self {
        self.range = [from, to];
        self
    }

    /// Restricts the scan to index constituents, e.g. `SYML:SP;SPX`.
    /// An empty slice leaves the current symbols constraint untouched.
    pub fn with_index<S: AsRef<str>>(mut self, symbolset: &[S]) -> Self {
        if symbolset.is_empty() {
            return self;
        }
        self.symbols = Symbols::SymbolSet {
            symbolset: symbolset.iter().map(|s| s.as_ref().to_string()).collect(),
        };
        self
    }

    /// Restricts the scan to explicit tickers such as `NASDAQ:AAPL`.
    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types = self.symbol_types();
        self.symbols = Symbols::Query {
            query: SymbolQuery { types },
            tickers: tickers.into_iter().map(Into::into).collect(),
        };
        self
    }

    pub fn with_symbol_types(mut self, types: &[SymbolType]) -> Self {
        let tickers = match self.symbols {
            Symbols::Query { tickers, .. } => tickers,
            Symbols::SymbolSet { .. } => Vec::new(),
        };
        self.symbols = Symbols::Query {
            query: SymbolQuery {
                types: types.to_vec(),
            },
            tickers,
        };
        self
    }

    fn symbol_types(&self) -> Vec<SymbolType> {
        match &self.symbols {
            Symbols::Query { query, .. } => query.types.clone(),
            Symbols::SymbolSet { .. } => Vec::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The explicit selection, or the catalog defaults when none is set.
    pub fn fields(&self) -> Vec<FieldRef> {
        if self.fields.is_empty() {
            default_fields(self.catalog)
                .iter()
                .map(|field| FieldRef::from(*field))
                .collect()
        } else {
            self.fields.clone()
        }
    }

    pub fn columns(&self) -> Vec<String> {
        resolve_columns(&self.fields())
    }

    pub fn payload(&self) -> Payload {
        Payload {
            filter: self.filters.clone(),
            options: self.options.clone(),
            symbols: self.symbols.clone(),
            sort: self.sort.clone(),
            range: self.range,
            columns: self.columns(),
        }
    }

    /// Runs the scan once.
    pub async fn get(&self, client: &Client) -> Result<ScreenerResult, Error> {
        client.scan(self).await
    }

    /// Re-runs the scan at a fixed interval. See [`poll`] for the element
    /// semantics.
    pub fn stream<'a>(
        &'a self,
        client: &'a Client,
        options: StreamOptions,
    ) -> impl Stream<Item = Option<ScreenerResult>> + 'a {
        poll(options, move || self.get(client))
    }
}
