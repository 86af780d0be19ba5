use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::SymbolType;
use crate::filters::Filter;
use crate::query::Sort;

/// Body of a `POST /<market>/scan` request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub filter: Vec<Filter>,
    pub options: BTreeMap<String, Value>,
    pub symbols: Symbols,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    pub range: [u32; 2],
    pub columns: Vec<String>,
}

/// Which instruments a scan runs over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbols {
    /// Constituents of one or more indexes, e.g. `SYML:SP;SPX`.
    SymbolSet { symbolset: Vec<String> },
    /// Everything of the given types, or only the listed tickers.
    Query {
        query: SymbolQuery,
        tickers: Vec<String>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolQuery {
    pub types: Vec<SymbolType>,
}

impl Default for Symbols {
    fn default() -> Self {
        Symbols::Query {
            query: SymbolQuery::default(),
            tickers: Vec::new(),
        }
    }
}
