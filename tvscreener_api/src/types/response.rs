use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SYMBOL_KEY: &str = "symbol";

/// Raw scan response: one positional value array per symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub total_count: u64,
    pub data: Vec<ScanRow>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanRow {
    /// Symbol id, e.g. `NASDAQ:AAPL`.
    pub s: String,
    /// Values in the order of the requested columns.
    pub d: Vec<Value>,
}

/// One result row keyed by wire column name.
///
/// Serializes as one flat object: `symbol` first, then the columns in the
/// order they were requested. A requested column named `symbol` takes the
/// `symbol` key in place of the symbol id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ScreenerRow {
    pub symbol: String,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl ScreenerRow {
    /// Zips `row.d` against `columns`; values beyond the column list are dropped.
    pub fn from_scan(row: ScanRow, columns: &[String]) -> Self {
        let values = columns.iter().cloned().zip(row.d).collect();
        Self {
            symbol: row.s,
            values,
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

impl Serialize for ScreenerRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        match self.values.get(SYMBOL_KEY) {
            Some(column) => map.serialize_entry(SYMBOL_KEY, column)?,
            None => map.serialize_entry(SYMBOL_KEY, &self.symbol)?,
        }
        for (column, value) in &self.values {
            if column != SYMBOL_KEY {
                map.serialize_entry(column, value)?;
            }
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerResult {
    pub data: Vec<ScreenerRow>,
    pub total_count: u64,
}

impl ScreenerResult {
    /// Reshapes a raw response using the columns that were requested.
    pub fn from_scan(response: ScanResponse, columns: &[String]) -> Self {
        let data = response
            .data
            .into_iter()
            .map(|row| ScreenerRow::from_scan(row, columns))
            .collect();
        Self {
            data,
            total_count: response.total_count,
        }
    }
}
