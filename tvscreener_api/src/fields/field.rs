use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::variant::{FieldRef, Interval};
use crate::Error;

/// How a field's values are meant to be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    Float,
    Percent,
    Bool,
    Date,
    Text,
    Rating,
    NumberGroup,
    Currency,
    Round,
    Recommendation,
    ComputedRecommendation,
}

impl FieldFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldFormat::Float => "float",
            FieldFormat::Percent => "percent",
            FieldFormat::Bool => "bool",
            FieldFormat::Date => "date",
            FieldFormat::Text => "text",
            FieldFormat::Rating => "rating",
            FieldFormat::NumberGroup => "number_group",
            FieldFormat::Currency => "currency",
            FieldFormat::Round => "round",
            FieldFormat::Recommendation => "recommendation",
            FieldFormat::ComputedRecommendation => "computed_recommendation",
        }
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The asset class a field catalog (and a screener) belongs to.
///
/// Every [`Field`] carries its catalog tag, and screeners compare tags by value
/// to reject fields from another asset class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogId {
    Stock,
    Crypto,
    Forex,
    Futures,
}

impl CatalogId {
    pub const ALL: [CatalogId; 4] = [
        CatalogId::Stock,
        CatalogId::Crypto,
        CatalogId::Forex,
        CatalogId::Futures,
    ];

    /// Market segment of the scan endpoint, e.g. `america` in `/america/scan`.
    pub fn scan_path(&self) -> &'static str {
        match self {
            CatalogId::Stock => "america",
            CatalogId::Crypto => "crypto",
            CatalogId::Forex => "forex",
            CatalogId::Futures => "futures",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogId::Stock => "stock",
            CatalogId::Crypto => "crypto",
            CatalogId::Forex => "forex",
            CatalogId::Futures => "futures",
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stock" | "stocks" => Ok(CatalogId::Stock),
            "crypto" => Ok(CatalogId::Crypto),
            "forex" => Ok(CatalogId::Forex),
            "futures" => Ok(CatalogId::Futures),
            _ => Err(()),
        }
    }
}

/// Metadata for one screenable attribute.
///
/// Descriptors live in the generated catalogs (`StockField::PRICE`, ...) as
/// `&'static Field` constants and are never mutated.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub(crate) name: &'static str,
    pub(crate) label: &'static str,
    pub(crate) wire_name: &'static str,
    pub(crate) format: FieldFormat,
    pub(crate) interval: bool,
    pub(crate) history: bool,
    pub(crate) catalog: CatalogId,
}

impl Field {
    /// Catalog key, e.g. `PRICE`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Column name used by the scan protocol, e.g. `close`.
    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn format(&self) -> FieldFormat {
        self.format
    }

    pub fn supports_interval(&self) -> bool {
        self.interval
    }

    pub fn supports_history(&self) -> bool {
        self.history
    }

    pub fn catalog(&self) -> CatalogId {
        self.catalog
    }

    /// The same field evaluated on another timeframe (`close|1W`).
    pub fn with_interval(&'static self, interval: Interval) -> Result<FieldRef, Error> {
        if !self.interval {
            return Err(Error::IntervalUnsupported { field: self.name });
        }
        Ok(FieldRef::Interval {
            base: self,
            interval,
        })
    }

    /// The same field `index` bars back (`close[1]` is the previous bar).
    pub fn with_history(&'static self, index: i64) -> Result<FieldRef, Error> {
        if !self.history {
            return Err(Error::HistoryUnsupported { field: self.name });
        }
        if index < 0 {
            return Err(Error::NegativeHistoryIndex {
                field: self.name,
                index,
            });
        }
        let index = u32::try_from(index).map_err(|_| Error::HistoryIndexOutOfRange {
            field: self.name,
            index,
        })?;
        Ok(FieldRef::History { base: self, index })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FuturesField, StockField};

    #[test]
    fn interval_requires_capability() {
        let err = FuturesField::CLOSE.with_interval(Interval::Week).unwrap_err();
        assert!(matches!(err, Error::IntervalUnsupported { field: "CLOSE" }));

        let variant = StockField::PRICE.with_interval(Interval::Week).unwrap();
        assert_eq!(variant.wire_name(), "close|1W");
    }

    #[test]
    fn history_requires_capability_and_non_negative_index() {
        let err = StockField::MARKET_CAP.with_history(1).unwrap_err();
        assert!(matches!(err, Error::HistoryUnsupported { .. }));

        let err = StockField::PRICE.with_history(-1).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeHistoryIndex { field: "PRICE", index: -1 }
        ));

        let too_far = i64::from(u32::MAX) + 1;
        let err = StockField::PRICE.with_history(too_far).unwrap_err();
        assert!(matches!(err, Error::HistoryIndexOutOfRange { field: "PRICE", .. }));
        assert!(err.to_string().contains("out of range"));

        let variant = StockField::PRICE.with_history(0).unwrap();
        assert_eq!(variant.wire_name(), "close[0]");
    }

    #[test]
    fn catalog_id_parses_case_insensitively() {
        assert_eq!("Stock".parse::<CatalogId>(), Ok(CatalogId::Stock));
        assert_eq!("FUTURES".parse::<CatalogId>(), Ok(CatalogId::Futures));
        assert!("bonds".parse::<CatalogId>().is_err());
        assert_eq!(CatalogId::Stock.scan_path(), "america");
    }
}
