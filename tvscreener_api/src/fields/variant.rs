use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::field::{CatalogId, Field, FieldFormat};
use crate::Error;

/// Timeframes the scan protocol accepts after a `|` in a column name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1")]
    Min1,
    #[serde(rename = "5")]
    Min5,
    #[serde(rename = "15")]
    Min15,
    #[serde(rename = "30")]
    Min30,
    #[serde(rename = "60")]
    Hour1,
    #[serde(rename = "120")]
    Hour2,
    #[serde(rename = "240")]
    Hour4,
    #[serde(rename = "1D")]
    Day,
    #[serde(rename = "1W")]
    Week,
    #[serde(rename = "1M")]
    Month,
}

impl Interval {
    pub const ALL: [Interval; 10] = [
        Interval::Min1,
        Interval::Min5,
        Interval::Min15,
        Interval::Min30,
        Interval::Hour1,
        Interval::Hour2,
        Interval::Hour4,
        Interval::Day,
        Interval::Week,
        Interval::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Min1 => "1",
            Interval::Min5 => "5",
            Interval::Min15 => "15",
            Interval::Min30 => "30",
            Interval::Hour1 => "60",
            Interval::Hour2 => "120",
            Interval::Hour4 => "240",
            Interval::Day => "1D",
            Interval::Week => "1W",
            Interval::Month => "1M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| Error::UnknownInterval(s.to_string()))
    }
}

/// A field as it appears in a query: the plain descriptor, or an interval or
/// history view over it.
///
/// Variants keep a `'static` reference to their base descriptor; the format
/// and catalog of a variant are always those of the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldRef {
    Plain(&'static Field),
    Interval {
        base: &'static Field,
        interval: Interval,
    },
    History {
        base: &'static Field,
        index: u32,
    },
}

impl FieldRef {
    pub fn base(&self) -> &'static Field {
        match *self {
            FieldRef::Plain(base) => base,
            FieldRef::Interval { base, .. } => base,
            FieldRef::History { base, .. } => base,
        }
    }

    /// Column name sent to the scan endpoint: `close`, `close|1W` or `close[1]`.
    pub fn wire_name(&self) -> Cow<'static, str> {
        match self {
            FieldRef::Plain(base) => Cow::Borrowed(base.wire_name),
            FieldRef::Interval { base, interval } => {
                Cow::Owned(format!("{}|{}", base.wire_name, interval))
            }
            FieldRef::History { base, index } => {
                Cow::Owned(format!("{}[{}]", base.wire_name, index))
            }
        }
    }

    pub fn format(&self) -> FieldFormat {
        self.base().format
    }

    pub fn catalog(&self) -> CatalogId {
        self.base().catalog
    }

    pub fn interval(&self) -> Option<Interval> {
        match self {
            FieldRef::Interval { interval, .. } => Some(*interval),
            _ => None,
        }
    }

    pub fn history_index(&self) -> Option<u32> {
        match self {
            FieldRef::History { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<&'static Field> for FieldRef {
    fn from(field: &'static Field) -> Self {
        FieldRef::Plain(field)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Plain(base) => write!(f, "{}", base.name),
            FieldRef::Interval { base, interval } => write!(f, "{}|{}", base.name, interval),
            FieldRef::History { base, index } => write!(f, "{}[{}]", base.name, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{CryptoField, StockField};

    #[test]
    fn interval_round_trips_through_str() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>().unwrap(), interval);
        }
        assert!(matches!(
            "2D".parse::<Interval>(),
            Err(Error::UnknownInterval(s)) if s == "2D"
        ));
    }

    #[test]
    fn variants_delegate_to_base() {
        let rsi = StockField::RSI_14.with_interval(Interval::Hour4).unwrap();
        assert_eq!(rsi.base(), StockField::RSI_14);
        assert_eq!(rsi.format(), FieldFormat::Float);
        assert_eq!(rsi.catalog(), CatalogId::Stock);
        assert_eq!(rsi.interval(), Some(Interval::Hour4));
        assert_eq!(rsi.history_index(), None);
        assert_eq!(rsi.to_string(), "RSI_14|240");

        let prev = CryptoField::PRICE.with_history(2).unwrap();
        assert_eq!(prev.catalog(), CatalogId::Crypto);
        assert_eq!(prev.history_index(), Some(2));
        assert_eq!(prev.wire_name(), "close[2]");
    }

    #[test]
    fn plain_wire_name_is_borrowed() {
        let plain = FieldRef::from(StockField::VOLUME);
        assert!(matches!(plain.wire_name(), Cow::Borrowed("volume")));
    }
}
