//! Mapping between requested fields and the column names on the wire.
//!
//! A column is a base wire name with at most one suffix: `|<interval>` for an
//! interval variant or `[<index>]` for a history variant.

use std::collections::HashSet;
use std::fmt;

use crate::fields::{FieldRef, Interval};

/// A wire column name split into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnName {
    pub base: String,
    pub interval: Option<Interval>,
    pub history_index: Option<u32>,
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if let Some(interval) = self.interval {
            write!(f, "|{}", interval)?;
        }
        if let Some(index) = self.history_index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

/// Wire columns to request for `fields`, deduplicated in first-seen order.
pub fn resolve_columns(fields: &[FieldRef]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(fields.len());
    for field in fields {
        let wire_name = field.wire_name();
        if seen.insert(wire_name.clone()) {
            columns.push(wire_name.into_owned());
        }
    }
    columns
}

/// Splits a trailing `[index]` or `|interval` off a column name.
///
/// Names without a recognised suffix come back whole as the base.
pub fn decompose_wire_name(name: &str) -> ColumnName {
    if let Some((base, index)) = split_history(name) {
        return ColumnName {
            base: base.to_string(),
            interval: None,
            history_index: Some(index),
        };
    }
    if let Some((base, interval)) = split_interval(name) {
        return ColumnName {
            base: base.to_string(),
            interval: Some(interval),
            history_index: None,
        };
    }
    ColumnName {
        base: name.to_string(),
        interval: None,
        history_index: None,
    }
}

/// Base names of `columns`, suffixes removed.
pub fn strip_suffixes(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| decompose_wire_name(column).base)
        .collect()
}

fn split_history(name: &str) -> Option<(&str, u32)> {
    let (base, digits) = name.strip_suffix(']')?.rsplit_once('[')?;
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((base, digits.parse().ok()?))
}

fn split_interval(name: &str) -> Option<(&str, Interval)> {
    let (base, suffix) = name.rsplit_once('|')?;
    if base.is_empty() {
        return None;
    }
    Some((base, suffix.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Catalog, CatalogId, StockField};

    #[test]
    fn resolve_dedups_and_keeps_order() {
        let price = FieldRef::from(StockField::PRICE);
        let name = FieldRef::from(StockField::NAME);
        assert_eq!(resolve_columns(&[price, price]), resolve_columns(&[price]));
        assert_eq!(resolve_columns(&[price, name]), vec!["close", "name"]);
        assert_ne!(resolve_columns(&[price, name]), resolve_columns(&[name, price]));
    }

    #[test]
    fn variants_get_their_own_slot() {
        let price = FieldRef::from(StockField::PRICE);
        let daily = StockField::PRICE.with_interval(Interval::Day).unwrap();
        let prev = StockField::PRICE.with_history(1).unwrap();
        assert_eq!(
            resolve_columns(&[price, daily, prev, daily, price]),
            vec!["close", "close|1D", "close[1]"]
        );
    }

    #[test]
    fn decompose_inverts_interval_variants() {
        for id in CatalogId::ALL {
            for field in Catalog::get(id).fields().iter().filter(|f| f.supports_interval()) {
                for interval in Interval::ALL {
                    let wire = field.with_interval(interval).unwrap().wire_name();
                    let parts = decompose_wire_name(&wire);
                    assert_eq!(parts.base, field.wire_name());
                    assert_eq!(parts.interval, Some(interval));
                    assert_eq!(parts.history_index, None);
                    assert_eq!(parts.to_string(), wire);
                }
            }
        }
    }

    #[test]
    fn decompose_inverts_history_variants() {
        for id in CatalogId::ALL {
            for field in Catalog::get(id).fields().iter().filter(|f| f.supports_history()) {
                for index in [0, 1, 2, 10, 365] {
                    let wire = field.with_history(index).unwrap().wire_name();
                    let parts = decompose_wire_name(&wire);
                    assert_eq!(parts.base, field.wire_name());
                    assert_eq!(parts.history_index, Some(index as u32));
                    assert_eq!(parts.interval, None);
                }
            }
        }
    }

    #[test]
    fn decompose_leaves_plain_names_alone() {
        for name in ["close", "Perf.1M", "close|2D", "close[]", "close[x]", "[1]", "|1D"] {
            let parts = decompose_wire_name(name);
            assert_eq!(parts.base, name);
            assert_eq!(parts.interval, None);
            assert_eq!(parts.history_index, None);
        }
    }

    #[test]
    fn strip_suffixes_returns_bases() {
        let columns = vec![
            "close|1W".to_string(),
            "RSI[2]".to_string(),
            "name".to_string(),
        ];
        assert_eq!(strip_suffixes(&columns), vec!["close", "RSI", "name"]);
    }
}
