//! Shared query infrastructure: [`SortDirection`], [`Sort`], and request defaults.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default result window, `[from, to)`.
pub const DEFAULT_RANGE: [u32; 2] = [0, 150];

/// Options sent with every scan unless overridden.
pub fn default_options() -> BTreeMap<String, Value> {
    BTreeMap::from([("lang".to_string(), Value::from("en"))])
}

/// Sort order for scan results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first). This is the default.
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// The single sort key of a scan: `{"sortBy": <column>, "sortOrder": "asc"|"desc"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub sort_by: String,
    pub sort_order: SortDirection,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sort_wire_shape() {
        let sort = Sort {
            sort_by: "market_cap_basic".to_string(),
            sort_order: SortDirection::Desc,
        };
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"sortBy": "market_cap_basic", "sortOrder": "desc"})
        );
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("down".parse::<SortDirection>().is_err());
        assert_eq!(SortDirection::from_ascending(false), SortDirection::Desc);
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn options_default_to_english() {
        assert_eq!(default_options().get("lang"), Some(&json!("en")));
        assert_eq!(default_options().len(), 1);
    }
}
