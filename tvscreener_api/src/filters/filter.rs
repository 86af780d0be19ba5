use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::operator::FilterOperator;
use crate::Error;

/// Wire-level filter entry: `{"left": <column>, "operation": <op>, "right": <value>}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub left: String,
    pub operation: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
}

impl Filter {
    pub fn new(left: impl Into<String>, operation: FilterOperator, right: Option<Value>) -> Self {
        Self {
            left: left.into(),
            operation,
            right,
        }
    }

    /// Plain key-value form. `right` is present only when the filter has one.
    pub fn to_dict(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("left".to_string(), Value::String(self.left.clone()));
        dict.insert(
            "operation".to_string(),
            Value::String(self.operation.as_str().to_string()),
        );
        if let Some(right) = &self.right {
            dict.insert("right".to_string(), right.clone());
        }
        Value::Object(dict)
    }

    /// Inverse of [`Filter::to_dict`].
    pub fn from_dict(dict: &Value) -> Result<Self, Error> {
        let obj = dict
            .as_object()
            .ok_or_else(|| Error::InvalidFilter(format!("expected an object, got {}", dict)))?;
        let left = obj
            .get("left")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidFilter("missing string key `left`".to_string()))?;
        let operation = obj
            .get("operation")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidFilter("missing string key `operation`".to_string()))?;
        let operation = operation
            .parse::<FilterOperator>()
            .map_err(|_| Error::InvalidFilter(format!("unknown operation `{}`", operation)))?;
        Ok(Self::new(left, operation, obj.get("right").cloned()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dict_omits_missing_right() {
        let filter = Filter::new("close", FilterOperator::Greater, None);
        assert_eq!(filter.to_dict(), json!({"left": "close", "operation": "greater"}));
        assert_eq!(Filter::from_dict(&filter.to_dict()).unwrap(), filter);
    }

    #[test]
    fn dict_keeps_explicit_null() {
        let filter = Filter::new("sector", FilterOperator::Equal, Some(Value::Null));
        let dict = filter.to_dict();
        assert_eq!(dict, json!({"left": "sector", "operation": "equal", "right": null}));
        assert_eq!(Filter::from_dict(&dict).unwrap(), filter);
    }

    #[test]
    fn from_dict_rejects_bad_input() {
        assert!(matches!(
            Filter::from_dict(&json!({"operation": "greater"})),
            Err(Error::InvalidFilter(_))
        ));
        assert!(matches!(
            Filter::from_dict(&json!({"left": "close", "operation": "gt", "right": 1})),
            Err(Error::InvalidFilter(msg)) if msg.contains("gt")
        ));
        assert!(Filter::from_dict(&json!(["close", "greater", 1])).is_err());
    }

    #[test]
    fn serializes_like_dict() {
        let filter = Filter::new("volume", FilterOperator::GreaterOrEqual, Some(json!(1_000_000)));
        assert_eq!(serde_json::to_value(&filter).unwrap(), filter.to_dict());
    }
}
