use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Comparison operators understood by the scan endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "greater")]
    Greater,
    #[serde(rename = "egreater")]
    GreaterOrEqual,
    #[serde(rename = "less")]
    Less,
    #[serde(rename = "eless")]
    LessOrEqual,
    #[serde(rename = "equal")]
    Equal,
    #[serde(rename = "nequal")]
    NotEqual,
    #[serde(rename = "in_range")]
    InRange,
    #[serde(rename = "not_in_range")]
    NotInRange,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not_in")]
    NotIn,
    #[serde(rename = "match")]
    Match,
    #[serde(rename = "nmatch")]
    NotMatch,
    #[serde(rename = "has")]
    Has,
    #[serde(rename = "has_none_of")]
    HasNoneOf,
    #[serde(rename = "above")]
    Above,
    #[serde(rename = "below")]
    Below,
    #[serde(rename = "crosses")]
    Crosses,
    #[serde(rename = "crosses_above")]
    CrossesAbove,
    #[serde(rename = "crosses_below")]
    CrossesBelow,
}

/// Shape of the right-hand side an operator expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// A single number, string or bool.
    Scalar,
    /// A `[low, high]` pair.
    Pair,
    /// A non-empty list.
    List,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 19] = [
        FilterOperator::Greater,
        FilterOperator::GreaterOrEqual,
        FilterOperator::Less,
        FilterOperator::LessOrEqual,
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::InRange,
        FilterOperator::NotInRange,
        FilterOperator::In,
        FilterOperator::NotIn,
        FilterOperator::Match,
        FilterOperator::NotMatch,
        FilterOperator::Has,
        FilterOperator::HasNoneOf,
        FilterOperator::Above,
        FilterOperator::Below,
        FilterOperator::Crosses,
        FilterOperator::CrossesAbove,
        FilterOperator::CrossesBelow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Greater => "greater",
            FilterOperator::GreaterOrEqual => "egreater",
            FilterOperator::Less => "less",
            FilterOperator::LessOrEqual => "eless",
            FilterOperator::Equal => "equal",
            FilterOperator::NotEqual => "nequal",
            FilterOperator::InRange => "in_range",
            FilterOperator::NotInRange => "not_in_range",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not_in",
            FilterOperator::Match => "match",
            FilterOperator::NotMatch => "nmatch",
            FilterOperator::Has => "has",
            FilterOperator::HasNoneOf => "has_none_of",
            FilterOperator::Above => "above",
            FilterOperator::Below => "below",
            FilterOperator::Crosses => "crosses",
            FilterOperator::CrossesAbove => "crosses_above",
            FilterOperator::CrossesBelow => "crosses_below",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            FilterOperator::InRange | FilterOperator::NotInRange => Arity::Pair,
            FilterOperator::In
            | FilterOperator::NotIn
            | FilterOperator::Has
            | FilterOperator::HasNoneOf => Arity::List,
            _ => Arity::Scalar,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or(())
    }
}
