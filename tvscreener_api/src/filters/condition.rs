//! Field conditions and the comparison factories that produce them.

use std::fmt;

use serde_json::Value;

use super::filter::Filter;
use super::operator::{Arity, FilterOperator};
use crate::fields::{Field, FieldRef};
use crate::types::Rating;
use crate::Error;

/// Right-hand side of a comparison: a constant, or (rejected) another field.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Value(Value),
    Field(FieldRef),
}

macro_rules! operand_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Value(Value::from(value))
                }
            }
        )*
    };
}

operand_from_value!(i32, i64, u32, u64, f32, f64, bool, String, &str, Vec<Value>);

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<Rating> for Operand {
    fn from(rating: Rating) -> Self {
        Operand::Value(Value::from(rating.as_str()))
    }
}

impl From<FieldRef> for Operand {
    fn from(field: FieldRef) -> Self {
        Operand::Field(field)
    }
}

impl From<&'static Field> for Operand {
    fn from(field: &'static Field) -> Self {
        Operand::Field(FieldRef::Plain(field))
    }
}

/// A validated `(field, operation, value)` triple, ready to become a [`Filter`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCondition {
    field: FieldRef,
    operation: FilterOperator,
    value: Value,
}

impl FieldCondition {
    /// Builds a condition, rejecting field-to-field comparisons and values
    /// whose shape does not fit the operator.
    pub fn new(
        field: impl Into<FieldRef>,
        operation: FilterOperator,
        value: impl Into<Operand>,
    ) -> Result<Self, Error> {
        let field = field.into();
        let value = match value.into() {
            Operand::Value(value) => value,
            Operand::Field(right) => {
                return Err(Error::FieldComparison {
                    left: field.to_string(),
                    operation,
                    right: right.to_string(),
                })
            }
        };
        check_arity(operation, &value)?;
        Ok(Self {
            field,
            operation,
            value,
        })
    }

    pub fn field(&self) -> FieldRef {
        self.field
    }

    pub fn operation(&self) -> FilterOperator {
        self.operation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn to_filter(&self) -> Filter {
        Filter::new(
            self.field.wire_name(),
            self.operation,
            Some(self.value.clone()),
        )
    }
}

impl fmt::Display for FieldCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operation, self.value)
    }
}

fn check_arity(operation: FilterOperator, value: &Value) -> Result<(), Error> {
    let invalid = |reason: &str| Error::InvalidArgument {
        operation,
        reason: reason.to_string(),
    };
    match (operation.arity(), value) {
        (Arity::Pair, Value::Array(items)) if items.len() == 2 => Ok(()),
        (Arity::Pair, _) => Err(invalid("expected a [low, high] pair")),
        (Arity::List, Value::Array(items)) if !items.is_empty() => Ok(()),
        (Arity::List, _) => Err(invalid("expected a non-empty list")),
        (Arity::Scalar, Value::Array(_) | Value::Object(_)) => {
            Err(invalid("expected a single value"))
        }
        (Arity::Scalar, _) => Ok(()),
    }
}

/// Collects operands into a JSON array, failing on the first field operand.
fn collect_values(
    field: FieldRef,
    operation: FilterOperator,
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Value, Error> {
    let mut values = Vec::new();
    for operand in operands {
        match operand {
            Operand::Value(value) => values.push(value),
            Operand::Field(right) => {
                return Err(Error::FieldComparison {
                    left: field.to_string(),
                    operation,
                    right: right.to_string(),
                })
            }
        }
    }
    Ok(Value::Array(values))
}

/// Comparison factories shared by plain fields and their variants.
///
/// Each method returns a [`FieldCondition`] for use with
/// [`ScreenerQuery::with_filter`](crate::ScreenerQuery::with_filter).
pub trait Comparisons {
    /// The field this comparison is made on.
    fn field_ref(&self) -> FieldRef;

    /// Generic form of every factory below.
    fn compare(
        &self,
        operation: FilterOperator,
        value: impl Into<Operand>,
    ) -> Result<FieldCondition, Error> {
        FieldCondition::new(self.field_ref(), operation, value)
    }

    /// `field > value`
    fn gt(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Greater, value)
    }

    /// `field >= value`
    fn gte(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::GreaterOrEqual, value)
    }

    /// `field < value`
    fn lt(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Less, value)
    }

    /// `field <= value`
    fn lte(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::LessOrEqual, value)
    }

    fn equal(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Equal, value)
    }

    fn not_equal(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::NotEqual, value)
    }

    /// `low <= field <= high`, with boundaries as the scan endpoint defines them.
    fn between(
        &self,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Result<FieldCondition, Error> {
        let field = self.field_ref();
        let pair = collect_values(field, FilterOperator::InRange, [low.into(), high.into()])?;
        FieldCondition::new(field, FilterOperator::InRange, pair)
    }

    fn not_between(
        &self,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Result<FieldCondition, Error> {
        let field = self.field_ref();
        let pair = collect_values(field, FilterOperator::NotInRange, [low.into(), high.into()])?;
        FieldCondition::new(field, FilterOperator::NotInRange, pair)
    }

    /// `field` is one of `values`. Fails on an empty set.
    fn isin<I, V>(&self, values: I) -> Result<FieldCondition, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.list(FilterOperator::In, values)
    }

    fn not_in<I, V>(&self, values: I) -> Result<FieldCondition, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.list(FilterOperator::NotIn, values)
    }

    /// Substring match on text fields.
    fn matches(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Match, value)
    }

    fn not_matches(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::NotMatch, value)
    }

    /// Multi-valued field contains any of `values`.
    fn has<I, V>(&self, values: I) -> Result<FieldCondition, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.list(FilterOperator::Has, values)
    }

    fn has_none_of<I, V>(&self, values: I) -> Result<FieldCondition, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.list(FilterOperator::HasNoneOf, values)
    }

    fn above(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Above, value)
    }

    fn below(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Below, value)
    }

    fn crosses(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::Crosses, value)
    }

    fn crosses_above(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::CrossesAbove, value)
    }

    fn crosses_below(&self, value: impl Into<Operand>) -> Result<FieldCondition, Error> {
        self.compare(FilterOperator::CrossesBelow, value)
    }

    #[doc(hidden)]
    fn list<I, V>(&self, operation: FilterOperator, values: I) -> Result<FieldCondition, Error>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        let field = self.field_ref();
        let list = collect_values(field, operation, values.into_iter().map(Into::into))?;
        FieldCondition::new(field, operation, list)
    }
}

impl Comparisons for &'static Field {
    fn field_ref(&self) -> FieldRef {
        FieldRef::Plain(*self)
    }
}

impl Comparisons for FieldRef {
    fn field_ref(&self) -> FieldRef {
        *self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fields::{Interval, StockField};

    #[test]
    fn factories_map_to_operators() {
        let price = StockField::PRICE;
        assert_eq!(price.gt(10).unwrap().operation(), FilterOperator::Greater);
        assert_eq!(price.gte(10).unwrap().operation(), FilterOperator::GreaterOrEqual);
        assert_eq!(price.lt(10).unwrap().operation(), FilterOperator::Less);
        assert_eq!(price.lte(10).unwrap().operation(), FilterOperator::LessOrEqual);
        assert_eq!(price.equal(10).unwrap().operation(), FilterOperator::Equal);
        assert_eq!(price.not_equal(10).unwrap().operation(), FilterOperator::NotEqual);
        assert_eq!(price.above(10).unwrap().operation(), FilterOperator::Above);
        assert_eq!(price.below(10).unwrap().operation(), FilterOperator::Below);
        assert_eq!(price.crosses(10).unwrap().operation(), FilterOperator::Crosses);
        assert_eq!(
            price.crosses_above(10).unwrap().operation(),
            FilterOperator::CrossesAbove
        );
        assert_eq!(
            price.crosses_below(10).unwrap().operation(),
            FilterOperator::CrossesBelow
        );
    }

    #[test]
    fn between_builds_pair() {
        let cond = StockField::MARKET_CAP.between(1e9, 100e9).unwrap();
        assert_eq!(cond.operation(), FilterOperator::InRange);
        assert_eq!(cond.value(), &json!([1e9, 100e9]));

        let cond = StockField::PRICE.not_between(5, 10).unwrap();
        assert_eq!(cond.to_filter().to_dict(), json!({
            "left": "close",
            "operation": "not_in_range",
            "right": [5, 10],
        }));
    }

    #[test]
    fn list_operators_reject_empty_sets() {
        let empty: Vec<&str> = Vec::new();
        for result in [
            StockField::SECTOR.isin(empty.clone()),
            StockField::SECTOR.not_in(empty.clone()),
            StockField::TYPE.has(empty.clone()),
            StockField::TYPE.has_none_of(empty),
        ] {
            assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        }

        let cond = StockField::SECTOR.isin(["Technology", "Finance"]).unwrap();
        assert_eq!(cond.value(), &json!(["Technology", "Finance"]));
    }

    #[test]
    fn generic_compare_checks_arity() {
        let price = StockField::PRICE;
        assert!(matches!(
            price.compare(FilterOperator::InRange, 5),
            Err(Error::InvalidArgument { operation: FilterOperator::InRange, .. })
        ));
        assert!(price.compare(FilterOperator::InRange, json!([1, 2, 3])).is_err());
        assert!(price.compare(FilterOperator::Greater, json!([1, 2])).is_err());
        assert!(price.compare(FilterOperator::Greater, json!({"a": 1})).is_err());
        assert!(price.compare(FilterOperator::In, json!("AAPL")).is_err());
        assert!(price.compare(FilterOperator::InRange, json!([1, 2])).is_ok());
    }

    #[test]
    fn field_to_field_is_rejected_for_every_operator() {
        let other = StockField::VOLUME;
        for op in FilterOperator::ALL {
            let result = FieldCondition::new(StockField::PRICE, op, other);
            assert!(
                matches!(result, Err(Error::FieldComparison { operation, .. }) if operation == op),
                "{op} accepted a field operand"
            );
        }
        assert!(matches!(
            StockField::PRICE.between(1, StockField::LOW),
            Err(Error::FieldComparison { .. })
        ));
        assert!(matches!(
            StockField::PRICE.isin(vec![Operand::from(1), Operand::from(StockField::LOW)]),
            Err(Error::FieldComparison { .. })
        ));
    }

    #[test]
    fn variants_compare_on_their_wire_name() {
        let weekly = StockField::PRICE.with_interval(Interval::Week).unwrap();
        let filter = weekly.crosses_above(100.5).unwrap().to_filter();
        assert_eq!(filter.left, "close|1W");
        assert_eq!(filter.right, Some(json!(100.5)));
    }

    #[test]
    fn rating_values_are_strings() {
        let cond = StockField::ANALYST_RATING.equal(Rating::StrongBuy).unwrap();
        assert_eq!(cond.value(), &json!("Strong Buy"));
        assert_eq!(cond.to_string(), "ANALYST_RATING equal \"Strong Buy\"");
    }
}
