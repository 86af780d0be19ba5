mod condition;
pub use self::condition::{Comparisons, FieldCondition, Operand};

mod filter;
pub use self::filter::Filter;

mod operator;
pub use self::operator::{Arity, FilterOperator};
