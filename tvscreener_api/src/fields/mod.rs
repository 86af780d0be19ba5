mod catalog;
pub use self::catalog::{Catalog, CryptoField, ForexField, FuturesField, StockField};

mod field;
pub use self::field::{CatalogId, Field, FieldFormat};

mod variant;
pub use self::variant::{FieldRef, Interval};
