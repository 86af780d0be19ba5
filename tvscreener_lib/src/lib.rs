//! Library layer for tvscreener: configuration, input validation, canned
//! searches, and display formatting on top of `tvscreener_api`.

pub mod config;
pub mod error;
pub mod format;
pub mod presets;
pub mod request;
pub mod validation;

pub use tvscreener_api;
pub use tvscreener_api::types;
pub use tvscreener_api::{
    CatalogId, Client, FieldFormat, FieldRef, ScreenerQuery, StreamOptions,
};

pub use config::ClientConfig;
pub use error::ScreenerError;
pub use presets::{CryptoSearch, StockSearch};
pub use request::ScanRequest;
