mod enums;
pub use self::enums::{Rating, SymbolType};

mod payload;
pub use self::payload::{Payload, SymbolQuery, Symbols};

mod response;
pub use self::response::{ScanResponse, ScanRow, ScreenerResult, ScreenerRow};
