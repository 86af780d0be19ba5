mod common;
pub use self::common::{default_options, Sort, SortDirection, DEFAULT_RANGE};

mod screener;
pub use self::screener::{default_fields, ScreenerQuery};

mod stream;
pub use self::stream::{poll, StreamOptions, MIN_STREAM_INTERVAL};
