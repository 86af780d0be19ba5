//! Error types for the screener API.

use crate::fields::CatalogId;
use crate::filters::FilterOperator;

/// Errors raised while building or executing a screener query.
///
/// Everything except [`Error::Request`] and [`Error::MalformedResponse`] is a
/// configuration error: it is returned synchronously at the call that misused
/// the builder, before any network activity.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A field from one catalog was used with a screener over another.
    #[error("Invalid field type: expected {expected} field, got {found} field `{field}`")]
    CatalogMismatch {
        field: String,
        expected: CatalogId,
        found: CatalogId,
    },
    /// `with_interval` on a field that has no per-interval variants.
    #[error("Field `{field}` does not support intervals")]
    IntervalUnsupported { field: &'static str },
    /// `with_history` on a field that has no historical variants.
    #[error("Field `{field}` does not support history indexes")]
    HistoryUnsupported { field: &'static str },
    #[error("History index for `{field}` must be non-negative, got {index}")]
    NegativeHistoryIndex { field: &'static str, index: i64 },
    #[error("History index for `{field}` is out of range, got {index}")]
    HistoryIndexOutOfRange { field: &'static str, index: i64 },
    #[error("Unknown interval `{0}`")]
    UnknownInterval(String),
    /// The value does not fit the operator's arity.
    #[error("Invalid argument for `{operation}`: {reason}")]
    InvalidArgument {
        operation: FilterOperator,
        reason: String,
    },
    /// The right-hand side of a condition was another field.
    #[error(
        "Field-to-field comparisons are not supported ({left} {operation} {right}). \
         You can only compare a field to a constant value."
    )]
    FieldComparison {
        left: String,
        operation: FilterOperator,
        right: String,
    },
    /// A filter dictionary was missing a key or named an unknown operator.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    /// The scan request failed: HTTP status >= 400, network failure, or timeout.
    #[error("Request to {url} failed{}: {message}", status_suffix(.status))]
    Request {
        status: Option<u16>,
        message: String,
        url: String,
        /// The request body, pretty-printed.
        payload: String,
    },
    /// The scan endpoint answered 2xx with a body that is not a scan response.
    #[error("Malformed response from {url}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(status) => format!(" with status {}", status),
        None => String::new(),
    }
}

impl Error {
    /// True for errors raised by the builder before any request was sent.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Error::Request { .. } | Error::MalformedResponse { .. }
        )
    }
}
