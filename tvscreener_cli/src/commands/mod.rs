//! CLI subcommand implementations.

pub mod fields;
pub mod scan;
pub mod search;
pub mod stream;
