//! Database module - SQLite with sqlx
//!
//! Repository functions take a `&mut SqliteConnection` so handlers can run
//! them on a pooled connection or inside a transaction.

mod envs;
mod labels;
mod pool;
mod projects;

pub use envs::*;
pub use labels::*;
pub use pool::*;
pub use projects::*;

use chrono::{DateTime, Utc};

pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}
