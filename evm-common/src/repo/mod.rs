//! Data-access layer
//!
//! One module per table family. Every statement is parameterized; input
//! records are validated here so both services enforce the same rules.

pub mod artists;
pub mod assignments;
pub mod attendees;
pub mod dashboard;
pub mod events;
pub mod sponsors;
pub mod staff;
pub mod tickets;
pub mod venues;

#[cfg(test)]
pub(crate) mod testing;

use crate::{Error, Result};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// Decode a text column into one of the model enums
pub(crate) fn parse_text<T>(row: &SqliteRow, column: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    let text: String = row.try_get(column)?;
    text.parse::<T>()
        .map_err(|e| Error::Internal(format!("Bad value in column {}: {}", column, e)))
}

/// Decode a nullable text column into one of the model enums
pub(crate) fn parse_optional_text<T>(row: &SqliteRow, column: &str) -> Result<Option<T>>
where
    T: FromStr<Err = Error>,
{
    let text: Option<String> = row.try_get(column)?;
    text.map(|t| {
        t.parse::<T>()
            .map_err(|e| Error::Internal(format!("Bad value in column {}: {}", column, e)))
    })
    .transpose()
}

/// Map "no rows touched" to `NotFound`
pub(crate) fn expect_affected(result: SqliteQueryResult, what: &str, id: i64) -> Result<()> {
    if result.rows_affected() == 0 {
        Err(Error::NotFound(format!("{} {}", what, id)))
    } else {
        Ok(())
    }
}

/// Fail with `NotFound` unless the event exists
pub async fn ensure_event_exists(pool: &SqlitePool, event_id: i64) -> Result<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT event_id FROM events WHERE event_id = ?")
        .bind(event_id)
        .fetch_optional(pool)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(Error::NotFound(format!("Event {}", event_id))),
    }
}
