//! Venue database operations

use super::{expect_affected, parse_text};
use crate::error::WriteOp;
use crate::models::{Validate, Venue, VenueInput};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

const SELECT_VENUE: &str = r#"
    SELECT venue_id, name, venue_type, address, country, pincode, capacity, cost
    FROM venue
"#;

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    Ok(Venue {
        venue_id: row.try_get("venue_id")?,
        name: row.try_get("name")?,
        venue_type: parse_text(row, "venue_type")?,
        address: row.try_get("address")?,
        country: row.try_get("country")?,
        pincode: row.try_get("pincode")?,
        capacity: row.try_get("capacity")?,
        cost: row.try_get("cost")?,
    })
}

/// Insert a new venue, returning its id
pub async fn create_venue(pool: &SqlitePool, input: VenueInput) -> Result<i64> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        INSERT INTO venue (name, venue_type, address, country, pincode, capacity, cost)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(input.venue_type.as_str())
    .bind(&input.address)
    .bind(&input.country)
    .bind(&input.pincode)
    .bind(input.capacity)
    .bind(input.cost)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Insert, "Venue"))?;

    let venue_id = result.last_insert_rowid();
    info!("Created venue {} ({})", venue_id, input.name);
    Ok(venue_id)
}

pub async fn update_venue(pool: &SqlitePool, venue_id: i64, input: VenueInput) -> Result<()> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        UPDATE venue
        SET name = ?, venue_type = ?, address = ?, country = ?, pincode = ?, capacity = ?, cost = ?
        WHERE venue_id = ?
        "#,
    )
    .bind(&input.name)
    .bind(input.venue_type.as_str())
    .bind(&input.address)
    .bind(&input.country)
    .bind(&input.pincode)
    .bind(input.capacity)
    .bind(input.cost)
    .bind(venue_id)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Update, "Venue"))?;

    expect_affected(result, "Venue", venue_id)?;
    info!("Updated venue {}", venue_id);
    Ok(())
}

/// Delete a venue; refused while any event is still scheduled there
pub async fn delete_venue(pool: &SqlitePool, venue_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM venue WHERE venue_id = ?")
        .bind(venue_id)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Delete, "Venue"))?;

    expect_affected(result, "Venue", venue_id)?;
    info!("Deleted venue {}", venue_id);
    Ok(())
}

pub async fn get_venue(pool: &SqlitePool, venue_id: i64) -> Result<Venue> {
    let row = sqlx::query(&format!("{} WHERE venue_id = ?", SELECT_VENUE))
        .bind(venue_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => venue_from_row(&row),
        None => Err(Error::NotFound(format!("Venue {}", venue_id))),
    }
}

/// All venues ordered by name
pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!("{} ORDER BY name, venue_id", SELECT_VENUE))
        .fetch_all(pool)
        .await?;

    rows.iter().map(venue_from_row).collect()
}
