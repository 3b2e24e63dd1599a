//! Event assignments: performing artists, sponsors and working staff
//!
//! Each assignment table is keyed by (entity, event), so assigning the same
//! artist, sponsor or staff member twice is a conflict. Unknown ids on either
//! side surface as invalid input through the foreign keys.

use super::{ensure_event_exists, parse_text};
use crate::error::WriteOp;
use crate::models::{
    ArtistAssignment, EventArtist, EventSponsor, EventStaff, SponsorAssignment, StaffAssignment,
    Validate,
};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

// ============================================================================
// Artists
// ============================================================================

pub async fn assign_artist(
    pool: &SqlitePool,
    event_id: i64,
    assignment: ArtistAssignment,
) -> Result<()> {
    let assignment = assignment.validated()?;

    sqlx::query("INSERT INTO performs (artist_id, event_id, no_of_songs) VALUES (?, ?, ?)")
        .bind(assignment.artist_id)
        .bind(event_id)
        .bind(assignment.no_of_songs)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Insert, "Artist assignment"))?;

    info!(
        "Assigned artist {} to event {} ({} songs)",
        assignment.artist_id, event_id, assignment.no_of_songs
    );
    Ok(())
}

pub async fn remove_artist(pool: &SqlitePool, event_id: i64, artist_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM performs WHERE event_id = ? AND artist_id = ?")
        .bind(event_id)
        .bind(artist_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "Artist {} is not assigned to event {}",
            artist_id, event_id
        )));
    }
    info!("Removed artist {} from event {}", artist_id, event_id);
    Ok(())
}

/// Artists performing at an event, by name
pub async fn event_artists(pool: &SqlitePool, event_id: i64) -> Result<Vec<EventArtist>> {
    ensure_event_exists(pool, event_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT a.artist_id, a.name, a.genre, p.no_of_songs, a.fee
        FROM performs p
        JOIN artist a ON a.artist_id = p.artist_id
        WHERE p.event_id = ?
        ORDER BY a.name, a.artist_id
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<EventArtist> {
            Ok(EventArtist {
                artist_id: row.try_get("artist_id")?,
                name: row.try_get("name")?,
                genre: row.try_get("genre")?,
                no_of_songs: row.try_get("no_of_songs")?,
                fee: row.try_get("fee")?,
            })
        })
        .collect()
}

// ============================================================================
// Sponsors
// ============================================================================

pub async fn assign_sponsor(
    pool: &SqlitePool,
    event_id: i64,
    assignment: SponsorAssignment,
) -> Result<()> {
    let assignment = assignment.validated()?;

    sqlx::query("INSERT INTO sponsors_event (sponsor_id, event_id, amount) VALUES (?, ?, ?)")
        .bind(assignment.sponsor_id)
        .bind(event_id)
        .bind(assignment.amount)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Insert, "Sponsor assignment"))?;

    info!(
        "Assigned sponsor {} to event {} (amount {:.2})",
        assignment.sponsor_id, event_id, assignment.amount
    );
    Ok(())
}

pub async fn remove_sponsor(pool: &SqlitePool, event_id: i64, sponsor_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM sponsors_event WHERE event_id = ? AND sponsor_id = ?")
        .bind(event_id)
        .bind(sponsor_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "Sponsor {} is not assigned to event {}",
            sponsor_id, event_id
        )));
    }
    info!("Removed sponsor {} from event {}", sponsor_id, event_id);
    Ok(())
}

/// Sponsors of an event, largest contribution first
pub async fn event_sponsors(pool: &SqlitePool, event_id: i64) -> Result<Vec<EventSponsor>> {
    ensure_event_exists(pool, event_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.sponsor_id, s.name, s.industry, se.amount
        FROM sponsors_event se
        JOIN sponsor s ON s.sponsor_id = se.sponsor_id
        WHERE se.event_id = ?
        ORDER BY se.amount DESC, s.name
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<EventSponsor> {
            Ok(EventSponsor {
                sponsor_id: row.try_get("sponsor_id")?,
                name: row.try_get("name")?,
                industry: row.try_get("industry")?,
                amount: row.try_get("amount")?,
            })
        })
        .collect()
}

// ============================================================================
// Staff
// ============================================================================

pub async fn assign_staff(
    pool: &SqlitePool,
    event_id: i64,
    assignment: StaffAssignment,
) -> Result<()> {
    sqlx::query("INSERT INTO works_at (staff_id, event_id, shift) VALUES (?, ?, ?)")
        .bind(assignment.staff_id)
        .bind(event_id)
        .bind(assignment.shift.as_str())
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Insert, "Staff assignment"))?;

    info!(
        "Assigned staff {} to event {} ({})",
        assignment.staff_id, event_id, assignment.shift
    );
    Ok(())
}

pub async fn remove_staff(pool: &SqlitePool, event_id: i64, staff_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM works_at WHERE event_id = ? AND staff_id = ?")
        .bind(event_id)
        .bind(staff_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "Staff member {} is not assigned to event {}",
            staff_id, event_id
        )));
    }
    info!("Removed staff {} from event {}", staff_id, event_id);
    Ok(())
}

fn event_staff_from_row(row: &SqliteRow) -> Result<EventStaff> {
    Ok(EventStaff {
        staff_id: row.try_get("staff_id")?,
        name: row.try_get("name")?,
        role: parse_text(row, "role")?,
        shift: parse_text(row, "shift")?,
        salary: row.try_get("salary")?,
    })
}

/// Staff working an event, by role then name
pub async fn event_staff(pool: &SqlitePool, event_id: i64) -> Result<Vec<EventStaff>> {
    ensure_event_exists(pool, event_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.staff_id, s.name, s.role, w.shift, s.salary
        FROM works_at w
        JOIN staff s ON s.staff_id = w.staff_id
        WHERE w.event_id = ?
        ORDER BY s.role, s.name
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(event_staff_from_row).collect()
}
