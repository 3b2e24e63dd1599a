//! Ticket inventory and purchases
//!
//! Seats are issued in batches per event. A purchase is a row in `purchases`;
//! the schema triggers flip the ticket to SOLD on insert and back to
//! AVAILABLE when the purchase is removed.

use super::{ensure_event_exists, parse_text};
use crate::error::WriteOp;
use crate::models::{EventStatus, PurchasedTicket, Ticket, TicketBatch, TicketStatus, Validate};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

/// Used when a ticket type has no letters or digits to derive a prefix from
const FALLBACK_SEAT_PREFIX: &str = "T";

fn ticket_from_row(row: &SqliteRow) -> Result<Ticket> {
    Ok(Ticket {
        ticket_id: row.try_get("ticket_id")?,
        event_id: row.try_get("event_id")?,
        ticket_type: row.try_get("ticket_type")?,
        seat_no: row.try_get("seat_no")?,
        price: row.try_get("price")?,
        status: parse_text(row, "status")?,
    })
}

/// Highest seat number already issued under `prefix` for the event
fn last_seat_number(existing: &[String], prefix: &str) -> i64 {
    existing
        .iter()
        .filter_map(|seat| seat.strip_prefix(prefix)?.strip_prefix('-'))
        .filter_map(|n| n.parse::<i64>().ok())
        .max()
        .unwrap_or(0)
}

/// Issue a batch of seats for an event, returning the created tickets
///
/// Seats are named `{prefix}-{nnn}` and continue after the highest number
/// already issued for that prefix, so repeated batches never collide.
pub async fn create_tickets(
    pool: &SqlitePool,
    event_id: i64,
    batch: TicketBatch,
) -> Result<Vec<Ticket>> {
    let batch = batch.validated()?;
    ensure_event_exists(pool, event_id).await?;

    let mut prefix = batch.prefix();
    if prefix.is_empty() {
        prefix = FALLBACK_SEAT_PREFIX.to_string();
    }

    // Take the write lock up front so concurrent batches number from the same view
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    // LIKE folds ASCII case, so match the prefix exactly
    let seat_stem = format!("{}-", prefix);
    let existing: Vec<String> = sqlx::query_scalar(
        "SELECT seat_no FROM ticket WHERE event_id = ? AND substr(seat_no, 1, ?) = ?",
    )
    .bind(event_id)
    .bind(seat_stem.chars().count() as i64)
    .bind(&seat_stem)
    .fetch_all(&mut *tx)
    .await?;
    let start = last_seat_number(&existing, &prefix) + 1;

    let mut ids = Vec::with_capacity(batch.count as usize);
    for n in start..start + batch.count {
        let seat_no = format!("{}-{:03}", prefix, n);
        let result = sqlx::query(
            "INSERT INTO ticket (event_id, ticket_type, seat_no, price) VALUES (?, ?, ?, ?)",
        )
        .bind(event_id)
        .bind(&batch.ticket_type)
        .bind(&seat_no)
        .bind(batch.price)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Insert, &format!("Seat {}", seat_no)))?;
        ids.push(result.last_insert_rowid());
    }

    tx.commit().await?;

    info!(
        "Created {} '{}' tickets for event {} ({}-{:03} onwards)",
        ids.len(),
        batch.ticket_type,
        event_id,
        prefix,
        start
    );

    let first = ids.first().copied().unwrap_or_default();
    let last = ids.last().copied().unwrap_or_default();
    let rows = sqlx::query(
        r#"
        SELECT ticket_id, event_id, ticket_type, seat_no, price, status
        FROM ticket
        WHERE ticket_id BETWEEN ? AND ?
        ORDER BY ticket_id
        "#,
    )
    .bind(first)
    .bind(last)
    .fetch_all(pool)
    .await?;

    rows.iter().map(ticket_from_row).collect()
}

/// All tickets of an event, by type then seat
pub async fn list_tickets(pool: &SqlitePool, event_id: i64) -> Result<Vec<Ticket>> {
    ensure_event_exists(pool, event_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT ticket_id, event_id, ticket_type, seat_no, price, status
        FROM ticket
        WHERE event_id = ?
        ORDER BY ticket_type, seat_no
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(ticket_from_row).collect()
}

/// Unsold tickets of an event, by type then seat
pub async fn available_tickets(pool: &SqlitePool, event_id: i64) -> Result<Vec<Ticket>> {
    ensure_event_exists(pool, event_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT ticket_id, event_id, ticket_type, seat_no, price, status
        FROM ticket
        WHERE event_id = ? AND status = ?
        ORDER BY ticket_type, seat_no
        "#,
    )
    .bind(event_id)
    .bind(TicketStatus::Available.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(ticket_from_row).collect()
}

/// Remove an unsold ticket; sold tickets stay with their purchaser
pub async fn delete_ticket(pool: &SqlitePool, ticket_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM ticket WHERE ticket_id = ? AND status = ?")
        .bind(ticket_id)
        .bind(TicketStatus::Available.as_str())
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Delete, "Ticket"))?;

    if result.rows_affected() == 0 {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT ticket_id FROM ticket WHERE ticket_id = ?")
                .bind(ticket_id)
                .fetch_optional(pool)
                .await?;
        return Err(match exists {
            Some(_) => Error::Conflict(format!("Ticket {} is already sold", ticket_id)),
            None => Error::NotFound(format!("Ticket {}", ticket_id)),
        });
    }

    info!("Deleted ticket {}", ticket_id);
    Ok(())
}

/// Book a ticket for an attendee
///
/// Runs in one transaction: the ticket and its event are checked, the
/// purchase is recorded (the trigger marks the ticket SOLD) and attendance is
/// recorded unless the attendee already holds a ticket for the event.
pub async fn purchase_ticket(
    pool: &SqlitePool,
    attendee_id: i64,
    ticket_id: i64,
) -> Result<PurchasedTicket> {
    // IMMEDIATE so the availability check and the insert see the same state
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let row = sqlx::query(
        r#"
        SELECT t.event_id, t.status, e.status AS event_status
        FROM ticket t
        JOIN events e ON e.event_id = t.event_id
        WHERE t.ticket_id = ?
        "#,
    )
    .bind(ticket_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Ticket {}", ticket_id)))?;

    let event_id: i64 = row.try_get("event_id")?;
    let status: TicketStatus = parse_text(&row, "status")?;
    let event_status: EventStatus = parse_text(&row, "event_status")?;

    if status != TicketStatus::Available {
        warn!(
            "Attendee {} tried to book sold ticket {}",
            attendee_id, ticket_id
        );
        return Err(Error::Conflict(format!(
            "Ticket {} is no longer available",
            ticket_id
        )));
    }
    if event_status != EventStatus::Planned {
        return Err(Error::Conflict(format!(
            "Event {} is {} and not open for booking",
            event_id, event_status
        )));
    }

    sqlx::query("INSERT INTO purchases (ticket_id, attendee_id) VALUES (?, ?)")
        .bind(ticket_id)
        .bind(attendee_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Insert, "Purchase"))?;

    sqlx::query("INSERT OR IGNORE INTO attends (attendee_id, event_id) VALUES (?, ?)")
        .bind(attendee_id)
        .bind(event_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Insert, "Attendance"))?;

    let purchased = sqlx::query(&format!("{} WHERE p.ticket_id = ?", SELECT_PURCHASED))
        .bind(ticket_id)
        .fetch_one(&mut *tx)
        .await?;
    let purchased = purchased_from_row(&purchased)?;

    tx.commit().await?;

    info!(
        "Attendee {} booked ticket {} ({}) for event {}",
        attendee_id, ticket_id, purchased.seat_no, event_id
    );
    Ok(purchased)
}

const SELECT_PURCHASED: &str = r#"
    SELECT p.ticket_id, t.event_id, e.name AS event_name, e.date,
           t.ticket_type, t.seat_no, t.price, p.purchased_at
    FROM purchases p
    JOIN ticket t ON t.ticket_id = p.ticket_id
    JOIN events e ON e.event_id = t.event_id
"#;

fn purchased_from_row(row: &SqliteRow) -> Result<PurchasedTicket> {
    Ok(PurchasedTicket {
        ticket_id: row.try_get("ticket_id")?,
        event_id: row.try_get("event_id")?,
        event_name: row.try_get("event_name")?,
        date: row.try_get("date")?,
        ticket_type: row.try_get("ticket_type")?,
        seat_no: row.try_get("seat_no")?,
        price: row.try_get("price")?,
        purchased_at: row.try_get("purchased_at")?,
    })
}

/// Tickets bought by an attendee, most recent event first
pub async fn tickets_for_attendee(
    pool: &SqlitePool,
    attendee_id: i64,
) -> Result<Vec<PurchasedTicket>> {
    let rows = sqlx::query(&format!(
        "{} WHERE p.attendee_id = ? ORDER BY e.date DESC, t.seat_no",
        SELECT_PURCHASED
    ))
    .bind(attendee_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(purchased_from_row).collect()
}
