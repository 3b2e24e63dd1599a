//! Event database operations

use super::{expect_affected, parse_text};
use crate::error::WriteOp;
use crate::models::{
    Event, EventInput, EventListing, EventStatus, UpcomingEvent, Validate, VenueType,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

fn event_from_row(row: &SqliteRow) -> Result<Event> {
    Ok(Event {
        event_id: row.try_get("event_id")?,
        name: row.try_get("name")?,
        date: row.try_get("date")?,
        status: parse_text(row, "status")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        budget: row.try_get("budget")?,
        venue_id: row.try_get("venue_id")?,
    })
}

fn upcoming_from_row(row: &SqliteRow) -> Result<UpcomingEvent> {
    Ok(UpcomingEvent {
        event_id: row.try_get("event_id")?,
        name: row.try_get("name")?,
        date: row.try_get("date")?,
        start_time: row.try_get("start_time")?,
        venue_name: row.try_get("venue_name")?,
        status: parse_text(row, "status")?,
    })
}

/// Insert a new event, returning its id
pub async fn create_event(pool: &SqlitePool, input: EventInput) -> Result<i64> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        INSERT INTO events (name, date, status, start_time, end_time, budget, venue_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(input.date)
    .bind(input.status.as_str())
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(input.budget)
    .bind(input.venue_id)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Insert, "Event"))?;

    let event_id = result.last_insert_rowid();
    info!("Created event {} ({})", event_id, input.name);
    Ok(event_id)
}

/// Replace every field of an existing event
pub async fn update_event(pool: &SqlitePool, event_id: i64, input: EventInput) -> Result<()> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        UPDATE events
        SET name = ?, date = ?, status = ?, start_time = ?, end_time = ?, budget = ?, venue_id = ?
        WHERE event_id = ?
        "#,
    )
    .bind(&input.name)
    .bind(input.date)
    .bind(input.status.as_str())
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(input.budget)
    .bind(input.venue_id)
    .bind(event_id)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Update, "Event"))?;

    expect_affected(result, "Event", event_id)?;
    info!("Updated event {}", event_id);
    Ok(())
}

/// Delete an event together with its tickets, assignments and attendance
pub async fn delete_event(pool: &SqlitePool, event_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM events WHERE event_id = ?")
        .bind(event_id)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Delete, "Event"))?;

    expect_affected(result, "Event", event_id)?;
    info!("Deleted event {}", event_id);
    Ok(())
}

/// Load one event by id
pub async fn get_event(pool: &SqlitePool, event_id: i64) -> Result<Event> {
    let row = sqlx::query(
        r#"
        SELECT event_id, name, date, status, start_time, end_time, budget, venue_id
        FROM events
        WHERE event_id = ?
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => event_from_row(&row),
        None => Err(Error::NotFound(format!("Event {}", event_id))),
    }
}

/// All events with their venue name, newest date first
pub async fn list_events(pool: &SqlitePool) -> Result<Vec<EventListing>> {
    let rows = sqlx::query(
        r#"
        SELECT e.event_id, e.name, e.date, e.status, e.start_time, e.end_time, e.budget,
               v.name AS venue_name
        FROM events e
        JOIN venue v ON e.venue_id = v.venue_id
        ORDER BY e.date DESC, e.event_id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<EventListing> {
            Ok(EventListing {
                event_id: row.try_get("event_id")?,
                name: row.try_get("name")?,
                date: row.try_get("date")?,
                status: parse_text(row, "status")?,
                start_time: row.try_get("start_time")?,
                end_time: row.try_get("end_time")?,
                budget: row.try_get("budget")?,
                venue_name: row.try_get("venue_name")?,
            })
        })
        .collect()
}

/// Events dated `today` or later, soonest first, any status
pub async fn upcoming_events(
    pool: &SqlitePool,
    today: NaiveDate,
    limit: i64,
) -> Result<Vec<UpcomingEvent>> {
    let rows = sqlx::query(
        r#"
        SELECT e.event_id, e.name, e.date, e.start_time, v.name AS venue_name, e.status
        FROM events e
        JOIN venue v ON e.venue_id = v.venue_id
        WHERE e.date >= ?
        ORDER BY e.date, e.start_time, e.event_id
        LIMIT ?
        "#,
    )
    .bind(today)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(upcoming_from_row).collect()
}

/// Planned events dated `today` or later; what customers may browse and book
pub async fn bookable_events(pool: &SqlitePool, today: NaiveDate) -> Result<Vec<UpcomingEvent>> {
    let rows = sqlx::query(
        r#"
        SELECT e.event_id, e.name, e.date, e.start_time, v.name AS venue_name, e.status
        FROM events e
        JOIN venue v ON e.venue_id = v.venue_id
        WHERE e.status = ? AND e.date >= ?
        ORDER BY e.date, e.start_time, e.event_id
        "#,
    )
    .bind(EventStatus::Planned.as_str())
    .bind(today)
    .fetch_all(pool)
    .await?;

    rows.iter().map(upcoming_from_row).collect()
}

/// Customer-facing view of one event
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub venue_name: String,
    pub venue_type: VenueType,
    pub address: String,
    pub capacity: i64,
    pub artists: Vec<PerformingArtist>,
    pub tickets: Vec<TicketTypeSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformingArtist {
    pub name: String,
    pub genre: String,
    pub no_of_songs: i64,
}

/// Availability and price range for one ticket type
#[derive(Debug, Clone, Serialize)]
pub struct TicketTypeSummary {
    pub ticket_type: String,
    pub total: i64,
    pub available: i64,
    pub min_price: f64,
    pub max_price: f64,
}

/// Event with venue, line-up and ticket availability
pub async fn event_details(pool: &SqlitePool, event_id: i64) -> Result<EventDetails> {
    let row = sqlx::query(
        r#"
        SELECT e.event_id, e.name, e.date, e.status, e.start_time, e.end_time, e.budget,
               e.venue_id, v.name AS venue_name, v.venue_type, v.address, v.capacity
        FROM events e
        JOIN venue v ON e.venue_id = v.venue_id
        WHERE e.event_id = ?
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Event {}", event_id)))?;

    let event = event_from_row(&row)?;

    let artists = sqlx::query(
        r#"
        SELECT a.name, a.genre, p.no_of_songs
        FROM artist a
        JOIN performs p ON a.artist_id = p.artist_id
        WHERE p.event_id = ?
        ORDER BY a.name
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|r| -> Result<PerformingArtist> {
        Ok(PerformingArtist {
            name: r.try_get("name")?,
            genre: r.try_get("genre")?,
            no_of_songs: r.try_get("no_of_songs")?,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    let tickets = sqlx::query(
        r#"
        SELECT ticket_type,
               COUNT(*) AS total,
               SUM(CASE WHEN status = 'AVAILABLE' THEN 1 ELSE 0 END) AS available,
               CAST(MIN(price) AS REAL) AS min_price,
               CAST(MAX(price) AS REAL) AS max_price
        FROM ticket
        WHERE event_id = ?
        GROUP BY ticket_type
        ORDER BY ticket_type
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|r| -> Result<TicketTypeSummary> {
        Ok(TicketTypeSummary {
            ticket_type: r.try_get("ticket_type")?,
            total: r.try_get("total")?,
            available: r.try_get("available")?,
            min_price: r.try_get("min_price")?,
            max_price: r.try_get("max_price")?,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    Ok(EventDetails {
        event,
        venue_name: row.try_get("venue_name")?,
        venue_type: parse_text(&row, "venue_type")?,
        address: row.try_get("address")?,
        capacity: row.try_get("capacity")?,
        artists,
        tickets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;
    use crate::repo::testing::{seed_event, seed_venue};
    use chrono::NaiveTime;

    fn input(name: &str, date: &str, venue_id: i64) -> EventInput {
        EventInput {
            name: name.to_string(),
            date: date.parse().unwrap(),
            status: EventStatus::Planned,
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(22, 30, 0).unwrap(),
            budget: 12000.0,
            venue_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_event() {
        let pool = init_memory_database().await.unwrap();
        let venue_id = seed_venue(&pool, "Riverside Hall", 200).await;

        let id = create_event(&pool, input("Jazz Night", "2030-05-01", venue_id))
            .await
            .expect("create event");

        let event = get_event(&pool, id).await.expect("load event");
        assert_eq!(event.name, "Jazz Night");
        assert_eq!(event.date, "2030-05-01".parse::<NaiveDate>().unwrap());
        assert_eq!(event.end_time, NaiveTime::from_hms_opt(22, 30, 0).unwrap());
        assert_eq!(event.status, EventStatus::Planned);
    }

    #[tokio::test]
    async fn test_create_event_unknown_venue_is_invalid_input() {
        let pool = init_memory_database().await.unwrap();
        let err = create_event(&pool, input("Ghost", "2030-05-01", 999))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_update_missing_event_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let venue_id = seed_venue(&pool, "Riverside Hall", 200).await;
        let err = update_event(&pool, 42, input("Nope", "2030-05-01", venue_id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_events_newest_first() {
        let pool = init_memory_database().await.unwrap();
        let venue_id = seed_venue(&pool, "Riverside Hall", 200).await;
        create_event(&pool, input("Early", "2030-01-01", venue_id)).await.unwrap();
        create_event(&pool, input("Late", "2031-01-01", venue_id)).await.unwrap();

        let events = list_events(&pool).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Late");
        assert_eq!(events[0].venue_name, "Riverside Hall");
    }

    #[tokio::test]
    async fn test_bookable_events_filters_status_and_date() {
        let pool = init_memory_database().await.unwrap();
        let venue_id = seed_venue(&pool, "Riverside Hall", 200).await;
        seed_event(&pool, "Past", "2020-01-01", venue_id).await;
        seed_event(&pool, "Future", "2030-01-01", venue_id).await;
        let cancelled = seed_event(&pool, "Cancelled", "2030-02-01", venue_id).await;
        sqlx::query("UPDATE events SET status = 'Cancelled' WHERE event_id = ?")
            .bind(cancelled)
            .execute(&pool)
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let events = bookable_events(&pool, today).await.unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Future"]);

        let upcoming = upcoming_events(&pool, today, 20).await.unwrap();
        assert_eq!(upcoming.len(), 2);
    }

    #[tokio::test]
    async fn test_event_details_summarizes_tickets() {
        let pool = init_memory_database().await.unwrap();
        let venue_id = seed_venue(&pool, "Riverside Hall", 200).await;
        let event_id = seed_event(&pool, "Gala", "2030-01-01", venue_id).await;
        for (seat, price, status) in [("VIP-001", 100.0, "AVAILABLE"), ("VIP-002", 150.0, "SOLD")] {
            sqlx::query(
                "INSERT INTO ticket (event_id, ticket_type, seat_no, price, status) VALUES (?, 'VIP', ?, ?, ?)",
            )
            .bind(event_id)
            .bind(seat)
            .bind(price)
            .bind(status)
            .execute(&pool)
            .await
            .unwrap();
        }

        let details = event_details(&pool, event_id).await.unwrap();
        assert_eq!(details.venue_name, "Riverside Hall");
        assert_eq!(details.tickets.len(), 1);
        assert_eq!(details.tickets[0].total, 2);
        assert_eq!(details.tickets[0].available, 1);
        assert_eq!(details.tickets[0].min_price, 100.0);
        assert_eq!(details.tickets[0].max_price, 150.0);
    }

    #[tokio::test]
    async fn test_delete_event_cascades_tickets() {
        let pool = init_memory_database().await.unwrap();
        let venue_id = seed_venue(&pool, "Riverside Hall", 200).await;
        let event_id = seed_event(&pool, "Gala", "2030-01-01", venue_id).await;
        sqlx::query("INSERT INTO ticket (event_id, ticket_type, seat_no, price) VALUES (?, 'GA', 'GA-001', 10)")
            .bind(event_id)
            .execute(&pool)
            .await
            .unwrap();

        delete_event(&pool, event_id).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ticket")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
