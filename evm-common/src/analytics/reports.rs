//! Whole-database reports
//!
//! Each report is a fixed query whose rows are converted generically into
//! JSON cells, so the column list travels with the result.

use crate::models::enums::text_enum;
use crate::render::{format_currency, ReportTable};
use crate::Result;
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

text_enum! {
    ReportKind ("report") {
        EventsVenueTickets => "events-venue-tickets",
        TopAttendedEvents => "top-attended-events",
        SponsorContributions => "sponsor-contributions",
        ArtistPerformances => "artist-performances",
        AttendeeDemographics => "attendee-demographics",
        RevenuePerVenue => "revenue-per-venue",
    }
}

/// Entry in the report catalogue
#[derive(Debug, Clone, Serialize)]
pub struct ReportInfo {
    pub slug: ReportKind,
    pub title: &'static str,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::EventsVenueTickets => "Events with Venue & Tickets",
            ReportKind::TopAttendedEvents => "Top 3 Attended Events",
            ReportKind::SponsorContributions => "Sponsor Contributions",
            ReportKind::ArtistPerformances => "Artist Performances",
            ReportKind::AttendeeDemographics => "Attendee Demographics",
            ReportKind::RevenuePerVenue => "Revenue Per Venue",
        }
    }

    pub fn catalogue() -> Vec<ReportInfo> {
        ReportKind::ALL
            .iter()
            .map(|kind| ReportInfo {
                slug: *kind,
                title: kind.title(),
            })
            .collect()
    }

    fn query(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ReportKind::EventsVenueTickets => (
                r#"
                SELECT e.event_id, e.name AS event_name, e.date, e.status,
                       v.name AS venue_name, v.capacity,
                       COUNT(t.ticket_id) AS total_tickets,
                       COALESCE(SUM(CASE WHEN t.status = 'SOLD' THEN 1 ELSE 0 END), 0) AS sold_tickets,
                       COALESCE(SUM(CASE WHEN t.status = 'AVAILABLE' THEN 1 ELSE 0 END), 0) AS available_tickets
                FROM events e
                JOIN venue v ON v.venue_id = e.venue_id
                LEFT JOIN ticket t ON t.event_id = e.event_id
                GROUP BY e.event_id
                ORDER BY e.date, e.event_id
                "#,
                &[
                    "event_id",
                    "event_name",
                    "date",
                    "status",
                    "venue_name",
                    "capacity",
                    "total_tickets",
                    "sold_tickets",
                    "available_tickets",
                ],
            ),
            ReportKind::TopAttendedEvents => (
                r#"
                SELECT e.event_id, e.name AS event_name, e.date,
                       v.name AS venue_name, COUNT(a.attendee_id) AS attendees
                FROM events e
                JOIN venue v ON v.venue_id = e.venue_id
                LEFT JOIN attends a ON a.event_id = e.event_id
                GROUP BY e.event_id
                ORDER BY attendees DESC, e.event_id
                LIMIT 3
                "#,
                &["event_id", "event_name", "date", "venue_name", "attendees"],
            ),
            ReportKind::SponsorContributions => (
                r#"
                SELECT s.sponsor_id, s.name AS sponsor_name, s.industry,
                       COUNT(se.event_id) AS events_sponsored,
                       CAST(COALESCE(SUM(se.amount), 0) AS REAL) AS total_amount
                FROM sponsor s
                LEFT JOIN sponsors_event se ON se.sponsor_id = s.sponsor_id
                GROUP BY s.sponsor_id
                ORDER BY total_amount DESC, s.name
                "#,
                &[
                    "sponsor_id",
                    "sponsor_name",
                    "industry",
                    "events_sponsored",
                    "total_amount",
                ],
            ),
            ReportKind::ArtistPerformances => (
                r#"
                SELECT a.artist_id, a.name AS artist_name, a.genre,
                       COUNT(p.event_id) AS events_performed,
                       COALESCE(SUM(p.no_of_songs), 0) AS total_songs,
                       CAST(COUNT(p.event_id) * a.fee AS REAL) AS total_fees
                FROM artist a
                LEFT JOIN performs p ON p.artist_id = a.artist_id
                GROUP BY a.artist_id
                ORDER BY events_performed DESC, a.name
                "#,
                &[
                    "artist_id",
                    "artist_name",
                    "genre",
                    "events_performed",
                    "total_songs",
                    "total_fees",
                ],
            ),
            ReportKind::AttendeeDemographics => (
                r#"
                SELECT COALESCE(gender, 'Unknown') AS gender,
                       CASE
                           WHEN age IS NULL THEN 'Unknown'
                           WHEN age < 18 THEN 'Under 18'
                           WHEN age <= 25 THEN '18-25'
                           WHEN age <= 35 THEN '26-35'
                           WHEN age <= 50 THEN '36-50'
                           ELSE 'Over 50'
                       END AS age_group,
                       COUNT(*) AS attendees
                FROM attendee
                GROUP BY 1, 2
                ORDER BY 1, MIN(COALESCE(age, 1000))
                "#,
                &["gender", "age_group", "attendees"],
            ),
            ReportKind::RevenuePerVenue => (
                r#"
                SELECT v.venue_id, v.name AS venue_name, v.venue_type,
                       COUNT(DISTINCT e.event_id) AS events_hosted,
                       COUNT(t.ticket_id) AS tickets_sold,
                       CAST(COALESCE(SUM(t.price), 0) AS REAL) AS revenue
                FROM venue v
                LEFT JOIN events e ON e.venue_id = v.venue_id
                LEFT JOIN ticket t ON t.event_id = e.event_id AND t.status = 'SOLD'
                GROUP BY v.venue_id
                ORDER BY revenue DESC, v.name
                "#,
                &[
                    "venue_id",
                    "venue_name",
                    "venue_type",
                    "events_hosted",
                    "tickets_sold",
                    "revenue",
                ],
            ),
        }
    }
}

/// Convert a result row to JSON cells by the stored value's type
fn row_values(row: &SqliteRow) -> Result<Vec<Value>> {
    (0..row.len())
        .map(|i| -> Result<Value> {
            let raw = row.try_get_raw(i)?;
            if raw.is_null() {
                return Ok(Value::Null);
            }
            let value = match raw.type_info().name() {
                "INTEGER" => json!(row.try_get::<i64, _>(i)?),
                "REAL" => json!(row.try_get::<f64, _>(i)?),
                _ => Value::String(row.try_get::<String, _>(i)?),
            };
            Ok(value)
        })
        .collect()
}

fn sum_column(rows: &[Vec<Value>], index: usize) -> f64 {
    rows.iter()
        .filter_map(|row| row.get(index).and_then(Value::as_f64))
        .sum()
}

/// Run a report and return its table
pub async fn run_report(pool: &SqlitePool, kind: ReportKind) -> Result<ReportTable> {
    let (sql, columns) = kind.query();

    let rows = sqlx::query(sql)
        .fetch_all(pool)
        .await?
        .iter()
        .map(row_values)
        .collect::<Result<Vec<_>>>()?;

    debug!("Report {} returned {} rows", kind, rows.len());

    let mut table = ReportTable::new(kind.title(), columns);
    match kind {
        ReportKind::SponsorContributions => {
            table = table.with_note(format!("Total Sponsorship: {}", format_currency(sum_column(&rows, 4))));
        }
        ReportKind::RevenuePerVenue => {
            table = table.with_note(format!("Total Revenue: {}", format_currency(sum_column(&rows, 5))));
        }
        _ => {}
    }
    Ok(table.with_rows(rows))
}
