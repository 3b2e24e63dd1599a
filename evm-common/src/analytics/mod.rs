//! Reports and per-event analytics
//!
//! - [`reports`]: whole-database reports, no parameters
//! - [`event_analytics`]: statistics, financial summary and revenue for one event
//! - [`metrics`]: single-value figures for one event

pub mod event_analytics;
pub mod metrics;
pub mod reports;

pub use event_analytics::{
    event_financial_summary, event_revenue, event_statistics, AnalyticsKind, EventStatistics,
    FinancialSummary, RevenueBreakdown, TicketTypeRevenue,
};
pub use metrics::{compute_metric, Metric, MetricKind, MetricResult};
pub use reports::{run_report, ReportKind};

use crate::{Error, Result};
use sqlx::SqlitePool;

/// Figures shared by the statistics, financial summary and metrics
///
/// "Sold" means the ticket status is SOLD, which the purchase triggers keep
/// in step with `purchases`.
#[derive(Debug, Clone)]
pub(crate) struct EventFigures {
    pub event_id: i64,
    pub name: String,
    pub date: String,
    pub status: String,
    pub budget: f64,
    pub venue_name: String,
    pub capacity: i64,
    pub venue_cost: f64,
    pub total_tickets: i64,
    pub tickets_sold: i64,
    pub ticket_revenue: f64,
    pub sponsorship: f64,
    pub sponsors: i64,
    pub artist_fees: f64,
    pub artists: i64,
    pub staff_salaries: f64,
    pub staff: i64,
    pub attendees: i64,
}

impl EventFigures {
    pub fn tickets_available(&self) -> i64 {
        self.total_tickets - self.tickets_sold
    }

    /// Sold seats as a percentage of venue capacity; 0 for a zero capacity
    pub fn occupancy_percent(&self) -> f64 {
        if self.capacity <= 0 {
            0.0
        } else {
            self.tickets_sold as f64 * 100.0 / self.capacity as f64
        }
    }

    /// Venue plus artist fees; staff salaries are reported but not counted
    pub fn total_costs(&self) -> f64 {
        self.venue_cost + self.artist_fees
    }

    pub fn total_income(&self) -> f64 {
        self.ticket_revenue + self.sponsorship
    }

    pub fn net_profit(&self) -> f64 {
        self.total_income() - self.total_costs()
    }
}

pub(crate) async fn event_figures(pool: &SqlitePool, event_id: i64) -> Result<EventFigures> {
    let row = sqlx::query_as::<_, (
        i64,
        String,
        String,
        String,
        f64,
        String,
        i64,
        f64,
        i64,
        i64,
        f64,
    )>(
        r#"
        SELECT e.event_id, e.name, e.date, e.status, e.budget,
               v.name, v.capacity, v.cost,
               (SELECT COUNT(*) FROM ticket t WHERE t.event_id = e.event_id),
               (SELECT COUNT(*) FROM ticket t WHERE t.event_id = e.event_id AND t.status = 'SOLD'),
               (SELECT CAST(COALESCE(SUM(t.price), 0) AS REAL)
                  FROM ticket t WHERE t.event_id = e.event_id AND t.status = 'SOLD')
        FROM events e
        JOIN venue v ON v.venue_id = e.venue_id
        WHERE e.event_id = ?
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Event {}", event_id)))?;

    let (sponsors, sponsorship): (i64, f64) = sqlx::query_as(
        "SELECT COUNT(*), CAST(COALESCE(SUM(amount), 0) AS REAL) FROM sponsors_event WHERE event_id = ?",
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;

    let (artists, artist_fees): (i64, f64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), CAST(COALESCE(SUM(a.fee), 0) AS REAL)
        FROM performs p
        JOIN artist a ON a.artist_id = p.artist_id
        WHERE p.event_id = ?
        "#,
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;

    let (staff, staff_salaries): (i64, f64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), CAST(COALESCE(SUM(s.salary), 0) AS REAL)
        FROM works_at w
        JOIN staff s ON s.staff_id = w.staff_id
        WHERE w.event_id = ?
        "#,
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;

    let attendees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attends WHERE event_id = ?")
        .bind(event_id)
        .fetch_one(pool)
        .await?;

    Ok(EventFigures {
        event_id: row.0,
        name: row.1,
        date: row.2,
        status: row.3,
        budget: row.4,
        venue_name: row.5,
        capacity: row.6,
        venue_cost: row.7,
        total_tickets: row.8,
        tickets_sold: row.9,
        ticket_revenue: row.10,
        sponsorship,
        sponsors,
        artist_fees,
        artists,
        staff_salaries,
        staff,
        attendees,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_event_figures() {
        let pool = init_memory_database().await.unwrap();
        let event = fixtures::seed_scored_event(&pool).await;

        let figures = event_figures(&pool, event).await.unwrap();
        assert_eq!(figures.total_tickets, 3);
        assert_eq!(figures.tickets_sold, 2);
        assert_eq!(figures.tickets_available(), 1);
        assert_eq!(figures.ticket_revenue, 1300.0);
        assert_eq!(figures.sponsorship, 6000.0);
        assert_eq!(figures.artist_fees, 4000.0);
        assert_eq!(figures.staff_salaries, 1500.0);
        assert_eq!(figures.attendees, 2);
        assert_eq!(figures.occupancy_percent(), 1.0);
        // 1300 + 6000 - 4000 - 2500
        assert_eq!(figures.net_profit(), 800.0);
    }

    #[tokio::test]
    async fn test_unknown_event() {
        let pool = init_memory_database().await.unwrap();
        assert!(matches!(
            event_figures(&pool, 1).await,
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_zero_capacity_occupancy() {
        let figures = EventFigures {
            event_id: 1,
            name: String::new(),
            date: String::new(),
            status: String::new(),
            budget: 1.0,
            venue_name: String::new(),
            capacity: 0,
            venue_cost: 0.0,
            total_tickets: 0,
            tickets_sold: 3,
            ticket_revenue: 0.0,
            sponsorship: 0.0,
            sponsors: 0,
            artist_fees: 0.0,
            artists: 0,
            staff_salaries: 0.0,
            staff: 0,
            attendees: 0,
        };
        assert_eq!(figures.occupancy_percent(), 0.0);
    }
}
