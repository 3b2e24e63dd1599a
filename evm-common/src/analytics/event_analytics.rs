//! Per-event analytics: full statistics, financial summary, revenue by type

use super::{event_figures, EventFigures};
use crate::models::enums::text_enum;
use crate::render::{format_currency, format_percent, KeyValueReport};
use crate::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

text_enum! {
    /// Analytics available for a single event
    AnalyticsKind ("analytics kind") {
        Statistics => "statistics",
        FinancialSummary => "financial-summary",
        Revenue => "revenue",
    }
}

impl AnalyticsKind {
    pub fn title(&self) -> &'static str {
        match self {
            AnalyticsKind::Statistics => "Event Statistics",
            AnalyticsKind::FinancialSummary => "Event Financial Summary",
            AnalyticsKind::Revenue => "Event Revenue",
        }
    }
}

fn entry(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

// ============================================================================
// Statistics
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EventStatistics {
    pub event_id: i64,
    pub event_name: String,
    pub date: String,
    pub status: String,
    pub venue_name: String,
    pub capacity: i64,
    pub total_tickets: i64,
    pub tickets_sold: i64,
    pub tickets_available: i64,
    pub occupancy_percent: f64,
    pub attendees: i64,
    pub artists: i64,
    pub sponsors: i64,
    pub staff: i64,
}

impl From<&EventFigures> for EventStatistics {
    fn from(f: &EventFigures) -> Self {
        Self {
            event_id: f.event_id,
            event_name: f.name.clone(),
            date: f.date.clone(),
            status: f.status.clone(),
            venue_name: f.venue_name.clone(),
            capacity: f.capacity,
            total_tickets: f.total_tickets,
            tickets_sold: f.tickets_sold,
            tickets_available: f.tickets_available(),
            occupancy_percent: f.occupancy_percent(),
            attendees: f.attendees,
            artists: f.artists,
            sponsors: f.sponsors,
            staff: f.staff,
        }
    }
}

impl EventStatistics {
    pub fn to_report(&self) -> KeyValueReport {
        KeyValueReport::new(format!(
            "{} - Event ID: {}",
            AnalyticsKind::Statistics.title(),
            self.event_id
        ))
        .section(vec![
            entry("event_name", &self.event_name),
            entry("date", &self.date),
            entry("status", &self.status),
            entry("venue_name", &self.venue_name),
            entry("capacity", self.capacity),
            entry("total_tickets", self.total_tickets),
            entry("tickets_sold", self.tickets_sold),
            entry("tickets_available", self.tickets_available),
            entry("occupancy_percent", format_percent(self.occupancy_percent)),
            entry("attendees", self.attendees),
            entry("artists", self.artists),
            entry("sponsors", self.sponsors),
            entry("staff", self.staff),
        ])
    }
}

pub async fn event_statistics(pool: &SqlitePool, event_id: i64) -> Result<EventStatistics> {
    let figures = event_figures(pool, event_id).await?;
    Ok(EventStatistics::from(&figures))
}

// ============================================================================
// Financial summary
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub event_id: i64,
    pub event_name: String,
    pub budget: f64,
    pub venue_cost: f64,
    pub artist_fees: f64,
    pub staff_salaries: f64,
    pub total_costs: f64,
    pub sponsorship: f64,
    pub ticket_revenue: f64,
    pub total_income: f64,
    pub net_profit: f64,
    pub budget_remaining: f64,
}

impl From<&EventFigures> for FinancialSummary {
    fn from(f: &EventFigures) -> Self {
        Self {
            event_id: f.event_id,
            event_name: f.name.clone(),
            budget: f.budget,
            venue_cost: f.venue_cost,
            artist_fees: f.artist_fees,
            staff_salaries: f.staff_salaries,
            total_costs: f.total_costs(),
            sponsorship: f.sponsorship,
            ticket_revenue: f.ticket_revenue,
            total_income: f.total_income(),
            net_profit: f.net_profit(),
            budget_remaining: f.budget - f.total_costs(),
        }
    }
}

impl FinancialSummary {
    pub fn to_report(&self) -> KeyValueReport {
        KeyValueReport::new(format!(
            "{} - Event ID: {}",
            AnalyticsKind::FinancialSummary.title(),
            self.event_id
        ))
        .section(vec![
            entry("event_name", &self.event_name),
            entry("budget", format_currency(self.budget)),
            entry("venue_cost", format_currency(self.venue_cost)),
            entry("artist_fees", format_currency(self.artist_fees)),
            entry("staff_salaries", format_currency(self.staff_salaries)),
            entry("total_costs", format_currency(self.total_costs)),
            entry("sponsorship", format_currency(self.sponsorship)),
            entry("ticket_revenue", format_currency(self.ticket_revenue)),
            entry("total_income", format_currency(self.total_income)),
            entry("net_profit", format_currency(self.net_profit)),
            entry("budget_remaining", format_currency(self.budget_remaining)),
        ])
    }
}

pub async fn event_financial_summary(
    pool: &SqlitePool,
    event_id: i64,
) -> Result<FinancialSummary> {
    let figures = event_figures(pool, event_id).await?;
    Ok(FinancialSummary::from(&figures))
}

// ============================================================================
// Revenue by ticket type
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TicketTypeRevenue {
    pub ticket_type: String,
    pub tickets_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueBreakdown {
    pub event_id: i64,
    pub event_name: String,
    pub by_type: Vec<TicketTypeRevenue>,
    pub total_tickets_sold: i64,
    pub total_revenue: f64,
}

impl RevenueBreakdown {
    pub fn to_report(&self) -> KeyValueReport {
        let mut report = KeyValueReport::new(format!(
            "{} - Event ID: {}",
            AnalyticsKind::Revenue.title(),
            self.event_id
        ));
        for t in &self.by_type {
            report = report.section(vec![
                entry("ticket_type", &t.ticket_type),
                entry("tickets_sold", t.tickets_sold),
                entry("revenue", format_currency(t.revenue)),
            ]);
        }
        report.section(vec![
            entry("event_name", &self.event_name),
            entry("total_tickets_sold", self.total_tickets_sold),
            entry("total_revenue", format_currency(self.total_revenue)),
        ])
    }
}

/// Sold tickets and revenue per ticket type, highest revenue first
pub async fn event_revenue(pool: &SqlitePool, event_id: i64) -> Result<RevenueBreakdown> {
    let figures = event_figures(pool, event_id).await?;

    let by_type = sqlx::query(
        r#"
        SELECT ticket_type,
               COUNT(*) AS tickets_sold,
               CAST(SUM(price) AS REAL) AS revenue
        FROM ticket
        WHERE event_id = ? AND status = 'SOLD'
        GROUP BY ticket_type
        ORDER BY revenue DESC, ticket_type
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| -> Result<TicketTypeRevenue> {
        Ok(TicketTypeRevenue {
            ticket_type: row.try_get("ticket_type")?,
            tickets_sold: row.try_get("tickets_sold")?,
            revenue: row.try_get("revenue")?,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    Ok(RevenueBreakdown {
        event_id,
        event_name: figures.name,
        by_type,
        total_tickets_sold: figures.tickets_sold,
        total_revenue: figures.ticket_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::seed_scored_event;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_statistics() {
        let pool = init_memory_database().await.unwrap();
        let event = seed_scored_event(&pool).await;

        let stats = event_statistics(&pool, event).await.unwrap();
        assert_eq!(stats.venue_name, "Riverside Hall");
        assert_eq!(stats.tickets_available, 1);
        assert_eq!(stats.sponsors, 1);
        assert_eq!(stats.staff, 1);

        let text = stats.to_report().to_text();
        assert!(text.contains("EVENT STATISTICS - EVENT ID: "));
        assert!(text.contains("1.00%"));
    }

    #[tokio::test]
    async fn test_financial_summary() {
        let pool = init_memory_database().await.unwrap();
        let event = seed_scored_event(&pool).await;

        let summary = event_financial_summary(&pool, event).await.unwrap();
        assert_eq!(summary.total_costs, 6500.0);
        assert_eq!(summary.total_income, 7300.0);
        assert_eq!(summary.net_profit, 800.0);
        assert_eq!(summary.budget_remaining, 3500.0);
        assert!(summary.to_report().to_text().contains("₹10,000.00"));
    }

    #[tokio::test]
    async fn test_revenue_by_type() {
        let pool = init_memory_database().await.unwrap();
        let event = seed_scored_event(&pool).await;

        let revenue = event_revenue(&pool, event).await.unwrap();
        let types: Vec<_> = revenue.by_type.iter().map(|t| t.ticket_type.as_str()).collect();
        assert_eq!(types, vec!["VIP", "General"]);
        assert_eq!(revenue.total_revenue, 1300.0);
        assert_eq!(revenue.total_tickets_sold, 2);
    }

    #[test]
    fn test_kind_slugs() {
        assert_eq!(
            "financial-summary".parse::<AnalyticsKind>().unwrap(),
            AnalyticsKind::FinancialSummary
        );
        assert!("profit".parse::<AnalyticsKind>().is_err());
    }
}
