//! Single-value event metrics

use super::event_figures;
use crate::models::enums::text_enum;
use crate::render::{format_currency, format_percent};
use crate::Result;
use serde::Serialize;
use sqlx::SqlitePool;

text_enum! {
    Metric ("metric") {
        Revenue => "revenue",
        TicketsSold => "tickets-sold",
        AvailableTickets => "available-tickets",
        Occupancy => "occupancy",
        Sponsorship => "sponsorship",
        ArtistFees => "artist-fees",
        NetProfit => "net-profit",
        Attendees => "attendees",
        Artists => "artists",
    }
}

/// How a metric value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Money,
    Percent,
    Count,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::TicketsSold => "Tickets Sold",
            Metric::AvailableTickets => "Available Tickets",
            Metric::Occupancy => "Occupancy %",
            Metric::Sponsorship => "Sponsorship",
            Metric::ArtistFees => "Artist Fees",
            Metric::NetProfit => "Net Profit",
            Metric::Attendees => "Attendees",
            Metric::Artists => "Artists",
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Revenue | Metric::Sponsorship | Metric::ArtistFees | Metric::NetProfit => {
                MetricKind::Money
            }
            Metric::Occupancy => MetricKind::Percent,
            Metric::TicketsSold | Metric::AvailableTickets | Metric::Attendees | Metric::Artists => {
                MetricKind::Count
            }
        }
    }

    /// Display text: `₹1,234.56`, `12.50%` or a plain count
    pub fn format(&self, value: f64) -> String {
        match self.kind() {
            MetricKind::Money => format_currency(value),
            MetricKind::Percent => format_percent(value),
            MetricKind::Count => format!("{}", value as i64),
        }
    }
}

/// A computed metric together with the event it was computed for
#[derive(Debug, Clone, Serialize)]
pub struct MetricResult {
    pub metric: Metric,
    pub label: &'static str,
    pub kind: MetricKind,
    pub value: f64,
    pub formatted: String,
    pub event_id: i64,
    pub event_name: String,
    pub date: String,
    pub status: String,
}

impl MetricResult {
    pub fn to_text(&self) -> String {
        let rule = "=".repeat(60);
        format!(
            "{rule}\n{} - Event ID: {}\n{rule}\n\nResult: {}\n\nEvent Details:\n  Name: {}\n  Date: {}\n  Status: {}\n",
            self.label,
            self.event_id,
            self.formatted,
            self.event_name,
            self.date,
            self.status,
            rule = rule
        )
    }
}

/// Compute one metric; an unknown event is `NotFound`
pub async fn compute_metric(pool: &SqlitePool, event_id: i64, metric: Metric) -> Result<MetricResult> {
    let f = event_figures(pool, event_id).await?;

    let value = match metric {
        Metric::Revenue => f.ticket_revenue,
        Metric::TicketsSold => f.tickets_sold as f64,
        Metric::AvailableTickets => f.tickets_available() as f64,
        Metric::Occupancy => f.occupancy_percent(),
        Metric::Sponsorship => f.sponsorship,
        Metric::ArtistFees => f.artist_fees,
        Metric::NetProfit => f.net_profit(),
        Metric::Attendees => f.attendees as f64,
        Metric::Artists => f.artists as f64,
    };

    Ok(MetricResult {
        metric,
        label: metric.label(),
        kind: metric.kind(),
        value,
        formatted: metric.format(value),
        event_id,
        event_name: f.name,
        date: f.date,
        status: f.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::seed_scored_event;
    use crate::db::init_memory_database;
    use crate::Error;

    #[tokio::test]
    async fn test_every_metric() {
        let pool = init_memory_database().await.unwrap();
        let event = seed_scored_event(&pool).await;

        let expected = [
            (Metric::Revenue, "₹1,300.00"),
            (Metric::TicketsSold, "2"),
            (Metric::AvailableTickets, "1"),
            (Metric::Occupancy, "1.00%"),
            (Metric::Sponsorship, "₹6,000.00"),
            (Metric::ArtistFees, "₹4,000.00"),
            (Metric::NetProfit, "₹800.00"),
            (Metric::Attendees, "2"),
            (Metric::Artists, "1"),
        ];
        assert_eq!(expected.len(), Metric::ALL.len());

        for (metric, formatted) in expected {
            let result = compute_metric(&pool, event, metric).await.unwrap();
            assert_eq!(result.formatted, formatted, "{}", metric);
            assert_eq!(result.event_name, "Monsoon Jam");
        }
    }

    #[tokio::test]
    async fn test_metric_text() {
        let pool = init_memory_database().await.unwrap();
        let event = seed_scored_event(&pool).await;

        let text = compute_metric(&pool, event, Metric::NetProfit)
            .await
            .unwrap()
            .to_text();
        assert!(text.contains("Net Profit - Event ID: "));
        assert!(text.contains("Result: ₹800.00"));
        assert!(text.contains("  Status: Planned"));
    }

    #[tokio::test]
    async fn test_metric_for_unknown_event() {
        let pool = init_memory_database().await.unwrap();
        assert!(matches!(
            compute_metric(&pool, 12, Metric::Revenue).await,
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_metric_slug() {
        assert_eq!("net-profit".parse::<Metric>().unwrap(), Metric::NetProfit);
        assert_eq!(Metric::Occupancy.kind(), MetricKind::Percent);
    }
}
