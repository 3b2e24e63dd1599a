//! Admin dashboard summary

use super::events::upcoming_events;
use crate::models::UpcomingEvent;
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Upcoming events shown on the dashboard
pub const DASHBOARD_UPCOMING_LIMIT: i64 = 20;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_events: i64,
    pub planned_events: i64,
    pub venues: i64,
    pub artists: i64,
    pub sponsors: i64,
    pub staff: i64,
    pub upcoming: Vec<UpcomingEvent>,
}

pub async fn dashboard_summary(pool: &SqlitePool, today: NaiveDate) -> Result<DashboardSummary> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM events) AS total_events,
            (SELECT COUNT(*) FROM events WHERE status = 'Planned') AS planned_events,
            (SELECT COUNT(*) FROM venue) AS venues,
            (SELECT COUNT(*) FROM artist) AS artists,
            (SELECT COUNT(*) FROM sponsor) AS sponsors,
            (SELECT COUNT(*) FROM staff) AS staff
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(DashboardSummary {
        total_events: row.try_get("total_events")?,
        planned_events: row.try_get("planned_events")?,
        venues: row.try_get("venues")?,
        artists: row.try_get("artists")?,
        sponsors: row.try_get("sponsors")?,
        staff: row.try_get("staff")?,
        upcoming: upcoming_events(pool, today, DASHBOARD_UPCOMING_LIMIT).await?,
    })
}
