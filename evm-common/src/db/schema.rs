//! Schema definition
//!
//! All statements are idempotent (`IF NOT EXISTS`) so every service can call
//! [`create_schema`] on startup against a new or existing database.
//!
//! Referential behaviour:
//! - deleting an event removes its tickets, assignments and attendance
//! - a venue cannot be deleted while events still reference it
//! - purchases drive ticket status through triggers

use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Current schema version recorded in `schema_version`
pub const SCHEMA_VERSION: i64 = 1;

const TABLES: &[(&str, &str)] = &[
    (
        "schema_version",
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "venue",
        r#"
        CREATE TABLE IF NOT EXISTS venue (
            venue_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            venue_type TEXT NOT NULL
                CHECK (venue_type IN ('Indoor', 'Outdoor', 'Stadium', 'Hall', 'Theater')),
            address TEXT NOT NULL,
            country TEXT,
            pincode TEXT NOT NULL,
            capacity INTEGER NOT NULL CHECK (capacity > 0),
            cost REAL NOT NULL CHECK (cost >= 0)
        )
        "#,
    ),
    (
        "events",
        r#"
        CREATE TABLE IF NOT EXISTS events (
            event_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Planned'
                CHECK (status IN ('Planned', 'Completed', 'Cancelled')),
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            budget REAL NOT NULL CHECK (budget > 0),
            venue_id INTEGER NOT NULL REFERENCES venue(venue_id),
            CHECK (end_time > start_time)
        )
        "#,
    ),
    (
        "artist",
        r#"
        CREATE TABLE IF NOT EXISTS artist (
            artist_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            genre TEXT NOT NULL,
            country TEXT,
            phone_no TEXT NOT NULL,
            email TEXT NOT NULL,
            fee REAL NOT NULL CHECK (fee >= 0)
        )
        "#,
    ),
    (
        "sponsor",
        r#"
        CREATE TABLE IF NOT EXISTS sponsor (
            sponsor_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            industry TEXT,
            contact_person TEXT,
            phone_no TEXT,
            email TEXT
        )
        "#,
    ),
    (
        "staff",
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            staff_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            role TEXT NOT NULL
                CHECK (role IN ('Security', 'Technician', 'Manager', 'Volunteer', 'Cleaner', 'Coordinator')),
            phone_no TEXT,
            email TEXT,
            salary REAL CHECK (salary IS NULL OR salary >= 0)
        )
        "#,
    ),
    (
        "attendee",
        r#"
        CREATE TABLE IF NOT EXISTS attendee (
            attendee_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone_no TEXT NOT NULL,
            email TEXT NOT NULL,
            gender TEXT CHECK (gender IS NULL OR gender IN ('M', 'F', 'O')),
            age INTEGER CHECK (age IS NULL OR (age > 0 AND age <= 120)),
            registered_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "ticket",
        r#"
        CREATE TABLE IF NOT EXISTS ticket (
            ticket_id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
            ticket_type TEXT NOT NULL,
            seat_no TEXT NOT NULL,
            price REAL NOT NULL CHECK (price >= 0),
            status TEXT NOT NULL DEFAULT 'AVAILABLE'
                CHECK (status IN ('AVAILABLE', 'SOLD')),
            UNIQUE (event_id, seat_no)
        )
        "#,
    ),
    (
        "performs",
        r#"
        CREATE TABLE IF NOT EXISTS performs (
            artist_id INTEGER NOT NULL REFERENCES artist(artist_id) ON DELETE CASCADE,
            event_id INTEGER NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
            no_of_songs INTEGER NOT NULL CHECK (no_of_songs > 0),
            PRIMARY KEY (artist_id, event_id)
        )
        "#,
    ),
    (
        "sponsors_event",
        r#"
        CREATE TABLE IF NOT EXISTS sponsors_event (
            sponsor_id INTEGER NOT NULL REFERENCES sponsor(sponsor_id) ON DELETE CASCADE,
            event_id INTEGER NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
            amount REAL NOT NULL CHECK (amount > 0),
            PRIMARY KEY (sponsor_id, event_id)
        )
        "#,
    ),
    (
        "works_at",
        r#"
        CREATE TABLE IF NOT EXISTS works_at (
            staff_id INTEGER NOT NULL REFERENCES staff(staff_id) ON DELETE CASCADE,
            event_id INTEGER NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
            shift TEXT NOT NULL
                CHECK (shift IN ('FULL_DAY', 'MORNING', 'EVENING', 'NIGHT')),
            PRIMARY KEY (staff_id, event_id)
        )
        "#,
    ),
    (
        "attends",
        r#"
        CREATE TABLE IF NOT EXISTS attends (
            attendee_id INTEGER NOT NULL REFERENCES attendee(attendee_id) ON DELETE CASCADE,
            event_id INTEGER NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
            PRIMARY KEY (attendee_id, event_id)
        )
        "#,
    ),
    (
        "purchases",
        r#"
        CREATE TABLE IF NOT EXISTS purchases (
            ticket_id INTEGER PRIMARY KEY REFERENCES ticket(ticket_id) ON DELETE CASCADE,
            attendee_id INTEGER NOT NULL REFERENCES attendee(attendee_id) ON DELETE CASCADE,
            purchased_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_events_date ON events(date)",
    "CREATE INDEX IF NOT EXISTS idx_events_venue ON events(venue_id)",
    "CREATE INDEX IF NOT EXISTS idx_ticket_event_status ON ticket(event_id, status)",
    "CREATE INDEX IF NOT EXISTS idx_purchases_attendee ON purchases(attendee_id)",
];

const TRIGGERS: &[&str] = &[
    r#"
    CREATE TRIGGER IF NOT EXISTS purchases_require_available
    BEFORE INSERT ON purchases
    WHEN (SELECT status FROM ticket WHERE ticket_id = NEW.ticket_id) IS NOT 'AVAILABLE'
    BEGIN
        SELECT RAISE(ABORT, 'ticket is not available');
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS purchases_mark_sold
    AFTER INSERT ON purchases
    BEGIN
        UPDATE ticket SET status = 'SOLD' WHERE ticket_id = NEW.ticket_id;
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS purchases_release_ticket
    AFTER DELETE ON purchases
    BEGIN
        UPDATE ticket SET status = 'AVAILABLE' WHERE ticket_id = OLD.ticket_id;
    END
    "#,
];

/// Create all tables, indexes and triggers (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    for (name, sql) in TABLES {
        sqlx::query(sql).execute(pool).await?;
        debug!("Ensured table {}", name);
    }

    for sql in INDEXES.iter().chain(TRIGGERS.iter()) {
        sqlx::query(sql).execute(pool).await?;
    }

    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(pool)
        .await?;

    Ok(())
}

/// Names of all application tables, in creation order
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let pool = init_memory_database().await.expect("in-memory database");

        for table in table_names() {
            let exists: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(exists, 1, "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = init_memory_database().await.unwrap();
        create_schema(&pool).await.expect("second run should succeed");

        let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[tokio::test]
    async fn test_purchase_trigger_marks_ticket_sold() {
        let pool = init_memory_database().await.unwrap();

        sqlx::query(
            "INSERT INTO venue (name, venue_type, address, pincode, capacity, cost)
             VALUES ('Hall A', 'Hall', '1 Main St', '560001', 100, 500)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO events (name, date, start_time, end_time, budget, venue_id)
             VALUES ('Gala', '2030-01-01', '18:00:00', '22:00:00', 1000, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO ticket (event_id, ticket_type, seat_no, price) VALUES (1, 'VIP', 'VIP-001', 50)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO attendee (name, phone_no, email) VALUES ('Asha', '999', 'asha@example.com')",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO purchases (ticket_id, attendee_id) VALUES (1, 1)")
            .execute(&pool)
            .await
            .unwrap();

        let status: String = sqlx::query_scalar("SELECT status FROM ticket WHERE ticket_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, "SOLD");

        // Cancelling the purchase releases the seat
        sqlx::query("DELETE FROM purchases WHERE ticket_id = 1")
            .execute(&pool)
            .await
            .unwrap();
        let status: String = sqlx::query_scalar("SELECT status FROM ticket WHERE ticket_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, "AVAILABLE");
    }

    #[tokio::test]
    async fn test_purchase_trigger_rejects_sold_ticket() {
        let pool = init_memory_database().await.unwrap();

        for sql in [
            "INSERT INTO venue (name, venue_type, address, pincode, capacity, cost)
             VALUES ('Hall A', 'Hall', '1 Main St', '560001', 100, 500)",
            "INSERT INTO events (name, date, start_time, end_time, budget, venue_id)
             VALUES ('Gala', '2030-01-01', '18:00:00', '22:00:00', 1000, 1)",
            "INSERT INTO ticket (event_id, ticket_type, seat_no, price, status)
             VALUES (1, 'VIP', 'VIP-001', 50, 'SOLD')",
            "INSERT INTO attendee (name, phone_no, email) VALUES ('Asha', '999', 'asha@example.com')",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }

        let result = sqlx::query("INSERT INTO purchases (ticket_id, attendee_id) VALUES (1, 1)")
            .execute(&pool)
            .await;
        assert!(result.is_err(), "sold ticket must not be purchasable");
    }

    #[tokio::test]
    async fn test_venue_delete_restricted_while_hosting_events() {
        let pool = init_memory_database().await.unwrap();

        for sql in [
            "INSERT INTO venue (name, venue_type, address, pincode, capacity, cost)
             VALUES ('Hall A', 'Hall', '1 Main St', '560001', 100, 500)",
            "INSERT INTO events (name, date, start_time, end_time, budget, venue_id)
             VALUES ('Gala', '2030-01-01', '18:00:00', '22:00:00', 1000, 1)",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }

        let result = sqlx::query("DELETE FROM venue WHERE venue_id = 1")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }
}
