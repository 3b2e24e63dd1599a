//! Seed helpers for repository unit tests

use sqlx::SqlitePool;

pub(crate) async fn seed_venue(pool: &SqlitePool, name: &str, capacity: i64) -> i64 {
    sqlx::query(
        "INSERT INTO venue (name, venue_type, address, country, pincode, capacity, cost)
         VALUES (?, 'Hall', '12 MG Road', 'India', '560001', ?, 2500)",
    )
    .bind(name)
    .bind(capacity)
    .execute(pool)
    .await
    .expect("seed venue")
    .last_insert_rowid()
}

pub(crate) async fn seed_event(pool: &SqlitePool, name: &str, date: &str, venue_id: i64) -> i64 {
    sqlx::query(
        "INSERT INTO events (name, date, status, start_time, end_time, budget, venue_id)
         VALUES (?, ?, 'Planned', '18:00:00', '22:00:00', 10000, ?)",
    )
    .bind(name)
    .bind(date)
    .bind(venue_id)
    .execute(pool)
    .await
    .expect("seed event")
    .last_insert_rowid()
}

pub(crate) async fn seed_artist(pool: &SqlitePool, name: &str, fee: f64) -> i64 {
    sqlx::query(
        "INSERT INTO artist (name, genre, phone_no, email, fee)
         VALUES (?, 'Jazz', '9000000000', 'artist@example.com', ?)",
    )
    .bind(name)
    .bind(fee)
    .execute(pool)
    .await
    .expect("seed artist")
    .last_insert_rowid()
}

pub(crate) async fn seed_sponsor(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO sponsor (name, industry) VALUES (?, 'Banking')")
        .bind(name)
        .execute(pool)
        .await
        .expect("seed sponsor")
        .last_insert_rowid()
}

pub(crate) async fn seed_staff(pool: &SqlitePool, name: &str, salary: Option<f64>) -> i64 {
    sqlx::query("INSERT INTO staff (name, role, salary) VALUES (?, 'Security', ?)")
        .bind(name)
        .bind(salary)
        .execute(pool)
        .await
        .expect("seed staff")
        .last_insert_rowid()
}

pub(crate) async fn seed_attendee(
    pool: &SqlitePool,
    name: &str,
    gender: Option<&str>,
    age: Option<i64>,
) -> i64 {
    sqlx::query(
        "INSERT INTO attendee (name, phone_no, email, gender, age)
         VALUES (?, '9876543210', 'guest@example.com', ?, ?)",
    )
    .bind(name)
    .bind(gender)
    .bind(age)
    .execute(pool)
    .await
    .expect("seed attendee")
    .last_insert_rowid()
}

pub(crate) async fn seed_ticket(
    pool: &SqlitePool,
    event_id: i64,
    ticket_type: &str,
    seat_no: &str,
    price: f64,
) -> i64 {
    sqlx::query("INSERT INTO ticket (event_id, ticket_type, seat_no, price) VALUES (?, ?, ?, ?)")
        .bind(event_id)
        .bind(ticket_type)
        .bind(seat_no)
        .bind(price)
        .execute(pool)
        .await
        .expect("seed ticket")
        .last_insert_rowid()
}

/// Record a purchase (and attendance) the way the portal does
pub(crate) async fn seed_purchase(pool: &SqlitePool, attendee_id: i64, ticket_id: i64) {
    sqlx::query("INSERT INTO purchases (ticket_id, attendee_id) VALUES (?, ?)")
        .bind(ticket_id)
        .bind(attendee_id)
        .execute(pool)
        .await
        .expect("seed purchase");
    sqlx::query(
        "INSERT OR IGNORE INTO attends (attendee_id, event_id)
         SELECT ?, event_id FROM ticket WHERE ticket_id = ?",
    )
    .bind(attendee_id)
    .bind(ticket_id)
    .execute(pool)
    .await
    .expect("seed attendance");
}
