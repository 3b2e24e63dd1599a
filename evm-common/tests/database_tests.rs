//! On-disk database initialization

use evm_common::config::ensure_directory_exists;
use evm_common::db::{init_database, SCHEMA_VERSION};
use chrono::{NaiveDate, NaiveTime};
use evm_common::models::{AttendeeInput, EventInput, EventStatus, TicketBatch, VenueInput, VenueType};
use evm_common::repo::{attendees, events, tickets, venues};
use evm_common::Error;
use tempfile::TempDir;

fn venue() -> VenueInput {
    VenueInput {
        name: "Harbour Stage".to_string(),
        venue_type: VenueType::Outdoor,
        address: "1 Pier Road".to_string(),
        country: None,
        pincode: "400001".to_string(),
        capacity: 800,
        cost: 12000.0,
    }
}

#[tokio::test]
async fn test_database_created_in_missing_folder() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("root");
    ensure_directory_exists(&root).unwrap();

    let db_path = root.join("evm.db");
    let pool = init_database(&db_path).await.unwrap();
    assert!(db_path.exists());

    let version: i64 = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);

    let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("evm.db");

    let pool = init_database(&db_path).await.unwrap();
    let id = venues::create_venue(&pool, venue()).await.unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    let loaded = venues::get_venue(&pool, id).await.unwrap();
    assert_eq!(loaded.name, "Harbour Stage");
    assert_eq!(loaded.capacity, 800);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_sell_each_seat_once() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("evm.db")).await.unwrap();

    let venue_id = venues::create_venue(&pool, venue()).await.unwrap();
    let event_id = events::create_event(
        &pool,
        EventInput {
            name: "Harbour Nights".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            status: EventStatus::Planned,
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            budget: 50000.0,
            venue_id,
        },
    )
    .await
    .unwrap();
    let seats = tickets::create_tickets(
        &pool,
        event_id,
        TicketBatch {
            ticket_type: "General".to_string(),
            price: 300.0,
            count: 3,
            seat_prefix: None,
        },
    )
    .await
    .unwrap();

    let mut buyers = Vec::new();
    for n in 0..8 {
        let id = attendees::register_attendee(
            &pool,
            AttendeeInput {
                name: format!("Buyer {}", n),
                phone_no: format!("90000000{:02}", n),
                email: format!("buyer{}@example.com", n),
                gender: None,
                age: None,
            },
        )
        .await
        .unwrap();
        buyers.push(id);
    }

    let mut handles = Vec::new();
    for seat in &seats {
        for &buyer in &buyers {
            let pool = pool.clone();
            let ticket_id = seat.ticket_id;
            handles.push(tokio::spawn(async move {
                (ticket_id, tickets::purchase_ticket(&pool, buyer, ticket_id).await)
            }));
        }
    }

    let mut sold = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            (ticket_id, Ok(purchased)) => {
                assert_eq!(purchased.ticket_id, ticket_id);
                sold.push(ticket_id);
            }
            (_, Err(Error::Conflict(_))) => {}
            (ticket_id, Err(other)) => panic!("ticket {}: unexpected error {:?}", ticket_id, other),
        }
    }

    sold.sort_unstable();
    let mut expected: Vec<i64> = seats.iter().map(|t| t.ticket_id).collect();
    expected.sort_unstable();
    assert_eq!(sold, expected);

    let purchases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(purchases, 3);
    assert!(tickets::available_tickets(&pool, event_id).await.unwrap().is_empty());
}
