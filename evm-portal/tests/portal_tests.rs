//! Integration tests for evm-portal API endpoints
//!
//! Covers registration and login, session handling, public browsing and
//! ticket booking over a fresh in-memory database per test.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use evm_common::db::init_memory_database;
use evm_common::models::{
    ArtistAssignment, ArtistInput, EventInput, EventStatus, TicketBatch, VenueInput, VenueType,
};
use evm_common::repo::{artists, assignments, events, tickets, venues};
use evm_portal::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

async fn setup() -> (SqlitePool, Router) {
    let db = init_memory_database().await.expect("Should open in-memory database");
    let app = build_router(AppState::new(db.clone(), 30));
    (db, app)
}

/// Seed one planned event with two General tickets; returns (event, ticket ids)
async fn seed_event(db: &SqlitePool, date: &str, status: EventStatus) -> (i64, Vec<i64>) {
    let venue = venues::create_venue(
        db,
        VenueInput {
            name: "Open Air Park".to_string(),
            venue_type: VenueType::Outdoor,
            address: "1 Park Lane".to_string(),
            country: None,
            pincode: "110001".to_string(),
            capacity: 500,
            cost: 1000.0,
        },
    )
    .await
    .unwrap();

    let event = events::create_event(
        db,
        EventInput {
            name: "Sunset Sessions".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status,
            start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            budget: 8000.0,
            venue_id: venue,
        },
    )
    .await
    .unwrap();

    let created = tickets::create_tickets(
        db,
        event,
        TicketBatch {
            ticket_type: "General".to_string(),
            price: 250.0,
            count: 2,
            seat_prefix: None,
        },
    )
    .await
    .unwrap();

    (event, created.iter().map(|t| t.ticket_id).collect())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, value)
}

/// Register an attendee and return (attendee_id, token)
async fn register(app: &Router, email: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/attendees",
        None,
        Some(json!({
            "name": "Asha Rao",
            "phone_no": "9876543210",
            "email": email,
            "gender": "F",
            "age": 27
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["attendee_id"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_db, app) = setup().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["module"], "evm-portal");
}

// =============================================================================
// Accounts and sessions
// =============================================================================

#[tokio::test]
async fn test_register_logs_in() {
    let (_db, app) = setup().await;
    let (attendee_id, token) = register(&app, "asha@example.com").await;

    let (status, me) = send(&app, "GET", "/api/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["attendee_id"], attendee_id);
    assert_eq!(me["gender"], "F");
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let (_db, app) = setup().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/attendees",
        None,
        Some(json!({ "name": "X", "phone_no": "1", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_login_and_logout() {
    let (_db, app) = setup().await;
    let (attendee_id, _) = register(&app, "asha@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/session",
        None,
        Some(json!({ "attendee_id": attendee_id, "email": "wrong@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/session",
        None,
        Some(json!({ "attendee_id": attendee_id, "email": "ASHA@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", "/api/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let (_db, app) = setup().await;
    let (status, _) = send(&app, "GET", "/api/me/tickets", Some("not-a-uuid"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/me/tickets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Browsing
// =============================================================================

#[tokio::test]
async fn test_browse_lists_only_future_planned_events() {
    let (db, app) = setup().await;
    let (upcoming, _) = seed_event(&db, "2099-01-01", EventStatus::Planned).await;
    seed_event(&db, "2000-01-01", EventStatus::Planned).await;
    seed_event(&db, "2099-02-01", EventStatus::Cancelled).await;

    let (status, list) = send(&app, "GET", "/api/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["event_id"], upcoming);
    assert_eq!(list[0]["venue_name"], "Open Air Park");
}

#[tokio::test]
async fn test_event_details() {
    let (db, app) = setup().await;
    let (event, _) = seed_event(&db, "2099-01-01", EventStatus::Planned).await;

    let artist = artists::create_artist(
        &db,
        ArtistInput {
            name: "Nina".to_string(),
            genre: "Jazz".to_string(),
            country: None,
            phone_no: "555".to_string(),
            email: "nina@example.com".to_string(),
            fee: 3000.0,
        },
    )
    .await
    .unwrap();
    assignments::assign_artist(
        &db,
        event,
        ArtistAssignment {
            artist_id: artist,
            no_of_songs: 8,
        },
    )
    .await
    .unwrap();

    let (status, details) = send(&app, "GET", &format!("/api/events/{}", event), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["name"], "Sunset Sessions");
    assert_eq!(details["venue_type"], "Outdoor");
    assert_eq!(details["artists"][0]["name"], "Nina");
    assert_eq!(details["tickets"][0]["ticket_type"], "General");
    assert_eq!(details["tickets"][0]["available"], 2);

    let (status, _) = send(&app, "GET", "/api/events/404", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Booking
// =============================================================================

#[tokio::test]
async fn test_ticket_list_requires_login() {
    let (db, app) = setup().await;
    let (event, _) = seed_event(&db, "2099-01-01", EventStatus::Planned).await;
    let uri = format!("/api/events/{}/tickets", event);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, token) = register(&app, "asha@example.com").await;
    let (status, list) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_book_ticket_flow() {
    let (db, app) = setup().await;
    let (event, ticket_ids) = seed_event(&db, "2099-01-01", EventStatus::Planned).await;
    let (_, asha) = register(&app, "asha@example.com").await;
    let (_, ravi) = register(&app, "ravi@example.com").await;

    let book_uri = format!("/api/tickets/{}/book", ticket_ids[0]);
    let (status, purchased) = send(&app, "POST", &book_uri, Some(&asha), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(purchased["seat_no"], "GEN-001");
    assert_eq!(purchased["event_name"], "Sunset Sessions");

    // Seat already taken
    let (status, body) = send(&app, "POST", &book_uri, Some(&ravi), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (_, available) = send(
        &app,
        "GET",
        &format!("/api/events/{}/tickets", event),
        Some(&ravi),
        None,
    )
    .await;
    assert_eq!(available.as_array().unwrap().len(), 1);

    let (status, mine) = send(&app, "GET", "/api/me/tickets", Some(&asha), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (_, theirs) = send(&app, "GET", "/api/me/tickets", Some(&ravi), None).await;
    assert!(theirs.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "POST", "/api/tickets/9999/book", Some(&asha), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_book_cancelled_event() {
    let (db, app) = setup().await;
    let (_, ticket_ids) = seed_event(&db, "2099-01-01", EventStatus::Cancelled).await;
    let (_, token) = register(&app, "asha@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/tickets/{}/book", ticket_ids[0]),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
