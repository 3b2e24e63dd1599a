//! Attendee registration and lookup

use super::parse_optional_text;
use crate::error::WriteOp;
use crate::models::{Attendee, AttendeeInput, Validate};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

fn attendee_from_row(row: &SqliteRow) -> Result<Attendee> {
    Ok(Attendee {
        attendee_id: row.try_get("attendee_id")?,
        name: row.try_get("name")?,
        phone_no: row.try_get("phone_no")?,
        email: row.try_get("email")?,
        gender: parse_optional_text(row, "gender")?,
        age: row.try_get("age")?,
    })
}

/// Register a customer, returning the new attendee id
pub async fn register_attendee(pool: &SqlitePool, input: AttendeeInput) -> Result<i64> {
    let input = input.validated()?;

    let result = sqlx::query(
        "INSERT INTO attendee (name, phone_no, email, gender, age) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&input.name)
    .bind(&input.phone_no)
    .bind(&input.email)
    .bind(input.gender.map(|g| g.as_str()))
    .bind(input.age)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Insert, "Attendee"))?;

    let attendee_id = result.last_insert_rowid();
    info!("Registered attendee {} ({})", attendee_id, input.name);
    Ok(attendee_id)
}

pub async fn get_attendee(pool: &SqlitePool, attendee_id: i64) -> Result<Attendee> {
    let row = sqlx::query(
        "SELECT attendee_id, name, phone_no, email, gender, age FROM attendee WHERE attendee_id = ?",
    )
    .bind(attendee_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => attendee_from_row(&row),
        None => Err(Error::NotFound(format!("Attendee {}", attendee_id))),
    }
}

/// Match an attendee id against the email given at registration
///
/// The email comparison ignores case and surrounding whitespace. Returns
/// `None` when either the id is unknown or the email does not match, so
/// callers cannot tell which half was wrong.
pub async fn find_for_login(
    pool: &SqlitePool,
    attendee_id: i64,
    email: &str,
) -> Result<Option<Attendee>> {
    let row = sqlx::query(
        r#"
        SELECT attendee_id, name, phone_no, email, gender, age
        FROM attendee
        WHERE attendee_id = ? AND lower(email) = lower(?)
        "#,
    )
    .bind(attendee_id)
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(attendee_from_row).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;
    use crate::models::Gender;

    fn input() -> AttendeeInput {
        AttendeeInput {
            name: "Meera Iyer".to_string(),
            phone_no: "9845012345".to_string(),
            email: "Meera@Example.com".to_string(),
            gender: Some(Gender::Female),
            age: Some(29),
        }
    }

    #[tokio::test]
    async fn test_register_and_load() {
        let pool = init_memory_database().await.unwrap();
        let id = register_attendee(&pool, input()).await.unwrap();

        let attendee = get_attendee(&pool, id).await.unwrap();
        assert_eq!(attendee.gender, Some(Gender::Female));
        assert_eq!(attendee.age, Some(29));
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let pool = init_memory_database().await.unwrap();
        let id = register_attendee(&pool, input()).await.unwrap();

        let found = find_for_login(&pool, id, " meera@example.COM ").await.unwrap();
        assert_eq!(found.map(|a| a.attendee_id), Some(id));

        assert!(find_for_login(&pool, id, "other@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(find_for_login(&pool, id + 1, "meera@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_register_without_optional_fields() {
        let pool = init_memory_database().await.unwrap();
        let mut bare = input();
        bare.gender = None;
        bare.age = None;
        let id = register_attendee(&pool, bare).await.unwrap();
        let attendee = get_attendee(&pool, id).await.unwrap();
        assert_eq!(attendee.gender, None);
    }
}
