//! Sponsor database operations

use super::expect_affected;
use crate::error::WriteOp;
use crate::models::{Sponsor, SponsorInput, Validate};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

fn sponsor_from_row(row: &SqliteRow) -> Result<Sponsor> {
    Ok(Sponsor {
        sponsor_id: row.try_get("sponsor_id")?,
        name: row.try_get("name")?,
        industry: row.try_get("industry")?,
        contact_person: row.try_get("contact_person")?,
        phone_no: row.try_get("phone_no")?,
        email: row.try_get("email")?,
    })
}

pub async fn create_sponsor(pool: &SqlitePool, input: SponsorInput) -> Result<i64> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        INSERT INTO sponsor (name, industry, contact_person, phone_no, email)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.industry)
    .bind(&input.contact_person)
    .bind(&input.phone_no)
    .bind(&input.email)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Insert, "Sponsor"))?;

    let sponsor_id = result.last_insert_rowid();
    info!("Created sponsor {} ({})", sponsor_id, input.name);
    Ok(sponsor_id)
}

pub async fn update_sponsor(pool: &SqlitePool, sponsor_id: i64, input: SponsorInput) -> Result<()> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        UPDATE sponsor
        SET name = ?, industry = ?, contact_person = ?, phone_no = ?, email = ?
        WHERE sponsor_id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.industry)
    .bind(&input.contact_person)
    .bind(&input.phone_no)
    .bind(&input.email)
    .bind(sponsor_id)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Update, "Sponsor"))?;

    expect_affected(result, "Sponsor", sponsor_id)?;
    info!("Updated sponsor {}", sponsor_id);
    Ok(())
}

pub async fn delete_sponsor(pool: &SqlitePool, sponsor_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM sponsor WHERE sponsor_id = ?")
        .bind(sponsor_id)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Delete, "Sponsor"))?;

    expect_affected(result, "Sponsor", sponsor_id)?;
    info!("Deleted sponsor {}", sponsor_id);
    Ok(())
}

pub async fn get_sponsor(pool: &SqlitePool, sponsor_id: i64) -> Result<Sponsor> {
    let row = sqlx::query(
        r#"
        SELECT sponsor_id, name, industry, contact_person, phone_no, email
        FROM sponsor
        WHERE sponsor_id = ?
        "#,
    )
    .bind(sponsor_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => sponsor_from_row(&row),
        None => Err(Error::NotFound(format!("Sponsor {}", sponsor_id))),
    }
}

pub async fn list_sponsors(pool: &SqlitePool) -> Result<Vec<Sponsor>> {
    let rows = sqlx::query(
        r#"
        SELECT sponsor_id, name, industry, contact_person, phone_no, email
        FROM sponsor
        ORDER BY name, sponsor_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(sponsor_from_row).collect()
}
