//! Artist database operations

use super::expect_affected;
use crate::error::WriteOp;
use crate::models::{Artist, ArtistInput, Validate};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        artist_id: row.try_get("artist_id")?,
        name: row.try_get("name")?,
        genre: row.try_get("genre")?,
        country: row.try_get("country")?,
        phone_no: row.try_get("phone_no")?,
        email: row.try_get("email")?,
        fee: row.try_get("fee")?,
    })
}

/// Save a new artist, returning its id
pub async fn create_artist(pool: &SqlitePool, input: ArtistInput) -> Result<i64> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        INSERT INTO artist (name, genre, country, phone_no, email, fee)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.genre)
    .bind(&input.country)
    .bind(&input.phone_no)
    .bind(&input.email)
    .bind(input.fee)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Insert, "Artist"))?;

    let artist_id = result.last_insert_rowid();
    info!("Created artist {} ({})", artist_id, input.name);
    Ok(artist_id)
}

pub async fn update_artist(pool: &SqlitePool, artist_id: i64, input: ArtistInput) -> Result<()> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        UPDATE artist
        SET name = ?, genre = ?, country = ?, phone_no = ?, email = ?, fee = ?
        WHERE artist_id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.genre)
    .bind(&input.country)
    .bind(&input.phone_no)
    .bind(&input.email)
    .bind(input.fee)
    .bind(artist_id)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Update, "Artist"))?;

    expect_affected(result, "Artist", artist_id)?;
    info!("Updated artist {}", artist_id);
    Ok(())
}

/// Delete an artist and their performance assignments
pub async fn delete_artist(pool: &SqlitePool, artist_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM artist WHERE artist_id = ?")
        .bind(artist_id)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Delete, "Artist"))?;

    expect_affected(result, "Artist", artist_id)?;
    info!("Deleted artist {}", artist_id);
    Ok(())
}

pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> Result<Artist> {
    let row = sqlx::query(
        r#"
        SELECT artist_id, name, genre, country, phone_no, email, fee
        FROM artist
        WHERE artist_id = ?
        "#,
    )
    .bind(artist_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => artist_from_row(&row),
        None => Err(Error::NotFound(format!("Artist {}", artist_id))),
    }
}

pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        r#"
        SELECT artist_id, name, genre, country, phone_no, email, fee
        FROM artist
        ORDER BY name, artist_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(artist_from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn input() -> ArtistInput {
        ArtistInput {
            name: "Lata Rao".to_string(),
            genre: "Classical".to_string(),
            country: Some("India".to_string()),
            phone_no: "9811111111".to_string(),
            email: "lata@example.com".to_string(),
            fee: 40000.0,
        }
    }

    #[tokio::test]
    async fn test_save_update_and_load_artist() {
        let pool = init_memory_database().await.unwrap();
        let id = create_artist(&pool, input()).await.expect("create artist");

        let mut changed = input();
        changed.fee = 45000.0;
        update_artist(&pool, id, changed).await.expect("update artist");

        let artist = get_artist(&pool, id).await.expect("load artist");
        assert_eq!(artist.name, "Lata Rao");
        assert_eq!(artist.fee, 45000.0);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_insert() {
        let pool = init_memory_database().await.unwrap();
        let mut bad = input();
        bad.email = "not-an-email".to_string();
        assert!(matches!(
            create_artist(&pool, bad).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(list_artists(&pool).await.unwrap().is_empty());
    }
}
