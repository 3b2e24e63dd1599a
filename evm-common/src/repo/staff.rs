//! Staff database operations

use super::{expect_affected, parse_text};
use crate::error::WriteOp;
use crate::models::{Staff, StaffInput, Validate};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

fn staff_from_row(row: &SqliteRow) -> Result<Staff> {
    Ok(Staff {
        staff_id: row.try_get("staff_id")?,
        name: row.try_get("name")?,
        role: parse_text(row, "role")?,
        phone_no: row.try_get("phone_no")?,
        email: row.try_get("email")?,
        salary: row.try_get("salary")?,
    })
}

pub async fn create_staff(pool: &SqlitePool, input: StaffInput) -> Result<i64> {
    let input = input.validated()?;

    let result = sqlx::query(
        r#"
        INSERT INTO staff (name, role, phone_no, email, salary)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(input.role.as_str())
    .bind(&input.phone_no)
    .bind(&input.email)
    .bind(input.salary)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Insert, "Staff member"))?;

    let staff_id = result.last_insert_rowid();
    info!("Created staff {} ({}, {})", staff_id, input.name, input.role);
    Ok(staff_id)
}

pub async fn update_staff(pool: &SqlitePool, staff_id: i64, input: StaffInput) -> Result<()> {
    let input = input.validated()?;

    let result = sqlx::query(
        "UPDATE staff SET name = ?, role = ?, phone_no = ?, email = ?, salary = ? WHERE staff_id = ?",
    )
    .bind(&input.name)
    .bind(input.role.as_str())
    .bind(&input.phone_no)
    .bind(&input.email)
    .bind(input.salary)
    .bind(staff_id)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, WriteOp::Update, "Staff member"))?;

    expect_affected(result, "Staff member", staff_id)?;
    info!("Updated staff {}", staff_id);
    Ok(())
}

pub async fn delete_staff(pool: &SqlitePool, staff_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM staff WHERE staff_id = ?")
        .bind(staff_id)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, WriteOp::Delete, "Staff member"))?;

    expect_affected(result, "Staff member", staff_id)?;
    info!("Deleted staff {}", staff_id);
    Ok(())
}

pub async fn get_staff(pool: &SqlitePool, staff_id: i64) -> Result<Staff> {
    let row = sqlx::query(
        "SELECT staff_id, name, role, phone_no, email, salary FROM staff WHERE staff_id = ?",
    )
    .bind(staff_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => staff_from_row(&row),
        None => Err(Error::NotFound(format!("Staff member {}", staff_id))),
    }
}

/// All staff grouped by role, then name
pub async fn list_staff(pool: &SqlitePool) -> Result<Vec<Staff>> {
    let rows = sqlx::query(
        r#"
        SELECT staff_id, name, role, phone_no, email, salary
        FROM staff
        ORDER BY role, name, staff_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(staff_from_row).collect()
}
